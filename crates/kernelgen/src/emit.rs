//! C rendering of resolved metric sets.
//!
//! For each set the source file receives one register array per non-empty
//! block and an `i915_oa_config` struct. With sysfs output enabled, an `id`
//! attribute accessor per set and an aggregate test config loader follow.

use oa_metrics::{Chipset, MetricSet, RegisterCategory, RegisterConfigBlock};

use crate::codegen::{Codegen, INDENT};

/// License and provenance banner at the top of both artifacts.
pub const BANNER: &str = "/*
 * Autogenerated file by GPU Top : https://github.com/rib/gputop
 * DO NOT EDIT manually!
 *
 *
 * Copyright (c) 2015 Intel Corporation
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the \"Software\"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.  IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
 * IN THE SOFTWARE.
 *
 */

";

const TEST_CONFIG: &str = "dev_priv->perf.oa.test_config";

/// Emission switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Also emit sysfs accessors and the test config loader.
    pub sysfs: bool,
}

/// Name of the register array holding a block of `category` for a set.
#[must_use]
pub fn array_name(category: RegisterCategory, perf_name_lc: &str) -> String {
    let prefix = match category {
        RegisterCategory::Noa => "mux_config",
        RegisterCategory::Oa => "b_counter_config",
        RegisterCategory::Flex => "flex_eu_config",
    };
    format!("{prefix}_{perf_name_lc}")
}

/// Name of the test config loader function for a chipset.
#[must_use]
pub fn loader_name(chipset: &Chipset) -> String {
    format!("i915_perf_load_test_config_{}", chipset.lower())
}

/// Renders the complete header and source artifacts.
pub fn emit(
    sets: &[MetricSet],
    chipset: &Chipset,
    options: EmitOptions,
    c: &mut Codegen,
    h: &mut Codegen,
) {
    h.line(BANNER);
    h.line(&format!("#ifndef __I915_OA_{}_H__\n", chipset.upper()));
    h.line(&format!("#define __I915_OA_{}_H__\n\n", chipset.upper()));

    c.line(BANNER);
    if options.sysfs {
        c.line("#include <linux/sysfs.h>");
        c.line("\n");
    }
    c.line("#include \"i915_drv.h\"\n");
    c.line(&format!("#include \"i915_oa_{}.h\"\n", chipset.lower()));

    for set in sets {
        for category in RegisterCategory::ALL {
            emit_register_array(c, set, set.block(category));
        }
        emit_config(c, set);
    }

    if options.sysfs {
        emit_sysfs(c, h, sets, chipset);
    }

    h.line("#endif\n");
}

fn emit_register_array(c: &mut Codegen, set: &MetricSet, block: &RegisterConfigBlock) {
    if block.is_empty() {
        return;
    }

    c.line(&format!(
        "\nstatic const struct i915_oa_reg {}[] = {{",
        array_name(block.category, &set.perf_name_lc)
    ));
    c.indent(INDENT);
    for entry in &block.entries {
        c.line(&format!(
            "{{ _MMIO(0x{:x}), 0x{:08x} }},",
            entry.address, entry.value
        ));
    }
    c.outdent(INDENT);
    c.line("};");
}

/// Pointer and length expressions for a block, `NULL`/`0` when empty.
fn regs_and_len(set: &MetricSet, category: RegisterCategory) -> (String, String) {
    if set.block(category).is_empty() {
        ("NULL".to_string(), "0".to_string())
    } else {
        let name = array_name(category, &set.perf_name_lc);
        (name.clone(), format!("ARRAY_SIZE({name})"))
    }
}

fn emit_config(c: &mut Codegen, set: &MetricSet) {
    let (mux, mux_len) = regs_and_len(set, RegisterCategory::Noa);
    let (b_counter, b_counter_len) = regs_and_len(set, RegisterCategory::Oa);
    let (flex, flex_len) = regs_and_len(set, RegisterCategory::Flex);

    c.line(&format!(
        "\nstatic const struct i915_oa_config config_{} = {{",
        set.perf_name_lc
    ));
    c.indent(INDENT);
    c.line(&format!(".uuid = \"{}\",", set.guid));
    c.line(".id = 1,");
    c.line("\n");
    c.line(&format!(".mux_regs = {mux},"));
    c.line(&format!(".mux_regs_len = {mux_len},"));
    c.line("\n");
    c.line(&format!(".b_counter_regs = {b_counter},"));
    c.line(&format!(".b_counter_regs_len = {b_counter_len},"));
    c.line("\n");
    c.line(&format!(".flex_regs = {flex},"));
    c.line(&format!(".flex_regs_len = {flex_len},"));
    c.line("\n");
    c.line(".sysfs_metric = {");
    c.indent(INDENT);
    c.line(&format!(".name = \"{}\",", set.guid));
    c.outdent(INDENT);
    c.line("},");
    c.outdent(INDENT);
    c.line("};");
}

fn emit_sysfs(c: &mut Codegen, h: &mut Codegen, sets: &[MetricSet], chipset: &Chipset) {
    for set in sets {
        c.line("\n");
        c.line("static ssize_t");
        c.line(&format!(
            "show_{}_id(struct device *kdev, struct device_attribute *attr, char *buf)",
            set.perf_name_lc
        ));
        c.line("{");
        c.indent(INDENT);
        c.line("return sprintf(buf, \"1\\n\");");
        c.outdent(INDENT);
        c.line("}");
    }

    let loader = loader_name(chipset);
    h.line(&format!(
        "extern void {loader}(struct drm_i915_private *dev_priv);"
    ));
    h.line("\n");

    c.line("\n");
    c.line("void");
    c.line(&format!("{loader}(struct drm_i915_private *dev_priv)"));
    c.line("{");
    c.indent(INDENT);

    for set in sets {
        let (mux, mux_len) = regs_and_len(set, RegisterCategory::Noa);
        let (b_counter, b_counter_len) = regs_and_len(set, RegisterCategory::Oa);
        let (flex, flex_len) = regs_and_len(set, RegisterCategory::Flex);

        c.line(&format!("strncpy({TEST_CONFIG}.uuid,"));
        c.indent(INDENT);
        c.line(&format!("\"{}\",", set.guid));
        c.line("UUID_STRING_LEN);");
        c.outdent(INDENT);
        c.line(&format!("{TEST_CONFIG}.id = 1;"));
        c.line("\n");
        c.line(&format!("{TEST_CONFIG}.mux_regs = {mux};"));
        c.line(&format!("{TEST_CONFIG}.mux_regs_len = {mux_len};"));
        c.line("\n");
        c.line(&format!("{TEST_CONFIG}.b_counter_regs = {b_counter};"));
        c.line(&format!("{TEST_CONFIG}.b_counter_regs_len = {b_counter_len};"));
        c.line("\n");
        c.line(&format!("{TEST_CONFIG}.flex_regs = {flex};"));
        c.line(&format!("{TEST_CONFIG}.flex_regs_len = {flex_len};"));
        c.line("\n");
        c.line(&format!("{TEST_CONFIG}.sysfs_metric.name = \"{}\";", set.guid));
        c.line(&format!("{TEST_CONFIG}.sysfs_metric.attrs = {TEST_CONFIG}.attrs;"));
        c.line("\n");
        c.line(&format!("{TEST_CONFIG}.attrs[0] = &{TEST_CONFIG}.sysfs_metric_id.attr;"));
        c.line("\n");
        c.line(&format!("{TEST_CONFIG}.sysfs_metric_id.attr.name = \"id\";"));
        c.line(&format!("{TEST_CONFIG}.sysfs_metric_id.attr.mode = 0444;"));
        c.line(&format!(
            "{TEST_CONFIG}.sysfs_metric_id.show = show_{}_id;",
            set.perf_name_lc
        ));
    }

    c.outdent(INDENT);
    c.line("}");
}

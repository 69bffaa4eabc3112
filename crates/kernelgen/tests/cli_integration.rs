//! Integration tests for the i915-perf-kernelgen CLI.

use clap as _;
use kernelgen as _;
use oa_metrics::{hw_config_hash, RegisterCategory, RegisterConfigBlock, RegisterEntry};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

const GUID: &str = "2f01b241-7014-42a7-9eb6-a925cad3daba";

const METRICS: &str = r#"<?xml version="1.0"?>
<metrics>
  <set name="Metric set TestOa" symbol_name="TestOa" chipset="XYZ">
    <register_config type="NOA">
      <register type="NOA" address="0x9840" value="0x00000140"/>
    </register_config>
  </set>
  <set name="Render Metrics Basic" symbol_name="RenderBasic" chipset="XYZ"/>
</metrics>
"#;

fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("i915-perf-kernelgen")
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn registry_with_test_oa() -> String {
    let mut block = RegisterConfigBlock::empty(RegisterCategory::Noa);
    block.entries.push(RegisterEntry {
        address: 0x9840,
        value: 0x140,
        category: RegisterCategory::Noa,
    });
    format!(
        r#"<guids><guid id="{GUID}" chipset="xyz" config_hash="{}"/></guids>"#,
        hw_config_hash(&[block])
    )
}

fn run(dir: &Path, chipset: &str, registry: &str, extra: &[&str]) -> Output {
    let metrics = create_temp_file(dir, "oa-xyz.xml", METRICS);
    let guids = create_temp_file(dir, "guids.xml", registry);

    Command::new(binary_path())
        .arg(&metrics)
        .arg("--guids")
        .arg(&guids)
        .args(["--chipset", chipset])
        .arg("--c-out")
        .arg(dir.join("i915_oa_xyz.c"))
        .arg("--h-out")
        .arg(dir.join("i915_oa_xyz.h"))
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run i915-perf-kernelgen")
}

#[test]
fn generates_source_and_header() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(temp_dir.path(), "xyz", &registry_with_test_oa(), &[]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let source = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.c")).unwrap();
    assert!(source.contains("#include \"i915_oa_xyz.h\""));
    assert!(source.contains("static const struct i915_oa_reg mux_config_test_oa[] = {"));
    assert!(source.contains("\t{ _MMIO(0x9840), 0x00000140 },"));
    assert!(source.contains(&format!("\t.uuid = \"{GUID}\",")));
    assert!(!source.contains("render_basic"));

    let header = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.h")).unwrap();
    assert!(header.contains("#ifndef __I915_OA_XYZ_H__"));
    assert!(header.trim_end().ends_with("#endif"));
}

#[test]
fn registry_miss_warns_and_succeeds() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(temp_dir.path(), "xyz", "<guids/>", &[]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: No GUID found for metric set XYZ, Metric set TestOa"));

    let source = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.c")).unwrap();
    assert!(!source.contains("mux_config_test_oa"));
}

#[test]
fn missing_register_config_warns_with_display_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(
        temp_dir.path(),
        "xyz",
        &registry_with_test_oa(),
        &["--no-whitelist"],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing register configuration for set \"Render Metrics Basic\""));

    let source = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.c")).unwrap();
    assert!(source.contains("config_test_oa"));
}

#[test]
fn blacklist_excludes_default_set() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(
        temp_dir.path(),
        "xyz",
        &registry_with_test_oa(),
        &["--blacklist", "TestOa"],
    );

    assert!(output.status.success());
    let source = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.c")).unwrap();
    assert!(!source.contains("config_test_oa"));
}

#[test]
fn sysfs_output_includes_loader() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(temp_dir.path(), "xyz", &registry_with_test_oa(), &["--sysfs"]);

    assert!(output.status.success());
    let source = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.c")).unwrap();
    assert!(source.contains("#include <linux/sysfs.h>"));
    assert!(source.contains("show_test_oa_id(struct device *kdev"));
    assert!(source.contains("i915_perf_load_test_config_xyz(struct drm_i915_private *dev_priv)"));

    let header = fs::read_to_string(temp_dir.path().join("i915_oa_xyz.h")).unwrap();
    assert!(header.contains("extern void i915_perf_load_test_config_xyz"));
}

#[test]
fn chipset_mismatch_fails_without_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(temp_dir.path(), "bdw", &registry_with_test_oa(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "));
    assert!(!temp_dir.path().join("i915_oa_xyz.c").exists());
    assert!(!temp_dir.path().join("i915_oa_xyz.h").exists());
}

#[test]
fn conflicting_whitelist_flags_are_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = run(
        temp_dir.path(),
        "xyz",
        &registry_with_test_oa(),
        &["--whitelist", "TestOa", "--no-whitelist"],
    );

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("i915_oa_xyz.c").exists());
}

#[test]
fn missing_input_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let status = Command::new(binary_path())
        .arg(temp_dir.path().join("absent.xml"))
        .arg("--guids")
        .arg(temp_dir.path().join("absent-guids.xml"))
        .args(["--chipset", "xyz", "--c-out", "x.c", "--h-out", "x.h"])
        .current_dir(temp_dir.path())
        .status()
        .expect("failed to run i915-perf-kernelgen");

    assert!(!status.success());
}

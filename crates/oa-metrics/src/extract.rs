//! Metric set extraction from metric-description documents.
//!
//! Every `set` element of a document must belong to the target chipset: the
//! documents are partitioned per platform and a foreign set means the wrong
//! file was passed in. Register configs are captured as attribute text and
//! only decoded by [`decode_configs`] once their set has been selected.

use roxmltree::Node;
use tracing::{debug, trace};

use crate::error::{MetricsError, Result};
use crate::model::{
    Chipset, MetricSetSource, RawRegister, RawRegisterConfig, RegisterCategory,
    RegisterConfigBlock, RegisterEntry,
};

/// Extracts all metric sets of a document in source order.
///
/// # Errors
///
/// Returns [`MetricsError::Xml`] for malformed documents,
/// [`MetricsError::ChipsetMismatch`] for a set of another chipset and
/// [`MetricsError::MissingAttribute`] for a set without `symbol_name`.
pub fn extract_sets(document: &str, text: &str, chipset: &Chipset) -> Result<Vec<MetricSetSource>> {
    let doc = roxmltree::Document::parse(text).map_err(|source| MetricsError::Xml {
        document: document.to_string(),
        source,
    })?;

    let sets = doc
        .descendants()
        .filter(|n| n.has_tag_name("set"))
        .map(|node| extract_set(node, chipset))
        .collect::<Result<Vec<_>>>()?;

    debug!(document, sets = sets.len(), chipset = %chipset, "extracted metric sets");
    Ok(sets)
}

fn extract_set(node: Node<'_, '_>, chipset: &Chipset) -> Result<MetricSetSource> {
    let symbol_name = node.attribute("symbol_name");
    let declared = node.attribute("chipset");

    if declared != Some(chipset.upper()) {
        return Err(MetricsError::ChipsetMismatch {
            set: symbol_name.unwrap_or("<unnamed>").to_string(),
            expected: chipset.upper().to_string(),
            found: declared.map(str::to_string),
        });
    }

    let symbol_name = symbol_name.ok_or(MetricsError::MissingAttribute {
        element: "set",
        attribute: "symbol_name",
    })?;

    let configs: Vec<_> = node
        .children()
        .filter(|n| n.has_tag_name("register_config"))
        .map(capture_config)
        .collect();

    trace!(set = symbol_name, configs = configs.len(), "captured set");

    Ok(MetricSetSource {
        symbol_name: symbol_name.to_string(),
        display_name: node.attribute("name").unwrap_or(symbol_name).to_string(),
        configs,
    })
}

fn attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

fn capture_config(node: Node<'_, '_>) -> RawRegisterConfig {
    RawRegisterConfig {
        category: attribute(node, "type"),
        id: attribute(node, "id"),
        priority: attribute(node, "priority"),
        availability: attribute(node, "availability"),
        registers: node
            .children()
            .filter(|n| n.has_tag_name("register"))
            .map(|reg| RawRegister {
                category: attribute(reg, "type"),
                address: attribute(reg, "address"),
                value: attribute(reg, "value"),
            })
            .collect(),
    }
}

/// Decodes every register config of a selected set, in source order.
///
/// # Errors
///
/// Propagates the first error returned by [`decode_config`].
pub fn decode_configs(source: &MetricSetSource) -> Result<Vec<RegisterConfigBlock>> {
    source
        .configs
        .iter()
        .map(|config| decode_config(&source.symbol_name, config))
        .collect()
}

/// Decodes one captured `register_config` element.
///
/// # Errors
///
/// Returns [`MetricsError::UnknownCategory`] for a `type` outside
/// `NOA`/`OA`/`FLEX`, [`MetricsError::CategoryMismatch`] when a register's
/// type differs from its block, [`MetricsError::InvalidHex`] for malformed
/// addresses or values, and [`MetricsError::MissingAttribute`] for absent
/// `type`, `address` or `value` attributes.
pub fn decode_config(set: &str, config: &RawRegisterConfig) -> Result<RegisterConfigBlock> {
    let category = decode_category(set, config.category.as_deref(), "register_config")?;

    let entries = config
        .registers
        .iter()
        .map(|reg| {
            let register = decode_category(set, reg.category.as_deref(), "register")?;
            let address = hex_attribute(set, reg.address.as_deref(), "address")?;
            if register != category {
                return Err(MetricsError::CategoryMismatch {
                    set: set.to_string(),
                    block: category,
                    register,
                    address,
                });
            }
            Ok(RegisterEntry {
                address,
                value: hex_attribute(set, reg.value.as_deref(), "value")?,
                category,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RegisterConfigBlock {
        category,
        id: config.id.clone().unwrap_or_else(|| "0".to_string()),
        priority: config.priority.clone().unwrap_or_else(|| "0".to_string()),
        availability: config.availability.clone(),
        entries,
    })
}

fn decode_category(
    set: &str,
    text: Option<&str>,
    element: &'static str,
) -> Result<RegisterCategory> {
    let text = text.ok_or(MetricsError::MissingAttribute {
        element,
        attribute: "type",
    })?;
    RegisterCategory::from_attr(text).ok_or_else(|| MetricsError::UnknownCategory {
        set: set.to_string(),
        value: text.to_string(),
    })
}

fn hex_attribute(set: &str, text: Option<&str>, attribute: &'static str) -> Result<u32> {
    let text = text.ok_or(MetricsError::MissingAttribute {
        element: "register",
        attribute,
    })?;
    parse_hex(text).ok_or_else(|| MetricsError::InvalidHex {
        set: set.to_string(),
        attribute,
        value: text.to_string(),
    })
}

/// Parses hexadecimal text with an optional `0x` prefix.
#[must_use]
pub fn parse_hex(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

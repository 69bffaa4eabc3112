//! Content digests shared with the GUID registry.
//!
//! Both functions must stay byte-compatible with the registry tooling that
//! produced the `config_hash` attributes, otherwise every lookup misses.

use std::fmt::Write as _;

use md5::{Digest, Md5};

use crate::model::RegisterConfigBlock;

/// Hashes the register programming of a metric set.
///
/// Each block contributes `id:priority:availability:` followed by one
/// `0xAAAAAAAA:0xVVVVVVVV,` record per register, in source order.
#[must_use]
pub fn hw_config_hash(configs: &[RegisterConfigBlock]) -> String {
    let mut text = String::new();
    for config in configs {
        let availability = config.availability.as_deref().unwrap_or("");
        let _ = write!(text, "{}:{}:{availability}:", config.id, config.priority);
        for entry in &config.entries {
            let _ = write!(text, "0x{:08X}:0x{:08X},", entry.address, entry.value);
        }
    }
    md5_hex(&text)
}

/// Scopes a config hash to a chipset so identical programs on different
/// platforms resolve to different registry keys.
#[must_use]
pub fn chipset_derive_hash(chipset: &str, hash: &str) -> String {
    md5_hex(&format!("{chipset}_{hash}"))
}

fn md5_hex(text: &str) -> String {
    format!("{:x}", Md5::digest(text.as_bytes()))
}

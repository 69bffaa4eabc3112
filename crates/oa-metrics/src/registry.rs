//! GUID registry loading.
//!
//! The registry maps a chipset-scoped content hash of a metric set's register
//! programming to the stable GUID the driver advertises for it.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MetricsError, Result};
use crate::hash::chipset_derive_hash;

/// Read-only mapping from derived hash key to GUID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidRegistry {
    guids: HashMap<String, String>,
}

impl GuidRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a registry document.
    ///
    /// Every `guid` element carrying a `config_hash` attribute contributes one
    /// entry keyed by [`chipset_derive_hash`] of its `chipset` and
    /// `config_hash`. Entries without `config_hash` are skipped. A later entry
    /// with the same key replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Xml`] for malformed documents and
    /// [`MetricsError::MissingAttribute`] when a hashed entry lacks its
    /// `chipset` or `id`.
    pub fn parse(document: &str, text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text).map_err(|source| MetricsError::Xml {
            document: document.to_string(),
            source,
        })?;

        let mut registry = Self::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("guid")) {
            let Some(config_hash) = node.attribute("config_hash") else {
                continue;
            };
            let chipset = node
                .attribute("chipset")
                .ok_or(MetricsError::MissingAttribute {
                    element: "guid",
                    attribute: "chipset",
                })?;
            let id = node.attribute("id").ok_or(MetricsError::MissingAttribute {
                element: "guid",
                attribute: "id",
            })?;

            registry.insert(&chipset_derive_hash(chipset, config_hash), id);
        }

        debug!(document, entries = registry.len(), "loaded GUID registry");
        Ok(registry)
    }

    /// Inserts an entry, replacing any previous GUID for the key.
    pub fn insert(&mut self, key: &str, guid: &str) {
        if let Some(previous) = self.guids.insert(key.to_string(), guid.to_string()) {
            debug!(key, previous = %previous, guid, "registry key redefined");
        }
    }

    /// Looks up the GUID for a derived hash key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.guids.get(key).map(String::as_str)
    }

    /// Number of keyed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guids.len()
    }

    /// Returns true if no entry was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guids.is_empty()
    }
}

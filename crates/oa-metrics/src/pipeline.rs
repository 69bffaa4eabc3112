//! End-to-end resolution: extraction, selection and GUID resolution over an
//! explicit, immutable configuration.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::extract::extract_sets;
use crate::model::Chipset;
use crate::registry::GuidRegistry;
use crate::resolve::{ConfigResolver, Outcome, Resolution};
use crate::select::{Admission, Selector, Whitelist};

/// Selection criteria for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Target chipset.
    pub chipset: Chipset,
    /// Narrowing rule applied before the blacklist.
    pub whitelist: Whitelist,
    /// Names never generated.
    pub blacklist: HashSet<String>,
}

impl PipelineConfig {
    /// Creates a configuration with the default whitelist and no blacklist.
    #[must_use]
    pub fn new(chipset: Chipset) -> Self {
        Self {
            chipset,
            whitelist: Whitelist::Default,
            blacklist: HashSet::new(),
        }
    }

    /// Replaces the whitelist.
    #[must_use]
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Replaces the blacklist.
    #[must_use]
    pub fn with_blacklist(mut self, blacklist: HashSet<String>) -> Self {
        self.blacklist = blacklist;
        self
    }
}

/// A metric-description document held in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'d> {
    /// Name used in diagnostics, usually the file path.
    pub name: &'d str,
    /// XML text.
    pub text: &'d str,
}

/// Resolves metric-description documents into emit-ready metric sets.
///
/// Documents are processed in the given order and sets keep their source
/// order, so the output order is stable for identical inputs. Every set is
/// chipset-checked up front; register configs are decoded only for sets that
/// pass selection. Warnings are reported in the source order of the sets
/// they concern.
///
/// # Errors
///
/// Any fatal [`crate::MetricsError`] from extraction or resolution aborts the
/// run; recoverable skips are returned in [`Resolution::warnings`].
pub fn resolve_documents(
    config: &PipelineConfig,
    registry: &GuidRegistry,
    documents: &[Document<'_>],
) -> Result<Resolution> {
    let mut candidates = Vec::new();
    for document in documents {
        candidates.extend(extract_sets(document.name, document.text, &config.chipset)?);
    }

    let selector = Selector::new(&config.chipset, &config.whitelist, &config.blacklist);
    let resolver = ConfigResolver::new(&config.chipset, registry);
    let mut resolution = Resolution::default();

    for candidate in candidates {
        let outcome = match selector.admit(candidate) {
            Admission::Filtered => continue,
            Admission::Skipped(warning) => Outcome::Skipped(warning),
            Admission::Selected(set) => resolver.resolve(set)?,
        };
        match outcome {
            Outcome::Resolved(set) => resolution.sets.push(set),
            Outcome::Skipped(warning) => resolution.warnings.push(warning),
        }
    }

    debug!(
        resolved = resolution.sets.len(),
        skipped = resolution.warnings.len(),
        "resolved metric sets"
    );
    Ok(resolution)
}

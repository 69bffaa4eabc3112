//! Metric set selection.
//!
//! Selection narrows first (default name, explicit whitelist, or nothing when
//! the whitelist is disabled) and then excludes blacklisted names from what
//! remains, so a name present in both lists is always dropped.

use std::collections::HashSet;

use tracing::trace;

use crate::model::{Chipset, MetricSetSource};
use crate::warning::Warning;

/// Which names survive the narrowing step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Whitelist {
    /// Only the chipset's default set ([`Chipset::default_set_name`]).
    #[default]
    Default,
    /// Only the listed names; replaces the default.
    Explicit(HashSet<String>),
    /// Every candidate of the chipset.
    Disabled,
}

impl Whitelist {
    /// Builds an explicit whitelist from a space separated list.
    ///
    /// A list without any name keeps the default narrowing.
    #[must_use]
    pub fn from_names(names: &str) -> Self {
        let names = split_names(names);
        if names.is_empty() {
            Self::Default
        } else {
            Self::Explicit(names)
        }
    }
}

/// Splits a space separated name list.
#[must_use]
pub fn split_names(names: &str) -> HashSet<String> {
    names.split_whitespace().map(str::to_string).collect()
}

/// Applies whitelist and blacklist rules for one chipset.
#[derive(Debug, Clone)]
pub struct Selector<'c> {
    chipset: &'c Chipset,
    whitelist: &'c Whitelist,
    blacklist: &'c HashSet<String>,
}

/// Verdict of [`Selector::admit`] for a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Excluded by the whitelist or blacklist; not reported.
    Filtered,
    /// Wanted but unusable; reported and skipped.
    Skipped(Warning),
    /// Passed on to resolution.
    Selected(MetricSetSource),
}

/// Sets kept by the selector plus the warnings raised for dropped ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected sets in input order.
    pub sets: Vec<MetricSetSource>,
    /// Recoverable skips.
    pub warnings: Vec<Warning>,
}

impl<'c> Selector<'c> {
    /// Creates a selector over borrowed selection criteria.
    #[must_use]
    pub const fn new(
        chipset: &'c Chipset,
        whitelist: &'c Whitelist,
        blacklist: &'c HashSet<String>,
    ) -> Self {
        Self {
            chipset,
            whitelist,
            blacklist,
        }
    }

    /// Returns true if the name passes both the narrowing step and the
    /// blacklist.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        let narrowed = match self.whitelist {
            Whitelist::Default => name == self.chipset.default_set_name(),
            Whitelist::Explicit(names) => names.contains(name),
            Whitelist::Disabled => true,
        };
        narrowed && !self.blacklist.contains(name)
    }

    /// Decides the fate of one candidate.
    #[must_use]
    pub fn admit(&self, candidate: MetricSetSource) -> Admission {
        if !self.accepts(&candidate.symbol_name) {
            trace!(set = %candidate.symbol_name, "filtered out");
            return Admission::Filtered;
        }
        if candidate.configs.is_empty() {
            return Admission::Skipped(Warning::MissingRegisterConfig {
                set: candidate.display_name,
            });
        }
        Admission::Selected(candidate)
    }

    /// Filters candidates, dropping sets without any register configuration
    /// with a warning.
    #[must_use]
    pub fn select(&self, candidates: Vec<MetricSetSource>) -> Selection {
        let mut selection = Selection::default();
        for candidate in candidates {
            match self.admit(candidate) {
                Admission::Filtered => {}
                Admission::Skipped(warning) => selection.warnings.push(warning),
                Admission::Selected(set) => selection.sets.push(set),
            }
        }
        selection
    }
}

//! Register config validation and GUID resolution.

use tracing::debug;

use crate::error::{MetricsError, Result};
use crate::extract::decode_configs;
use crate::hash::{chipset_derive_hash, hw_config_hash};
use crate::model::{Chipset, MetricSet, MetricSetSource, RegisterCategory, RegisterConfigBlock};
use crate::naming::underscore;
use crate::registry::GuidRegistry;
use crate::warning::Warning;

/// Result of resolving one selected set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The set validated and its GUID was found.
    Resolved(MetricSet),
    /// The set cannot be emitted; the warning says why.
    Skipped(Warning),
}

/// Resolved sets plus the warnings for skipped ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved sets in selection order.
    pub sets: Vec<MetricSet>,
    /// Recoverable skips, in the source order of the sets they concern.
    pub warnings: Vec<Warning>,
}

/// Validates register config cardinality and assigns GUIDs.
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'r> {
    chipset: &'r Chipset,
    registry: &'r GuidRegistry,
}

impl<'r> ConfigResolver<'r> {
    /// Creates a resolver for one chipset against a loaded registry.
    #[must_use]
    pub const fn new(chipset: &'r Chipset, registry: &'r GuidRegistry) -> Self {
        Self { chipset, registry }
    }

    /// Decodes and resolves a single selected set.
    ///
    /// # Errors
    ///
    /// Returns the decoding errors of [`crate::extract::decode_config`],
    /// [`MetricsError::NoaCardinality`] unless the set has exactly one NOA
    /// block and [`MetricsError::OptionalCardinality`] when it has more than
    /// one OA or FLEX block. A registry miss is not an error: it yields
    /// [`Outcome::Skipped`].
    pub fn resolve(&self, source: MetricSetSource) -> Result<Outcome> {
        let configs = decode_configs(&source)?;
        let MetricSetSource {
            symbol_name,
            display_name,
            ..
        } = source;

        let Buckets { noa, oa, flex } = partition(&symbol_name, &configs)?;

        let hw_config_hash = hw_config_hash(&configs);
        let key = chipset_derive_hash(self.chipset.lower(), &hw_config_hash);

        let Some(guid) = self.registry.lookup(&key) else {
            return Ok(Outcome::Skipped(Warning::MissingGuid {
                chipset: self.chipset.upper().to_string(),
                set: display_name,
                key,
            }));
        };

        debug!(set = %symbol_name, guid, "resolved metric set");

        let perf_name_lc = underscore(&symbol_name);
        Ok(Outcome::Resolved(MetricSet {
            perf_name: perf_name_lc.to_uppercase(),
            perf_name_lc,
            name: symbol_name,
            chipset_lower: self.chipset.lower().to_string(),
            guid: guid.to_string(),
            hw_config_hash,
            noa,
            oa: oa.unwrap_or_else(|| RegisterConfigBlock::empty(RegisterCategory::Oa)),
            flex: flex.unwrap_or_else(|| RegisterConfigBlock::empty(RegisterCategory::Flex)),
        }))
    }

    /// Resolves every selected set in order, stopping at the first fatal
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`Self::resolve`].
    pub fn resolve_all(&self, sources: Vec<MetricSetSource>) -> Result<Resolution> {
        let mut resolution = Resolution::default();
        for source in sources {
            match self.resolve(source)? {
                Outcome::Resolved(set) => resolution.sets.push(set),
                Outcome::Skipped(warning) => resolution.warnings.push(warning),
            }
        }
        Ok(resolution)
    }
}

struct Buckets {
    noa: RegisterConfigBlock,
    oa: Option<RegisterConfigBlock>,
    flex: Option<RegisterConfigBlock>,
}

/// Buckets blocks by category and checks their counts.
fn partition(set: &str, configs: &[RegisterConfigBlock]) -> Result<Buckets> {
    let mut buckets: [Vec<&RegisterConfigBlock>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for config in configs {
        let slot = match config.category {
            RegisterCategory::Noa => 0,
            RegisterCategory::Oa => 1,
            RegisterCategory::Flex => 2,
        };
        buckets[slot].push(config);
    }

    let [noa, oa, flex] = buckets;

    let [noa_block] = noa.as_slice() else {
        return Err(MetricsError::NoaCardinality {
            set: set.to_string(),
            count: noa.len(),
        });
    };

    Ok(Buckets {
        noa: (*noa_block).clone(),
        oa: at_most_one(set, RegisterCategory::Oa, &oa)?,
        flex: at_most_one(set, RegisterCategory::Flex, &flex)?,
    })
}

fn at_most_one(
    set: &str,
    category: RegisterCategory,
    blocks: &[&RegisterConfigBlock],
) -> Result<Option<RegisterConfigBlock>> {
    match blocks {
        [] => Ok(None),
        [block] => Ok(Some((*block).clone())),
        _ => Err(MetricsError::OptionalCardinality {
            set: set.to_string(),
            category,
            count: blocks.len(),
        }),
    }
}

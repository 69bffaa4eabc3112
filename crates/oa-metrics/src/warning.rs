use std::fmt;

/// A recoverable condition: the affected metric set is skipped and the run
/// continues with the remaining sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The set has no `register_config` element at all.
    MissingRegisterConfig {
        /// Display name of the set.
        set: String,
    },
    /// The registry holds no GUID for the set's derived hash key.
    MissingGuid {
        /// Target chipset (upper case).
        chipset: String,
        /// Display name of the set.
        set: String,
        /// Key the registry was queried with.
        key: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRegisterConfig { set } => {
                write!(f, "Missing register configuration for set \"{set}\" (SKIPPING)")
            }
            Self::MissingGuid { chipset, set, key } => {
                write!(
                    f,
                    "No GUID found for metric set {chipset}, {set} (expected key = {key}) (SKIPPING)"
                )
            }
        }
    }
}

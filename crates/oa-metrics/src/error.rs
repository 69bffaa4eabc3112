use thiserror::Error;

use crate::model::RegisterCategory;

/// Fatal conditions raised while loading, extracting or resolving metric sets.
///
/// Every variant aborts the run: the input violates the schema contract and
/// no meaningful output can be produced for it. Recoverable conditions are
/// reported as [`crate::Warning`] values instead.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The document is not well-formed XML.
    #[error("malformed XML in {document}: {source}")]
    Xml {
        /// Name of the document being parsed.
        document: String,
        /// Underlying parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// A `set` element belongs to a different chipset than the one requested.
    #[error("metric set \"{set}\" declares chipset {found:?}, expected {expected}")]
    ChipsetMismatch {
        /// Symbol name of the offending set.
        set: String,
        /// Target chipset (upper case).
        expected: String,
        /// Chipset attribute found on the element, if any.
        found: Option<String>,
    },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute \"{attribute}\"")]
    MissingAttribute {
        /// Element tag name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },

    /// A register address or value is not valid hexadecimal.
    #[error("metric set \"{set}\": invalid hexadecimal {attribute} {value:?}")]
    InvalidHex {
        /// Symbol name of the enclosing set.
        set: String,
        /// Attribute holding the value.
        attribute: &'static str,
        /// Raw attribute text.
        value: String,
    },

    /// A `type` attribute is outside `NOA`, `OA`, `FLEX`.
    #[error("metric set \"{set}\": unknown register config type {value:?}")]
    UnknownCategory {
        /// Symbol name of the enclosing set.
        set: String,
        /// Raw attribute text.
        value: String,
    },

    /// A register's category disagrees with its enclosing block.
    #[error(
        "metric set \"{set}\": {register} register at 0x{address:x} inside a {block} register config"
    )]
    CategoryMismatch {
        /// Symbol name of the enclosing set.
        set: String,
        /// Category of the enclosing block.
        block: RegisterCategory,
        /// Category declared by the register.
        register: RegisterCategory,
        /// Register address.
        address: u32,
    },

    /// A set does not carry exactly one NOA block.
    #[error("metric set \"{set}\" has {count} NOA register configs, expected exactly 1")]
    NoaCardinality {
        /// Symbol name of the set.
        set: String,
        /// Number of NOA blocks found.
        count: usize,
    },

    /// A set carries more than one OA or FLEX block.
    #[error("metric set \"{set}\" has {count} {category} register configs, expected at most 1")]
    OptionalCardinality {
        /// Symbol name of the set.
        set: String,
        /// Category that was over-populated.
        category: RegisterCategory,
        /// Number of blocks found.
        count: usize,
    },
}

/// Result alias for fallible metric-set operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

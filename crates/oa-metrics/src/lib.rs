//! Metric-set resolution pipeline for i915 OA register configurations.

/// Fatal error taxonomy.
pub mod error;
pub use error::{MetricsError, Result};

/// Register, config block and metric set data model.
pub mod model;
pub use model::{
    Chipset, MetricSet, MetricSetSource, RawRegister, RawRegisterConfig, RegisterCategory,
    RegisterConfigBlock, RegisterEntry,
};

/// Recoverable skip diagnostics.
pub mod warning;
pub use warning::Warning;

/// Content digests shared with the GUID registry.
pub mod hash;
pub use hash::{chipset_derive_hash, hw_config_hash};

/// Symbol casing for generated C identifiers.
pub mod naming;
pub use naming::underscore;

/// GUID registry loading and lookup.
pub mod registry;
pub use registry::GuidRegistry;

/// Metric set extraction and deferred register config decoding.
pub mod extract;
pub use extract::{decode_config, decode_configs, extract_sets, parse_hex};

/// Whitelist and blacklist selection.
pub mod select;
pub use select::{split_names, Admission, Selection, Selector, Whitelist};

/// Cardinality validation and GUID assignment.
pub mod resolve;
pub use resolve::{ConfigResolver, Outcome, Resolution};

/// End-to-end resolution over an explicit configuration.
pub mod pipeline;
pub use pipeline::{resolve_documents, Document, PipelineConfig};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;

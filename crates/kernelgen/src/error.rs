use std::io;
use std::path::PathBuf;

use oa_metrics::MetricsError;
use thiserror::Error;

/// Fatal conditions that abort generation with a non-zero exit status.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An input document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the input.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A generated artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The inputs violate a structural invariant.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

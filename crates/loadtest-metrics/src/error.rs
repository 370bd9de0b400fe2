//! Error types for metrics persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving or loading a metrics report.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The metrics file could not be read or written.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The metrics file is not a valid report.
    #[error("JSON error on {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

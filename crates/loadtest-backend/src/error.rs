//! Error types for document backends.

use thiserror::Error;

/// Errors a backend can report for a single operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend rejected or timed out a write.
    #[error("write to {collection}/{doc_id} failed: {reason}")]
    Write {
        collection: String,
        doc_id: String,
        reason: String,
    },

    /// The backend rejected or timed out a read.
    #[error("read of {collection}/{doc_id} failed: {reason}")]
    Read {
        collection: String,
        doc_id: String,
        reason: String,
    },
}

impl BackendError {
    /// Build a write failure for the given document.
    pub fn write(collection: &str, doc_id: &str, reason: impl Into<String>) -> Self {
        BackendError::Write {
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Build a read failure for the given document.
    pub fn read(collection: &str, doc_id: &str, reason: impl Into<String>) -> Self {
        BackendError::Read {
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
            reason: reason.into(),
        }
    }
}

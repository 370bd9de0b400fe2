//! The backend trait consumed by the load generator.

use crate::document::{DocumentSnapshot, Fields};
use crate::error::BackendError;
use async_trait::async_trait;

/// Minimal read/write capability of a document store.
///
/// Implementations must be safe to call concurrently from many simulated
/// users; each call is timed independently by the caller.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Merge `fields` into the document at `collection/doc_id`.
    ///
    /// Fields already stored but absent from `fields` are preserved. Nested
    /// maps are merged recursively. A missing document is created.
    async fn write(&self, collection: &str, doc_id: &str, fields: Fields)
        -> Result<(), BackendError>;

    /// Fetch the document at `collection/doc_id`.
    ///
    /// A missing document is not an error: it yields a snapshot with
    /// `exists == false`.
    async fn read(&self, collection: &str, doc_id: &str) -> Result<DocumentSnapshot, BackendError>;
}

//! Operation selection policy.
//!
//! Decides, for one iteration of one simulated user, which collection and
//! document to touch and whether the iteration writes. Collection choice and
//! the shared-document trial come from the caller's random source; the write
//! decision depends on the iteration index alone.

use crate::config::RunParams;
use rand::Rng;

/// Number of document ids shared by all users.
pub const SHARED_DOC_POOL_SIZE: u32 = 6;

/// Name of the `index`-th collection of the pool.
pub fn collection_name(index: u32) -> String {
    format!("coll_{index}")
}

/// Document id owned by one user for one iteration.
///
/// User ids and iteration indices are plain integers, so the `_doc_`
/// separator keeps ids distinct across all `(user, iteration)` pairs.
pub fn private_document_id(user_id: u32, iteration: u32) -> String {
    format!("user_{user_id}_doc_{iteration}")
}

/// The `index`-th id of the shared pool.
pub fn shared_document_id(index: u32) -> String {
    format!("shared_doc_{index}")
}

/// Writes happen on two of every five iterations.
pub fn is_write_iteration(iteration: u32) -> bool {
    matches!(iteration % 5, 0 | 2)
}

/// Address of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentTarget {
    pub collection: String,
    pub document_id: String,
}

impl std::fmt::Display for DocumentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.document_id)
    }
}

/// What one iteration does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    pub target: DocumentTarget,
    pub is_shared: bool,
    pub do_write: bool,
}

/// Stateless policy parameterised by the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct OperationPolicy {
    collection_pool_size: u32,
    shared_doc_probability: f64,
}

impl OperationPolicy {
    pub fn new(params: &RunParams) -> Self {
        Self {
            collection_pool_size: params.collection_pool_size,
            shared_doc_probability: params.shared_doc_probability,
        }
    }

    /// Plan iteration `iteration` of user `user_id`.
    pub fn decide<R: Rng + ?Sized>(&self, user_id: u32, iteration: u32, rng: &mut R) -> OperationPlan {
        let collection = collection_name(rng.random_range(0..self.collection_pool_size.max(1)));

        let is_shared = rng.random_bool(self.shared_doc_probability.clamp(0.0, 1.0));
        let document_id = if is_shared {
            shared_document_id(rng.random_range(0..SHARED_DOC_POOL_SIZE))
        } else {
            private_document_id(user_id, iteration)
        };

        OperationPlan {
            target: DocumentTarget {
                collection,
                document_id,
            },
            is_shared,
            do_write: is_write_iteration(iteration),
        }
    }
}

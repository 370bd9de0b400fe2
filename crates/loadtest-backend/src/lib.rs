//! Document store facade for load testing.
//!
//! The load generator only needs two capabilities from the database under
//! test: a merge-style write of a structured document and a point read that
//! reports whether the document exists. [`DocumentBackend`] captures exactly
//! that, so the engine can drive any store that can be wrapped behind it.
//!
//! [`MemoryBackend`] is an in-process implementation with optional simulated
//! latency and fault injection. It backs the CLI when no external store is
//! wired in, and the test suites of the other loadtest crates.
//!
//! # Example
//!
//! ```ignore
//! use loadtest_backend::{DocumentBackend, MemoryBackend};
//! use serde_json::json;
//!
//! let backend = MemoryBackend::new();
//! let fields = json!({ "user": 1 }).as_object().cloned().unwrap();
//! backend.write("coll_0", "user_1_doc_0", fields).await?;
//! let snapshot = backend.read("coll_0", "user_1_doc_0").await?;
//! assert!(snapshot.exists);
//! ```

pub mod backend;
pub mod document;
pub mod error;
pub mod memory;

pub use backend::DocumentBackend;
pub use document::{
    is_server_timestamp, merge_fields, resolve_server_timestamps, server_timestamp,
    DocumentSnapshot, Fields, SERVER_TIMESTAMP_KEY,
};
pub use error::BackendError;
pub use memory::{FaultConfig, MemoryBackend, SimulatedLatency};

//! Load generation engine for document stores.
//!
//! A run drives `users` simulated users concurrently against a
//! [`DocumentBackend`](loadtest_backend::DocumentBackend). Each user walks
//! through `iterations_per_user` iterations; every iteration asks the
//! [`OperationPolicy`] for a target, performs a timed merge-write on two out
//! of every five iterations, always performs a timed read, and paces itself
//! with random delays. Samples flow into a shared
//! [`MetricsRecorder`](loadtest_metrics::MetricsRecorder).
//!
//! # Example
//!
//! ```ignore
//! use loadtest_backend::MemoryBackend;
//! use loadtest_engine::{LoadTestDriver, RunParams};
//! use std::sync::Arc;
//!
//! let params = RunParams::default().with_users(100).with_iterations_per_user(10);
//! let driver = LoadTestDriver::new(params, Arc::new(MemoryBackend::new()))?;
//! let outcome = driver.run().await;
//! println!("{}", loadtest_metrics::format_summary(&outcome.report));
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod policy;
pub mod simulator;

pub use config::{DelayRange, RunParams};
pub use driver::{LoadTestDriver, RunOutcome};
pub use error::ConfigError;
pub use policy::{
    collection_name, is_write_iteration, private_document_id, shared_document_id,
    DocumentTarget, OperationPlan, OperationPolicy, SHARED_DOC_POOL_SIZE,
};
pub use simulator::{build_payload, user_rng, SimulatorState, UserSimulator};

//! Document store load testing harness.
//!
//! Simulates many concurrent users performing randomized merge-writes and
//! point reads against a document store, records per-operation latency and
//! error counts, and persists the results for later reporting.
//!
//! # Crates
//!
//! - `loadtest_backend` - the document store facade and an in-process
//!   simulated backend
//! - `loadtest_engine` - run parameters, operation policy, simulated users
//!   and the concurrency driver
//! - `loadtest_metrics` - latency/error aggregation, the metrics file format
//!   and its text renderings
//!
//! # CLI Usage
//!
//! ```bash
//! # 2400 users x 20 iterations with the default pacing
//! docstore-loadtest run --output metrics.json
//!
//! # Small reproducible run with simulated backend latency and faults
//! docstore-loadtest run --users 50 --iterations-per-user 10 \
//!   --delay-range 0,10ms --backend-latency 2ms,20ms \
//!   --write-failure-rate 0.01 --seed 42
//!
//! # Render a metrics file
//! docstore-loadtest report metrics.json --outlier-threshold 0.12
//! ```

pub mod config;
pub mod loadtest;

pub use loadtest::{run_load_test, run_report, BackendArgs, ReportArgs, RunArgs};

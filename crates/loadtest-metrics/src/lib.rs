//! Metrics aggregation for document store load tests.
//!
//! Simulated users record one [`OperationRecord`] per measured backend call
//! through a cloneable [`MetricsRecorder`]. Records travel over an unbounded
//! channel to the single [`MetricsAggregator`] that owns the buckets, so no
//! simulated user ever waits on another to record a sample.
//!
//! Once every user is done the aggregator is drained into a
//! [`MetricsSnapshot`], combined with the run parameters into a
//! [`MetricsReport`] and persisted as JSON:
//!
//! ```text
//! {
//!   "params":    { "users": .., "iterations_per_user": .., ... },
//!   "errors":    { "write": .., "read": .. },
//!   "latencies": { "write": [..], "read": [..], "write_first": [..], "read_first": [..] }
//! }
//! ```

pub mod aggregator;
pub mod error;
pub mod record;
pub mod report;
pub mod summary;
pub mod table;

pub use aggregator::{metrics_channel, MetricsAggregator, MetricsRecorder, MetricsSnapshot};
pub use error::MetricsError;
pub use record::{OperationKind, OperationRecord, Outcome, Phase};
pub use report::{load_report, save_report, ErrorCounts, Latencies, MetricsReport, ParamsSnapshot};
pub use summary::{format_mean, format_summary, BucketStats};
pub use table::{format_table, DEFAULT_OUTLIER_THRESHOLD_SECS};

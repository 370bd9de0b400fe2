//! Persisted metrics report.

use crate::aggregator::MetricsSnapshot;
use crate::error::MetricsError;
use crate::record::{OperationKind, Phase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Run parameters as captured in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsSnapshot {
    pub users: u32,
    pub iterations_per_user: u32,
    #[serde(alias = "collection_pool")]
    pub collection_pool_size: u32,
    #[serde(alias = "use_shared_doc_prob")]
    pub shared_doc_probability: f64,
    /// Pacing delay bounds in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// Failed operation counts per kind.
///
/// Zero counters are omitted on disk, so a clean run persists `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounts {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub write: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub read: u64,
}

impl ErrorCounts {
    pub fn get(&self, kind: OperationKind) -> u64 {
        match kind {
            OperationKind::Write => self.write,
            OperationKind::Read => self.read,
        }
    }

    pub fn increment(&mut self, kind: OperationKind) {
        match kind {
            OperationKind::Write => self.write += 1,
            OperationKind::Read => self.read += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.write + self.read
    }
}

/// Latency samples in seconds, one ordered sequence per bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Latencies {
    #[serde(default)]
    pub write: Vec<f64>,
    #[serde(default)]
    pub read: Vec<f64>,
    #[serde(default)]
    pub write_first: Vec<f64>,
    #[serde(default)]
    pub read_first: Vec<f64>,
}

impl Latencies {
    pub fn bucket(&self, kind: OperationKind, phase: Phase) -> &[f64] {
        match (kind, phase) {
            (OperationKind::Write, Phase::Normal) => &self.write,
            (OperationKind::Read, Phase::Normal) => &self.read,
            (OperationKind::Write, Phase::FirstIteration) => &self.write_first,
            (OperationKind::Read, Phase::FirstIteration) => &self.read_first,
        }
    }

    pub fn bucket_mut(&mut self, kind: OperationKind, phase: Phase) -> &mut Vec<f64> {
        match (kind, phase) {
            (OperationKind::Write, Phase::Normal) => &mut self.write,
            (OperationKind::Read, Phase::Normal) => &mut self.read,
            (OperationKind::Write, Phase::FirstIteration) => &mut self.write_first,
            (OperationKind::Read, Phase::FirstIteration) => &mut self.read_first,
        }
    }

    /// All samples of `kind`, first-iteration samples included.
    pub fn all_of(&self, kind: OperationKind) -> impl Iterator<Item = f64> + '_ {
        self.bucket(kind, Phase::Normal)
            .iter()
            .chain(self.bucket(kind, Phase::FirstIteration))
            .copied()
    }

    pub fn total_samples(&self) -> usize {
        self.write.len() + self.read.len() + self.write_first.len() + self.read_first.len()
    }
}

/// End-of-run artifact consumed by the reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub params: ParamsSnapshot,
    #[serde(default)]
    pub errors: ErrorCounts,
    pub latencies: Latencies,
    /// Total wall-clock duration of the run in seconds.
    #[serde(default)]
    pub elapsed_secs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl MetricsReport {
    /// Assemble the report of a finished run.
    pub fn new(params: ParamsSnapshot, snapshot: MetricsSnapshot, elapsed: Duration) -> Self {
        Self {
            params,
            errors: snapshot.errors,
            latencies: snapshot.latencies,
            elapsed_secs: elapsed.as_secs_f64(),
            completed_at: Some(Utc::now()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs.max(0.0))
    }
}

/// Write `report` as pretty-printed JSON.
pub fn save_report(path: &Path, report: &MetricsReport) -> Result<(), MetricsError> {
    let io_err = |source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| MetricsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(writer).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!("Metrics saved to {}", path.display());
    Ok(())
}

/// Read a report previously written by [`save_report`].
pub fn load_report(path: &Path) -> Result<MetricsReport, MetricsError> {
    let file = File::open(path).map_err(|source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| MetricsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

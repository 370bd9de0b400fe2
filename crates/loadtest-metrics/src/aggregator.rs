//! Channel-backed accumulation of operation records.

use crate::record::{OperationKind, OperationRecord, Outcome, Phase};
use crate::report::{ErrorCounts, Latencies};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Create a connected recorder/aggregator pair.
pub fn metrics_channel() -> (MetricsRecorder, MetricsAggregator) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MetricsRecorder { tx }, MetricsAggregator { rx })
}

/// Cheap, cloneable handle used by simulated users to record samples.
///
/// Every call is a single non-blocking channel send, so records from
/// different users interleave freely without any shared lock.
#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    tx: UnboundedSender<OperationRecord>,
}

impl MetricsRecorder {
    /// Record a measured operation.
    pub fn record(&self, record: OperationRecord) {
        if self.tx.send(record).is_err() {
            warn!(
                "Metrics aggregator dropped, discarding {} {:?} sample",
                record.kind, record.outcome
            );
        }
    }

    /// Append a latency sample to the `(kind, phase)` bucket.
    pub fn record_latency(&self, kind: OperationKind, phase: Phase, latency: Duration) {
        self.record(OperationRecord::success(kind, phase, latency));
    }

    /// Count one failed operation of `kind`.
    pub fn record_error(&self, kind: OperationKind) {
        self.record(OperationRecord::failure(kind, Phase::Normal, Duration::ZERO));
    }
}

/// Immutable view of everything recorded during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub errors: ErrorCounts,
    pub latencies: Latencies,
}

impl MetricsSnapshot {
    fn apply(&mut self, record: OperationRecord) {
        match record.outcome {
            Outcome::Success => self
                .latencies
                .bucket_mut(record.kind, record.phase)
                .push(record.latency.as_secs_f64()),
            Outcome::Failure => self.errors.increment(record.kind),
        }
    }
}

/// Sole owner of the metric buckets.
#[derive(Debug)]
pub struct MetricsAggregator {
    rx: UnboundedReceiver<OperationRecord>,
}

impl MetricsAggregator {
    /// Drain every pending record into a snapshot.
    ///
    /// Must only be called once all simulated users are done; records sent
    /// after this point are discarded.
    pub fn snapshot(mut self) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::default();
        let mut drained = 0u64;

        while let Ok(record) = self.rx.try_recv() {
            snapshot.apply(record);
            drained += 1;
        }

        debug!("Aggregated {} operation records", drained);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_bucketed_by_kind_and_phase() {
        let (recorder, aggregator) = metrics_channel();

        recorder.record_latency(
            OperationKind::Write,
            Phase::FirstIteration,
            Duration::from_millis(30),
        );
        recorder.record_latency(OperationKind::Write, Phase::Normal, Duration::from_millis(10));
        recorder.record_latency(OperationKind::Read, Phase::Normal, Duration::from_millis(5));
        recorder.record_latency(OperationKind::Read, Phase::Normal, Duration::from_millis(7));
        recorder.record_error(OperationKind::Read);
        drop(recorder);

        let snapshot = aggregator.snapshot();

        assert_eq!(snapshot.latencies.write_first, vec![0.03]);
        assert_eq!(snapshot.latencies.write, vec![0.01]);
        assert_eq!(snapshot.latencies.read, vec![0.005, 0.007]);
        assert!(snapshot.latencies.read_first.is_empty());
        assert_eq!(snapshot.errors.read, 1);
        assert_eq!(snapshot.errors.write, 0);
    }

    #[test]
    fn test_failures_do_not_produce_samples() {
        let (recorder, aggregator) = metrics_channel();

        recorder.record(OperationRecord::failure(
            OperationKind::Write,
            Phase::FirstIteration,
            Duration::from_millis(100),
        ));
        drop(recorder);

        let snapshot = aggregator.snapshot();

        assert_eq!(snapshot.errors.write, 1);
        assert_eq!(snapshot.latencies.total_samples(), 0);
    }

    #[test]
    fn test_recording_after_aggregator_dropped_is_harmless() {
        let (recorder, aggregator) = metrics_channel();
        drop(aggregator);

        recorder.record_error(OperationKind::Write);
    }

    #[test]
    fn test_empty_snapshot() {
        let (recorder, aggregator) = metrics_channel();
        drop(recorder);

        assert_eq!(aggregator.snapshot(), MetricsSnapshot::default());
    }
}

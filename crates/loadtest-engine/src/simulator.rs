//! One simulated user.

use crate::config::RunParams;
use crate::policy::{DocumentTarget, OperationPolicy};
use loadtest_backend::{server_timestamp, DocumentBackend, Fields};
use loadtest_metrics::{MetricsRecorder, OperationKind, OperationRecord, Phase};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Lifecycle of a simulated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    Idle,
    /// Executing the given zero-based iteration.
    Iterating(u32),
    Done,
}

/// Random source of one user.
///
/// With a base seed the stream depends only on `(seed, user_id)`, so a run
/// can be replayed; without one it is drawn from OS entropy.
pub fn user_rng(seed: Option<u64>, user_id: u32) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(
            seed.wrapping_add(u64::from(user_id).wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15)),
        ),
        None => StdRng::from_os_rng(),
    }
}

/// Merge-write payload for one iteration.
pub fn build_payload<R: Rng + ?Sized>(user_id: u32, iteration: u32, rng: &mut R) -> Fields {
    let payload = json!({
        "user": user_id,
        "iteration": iteration,
        "value": rng.random_range(1..=100),
        "timestamp": server_timestamp(),
        "structure": {
            "nested": {
                "field1": format!("val_{}", rng.random_range(1..=999)),
                "field2": rng.random::<f64>(),
            }
        }
    });

    match payload {
        Value::Object(fields) => fields,
        _ => Fields::new(),
    }
}

/// Drives one user through all of its iterations.
pub struct UserSimulator {
    user_id: u32,
    params: Arc<RunParams>,
    policy: OperationPolicy,
    backend: Arc<dyn DocumentBackend>,
    recorder: MetricsRecorder,
    rng: StdRng,
    written: Vec<DocumentTarget>,
    state: SimulatorState,
}

impl UserSimulator {
    pub fn new(
        user_id: u32,
        params: Arc<RunParams>,
        backend: Arc<dyn DocumentBackend>,
        recorder: MetricsRecorder,
        rng: StdRng,
    ) -> Self {
        Self {
            user_id,
            policy: OperationPolicy::new(&params),
            params,
            backend,
            recorder,
            rng,
            written: Vec::new(),
            state: SimulatorState::Idle,
        }
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// Documents this user has successfully written so far.
    pub fn written_documents(&self) -> &[DocumentTarget] {
        &self.written
    }

    /// Run every iteration in order. Backend failures are counted and
    /// never end the run early.
    pub async fn run(mut self) -> Self {
        let iterations = self.params.iterations_per_user;

        for iteration in 0..iterations {
            self.state = SimulatorState::Iterating(iteration);
            debug!(
                "User {} iteration {}/{}",
                self.user_id,
                iteration + 1,
                iterations
            );
            self.run_iteration(iteration).await;
        }

        self.state = SimulatorState::Done;
        self
    }

    async fn run_iteration(&mut self, iteration: u32) {
        let phase = Phase::for_iteration(iteration);
        let plan = self.policy.decide(self.user_id, iteration, &mut self.rng);

        if plan.do_write {
            self.write(&plan.target, iteration, phase).await;
            self.pause().await;
        }

        let read_target = self
            .written
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or(plan.target);
        self.read(&read_target, phase).await;
        self.pause().await;
    }

    async fn write(&mut self, target: &DocumentTarget, iteration: u32, phase: Phase) {
        let payload = build_payload(self.user_id, iteration, &mut self.rng);

        let start = Instant::now();
        let result = self
            .backend
            .write(&target.collection, &target.document_id, payload)
            .await;
        let latency = start.elapsed();

        match result {
            Ok(()) => {
                self.recorder
                    .record(OperationRecord::success(OperationKind::Write, phase, latency));
                self.written.push(target.clone());
            }
            Err(e) => {
                self.recorder
                    .record(OperationRecord::failure(OperationKind::Write, phase, latency));
                warn!("[WRITE ERR] user_{} {} | {}", self.user_id, target, e);
            }
        }
    }

    async fn read(&mut self, target: &DocumentTarget, phase: Phase) {
        let start = Instant::now();
        let result = self
            .backend
            .read(&target.collection, &target.document_id)
            .await;
        let latency = start.elapsed();

        match result {
            Ok(snapshot) if snapshot.exists => {
                self.recorder
                    .record(OperationRecord::success(OperationKind::Read, phase, latency));
            }
            Ok(_) => {
                trace!("User {} read missing document {}", self.user_id, target);
            }
            Err(e) => {
                self.recorder
                    .record(OperationRecord::failure(OperationKind::Read, phase, latency));
                warn!("[READ ERR] user_{} {} | {}", self.user_id, target, e);
            }
        }
    }

    async fn pause(&mut self) {
        let delay = self.params.delay_range.sample(&mut self.rng);
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DelayRange;
    use loadtest_backend::{is_server_timestamp, MemoryBackend};
    use loadtest_metrics::metrics_channel;

    fn params(iterations: u32) -> Arc<RunParams> {
        Arc::new(
            RunParams::default()
                .with_users(1)
                .with_iterations_per_user(iterations)
                .with_delay_range(DelayRange::zero())
                .with_collection_pool_size(2)
                .with_shared_doc_probability(0.0),
        )
    }

    #[test]
    fn test_payload_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let payload = build_payload(12, 4, &mut rng);

        assert_eq!(payload["user"], json!(12));
        assert_eq!(payload["iteration"], json!(4));
        let value = payload["value"].as_i64().unwrap();
        assert!((1..=100).contains(&value));
        assert!(is_server_timestamp(&payload["timestamp"]));
        let field1 = payload["structure"]["nested"]["field1"].as_str().unwrap();
        assert!(field1.starts_with("val_"));
        let field2 = payload["structure"]["nested"]["field2"].as_f64().unwrap();
        assert!((0.0..1.0).contains(&field2));
    }

    #[test]
    fn test_user_rng_is_deterministic_per_user() {
        let a: u64 = user_rng(Some(42), 3).random();
        let b: u64 = user_rng(Some(42), 3).random();
        let c: u64 = user_rng(Some(42), 4).random();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_simulator_reaches_done() {
        let backend = Arc::new(MemoryBackend::new());
        let (recorder, aggregator) = metrics_channel();
        let simulator = UserSimulator::new(
            0,
            params(5),
            backend.clone(),
            recorder,
            user_rng(Some(1), 0),
        );
        assert_eq!(simulator.state(), SimulatorState::Idle);

        let simulator = simulator.run().await;

        assert_eq!(simulator.state(), SimulatorState::Done);
        assert_eq!(simulator.written_documents().len(), 2);
        assert_eq!(backend.len().await, 2);
        drop(simulator);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.latencies.write_first.len(), 1);
        assert_eq!(snapshot.latencies.write.len(), 1);
        assert_eq!(snapshot.latencies.read_first.len(), 1);
        assert_eq!(snapshot.latencies.read.len(), 4);
        assert_eq!(snapshot.errors.total(), 0);
    }

    #[tokio::test]
    async fn test_reads_target_written_documents() {
        let backend = Arc::new(MemoryBackend::new());
        let (recorder, _aggregator) = metrics_channel();

        let simulator = UserSimulator::new(
            5,
            params(10),
            backend.clone(),
            recorder,
            user_rng(Some(9), 5),
        )
        .run()
        .await;

        let written = simulator.written_documents();
        assert_eq!(written.len(), 4);
        for target in written {
            assert!(target.document_id.starts_with("user_5_doc_"));
            let stored = backend
                .document(&target.collection, &target.document_id)
                .await
                .expect("written document stored");
            assert_eq!(stored["user"], json!(5));
            assert!(stored["timestamp"].is_string());
        }
    }
}

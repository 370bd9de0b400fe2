//! Concurrency driver for a whole run.

use crate::config::RunParams;
use crate::error::ConfigError;
use crate::simulator::{user_rng, UserSimulator};
use futures::future::join_all;
use loadtest_backend::DocumentBackend;
use loadtest_metrics::{metrics_channel, MetricsReport};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: MetricsReport,
    /// Wall-clock time from the first user starting to the last finishing.
    pub elapsed: Duration,
}

/// Launches every simulated user and collects their metrics.
pub struct LoadTestDriver {
    params: Arc<RunParams>,
    backend: Arc<dyn DocumentBackend>,
}

impl LoadTestDriver {
    /// Create a driver, rejecting invalid parameters up front.
    pub fn new(params: RunParams, backend: Arc<dyn DocumentBackend>) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params: Arc::new(params),
            backend,
        })
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Run all users to completion and aggregate their samples.
    ///
    /// Users are multiplexed on the calling task: their steps interleave at
    /// every backend call and pacing delay, while each user's own iterations
    /// stay strictly ordered. There is no timeout; the run ends only when the
    /// last user is done.
    pub async fn run(&self) -> RunOutcome {
        let params = &self.params;
        info!(
            "Starting load test against '{}' backend: {} users x {} iterations, {} collections, {:.0}% shared documents",
            self.backend.name(),
            params.users,
            params.iterations_per_user,
            params.collection_pool_size,
            params.shared_doc_probability * 100.0
        );

        let (recorder, aggregator) = metrics_channel();
        let simulators: Vec<UserSimulator> = (0..params.users)
            .map(|user_id| {
                UserSimulator::new(
                    user_id,
                    Arc::clone(params),
                    Arc::clone(&self.backend),
                    recorder.clone(),
                    user_rng(params.seed, user_id),
                )
            })
            .collect();
        drop(recorder);

        let start = Instant::now();
        let finished = join_all(simulators.into_iter().map(UserSimulator::run)).await;
        let elapsed = start.elapsed();

        // Simulators hold recorder clones; release them before draining.
        drop(finished);
        let snapshot = aggregator.snapshot();

        info!(
            "Load test finished in {:.2}s: {} samples, {} errors",
            elapsed.as_secs_f64(),
            snapshot.latencies.total_samples(),
            snapshot.errors.total()
        );

        RunOutcome {
            report: MetricsReport::new(params.snapshot(), snapshot, elapsed),
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DelayRange;
    use loadtest_backend::MemoryBackend;

    #[test]
    fn test_invalid_params_rejected() {
        let result = LoadTestDriver::new(
            RunParams::default().with_users(0),
            Arc::new(MemoryBackend::new()),
        );
        assert!(matches!(result, Err(ConfigError::NoUsers)));
    }

    #[tokio::test]
    async fn test_report_carries_params_and_elapsed() {
        let params = RunParams::default()
            .with_users(2)
            .with_iterations_per_user(3)
            .with_delay_range(DelayRange::zero())
            .with_seed(Some(11));
        let driver = LoadTestDriver::new(params.clone(), Arc::new(MemoryBackend::new())).unwrap();

        let outcome = driver.run().await;

        assert_eq!(outcome.report.params, params.snapshot());
        assert_eq!(outcome.report.elapsed_secs, outcome.elapsed.as_secs_f64());
        assert!(outcome.report.completed_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_users_run_concurrently() {
        // 50 users x 4 iterations, each pausing 1s after every write and
        // every read. Sequential execution would take minutes of virtual
        // time; interleaved users finish in roughly one user's worth.
        let params = RunParams::default()
            .with_users(50)
            .with_iterations_per_user(4)
            .with_delay_range(DelayRange::new(1.0, 1.0));
        let driver = LoadTestDriver::new(params, Arc::new(MemoryBackend::new())).unwrap();

        let start = tokio::time::Instant::now();
        let outcome = driver.run().await;
        let virtual_elapsed = start.elapsed();

        // Per user: 4 reads + 2 writes (iterations 0 and 2) = 6 pauses.
        assert!(virtual_elapsed >= Duration::from_secs(6));
        assert!(virtual_elapsed < Duration::from_secs(12));
        assert_eq!(
            outcome.report.latencies.read.len() + outcome.report.latencies.read_first.len(),
            200
        );
    }
}

//! CLI argument definitions for load test commands.

use crate::config::{parse_duration_range, ConfigFile};
use anyhow::Context;
use clap::Args;
use loadtest_backend::{FaultConfig, MemoryBackend, SimulatedLatency};
use loadtest_engine::{DelayRange, RunParams};
use loadtest_metrics::DEFAULT_OUTLIER_THRESHOLD_SECS;
use std::path::PathBuf;
use std::time::Duration;

fn parse_range(s: &str) -> Result<(f64, f64), String> {
    parse_duration_range(s).map_err(|e| format!("{e:#}"))
}

/// Arguments of `loadtest run`.
///
/// Values given here override the config file, which overrides the
/// built-in defaults.
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// TOML or YAML file with run parameters
    #[arg(long, short = 'c', env = "LOADTEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of simulated users [default: 2400]
    #[arg(long, env = "LOADTEST_USERS")]
    pub users: Option<u32>,

    /// Iterations performed by each user [default: 20]
    #[arg(long, env = "LOADTEST_ITERATIONS_PER_USER")]
    pub iterations_per_user: Option<u32>,

    /// Pacing delay between operations as MIN,MAX (e.g. 0.05,0.3 or 50ms,300ms)
    #[arg(long, value_parser = parse_range)]
    pub delay_range: Option<(f64, f64)>,

    /// Number of collections to spread operations across [default: 100]
    #[arg(long)]
    pub collection_pool_size: Option<u32>,

    /// Probability of targeting one of the shared documents [default: 0.1]
    #[arg(long)]
    pub shared_doc_probability: Option<f64>,

    /// Random seed for reproducible runs (same seed = same operation sequence)
    #[arg(long, env = "LOADTEST_SEED")]
    pub seed: Option<u64>,

    /// Where to write the metrics file
    #[arg(long, short = 'o', default_value = "metrics.json")]
    pub output: PathBuf,

    #[command(flatten)]
    pub backend: BackendArgs,
}

impl RunArgs {
    /// Resolve defaults, config file and flags into validated parameters.
    pub fn resolve_params(&self) -> anyhow::Result<RunParams> {
        let mut params = RunParams::default();

        if let Some(path) = &self.config {
            params = ConfigFile::load(path)?.apply(params);
        }
        if let Some(users) = self.users {
            params.users = users;
        }
        if let Some(iterations) = self.iterations_per_user {
            params.iterations_per_user = iterations;
        }
        if let Some((min, max)) = self.delay_range {
            params.delay_range = DelayRange::new(min, max);
        }
        if let Some(size) = self.collection_pool_size {
            params.collection_pool_size = size;
        }
        if let Some(probability) = self.shared_doc_probability {
            params.shared_doc_probability = probability;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }

        params.validate().context("Invalid run parameters")?;
        Ok(params)
    }
}

/// Knobs of the in-process simulated backend.
#[derive(Args, Clone, Debug)]
pub struct BackendArgs {
    /// Artificial latency added to every backend call as MIN,MAX (e.g. 5ms,40ms)
    #[arg(long, value_parser = parse_range)]
    pub backend_latency: Option<(f64, f64)>,

    /// Probability in [0, 1] that a write is rejected
    #[arg(long, default_value = "0")]
    pub write_failure_rate: f64,

    /// Probability in [0, 1] that a read is rejected
    #[arg(long, default_value = "0")]
    pub read_failure_rate: f64,
}

impl BackendArgs {
    /// Build the simulated backend described by these arguments.
    pub fn build(&self) -> anyhow::Result<MemoryBackend> {
        for (name, rate) in [
            ("write-failure-rate", self.write_failure_rate),
            ("read-failure-rate", self.read_failure_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                anyhow::bail!("--{name} must be within [0, 1], got {rate}");
            }
        }

        let mut backend = MemoryBackend::new().with_faults(FaultConfig {
            write_failure_rate: self.write_failure_rate,
            read_failure_rate: self.read_failure_rate,
        });
        if let Some((min, max)) = self.backend_latency {
            let to_duration = |secs: f64| {
                Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("--backend-latency bound {secs} is out of range"))
            };
            backend = backend.with_latency(SimulatedLatency::new(
                to_duration(min)?,
                to_duration(max)?,
            ));
        }
        Ok(backend)
    }
}

/// Arguments of `loadtest report`.
#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Metrics file written by `loadtest run`
    #[arg(default_value = "metrics.json")]
    pub input: PathBuf,

    /// Latencies above this many seconds are counted as outliers
    #[arg(long, default_value_t = DEFAULT_OUTLIER_THRESHOLD_SECS)]
    pub outlier_threshold: f64,
}

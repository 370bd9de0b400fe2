//! Run parameters.

use crate::error::ConfigError;
use loadtest_metrics::ParamsSnapshot;
use rand::Rng;
use std::time::Duration;

/// Default number of simulated users.
pub const DEFAULT_USERS: u32 = 2400;
/// Default iterations per simulated user.
pub const DEFAULT_ITERATIONS_PER_USER: u32 = 20;
/// Default pacing delay bounds in seconds.
pub const DEFAULT_DELAY_RANGE: (f64, f64) = (0.05, 0.3);
/// Default number of collections operations are spread across.
pub const DEFAULT_COLLECTION_POOL_SIZE: u32 = 100;
/// Default probability of targeting a shared document.
pub const DEFAULT_SHARED_DOC_PROBABILITY: f64 = 0.1;

/// Bounds of the random pacing delay, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayRange {
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// No pacing at all.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Draw a delay uniformly from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = if self.min_secs >= self.max_secs {
            self.min_secs
        } else {
            rng.random_range(self.min_secs..=self.max_secs)
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_secs, self.max_secs);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
            return Err(ConfigError::InvalidDelay { min, max });
        }
        for bound in [min, max] {
            if Duration::try_from_secs_f64(bound).is_err() {
                return Err(ConfigError::DelayOutOfRange(bound));
            }
        }
        if min > max {
            return Err(ConfigError::InvertedDelay { min, max });
        }
        Ok(())
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_RANGE.0, DEFAULT_DELAY_RANGE.1)
    }
}

/// Immutable configuration of one load test run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    /// Number of simulated users.
    pub users: u32,
    /// Iterations each simulated user performs.
    pub iterations_per_user: u32,
    /// Pacing delay after each write and each read.
    pub delay_range: DelayRange,
    /// Number of collections operations are spread across.
    pub collection_pool_size: u32,
    /// Probability that an iteration targets a shared document.
    pub shared_doc_probability: f64,
    /// Base seed for per-user random sources; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS,
            iterations_per_user: DEFAULT_ITERATIONS_PER_USER,
            delay_range: DelayRange::default(),
            collection_pool_size: DEFAULT_COLLECTION_POOL_SIZE,
            shared_doc_probability: DEFAULT_SHARED_DOC_PROBABILITY,
            seed: None,
        }
    }
}

impl RunParams {
    pub fn with_users(mut self, users: u32) -> Self {
        self.users = users;
        self
    }

    pub fn with_iterations_per_user(mut self, iterations: u32) -> Self {
        self.iterations_per_user = iterations;
        self
    }

    pub fn with_delay_range(mut self, delay_range: DelayRange) -> Self {
        self.delay_range = delay_range;
        self
    }

    pub fn with_collection_pool_size(mut self, size: u32) -> Self {
        self.collection_pool_size = size;
        self
    }

    pub fn with_shared_doc_probability(mut self, probability: f64) -> Self {
        self.shared_doc_probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check every parameter, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users == 0 {
            return Err(ConfigError::NoUsers);
        }
        if self.iterations_per_user == 0 {
            return Err(ConfigError::NoIterations);
        }
        if self.collection_pool_size == 0 {
            return Err(ConfigError::EmptyCollectionPool);
        }
        if !(0.0..=1.0).contains(&self.shared_doc_probability) {
            return Err(ConfigError::InvalidProbability(self.shared_doc_probability));
        }
        self.delay_range.validate()
    }

    /// Parameters as recorded in the metrics report.
    pub fn snapshot(&self) -> ParamsSnapshot {
        ParamsSnapshot {
            users: self.users,
            iterations_per_user: self.iterations_per_user,
            collection_pool_size: self.collection_pool_size,
            shared_doc_probability: self.shared_doc_probability,
            delay_range: Some((self.delay_range.min_secs, self.delay_range.max_secs)),
            seed: self.seed,
        }
    }
}

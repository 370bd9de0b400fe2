//! Error types for the load generation engine.

use thiserror::Error;

/// Invalid run parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("users must be greater than zero")]
    NoUsers,

    #[error("iterations_per_user must be greater than zero")]
    NoIterations,

    #[error("collection_pool_size must be greater than zero")]
    EmptyCollectionPool,

    /// Probability outside `[0, 1]` or not a number.
    #[error("shared_doc_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Negative or non-finite delay bound.
    #[error("delay bounds must be finite and non-negative, got ({min}, {max})")]
    InvalidDelay { min: f64, max: f64 },

    /// Bound too large to be represented as a duration.
    #[error("delay bound {0} seconds is out of range")]
    DelayOutOfRange(f64),

    #[error("delay minimum {min} exceeds maximum {max}")]
    InvertedDelay { min: f64, max: f64 },
}

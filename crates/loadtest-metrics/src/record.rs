//! Measured operation records.

use std::time::Duration;

/// Kind of backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Write,
    Read,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Write => write!(f, "write"),
            OperationKind::Read => write!(f, "read"),
        }
    }
}

/// Whether a sample comes from a user's first iteration.
///
/// First-iteration calls pay for connection setup and cold caches, so they
/// are bucketed apart from steady-state samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Normal,
    FirstIteration,
}

impl Phase {
    /// Phase of the given zero-based iteration index.
    pub fn for_iteration(iteration: u32) -> Self {
        if iteration == 0 {
            Phase::FirstIteration
        } else {
            Phase::Normal
        }
    }
}

/// Result of a measured call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// One measured backend call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRecord {
    pub kind: OperationKind,
    pub phase: Phase,
    pub latency: Duration,
    pub outcome: Outcome,
}

impl OperationRecord {
    /// A successful call that contributes a latency sample.
    pub fn success(kind: OperationKind, phase: Phase, latency: Duration) -> Self {
        Self {
            kind,
            phase,
            latency,
            outcome: Outcome::Success,
        }
    }

    /// A failed call; only its error counter is kept.
    pub fn failure(kind: OperationKind, phase: Phase, latency: Duration) -> Self {
        Self {
            kind,
            phase,
            latency,
            outcome: Outcome::Failure,
        }
    }
}

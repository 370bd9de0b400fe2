//! In-process document store with simulated latency and fault injection.

use crate::backend::DocumentBackend;
use crate::document::{merge_fields, resolve_server_timestamps, DocumentSnapshot, Fields};
use crate::error::BackendError;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::trace;

/// Range of artificial latency added to every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedLatency {
    pub min: Duration,
    pub max: Duration,
}

impl SimulatedLatency {
    /// Latency drawn uniformly from `[min, max]`.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let secs = rand::rng().random_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Probability that a call fails, per operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaultConfig {
    /// Probability in `[0, 1]` that a write is rejected.
    pub write_failure_rate: f64,
    /// Probability in `[0, 1]` that a read is rejected.
    pub read_failure_rate: f64,
}

impl FaultConfig {
    fn trial(rate: f64) -> bool {
        if rate <= 0.0 {
            false
        } else if rate >= 1.0 {
            true
        } else {
            rand::rng().random_bool(rate)
        }
    }
}

type DocumentKey = (String, String);

/// Document store held in memory.
///
/// Writes follow merge semantics and resolve server timestamp placeholders
/// with the wall clock at the time of the write.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<DocumentKey, Fields>>,
    latency: Option<SimulatedLatency>,
    faults: FaultConfig,
}

impl MemoryBackend {
    /// Create an empty backend with no latency and no faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add artificial latency to every call.
    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Inject random failures.
    pub fn with_faults(mut self, faults: FaultConfig) -> Self {
        self.faults = faults;
        self
    }

    /// Fetch a stored document without latency or fault injection.
    pub async fn document(&self, collection: &str, doc_id: &str) -> Option<Fields> {
        self.documents
            .read()
            .await
            .get(&(collection.to_string(), doc_id.to_string()))
            .cloned()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether no documents are stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            let pause = latency.sample();
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write(
        &self,
        collection: &str,
        doc_id: &str,
        mut fields: Fields,
    ) -> Result<(), BackendError> {
        self.delay().await;

        if FaultConfig::trial(self.faults.write_failure_rate) {
            return Err(BackendError::write(collection, doc_id, "injected fault"));
        }

        resolve_server_timestamps(&mut fields, Utc::now());

        let mut documents = self.documents.write().await;
        let stored = documents
            .entry((collection.to_string(), doc_id.to_string()))
            .or_default();
        merge_fields(stored, fields);
        trace!("Stored {}/{} ({} fields)", collection, doc_id, stored.len());

        Ok(())
    }

    async fn read(&self, collection: &str, doc_id: &str) -> Result<DocumentSnapshot, BackendError> {
        self.delay().await;

        if FaultConfig::trial(self.faults.read_failure_rate) {
            return Err(BackendError::read(collection, doc_id, "injected fault"));
        }

        let documents = self.documents.read().await;
        Ok(documents
            .get(&(collection.to_string(), doc_id.to_string()))
            .cloned()
            .map(DocumentSnapshot::found)
            .unwrap_or_else(DocumentSnapshot::missing))
    }
}

//! Document field maps and merge semantics.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Structured field map of a document.
pub type Fields = Map<String, Value>;

/// Key of the sentinel object that asks the backend to stamp its own time.
pub const SERVER_TIMESTAMP_KEY: &str = "$serverTimestamp";

/// Placeholder value replaced by the backend's clock at write time.
pub fn server_timestamp() -> Value {
    let mut sentinel = Map::new();
    sentinel.insert(SERVER_TIMESTAMP_KEY.to_string(), Value::Bool(true));
    Value::Object(sentinel)
}

/// Whether `value` is the server timestamp placeholder.
pub fn is_server_timestamp(value: &Value) -> bool {
    match value {
        Value::Object(map) => is_sentinel_map(map),
        _ => false,
    }
}

fn is_sentinel_map(map: &Fields) -> bool {
    map.len() == 1 && map.get(SERVER_TIMESTAMP_KEY) == Some(&Value::Bool(true))
}

/// Replace every server timestamp placeholder in `fields` with `now`.
pub fn resolve_server_timestamps(fields: &mut Fields, now: DateTime<Utc>) {
    for value in fields.values_mut() {
        if is_server_timestamp(value) {
            *value = Value::String(now.to_rfc3339());
        } else if let Value::Object(nested) = value {
            resolve_server_timestamps(nested, now);
        }
    }
}

/// Merge `patch` into `target`.
///
/// Keys missing from `patch` are left untouched. When both sides hold a map
/// under the same key the maps are merged recursively; any other value in
/// `patch` replaces what `target` had.
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, incoming) in patch {
        match (target.get_mut(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(incoming))
                if !is_sentinel_map(&incoming) =>
            {
                merge_fields(existing, incoming);
            }
            (_, incoming) => {
                target.insert(key, incoming);
            }
        }
    }
}

/// Result of a point read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentSnapshot {
    /// Whether the document exists.
    pub exists: bool,
    /// Stored fields; empty when the document does not exist.
    pub fields: Fields,
}

impl DocumentSnapshot {
    /// Snapshot of an existing document.
    pub fn found(fields: Fields) -> Self {
        Self {
            exists: true,
            fields,
        }
    }

    /// Snapshot of a document that does not exist.
    pub fn missing() -> Self {
        Self::default()
    }
}

//! Snapshot persistence adapters.
//!
//! Both stores hold each snapshot as one serialized JSON document and
//! overwrite it whole on every save.

mod json_store;
mod memory_store;

pub use json_store::JsonSnapshotStore;
pub use memory_store::InMemorySnapshotStore;

use cp_core::ports::{PersistenceError, SnapshotKind};
use serde::{de::DeserializeOwned, Serialize};

fn encode<T: Serialize + ?Sized>(kind: SnapshotKind, value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(value).map_err(|e| PersistenceError::WriteFailed {
        kind,
        message: format!("serialize: {e}"),
    })
}

fn decode<T: DeserializeOwned>(kind: SnapshotKind, raw: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(raw).map_err(|e| PersistenceError::Corrupt {
        kind,
        message: e.to_string(),
    })
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use cp_core::clipboard::ClipboardItem;
use cp_core::ports::{ItemCollection, PersistenceError, SnapshotKind, SnapshotStorePort};
use cp_core::settings::Preferences;

use super::{decode, encode};

/// Keeps serialized snapshots in memory, so tests exercise the same
/// encode/decode path as the file store.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    snapshots: Mutex<HashMap<SnapshotKind, String>>,
    fail_writes: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a snapshot with raw JSON, valid or not.
    pub fn with_raw(self, kind: SnapshotKind, raw: impl Into<String>) -> Self {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.insert(kind, raw.into());
        }
        self
    }

    /// While set, every save returns `WriteFailed` and leaves the stored
    /// snapshots untouched.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, kind: SnapshotKind) -> Option<String> {
        self.snapshots
            .lock()
            .ok()
            .and_then(|snapshots| snapshots.get(&kind).cloned())
    }

    fn read(&self, kind: SnapshotKind) -> Result<Option<String>, PersistenceError> {
        let snapshots = self.snapshots.lock().map_err(|_| PersistenceError::ReadFailed {
            kind,
            message: "snapshot map lock poisoned".to_string(),
        })?;
        Ok(snapshots.get(&kind).cloned())
    }

    fn write(&self, kind: SnapshotKind, content: String) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::WriteFailed {
                kind,
                message: "writes disabled".to_string(),
            });
        }
        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|_| PersistenceError::WriteFailed {
                kind,
                message: "snapshot map lock poisoned".to_string(),
            })?;
        snapshots.insert(kind, content);
        Ok(())
    }
}

impl SnapshotStorePort for InMemorySnapshotStore {
    fn load_items(
        &self,
        collection: ItemCollection,
    ) -> Result<Option<Vec<ClipboardItem>>, PersistenceError> {
        let kind = SnapshotKind::from(collection);
        self.read(kind)?.map(|raw| decode(kind, &raw)).transpose()
    }

    fn save_items(
        &self,
        collection: ItemCollection,
        items: &[ClipboardItem],
    ) -> Result<(), PersistenceError> {
        let kind = SnapshotKind::from(collection);
        self.write(kind, encode(kind, items)?)
    }

    fn load_preferences(&self) -> Result<Option<Preferences>, PersistenceError> {
        let kind = SnapshotKind::Preferences;
        self.read(kind)?.map(|raw| decode(kind, &raw)).transpose()
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), PersistenceError> {
        let kind = SnapshotKind::Preferences;
        self.write(kind, encode(kind, preferences)?)
    }
}

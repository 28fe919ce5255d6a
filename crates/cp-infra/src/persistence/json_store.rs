use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cp_core::clipboard::ClipboardItem;
use cp_core::ports::{ItemCollection, PersistenceError, SnapshotKind, SnapshotStorePort};
use cp_core::settings::Preferences;
use tracing::debug;

use super::{decode, encode};

/// Snapshots stored as `history.json`, `pins.json` and `preferences.json`
/// under one directory.
pub struct JsonSnapshotStore {
    dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: SnapshotKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    fn read(&self, kind: SnapshotKind) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(kind);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::ReadFailed {
                kind,
                message: format!("{}: {e}", path.display()),
            }),
        }
    }

    /// Writes to `<name>.json.tmp` next to the target, then renames over it,
    /// so a crash leaves either the old or the new snapshot.
    fn atomic_write(&self, kind: SnapshotKind, content: &str) -> Result<(), PersistenceError> {
        let write_failed = |step: &str, path: &Path, e: io::Error| PersistenceError::WriteFailed {
            kind,
            message: format!("{step} {}: {e}", path.display()),
        };

        fs::create_dir_all(&self.dir).map_err(|e| write_failed("create dir", &self.dir, e))?;

        let path = self.path_for(kind);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|e| write_failed("write temp", &tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| write_failed("rename temp to", &path, e))?;

        debug!(snapshot = %kind, bytes = content.len(), "snapshot written");
        Ok(())
    }
}

impl SnapshotStorePort for JsonSnapshotStore {
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
        let content = encode(kind, items)?;
        self.atomic_write(kind, &content)
    }

    fn load_preferences(&self) -> Result<Option<Preferences>, PersistenceError> {
        let kind = SnapshotKind::Preferences;
        self.read(kind)?.map(|raw| decode(kind, &raw)).transpose()
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), PersistenceError> {
        let kind = SnapshotKind::Preferences;
        let content = encode(kind, preferences)?;
        self.atomic_write(kind, &content)
    }
}

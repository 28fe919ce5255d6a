use std::fmt;

use crate::clipboard::ClipboardItem;
use crate::ports::errors::PersistenceError;
use crate::settings::Preferences;

/// The two persisted item collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCollection {
    History,
    Pins,
}

/// Every snapshot the store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    History,
    Pins,
    Preferences,
}

impl SnapshotKind {
    pub fn name(self) -> &'static str {
        match self {
            SnapshotKind::History => "history",
            SnapshotKind::Pins => "pins",
            SnapshotKind::Preferences => "preferences",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SnapshotKind::History => "history.json",
            SnapshotKind::Pins => "pins.json",
            SnapshotKind::Preferences => "preferences.json",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ItemCollection> for SnapshotKind {
    fn from(collection: ItemCollection) -> Self {
        match collection {
            ItemCollection::History => SnapshotKind::History,
            ItemCollection::Pins => SnapshotKind::Pins,
        }
    }
}

/// Whole-snapshot persistence of the item collections and preferences.
///
/// Loads return `Ok(None)` when a snapshot has never been written.
pub trait SnapshotStorePort: Send + Sync {
    fn load_items(
        &self,
        collection: ItemCollection,
    ) -> Result<Option<Vec<ClipboardItem>>, PersistenceError>;

    fn save_items(
        &self,
        collection: ItemCollection,
        items: &[ClipboardItem],
    ) -> Result<(), PersistenceError>;

    fn load_preferences(&self) -> Result<Option<Preferences>, PersistenceError>;

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), PersistenceError>;
}

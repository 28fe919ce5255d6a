use chrono::{DateTime, Utc};
use cp_core::clipboard::{ClipboardItem, ImageMetadata, RawImage};
use cp_core::config::EngineConfig;
use cp_core::ids::ItemId;
use cp_core::ports::{ImageStoreError, ItemCollection};
use cp_core::settings::Preferences;
use tokio::sync::broadcast;
use tracing::{debug, info, info_span, warn};

use super::deferred::DeferredDeletes;
use super::eviction::unreferenced_images;
use super::sanitize::{sanitize, Limits};
use crate::deps::EngineDeps;
use crate::events::EngineEvent;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Read-only copy of the engine state for the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub recent: Vec<ClipboardItem>,
    pub pinned: Vec<ClipboardItem>,
    pub preferences: Preferences,
}

/// Owner of the recent and pinned collections.
///
/// Every command mutates in memory, then saves the touched snapshot(s)
/// synchronously. Save failures are logged and the in-memory state stays
/// authoritative.
pub struct HistoryEngine {
    pub(super) deps: EngineDeps,
    pub(super) config: EngineConfig,
    pub(super) recent: Vec<ClipboardItem>,
    pub(super) pinned: Vec<ClipboardItem>,
    pub(super) preferences: Preferences,
    pub(super) auto_deletes: DeferredDeletes,
    pub(super) resume_at: Option<DateTime<Utc>>,
    events: broadcast::Sender<EngineEvent>,
}

impl HistoryEngine {
    /// Loads all three snapshots, sanitizes them and re-arms pending
    /// deadlines. Unreadable snapshots fall back to empty/default state.
    pub fn load(deps: EngineDeps, config: EngineConfig) -> Self {
        let _span = info_span!("engine.load").entered();

        let mut recent = load_collection(&deps, ItemCollection::History);
        let mut pinned = load_collection(&deps, ItemCollection::Pins);
        let preferences = match deps.store.load_preferences() {
            Ok(Some(preferences)) => preferences,
            Ok(None) => Preferences::default(),
            Err(e) => {
                warn!(error = %e, "falling back to default preferences");
                Preferences::default()
            }
        };

        let report = sanitize(
            &mut recent,
            &mut pinned,
            &Limits {
                max_history_items: preferences.max_history_items,
                max_images: config.max_images,
                max_pinned_items: config.max_pinned_items,
            },
        );

        let mut pinned_changed = report.pinned_changed;
        for item in &mut pinned {
            if item.clear_auto_delete().is_some() {
                debug!(item_id = %item.id, "dropping auto-delete deadline of pinned item");
                pinned_changed = true;
            }
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let mut engine = Self {
            deps,
            config,
            recent,
            pinned,
            preferences,
            auto_deletes: DeferredDeletes::new(),
            resume_at: None,
            events,
        };

        if report.recent_changed {
            engine.save_collection(ItemCollection::History);
        }
        if pinned_changed {
            engine.save_collection(ItemCollection::Pins);
        }
        engine.reclaim_images(&report.evicted);

        for item in &engine.recent {
            if let Some(deadline) = item.auto_delete_at() {
                engine.auto_deletes.schedule(deadline, item.id.clone());
            }
        }

        let now = engine.now();
        if engine.preferences.is_paused {
            engine.arm_auto_resume(now);
        }

        info!(
            recent = engine.recent.len(),
            pinned = engine.pinned.len(),
            pending_auto_deletes = engine.auto_deletes.len(),
            paused = engine.preferences.is_paused,
            "history engine loaded"
        );
        engine
    }

    pub fn recent(&self) -> &[ClipboardItem] {
        &self.recent
    }

    pub fn pinned(&self) -> &[ClipboardItem] {
        &self.pinned
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.preferences.is_paused
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            recent: self.recent.clone(),
            pinned: self.pinned.clone(),
            preferences: self.preferences.clone(),
        }
    }

    /// Looks an item up in pinned first, then recent.
    pub fn find(&self, id: &ItemId) -> Option<&ClipboardItem> {
        self.pinned
            .iter()
            .chain(self.recent.iter())
            .find(|item| &item.id == id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    pub fn event_sender(&self) -> broadcast::Sender<EngineEvent> {
        self.events.clone()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.deps.clock.now()
    }

    pub fn load_full_image(&self, metadata: &ImageMetadata) -> Result<RawImage, ImageStoreError> {
        self.deps.images.load(&metadata.filename)
    }

    /// Earliest pending auto-delete or auto-resume deadline.
    pub fn next_scheduled_at(&self) -> Option<DateTime<Utc>> {
        match (self.auto_deletes.next_deadline(), self.resume_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fires every deadline at or before `now`.
    ///
    /// An auto-delete removes the item from recent only if it is still
    /// there and still carries a due deadline. Pinning drops the deadline, so
    /// an item pinned and unpinned meanwhile is kept.
    pub fn run_scheduled(&mut self, now: DateTime<Utc>) {
        let due = self.auto_deletes.pop_due(now);
        if !due.is_empty() {
            let mut removed = Vec::new();
            for id in due {
                let position = self.recent.iter().position(|item| {
                    item.id == id && item.auto_delete_at().is_some_and(|at| at <= now)
                });
                if let Some(index) = position {
                    info!(item_id = %id, "auto-deleting sensitive item");
                    removed.push(self.recent.remove(index));
                } else {
                    debug!(item_id = %id, "auto-delete target no longer pending");
                }
            }
            if !removed.is_empty() {
                self.history_changed();
                self.reclaim_images(&removed);
            }
        }

        if matches!(self.resume_at, Some(at) if at <= now) {
            self.resume_at = None;
            if self.preferences.is_paused {
                info!("pause expired, resuming capture");
                self.preferences.is_paused = false;
                self.preferences_changed();
            }
        }
    }

    pub(super) fn history_changed(&self) {
        self.save_collection(ItemCollection::History);
        self.emit(EngineEvent::HistoryChanged);
    }

    pub(super) fn pins_changed(&self) {
        self.save_collection(ItemCollection::Pins);
        self.emit(EngineEvent::PinsChanged);
    }

    pub(super) fn preferences_changed(&self) {
        if let Err(e) = self.deps.store.save_preferences(&self.preferences) {
            warn!(error = %e, "failed to persist preferences; keeping in-memory state");
        }
        self.emit(EngineEvent::PreferencesChanged(self.preferences.clone()));
    }

    pub(super) fn emit(&self, event: EngineEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn save_collection(&self, collection: ItemCollection) {
        let items = match collection {
            ItemCollection::History => &self.recent,
            ItemCollection::Pins => &self.pinned,
        };
        if let Err(e) = self.deps.store.save_items(collection, items) {
            warn!(error = %e, "failed to persist snapshot; keeping in-memory state");
        }
    }

    /// Deletes files of removed image items once nothing references them.
    /// Only active when `reclaim_image_files` is configured.
    pub(super) fn reclaim_images(&self, removed: &[ClipboardItem]) {
        if !self.config.reclaim_image_files {
            return;
        }
        for metadata in unreferenced_images(removed, &self.recent, &self.pinned) {
            match self.deps.images.delete(&metadata) {
                Ok(()) => debug!(filename = %metadata.filename, "reclaimed image files"),
                Err(e) => warn!(filename = %metadata.filename, error = %e, "failed to reclaim image files"),
            }
        }
    }

    pub(super) fn arm_auto_resume(&mut self, now: DateTime<Utc>) {
        self.resume_at = self
            .preferences
            .pause_auto_resume_minutes
            .map(|minutes| now + chrono::Duration::minutes(i64::from(minutes)));
        if let Some(at) = self.resume_at {
            debug!(resume_at = %at, "auto-resume scheduled");
        }
    }
}

fn load_collection(deps: &EngineDeps, collection: ItemCollection) -> Vec<ClipboardItem> {
    match deps.store.load_items(collection) {
        Ok(Some(items)) => items,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "falling back to an empty collection");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cp_core::clipboard::{ContentType, SensitiveDataType};
    use cp_core::ports::{SnapshotKind, SnapshotStorePort};
    use cp_core::settings::SensitivePolicy;
    use cp_infra::InMemorySnapshotStore;

    use super::*;
    use crate::history::test_support::{clock_start, TestEngine};
    use crate::history::PinOutcome;

    fn text(content: &str) -> ClipboardItem {
        ClipboardItem::new_text(content, ContentType::Plain, None, clock_start())
    }

    #[test]
    fn corrupt_history_falls_back_to_empty() {
        let store = Arc::new(
            InMemorySnapshotStore::new().with_raw(SnapshotKind::History, "{not json"),
        );
        let TestEngine { engine, .. } = TestEngine::from_store(store, EngineConfig::default());

        assert!(engine.recent().is_empty());
        assert!(engine.pinned().is_empty());
    }

    #[test]
    fn load_sanitizes_and_persists_fixes() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let mut stale = text("a");
        stale.is_pinned = true;
        let pinned = text("b");
        store
            .save_items(ItemCollection::History, &[stale, pinned.clone()])
            .unwrap();
        store.save_items(ItemCollection::Pins, &[pinned]).unwrap();

        let TestEngine { engine, store, .. } =
            TestEngine::from_store(store, EngineConfig::default());

        assert_eq!(engine.recent().len(), 1);
        assert!(!engine.recent()[0].is_pinned);
        assert!(engine.pinned()[0].is_pinned);
        let saved = store.load_items(ItemCollection::History).unwrap().unwrap();
        assert_eq!(saved, engine.recent());
    }

    #[test]
    fn auto_delete_fires_after_deadline_and_persists() {
        let TestEngine {
            mut engine,
            store,
            clock,
            ..
        } = TestEngine::new(|prefs| {
            prefs.set_policy(SensitiveDataType::Password, SensitivePolicy::AutoDelete30s)
        });
        let now = engine.now();
        engine.observe_text(
            "hunter2",
            ContentType::Plain,
            Some(SensitiveDataType::Password),
            now,
        );

        clock.advance(Duration::from_secs(29));
        engine.run_scheduled(engine.now());
        assert_eq!(engine.recent().len(), 1);

        clock.advance(Duration::from_secs(1));
        engine.run_scheduled(engine.now());
        assert!(engine.recent().is_empty());
        assert_eq!(engine.next_scheduled_at(), None);
        assert_eq!(
            store.load_items(ItemCollection::History).unwrap(),
            Some(Vec::new())
        );
    }

    #[test]
    fn auto_delete_spares_items_pinned_meanwhile() {
        let mut engine = TestEngine::new(|_| {}).engine;
        let now = engine.now();
        engine.observe_text(
            "hunter2",
            ContentType::Plain,
            Some(SensitiveDataType::Password),
            now,
        );
        let id = engine.recent()[0].id.clone();
        engine.pin(&id);

        engine.run_scheduled(now + chrono::Duration::seconds(60));

        assert_eq!(engine.pinned().len(), 1);
        assert!(engine.recent().is_empty());
    }

    #[test]
    fn unpinned_item_outlives_its_old_deadline_across_restart() {
        let TestEngine {
            mut engine,
            store,
            clock,
            ..
        } = TestEngine::new(|prefs| {
            prefs.set_policy(SensitiveDataType::Password, SensitivePolicy::AutoDelete30s)
        });
        let now = engine.now();
        engine.observe_text(
            "hunter2",
            ContentType::Plain,
            Some(SensitiveDataType::Password),
            now,
        );
        let id = engine.recent()[0].id.clone();
        engine.pin(&id);
        assert_eq!(engine.pinned()[0].auto_delete_at(), None);

        clock.advance(Duration::from_secs(60));
        engine.run_scheduled(engine.now());
        assert!(engine.unpin(&id));
        assert_eq!(engine.recent().len(), 1);

        let TestEngine {
            engine: mut reloaded,
            ..
        } = TestEngine::from_store(store, EngineConfig::default());
        assert_eq!(reloaded.next_scheduled_at(), None);
        reloaded.run_scheduled(clock_start() + chrono::Duration::seconds(120));
        assert_eq!(reloaded.recent().len(), 1);
        assert_eq!(reloaded.recent()[0].auto_delete_at(), None);
    }

    #[test]
    fn pin_and_unpin_before_deadline_cancels_auto_delete() {
        let TestEngine {
            mut engine, clock, ..
        } = TestEngine::new(|prefs| {
            prefs.set_policy(SensitiveDataType::Password, SensitivePolicy::AutoDelete30s)
        });
        let now = engine.now();
        engine.observe_text(
            "hunter2",
            ContentType::Plain,
            Some(SensitiveDataType::Password),
            now,
        );
        let id = engine.recent()[0].id.clone();

        clock.advance(Duration::from_secs(5));
        engine.pin(&id);
        engine.unpin(&id);
        clock.advance(Duration::from_secs(60));
        engine.run_scheduled(engine.now());

        assert_eq!(engine.recent().len(), 1);
        assert_eq!(engine.recent()[0].id, id);
    }

    #[test]
    fn pinned_items_lose_stale_deadlines_at_load() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let mut pinned = text("secret").with_auto_delete_at(clock_start());
        pinned.is_pinned = true;
        pinned.pin_order = Some(0);
        store.save_items(ItemCollection::Pins, &[pinned]).unwrap();

        let TestEngine { engine, store, .. } =
            TestEngine::from_store(store, EngineConfig::default());

        assert_eq!(engine.next_scheduled_at(), None);
        assert_eq!(engine.pinned()[0].auto_delete_at(), None);
        let saved = store.load_items(ItemCollection::Pins).unwrap().unwrap();
        assert_eq!(saved[0].auto_delete_at(), None);
    }

    #[test]
    fn failed_saves_keep_in_memory_state_and_events() {
        let TestEngine {
            mut engine, store, ..
        } = TestEngine::new(|_| {});
        let mut events = engine.subscribe();
        store.fail_writes(true);
        let now = engine.now();

        engine.observe_text("unsaved", ContentType::Plain, None, now);
        assert_eq!(engine.recent().len(), 1);
        assert_eq!(events.try_recv().unwrap(), EngineEvent::HistoryChanged);

        let id = engine.recent()[0].id.clone();
        assert_eq!(engine.pin(&id), PinOutcome::Pinned);
        assert_eq!(engine.pinned().len(), 1);
        assert!(engine.recent().is_empty());
        assert_eq!(events.try_recv().unwrap(), EngineEvent::PinsChanged);
        assert_eq!(events.try_recv().unwrap(), EngineEvent::HistoryChanged);

        let mut preferences = engine.preferences().clone();
        preferences.max_history_items += 10;
        let wanted = preferences.max_history_items;
        engine.update_preferences(preferences);
        assert_eq!(engine.preferences().max_history_items, wanted);
        assert!(matches!(
            events.try_recv(),
            Ok(EngineEvent::PreferencesChanged(prefs)) if prefs.max_history_items == wanted
        ));

        assert_eq!(store.load_items(ItemCollection::History).unwrap(), None);
        assert_eq!(store.load_items(ItemCollection::Pins).unwrap(), None);
        assert_eq!(
            store.load_preferences().unwrap(),
            Some(Preferences::default())
        );
    }

    #[test]
    fn persisted_deadlines_are_rearmed_at_load() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let deadline = clock_start() - chrono::Duration::seconds(1);
        store
            .save_items(
                ItemCollection::History,
                &[text("secret").with_auto_delete_at(deadline), text("plain")],
            )
            .unwrap();

        let TestEngine { mut engine, .. } = TestEngine::from_store(store, EngineConfig::default());
        assert_eq!(engine.next_scheduled_at(), Some(deadline));

        engine.run_scheduled(engine.now());
        let left: Vec<_> = engine.recent().iter().filter_map(|i| i.text_content()).collect();
        assert_eq!(left, vec!["plain"]);
    }

    #[test]
    fn paused_engine_resumes_after_configured_delay() {
        let TestEngine {
            mut engine, clock, ..
        } = TestEngine::new(|prefs| {
            prefs.is_paused = true;
            prefs.pause_auto_resume_minutes = Some(5);
        });
        let mut events = engine.subscribe();
        assert_eq!(
            engine.next_scheduled_at(),
            Some(clock_start() + chrono::Duration::minutes(5))
        );

        clock.advance(Duration::from_secs(5 * 60));
        engine.run_scheduled(engine.now());

        assert!(!engine.is_paused());
        assert!(matches!(
            events.try_recv(),
            Ok(EngineEvent::PreferencesChanged(prefs)) if !prefs.is_paused
        ));
    }

    #[test]
    fn image_files_are_kept_unless_reclaim_is_enabled() {
        let image = RawImage::new(1, 1, vec![0, 0, 0, 255]);

        let TestEngine {
            mut engine, images, ..
        } = TestEngine::new(|_| {});
        let now = engine.now();
        engine.observe_image(&image, now).unwrap();
        engine.clear_history();
        assert!(images.deleted.lock().unwrap().is_empty());

        let config = EngineConfig {
            reclaim_image_files: true,
            ..EngineConfig::default()
        };
        let TestEngine {
            mut engine, images, ..
        } = TestEngine::with_config(config, |_| {});
        engine.observe_image(&image, now).unwrap();
        engine.clear_history();
        assert_eq!(images.deleted.lock().unwrap().len(), 1);
    }
}

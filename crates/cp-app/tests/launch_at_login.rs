use std::sync::Arc;

use cp_app::{EngineDeps, EngineEvent, HistoryEngine};
use cp_core::config::EngineConfig;
use cp_core::ports::{AutostartPort, SnapshotStorePort};
use cp_infra::{FsImageStore, InMemorySnapshotStore, SystemClock};
use mockall::mock;

mock! {
    pub Autostart {}

    impl AutostartPort for Autostart {
        fn is_enabled(&self) -> anyhow::Result<bool>;
        fn enable(&self) -> anyhow::Result<()>;
        fn disable(&self) -> anyhow::Result<()>;
    }
}

fn engine_with(autostart: MockAutostart) -> (HistoryEngine, Arc<InMemorySnapshotStore>) {
    let store = Arc::new(InMemorySnapshotStore::new());
    let images_dir = std::env::temp_dir().join("clippin-launch-at-login-unused");
    let engine = HistoryEngine::load(
        EngineDeps {
            store: store.clone(),
            images: Arc::new(FsImageStore::new(images_dir, 1_000)),
            autostart: Arc::new(autostart),
            clock: Arc::new(SystemClock),
        },
        EngineConfig::default(),
    );
    (engine, store)
}

#[test]
fn enabling_registers_once() {
    let mut autostart = MockAutostart::new();
    autostart.expect_enable().times(1).returning(|| Ok(()));
    autostart.expect_disable().never();
    let (mut engine, store) = engine_with(autostart);

    let mut prefs = engine.preferences().clone();
    prefs.launch_at_login = true;
    engine.update_preferences(prefs.clone());
    engine.update_preferences(prefs);

    assert!(store.load_preferences().unwrap().unwrap().launch_at_login);
}

#[test]
fn disabling_unregisters() {
    let mut autostart = MockAutostart::new();
    let mut seq = mockall::Sequence::new();
    autostart
        .expect_enable()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(()));
    autostart
        .expect_disable()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(()));
    let (mut engine, _store) = engine_with(autostart);

    let mut prefs = engine.preferences().clone();
    prefs.launch_at_login = true;
    engine.update_preferences(prefs.clone());
    prefs.launch_at_login = false;
    engine.update_preferences(prefs);
}

#[test]
fn registration_failure_still_saves_preferences() {
    let mut autostart = MockAutostart::new();
    autostart
        .expect_enable()
        .times(1)
        .returning(|| Err(anyhow::anyhow!("login items unavailable")));
    let (mut engine, store) = engine_with(autostart);
    let mut events = engine.subscribe();

    let mut prefs = engine.preferences().clone();
    prefs.launch_at_login = true;
    engine.update_preferences(prefs);

    assert!(engine.preferences().launch_at_login);
    assert!(store.load_preferences().unwrap().unwrap().launch_at_login);
    assert!(matches!(
        events.try_recv(),
        Ok(EngineEvent::PreferencesChanged(p)) if p.launch_at_login
    ));
}

#[test]
fn unrelated_changes_leave_registration_alone() {
    let mut autostart = MockAutostart::new();
    autostart.expect_enable().never();
    autostart.expect_disable().never();
    let (mut engine, _store) = engine_with(autostart);

    let mut prefs = engine.preferences().clone();
    prefs.max_history_items = 10;
    engine.update_preferences(prefs);

    assert_eq!(engine.preferences().max_history_items, 10);
}

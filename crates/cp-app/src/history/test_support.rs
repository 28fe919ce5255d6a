//! Engine fixtures shared by the unit tests in this module.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use cp_core::clipboard::{ImageMetadata, RawImage, IMAGE_FORMAT_PNG};
use cp_core::config::EngineConfig;
use cp_core::ids::ItemId;
use cp_core::ports::{
    AutostartPort, ImageStoreError, ImageStorePort, SnapshotStorePort, SystemClipboardPort,
};
use cp_core::settings::Preferences;
use cp_infra::{InMemorySnapshotStore, ManualClock};

use super::engine::HistoryEngine;
use crate::deps::EngineDeps;

#[derive(Default)]
pub struct FakeAutostart {
    enabled: AtomicBool,
    fail_next: AtomicBool,
}

impl FakeAutostart {
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn set(&self, value: bool) -> anyhow::Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("registration refused");
        }
        self.enabled.store(value, Ordering::SeqCst);
        Ok(())
    }
}

impl AutostartPort for FakeAutostart {
    fn is_enabled(&self) -> anyhow::Result<bool> {
        Ok(self.enabled())
    }

    fn enable(&self) -> anyhow::Result<()> {
        self.set(true)
    }

    fn disable(&self) -> anyhow::Result<()> {
        self.set(false)
    }
}

/// Image store that keeps pixels in memory.
#[derive(Default)]
pub struct StubImageStore {
    saved: Mutex<HashMap<String, RawImage>>,
    pub deleted: Mutex<Vec<String>>,
}

impl ImageStorePort for StubImageStore {
    fn save(&self, image: &RawImage, id: &ItemId) -> Result<ImageMetadata, ImageStoreError> {
        self.saved
            .lock()
            .unwrap()
            .insert(format!("{id}.png"), image.clone());
        Ok(ImageMetadata {
            width: image.width,
            height: image.height,
            format: IMAGE_FORMAT_PNG.to_string(),
            file_size: image.rgba.len() as u64,
            filename: format!("{id}.png"),
            thumbnail_filename: format!("{id}_thumb.png"),
        })
    }

    fn load(&self, filename: &str) -> Result<RawImage, ImageStoreError> {
        self.saved
            .lock()
            .unwrap()
            .get(filename)
            .cloned()
            .ok_or_else(|| ImageStoreError::InvalidFilename(filename.to_string()))
    }

    fn load_thumbnail(&self, filename: &str) -> Result<RawImage, ImageStoreError> {
        Err(ImageStoreError::InvalidFilename(filename.to_string()))
    }

    fn delete(&self, metadata: &ImageMetadata) -> Result<(), ImageStoreError> {
        self.saved.lock().unwrap().remove(&metadata.filename);
        self.deleted.lock().unwrap().push(metadata.filename.clone());
        Ok(())
    }
}

pub struct TestEngine {
    pub engine: HistoryEngine,
    pub store: Arc<InMemorySnapshotStore>,
    pub clock: Arc<ManualClock>,
    pub autostart: Arc<FakeAutostart>,
    pub images: Arc<StubImageStore>,
}

impl TestEngine {
    pub fn new(configure: impl FnOnce(&mut Preferences)) -> Self {
        Self::with_config(EngineConfig::default(), configure)
    }

    pub fn with_config(config: EngineConfig, configure: impl FnOnce(&mut Preferences)) -> Self {
        let store = Arc::new(InMemorySnapshotStore::new());
        let mut preferences = Preferences::default();
        configure(&mut preferences);
        store.save_preferences(&preferences).unwrap();
        Self::from_store(store, config)
    }

    /// Loads an engine over an already-populated store.
    pub fn from_store(store: Arc<InMemorySnapshotStore>, config: EngineConfig) -> Self {
        let clock = Arc::new(ManualClock::new(clock_start()));
        let autostart = Arc::new(FakeAutostart::default());
        let images = Arc::new(StubImageStore::default());
        let deps = EngineDeps {
            store: store.clone(),
            images: images.clone(),
            autostart: autostart.clone(),
            clock: clock.clone(),
        };
        Self {
            engine: HistoryEngine::load(deps, config),
            store,
            clock,
            autostart,
            images,
        }
    }
}

pub fn clock_start() -> DateTime<Utc> {
    "2024-06-01T00:00:00Z".parse().unwrap()
}

pub fn engine() -> HistoryEngine {
    TestEngine::new(|_| {}).engine
}

pub fn engine_with(configure: impl FnOnce(&mut Preferences)) -> HistoryEngine {
    TestEngine::new(configure).engine
}

pub fn engine_with_config(config: EngineConfig) -> HistoryEngine {
    TestEngine::with_config(config, |_| {}).engine
}

#[derive(Default)]
struct ClipboardState {
    generation: u64,
    text: Option<String>,
    image: Option<RawImage>,
    written_text: Vec<String>,
    written_images: usize,
}

/// In-process clipboard whose generation bumps on every change.
#[derive(Default)]
pub struct FakeClipboard {
    state: Mutex<ClipboardState>,
    fail_reads: AtomicBool,
}

impl FakeClipboard {
    pub fn set_text(&self, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.text = Some(text.to_string());
        state.image = None;
    }

    pub fn set_image(&self, image: RawImage) {
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.text = None;
        state.image = Some(image);
    }

    pub fn set_text_and_image(&self, text: &str, image: RawImage) {
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.text = Some(text.to_string());
        state.image = Some(image);
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().unwrap().generation
    }

    pub fn written_text(&self) -> Vec<String> {
        self.state.lock().unwrap().written_text.clone()
    }

    pub fn written_images(&self) -> usize {
        self.state.lock().unwrap().written_images
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> anyhow::Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("clipboard unavailable");
        }
        Ok(())
    }
}

impl SystemClipboardPort for FakeClipboard {
    fn current_generation(&self) -> anyhow::Result<u64> {
        self.check_reads()?;
        Ok(self.generation())
    }

    fn read_text(&self) -> anyhow::Result<Option<String>> {
        self.check_reads()?;
        let text = self.state.lock().unwrap().text.clone();
        Ok(text.filter(|text| !text.is_empty()))
    }

    fn read_image(&self) -> anyhow::Result<Option<RawImage>> {
        self.check_reads()?;
        Ok(self.state.lock().unwrap().image.clone())
    }

    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.text = Some(text.to_string());
        state.image = None;
        state.written_text.push(text.to_string());
        Ok(())
    }

    fn write_image(&self, image: &RawImage) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.text = None;
        state.image = Some(image.clone());
        state.written_images += 1;
        Ok(())
    }
}

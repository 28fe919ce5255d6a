use std::sync::Arc;

use anyhow::{Context, Result};
use cp_core::clipboard::{classify, ItemPayload};
use cp_core::ids::ItemId;
use cp_core::ports::SystemClipboardPort;
use tracing::{debug, info_span, trace, warn};

use crate::history::{CaptureOutcome, HistoryEngine};

/// What a single poll tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    Unchanged,
    /// The generation moved but there was neither text nor an image to read.
    Empty,
    Captured(CaptureOutcome),
    /// An image could not be stored; the message is the store error.
    Rejected(String),
}

/// Samples the system clipboard and hands new content to the engine.
pub struct ClipboardPoller {
    clipboard: Arc<dyn SystemClipboardPort>,
    last_generation: Option<u64>,
}

impl ClipboardPoller {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self {
            clipboard,
            last_generation: None,
        }
    }

    pub fn last_generation(&self) -> Option<u64> {
        self.last_generation
    }

    /// Records the current generation without capturing, so content already
    /// on the clipboard at startup is ignored.
    pub fn prime(&mut self) -> Result<()> {
        let generation = self
            .clipboard
            .current_generation()
            .context("failed to sample clipboard generation")?;
        self.last_generation = Some(generation);
        debug!(generation, "clipboard poller primed");
        Ok(())
    }

    pub fn tick(&mut self, engine: &mut HistoryEngine) -> Result<TickOutcome> {
        if engine.is_paused() {
            return Ok(TickOutcome::Paused);
        }

        let generation = self
            .clipboard
            .current_generation()
            .context("failed to sample clipboard generation")?;
        if self.last_generation == Some(generation) {
            return Ok(TickOutcome::Unchanged);
        }
        self.last_generation = Some(generation);
        trace!(generation, "clipboard changed");

        let now = engine.now();
        let text = self
            .clipboard
            .read_text()
            .context("failed to read clipboard text")?;
        if let Some(text) = text {
            let classification = classify(&text);
            let outcome = engine.observe_text(
                &text,
                classification.content_type,
                classification.sensitive_type,
                now,
            );
            return Ok(TickOutcome::Captured(outcome));
        }

        let Some(image) = self
            .clipboard
            .read_image()
            .context("failed to read clipboard image")?
        else {
            return Ok(TickOutcome::Empty);
        };
        match engine.observe_image(&image, now) {
            Ok(outcome) => Ok(TickOutcome::Captured(outcome)),
            Err(e) => Ok(TickOutcome::Rejected(e.to_string())),
        }
    }

    /// Writes an item back to the system clipboard and re-syncs the
    /// generation so the write is not captured as a new item.
    ///
    /// Returns `Ok(false)` when the id is unknown or an image item has no
    /// metadata to load from.
    pub fn copy_to_clipboard(&mut self, engine: &HistoryEngine, id: &ItemId) -> Result<bool> {
        let _span = info_span!("engine.copy_to_clipboard", item_id = %id).entered();

        let Some(item) = engine.find(id) else {
            warn!("copy requested for unknown item");
            return Ok(false);
        };
        match &item.payload {
            ItemPayload::Text(text) => self
                .clipboard
                .write_text(text.content())
                .context("failed to write text to clipboard")?,
            ItemPayload::Image(Some(metadata)) => {
                let image = engine
                    .load_full_image(metadata)
                    .with_context(|| format!("failed to load image {}", metadata.filename))?;
                self.clipboard
                    .write_image(&image)
                    .context("failed to write image to clipboard")?;
            }
            ItemPayload::Image(None) => {
                warn!("image item has no stored file");
                return Ok(false);
            }
        }

        self.prime()?;
        debug!("item copied to clipboard");
        Ok(true)
    }
}

use chrono::{DateTime, Utc};
use cp_core::clipboard::{ClipboardItem, ContentType, RawImage, SensitiveDataType};
use cp_core::ids::ItemId;
use cp_core::ports::ImageStoreError;
use cp_core::settings::SensitivePolicy;
use tracing::{debug, info, warn};

use super::engine::HistoryEngine;
use super::eviction::enforce_recent_caps;
use crate::events::EngineEvent;

/// Why a capture produced no item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Identical text is already pinned.
    AlreadyPinned,
    /// The sensitive-data rule for the detected category is `neverStore`.
    NeverStore(SensitiveDataType),
}

/// Result of feeding one clipboard observation to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Same text as the front item; its copy count went up in place.
    Incremented { id: ItemId },
    /// An older recent entry was bumped and moved to the front.
    Promoted { id: ItemId },
    Inserted {
        id: ItemId,
        auto_delete_at: Option<DateTime<Utc>>,
    },
    Discarded(RejectReason),
}

impl HistoryEngine {
    /// Records captured text, deduplicating against recent and pinned items
    /// and applying the sensitive-data rule for `sensitivity`.
    pub fn observe_text(
        &mut self,
        text: &str,
        content_type: ContentType,
        sensitivity: Option<SensitiveDataType>,
        now: DateTime<Utc>,
    ) -> CaptureOutcome {
        if let Some(front) = self.recent.first_mut() {
            if front.has_text(text) {
                front.copy_count += 1;
                let id = front.id.clone();
                debug!(item_id = %id, copy_count = front.copy_count, "re-copied front item");
                self.history_changed();
                return CaptureOutcome::Incremented { id };
            }
        }

        if self.pinned.iter().any(|item| item.has_text(text)) {
            debug!("capture matches a pinned item, ignoring");
            return CaptureOutcome::Discarded(RejectReason::AlreadyPinned);
        }

        if let Some(index) = self.recent.iter().position(|item| item.has_text(text)) {
            let mut item = self.recent.remove(index);
            item.copy_count += 1;
            item.timestamp = now;
            let id = item.id.clone();
            debug!(item_id = %id, from_index = index, copy_count = item.copy_count, "promoted existing item");
            self.recent.insert(0, item);
            self.history_changed();
            return CaptureOutcome::Promoted { id };
        }

        let mut auto_delete_at = None;
        if let Some(kind) = sensitivity {
            match self.preferences.policy_for(kind) {
                SensitivePolicy::NeverStore => {
                    info!(sensitive_type = kind.as_key(), "sensitive capture not stored");
                    self.emit(EngineEvent::CaptureRejected {
                        reason: format!("{} is never stored", kind.as_key()),
                    });
                    return CaptureOutcome::Discarded(RejectReason::NeverStore(kind));
                }
                SensitivePolicy::AutoDelete30s => {
                    let delay = chrono::Duration::from_std(self.config.auto_delete_after)
                        .unwrap_or_else(|_| chrono::Duration::seconds(30));
                    auto_delete_at = Some(now + delay);
                }
                SensitivePolicy::Allow | SensitivePolicy::AskEachTime => {}
            }
        }

        let mut item = ClipboardItem::new_text(text, content_type, sensitivity, now);
        if let Some(deadline) = auto_delete_at {
            item = item.with_auto_delete_at(deadline);
            self.auto_deletes.schedule(deadline, item.id.clone());
        }
        let id = item.id.clone();
        debug!(item_id = %id, content_type = ?content_type, sensitive = sensitivity.is_some(), "captured text");

        self.insert_front(item);
        CaptureOutcome::Inserted { id, auto_delete_at }
    }

    /// Saves a captured image through the image store and records it.
    ///
    /// Images are never deduplicated. A store failure drops the capture and
    /// is returned to the caller.
    pub fn observe_image(
        &mut self,
        image: &RawImage,
        now: DateTime<Utc>,
    ) -> Result<CaptureOutcome, ImageStoreError> {
        let id = ItemId::new();
        let metadata = match self.deps.images.save(image, &id) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, width = image.width, height = image.height, "image capture dropped");
                self.emit(EngineEvent::CaptureRejected {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        debug!(item_id = %id, width = metadata.width, height = metadata.height, "captured image");
        self.insert_front(ClipboardItem::new_image(id.clone(), metadata, now));
        Ok(CaptureOutcome::Inserted {
            id,
            auto_delete_at: None,
        })
    }

    /// Inserts at the front of recent and applies the caps.
    pub(super) fn insert_front(&mut self, item: ClipboardItem) {
        self.recent.insert(0, item);
        let evicted = enforce_recent_caps(
            &mut self.recent,
            self.preferences.max_history_items,
            self.config.max_images,
        );
        if !evicted.is_empty() {
            debug!(count = evicted.len(), "evicted items over the history caps");
        }
        self.history_changed();
        self.reclaim_images(&evicted);
    }
}

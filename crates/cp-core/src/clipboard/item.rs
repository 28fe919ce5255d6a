use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClipboardItemRecord, ContentHash, ContentType, SensitiveDataType};
use crate::ids::ItemId;

pub const IMAGE_FORMAT_PNG: &str = "png";

const LABEL_MAX_CHARS: usize = 50;
const PIN_SUGGESTION_THRESHOLD: u32 = 3;

/// Description of an image item's files in the image store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    #[serde(alias = "byteSize")]
    pub file_size: u64,
    pub filename: String,
    pub thumbnail_filename: String,
}

impl ImageMetadata {
    pub fn dimensions_label(&self) -> String {
        format!("{}×{}", self.width, self.height)
    }
}

/// Body of a text item. Content, hash and classification are fixed once the
/// item exists; only the pin-suggestion flag and the auto-delete deadline
/// change afterwards, through [`ClipboardItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    pub(super) content: String,
    pub(super) content_hash: ContentHash,
    pub(super) content_type: ContentType,
    pub(super) sensitive_type: Option<SensitiveDataType>,
    pub(super) auto_delete_at: Option<DateTime<Utc>>,
    pub(super) pin_suggestion_dismissed: bool,
}

impl TextPayload {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn sensitive_type(&self) -> Option<SensitiveDataType> {
        self.sensitive_type
    }

    pub fn auto_delete_at(&self) -> Option<DateTime<Utc>> {
        self.auto_delete_at
    }

    pub fn pin_suggestion_dismissed(&self) -> bool {
        self.pin_suggestion_dismissed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPayload {
    Text(TextPayload),
    /// Metadata is absent only on legacy records.
    Image(Option<ImageMetadata>),
}

/// One captured clipboard entry, text or image.
///
/// Serialized through [`ClipboardItemRecord`], the flat camelCase snapshot
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ClipboardItemRecord", into = "ClipboardItemRecord")]
pub struct ClipboardItem {
    pub id: ItemId,
    pub timestamp: DateTime<Utc>,
    pub is_pinned: bool,
    pub pin_order: Option<u32>,
    pub copy_count: u32,
    pub payload: ItemPayload,
}

impl ClipboardItem {
    /// Builds a new unpinned text item; the content hash is computed here once.
    pub fn new_text(
        content: impl Into<String>,
        content_type: ContentType,
        sensitive_type: Option<SensitiveDataType>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        let content_hash = ContentHash::of_text(&content);
        Self {
            id: ItemId::new(),
            timestamp,
            is_pinned: false,
            pin_order: None,
            copy_count: 1,
            payload: ItemPayload::Text(TextPayload {
                content,
                content_hash,
                content_type,
                sensitive_type,
                auto_delete_at: None,
                pin_suggestion_dismissed: false,
            }),
        }
    }

    pub fn new_image(id: ItemId, metadata: ImageMetadata, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp,
            is_pinned: false,
            pin_order: None,
            copy_count: 1,
            payload: ItemPayload::Image(Some(metadata)),
        }
    }

    pub fn with_auto_delete_at(mut self, deadline: DateTime<Utc>) -> Self {
        if let Some(text) = self.text_mut() {
            text.auto_delete_at = Some(deadline);
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.payload, ItemPayload::Text(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self.payload, ItemPayload::Image(_))
    }

    pub fn text(&self) -> Option<&TextPayload> {
        match &self.payload {
            ItemPayload::Text(text) => Some(text),
            ItemPayload::Image(_) => None,
        }
    }

    fn text_mut(&mut self) -> Option<&mut TextPayload> {
        match &mut self.payload {
            ItemPayload::Text(text) => Some(text),
            ItemPayload::Image(_) => None,
        }
    }

    /// Marks the pin suggestion as dismissed. Returns `false` for images or
    /// when it was already dismissed.
    pub fn dismiss_pin_suggestion(&mut self) -> bool {
        match self.text_mut() {
            Some(text) if !text.pin_suggestion_dismissed => {
                text.pin_suggestion_dismissed = true;
                true
            }
            _ => false,
        }
    }

    /// Drops a pending auto-delete deadline, returning it if there was one.
    pub fn clear_auto_delete(&mut self) -> Option<DateTime<Utc>> {
        self.text_mut().and_then(|text| text.auto_delete_at.take())
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text().map(|t| t.content.as_str())
    }

    pub fn image_metadata(&self) -> Option<&ImageMetadata> {
        match &self.payload {
            ItemPayload::Image(meta) => meta.as_ref(),
            ItemPayload::Text(_) => None,
        }
    }

    pub fn auto_delete_at(&self) -> Option<DateTime<Utc>> {
        self.text().and_then(|t| t.auto_delete_at)
    }

    /// Whether this is a text item holding exactly `content`.
    pub fn has_text(&self, content: &str) -> bool {
        self.text_content() == Some(content)
    }

    /// Short label for menus: text truncated to 50 characters, or the image
    /// dimensions.
    pub fn display_label(&self) -> String {
        match &self.payload {
            ItemPayload::Text(text) => {
                let mut chars = text.content.chars();
                let head: String = chars.by_ref().take(LABEL_MAX_CHARS).collect();
                if chars.next().is_some() {
                    format!("{head}...")
                } else {
                    head
                }
            }
            ItemPayload::Image(Some(meta)) => meta.dimensions_label(),
            ItemPayload::Image(None) => "Image".to_string(),
        }
    }

    /// Frequently re-copied text that the user has not dismissed yet.
    pub fn should_suggest_pin(&self) -> bool {
        match &self.payload {
            ItemPayload::Text(text) => {
                !self.is_pinned
                    && self.copy_count >= PIN_SUGGESTION_THRESHOLD
                    && !text.pin_suggestion_dismissed
            }
            ItemPayload::Image(_) => false,
        }
    }
}

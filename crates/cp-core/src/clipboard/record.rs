use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ClipboardItem, ContentHash, ContentType, ImageMetadata, ItemPayload, SensitiveDataType,
    TextPayload,
};
use crate::ids::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Text,
    Image,
}

/// Snapshot layout of a [`ClipboardItem`].
///
/// Older snapshots omit `type` (decoded as text), `copyCount` (1) and
/// `pinSuggestionDismissed` (false).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItemRecord {
    pub id: ItemId,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    pub timestamp: DateTime<Utc>,
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_order: Option<u32>,
    #[serde(default = "default_copy_count")]
    pub copy_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_type: Option<SensitiveDataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_delete_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pin_suggestion_dismissed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_metadata: Option<ImageMetadata>,
}

fn default_copy_count() -> u32 {
    1
}

impl From<ClipboardItemRecord> for ClipboardItem {
    fn from(record: ClipboardItemRecord) -> Self {
        let payload = match record.kind {
            ItemKind::Text => {
                let content = record.content.unwrap_or_default();
                let content_hash = match record.content_hash {
                    Some(hex) => ContentHash::from_hex(hex),
                    None => ContentHash::of_text(&content),
                };
                ItemPayload::Text(TextPayload {
                    content,
                    content_hash,
                    content_type: record.content_type.unwrap_or(ContentType::Plain),
                    sensitive_type: record.sensitive_type,
                    auto_delete_at: record.auto_delete_at,
                    pin_suggestion_dismissed: record.pin_suggestion_dismissed,
                })
            }
            ItemKind::Image => ItemPayload::Image(record.image_metadata),
        };

        ClipboardItem {
            id: record.id,
            timestamp: record.timestamp,
            is_pinned: record.is_pinned,
            pin_order: record.pin_order,
            copy_count: record.copy_count,
            payload,
        }
    }
}

impl From<ClipboardItem> for ClipboardItemRecord {
    fn from(item: ClipboardItem) -> Self {
        let mut record = ClipboardItemRecord {
            id: item.id,
            kind: ItemKind::Text,
            timestamp: item.timestamp,
            is_pinned: item.is_pinned,
            pin_order: item.pin_order,
            copy_count: item.copy_count,
            content: None,
            content_hash: None,
            content_type: None,
            sensitive_type: None,
            auto_delete_at: None,
            pin_suggestion_dismissed: false,
            image_metadata: None,
        };

        match item.payload {
            ItemPayload::Text(text) => {
                record.content = Some(text.content);
                record.content_hash = Some(text.content_hash.as_str().to_string());
                record.content_type = Some(text.content_type);
                record.sensitive_type = text.sensitive_type;
                record.auto_delete_at = text.auto_delete_at;
                record.pin_suggestion_dismissed = text.pin_suggestion_dismissed;
            }
            ItemPayload::Image(meta) => {
                record.kind = ItemKind::Image;
                record.image_metadata = meta;
            }
        }

        record
    }
}

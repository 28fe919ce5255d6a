//! Clipboard domain models and classifiers.
mod classify;
mod content_type;
mod hash;
mod item;
mod raw_image;
mod record;
mod sensitivity;

pub use classify::{classify, Classification};
pub use content_type::{classify_content, ContentType};
pub use hash::ContentHash;
pub use item::{ClipboardItem, ImageMetadata, ItemPayload, TextPayload, IMAGE_FORMAT_PNG};
pub use raw_image::RawImage;
pub use record::{ClipboardItemRecord, ItemKind};
pub use sensitivity::{classify_sensitivity, SensitiveDataType};

//! # cp-core
//!
//! Core domain models and business rules for ClipPin.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! the clipboard item model, the content/sensitivity classifiers, user
//! preferences, configuration DTOs and the port traits implemented by the
//! infrastructure and platform layers.

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{
    classify, classify_content, classify_sensitivity, Classification, ClipboardItem,
    ContentHash, ContentType, ImageMetadata, ItemPayload, RawImage, SensitiveDataType,
    TextPayload,
};
pub use config::{AppConfig, EngineConfig};
pub use ids::ItemId;
pub use settings::model::{Preferences, SensitivePolicy};

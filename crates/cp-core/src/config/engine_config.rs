use std::time::Duration;

use super::AppConfig;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_PINNED_ITEMS: usize = 20;
pub const DEFAULT_MAX_IMAGES: usize = 20;
pub const DEFAULT_AUTO_DELETE_AFTER: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10_000_000;

/// Resolved engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub poll_interval: Duration,
    pub max_pinned_items: usize,
    pub max_images: usize,
    pub auto_delete_after: Duration,
    pub max_image_bytes: u64,
    pub reclaim_image_files: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_pinned_items: DEFAULT_MAX_PINNED_ITEMS,
            max_images: DEFAULT_MAX_IMAGES,
            auto_delete_after: DEFAULT_AUTO_DELETE_AFTER,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            reclaim_image_files: false,
        }
    }
}

impl EngineConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        let defaults = Self::default();
        Self {
            poll_interval: config
                .poller
                .interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            max_pinned_items: config
                .history
                .max_pinned_items
                .unwrap_or(defaults.max_pinned_items),
            max_images: config.history.max_images.unwrap_or(defaults.max_images),
            auto_delete_after: config
                .history
                .auto_delete_after_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.auto_delete_after),
            max_image_bytes: config
                .images
                .max_image_bytes
                .unwrap_or(defaults.max_image_bytes),
            reclaim_image_files: config
                .history
                .reclaim_image_files
                .unwrap_or(defaults.reclaim_image_files),
        }
    }
}

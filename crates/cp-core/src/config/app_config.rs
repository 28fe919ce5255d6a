use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Operator configuration read from `config.toml` (pure data, no logic).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub poller: PollerSection,
    pub history: HistorySection,
    pub images: ImagesSection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerSection {
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySection {
    /// Hard pin cap, independent of `Preferences.max_pinned_items`.
    pub max_pinned_items: Option<usize>,
    /// Cap on unpinned image items kept in recent history.
    pub max_images: Option<usize>,
    pub auto_delete_after_secs: Option<u64>,
    /// Delete image files once no item references them.
    pub reclaim_image_files: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesSection {
    pub max_image_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Overrides the per-user data root.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_empty_sections() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.poller.interval_ms.is_none());
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn parses_every_section() {
        let config = AppConfig::from_toml_str(
            r#"
            [poller]
            interval_ms = 250

            [history]
            max_pinned_items = 10
            max_images = 5
            auto_delete_after_secs = 60
            reclaim_image_files = true

            [images]
            max_image_bytes = 1024

            [storage]
            data_dir = "/tmp/clippin"
            "#,
        )
        .unwrap();

        assert_eq!(config.poller.interval_ms, Some(250));
        assert_eq!(config.history.max_pinned_items, Some(10));
        assert_eq!(config.history.max_images, Some(5));
        assert_eq!(config.history.auto_delete_after_secs, Some(60));
        assert_eq!(config.history.reclaim_image_files, Some(true));
        assert_eq!(config.images.max_image_bytes, Some(1024));
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/clippin")));
    }

    #[test]
    fn partial_section_keeps_other_keys_unset() {
        let config = AppConfig::from_toml_str("[history]\nmax_images = 3\n").unwrap();
        assert_eq!(config.history.max_images, Some(3));
        assert!(config.history.max_pinned_items.is_none());
        assert!(config.images.max_image_bytes.is_none());
    }

    #[test]
    fn wrong_value_type_is_an_error() {
        assert!(AppConfig::from_toml_str("[poller]\ninterval_ms = \"fast\"\n").is_err());
    }
}

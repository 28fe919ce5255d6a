//! # Configuration Loader
//!
//! Reads `config.toml` into [`AppConfig`]. Pure data loading: defaults are
//! applied later by `EngineConfig::from_app_config`.

use std::path::Path;

use anyhow::Context;
use cp_core::config::AppConfig;
use tracing::debug;

/// Loads configuration from a TOML file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid TOML for [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    AppConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Picks the config source: an explicit path must load, the default path is
/// optional and an absent file means defaults.
pub fn resolve_config(explicit: Option<&Path>, default_path: &Path) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    if default_path.is_file() {
        return load_config(default_path);
    }
    debug!(path = %default_path.display(), "no config file, using defaults");
    Ok(AppConfig::default())
}

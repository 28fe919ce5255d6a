//! # Dependency Injection
//!
//! The only place that depends on cp-infra, cp-platform and cp-app at once.
//! Assembles adapters into an [`EngineRuntime`]; makes no decisions beyond
//! picking the adapter for this OS.

use std::path::Path;
use std::sync::Arc;

use cp_app::{AppPaths, ClipboardPoller, EngineDeps, EngineHandle, EngineRuntime, HistoryEngine};
use cp_core::app_dirs::AppDirs;
use cp_core::config::{AppConfig, EngineConfig};
use cp_core::ports::{AppDirsPort, AutostartPort, SystemClipboardPort};
use cp_infra::{FsImageStore, JsonSnapshotStore, SystemClock};
use cp_platform::{ArboardClipboard, DesktopAutostart, DirsAppDirsAdapter, UnsupportedAutostart};
use tracing::{info, warn};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

/// Data root: `--data-dir`, then `storage.data_dir`, then the per-user default.
pub fn resolve_app_dirs(
    cli_override: Option<&Path>,
    config: Option<&AppConfig>,
) -> WiringResult<AppDirs> {
    if let Some(root) = cli_override.or_else(|| config.and_then(|c| c.storage.data_dir.as_deref())) {
        return Ok(AppDirs {
            app_data_root: root.to_path_buf(),
        });
    }
    DirsAppDirsAdapter::new()
        .get_app_dirs()
        .map_err(|e| WiringError::DataDir(e.to_string()))
}

/// Wires the engine against the real system clipboard and OS autostart.
pub fn wire_engine(config: &AppConfig, paths: &AppPaths) -> WiringResult<(EngineRuntime, EngineHandle)> {
    let clipboard = ArboardClipboard::new().map_err(|e| WiringError::ClipboardInit(format!("{e:#}")))?;
    let autostart: Arc<dyn AutostartPort> = match DesktopAutostart::for_current_platform() {
        Ok(autostart) => Arc::new(autostart),
        Err(e) => {
            warn!(error = %e, "launch at login unavailable");
            Arc::new(UnsupportedAutostart)
        }
    };
    Ok(build_engine(config, paths, Arc::new(clipboard), autostart))
}

/// Assembles the engine from already-constructed OS adapters.
pub fn build_engine(
    config: &AppConfig,
    paths: &AppPaths,
    clipboard: Arc<dyn SystemClipboardPort>,
    autostart: Arc<dyn AutostartPort>,
) -> (EngineRuntime, EngineHandle) {
    let engine_config = EngineConfig::from_app_config(config);
    info!(
        data_dir = %paths.snapshot_dir.display(),
        poll_interval_ms = engine_config.poll_interval.as_millis() as u64,
        reclaim_image_files = engine_config.reclaim_image_files,
        "wiring engine"
    );

    let deps = EngineDeps {
        store: Arc::new(JsonSnapshotStore::new(&paths.snapshot_dir)),
        images: Arc::new(FsImageStore::new(&paths.images_dir, engine_config.max_image_bytes)),
        autostart,
        clock: Arc::new(SystemClock),
    };
    let engine = HistoryEngine::load(deps, engine_config);
    EngineRuntime::new(engine, ClipboardPoller::new(clipboard))
}

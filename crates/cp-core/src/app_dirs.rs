use std::path::PathBuf;

/// Per-user application data root, as reported by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

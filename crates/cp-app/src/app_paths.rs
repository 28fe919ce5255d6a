use std::path::PathBuf;

use cp_core::app_dirs::AppDirs;

/// Concrete on-disk locations derived from the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Directory holding `history.json`, `pins.json` and `preferences.json`.
    pub snapshot_dir: PathBuf,
    pub images_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub config_path: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            snapshot_dir: dirs.app_data_root.clone(),
            images_dir: dirs.app_data_root.join("images"),
            logs_dir: dirs.app_data_root.join("logs"),
            config_path: dirs.app_data_root.join("config.toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_derives_concrete_locations_from_app_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/clippin"),
        };

        let paths = AppPaths::from_app_dirs(&dirs);

        assert_eq!(paths.snapshot_dir, PathBuf::from("/tmp/clippin"));
        assert_eq!(paths.images_dir, PathBuf::from("/tmp/clippin/images"));
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/clippin/logs"));
        assert_eq!(paths.config_path, PathBuf::from("/tmp/clippin/config.toml"));
    }
}

//! Application paths.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Application paths.
pub struct AppPaths {
    /// Configuration directory.
    pub config: PathBuf,
}

impl AppPaths {
    /// Create paths for the chaincli application.
    #[must_use]
    pub fn new() -> Self {
        ProjectDirs::from("", "", "chaincli").map_or_else(
            || Self {
                config: PathBuf::from(".chaincli"),
            },
            |proj_dirs| Self {
                config: proj_dirs.config_dir().to_path_buf(),
            },
        )
    }

    /// Path to the config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

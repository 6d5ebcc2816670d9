//! Where the engine keeps its config file and logs.
//!
//! Debug builds and `cargo` runs keep everything under the working directory.
//! Release builds use the platform directories from `dirs`, falling back to the
//! working directory when the platform has none.

use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data roots
const APP_DIR: &str = "thumbforge";

/// Name of the engine config file
pub const CONFIG_FILE_NAME: &str = "thumbforge.json";

/// Debug builds and `cargo run` count as development.
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Resolved config and data roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineDirs {
    pub config: PathBuf,
    pub data: PathBuf,
}

impl EngineDirs {
    /// Both roots at `root`
    pub fn local(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config: root.clone(),
            data: root,
        }
    }

    /// Roots for the current build.
    ///
    /// Linux splits config (`~/.config/thumbforge`) from data
    /// (`~/.local/share/thumbforge`). Elsewhere both live in the data root.
    pub fn resolve() -> Self {
        if is_dev_mode() {
            return Self::local(".");
        }

        let Some(data) = dirs::data_dir().map(|p| p.join(APP_DIR)) else {
            return Self::local(".");
        };
        let config = if cfg!(target_os = "linux") {
            dirs::config_dir().map_or_else(|| data.clone(), |p| p.join(APP_DIR))
        } else {
            data.clone()
        };
        Self { config, data }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config.join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data.join("logs")
    }

    /// Create the config root and the logs directory.
    pub fn create_all(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(self.logs_dir())
    }
}

/// Config file for the current build
pub fn config_file() -> PathBuf {
    EngineDirs::resolve().config_file()
}

/// Logs directory for the current build
pub fn logs_dir() -> PathBuf {
    EngineDirs::resolve().logs_dir()
}

/// Create the platform directories. Development runs use the working directory
/// as-is.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }
    EngineDirs::resolve().create_all()
}

//! Unified path management for aikenize files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/aikenize/          # Config directory
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//!
//! ~/.local/share/aikenize/     # Data directory
//! ├── store/                   # Key-value store (one JSON file per key)
//! │   └── aiken_history.json
//! └── logs/                    # REPL logs
//!     └── aikenize.log.YYYY-MM-DD
//! ```
//!
//! Both roots can be overridden, which the CLI exposes as `--config-dir` and
//! `--data-dir` and the tests use to stay inside a temp directory.

use aikenize_core::error::{AikenizeError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "aikenize";

#[derive(Debug, Clone, Default)]
pub struct AikenizePaths {
    config_dir_override: Option<PathBuf>,
    data_dir_override: Option<PathBuf>,
}

impl AikenizePaths {
    /// Creates a resolver; `None` means the platform default for that root.
    pub fn new(config_dir: Option<&Path>, data_dir: Option<&Path>) -> Self {
        Self {
            config_dir_override: config_dir.map(Path::to_path_buf),
            data_dir_override: data_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the aikenize configuration directory (e.g. `~/.config/aikenize/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config_dir_override {
            return Ok(dir.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| AikenizeError::config("Cannot find config directory"))
    }

    /// Returns the aikenize data directory (e.g. `~/.local/share/aikenize/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| AikenizeError::config("Cannot find data directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to secret.json.
    ///
    /// Keep this file at mode 600; it holds the API key.
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn store_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("store"))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}

//! Configuration management for Toonify.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. A missing file is not an error.

mod types;
mod validate;

pub use types::*;

use crate::catalog::{self, StyleOption};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure for Toonify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input limits
    pub limits: LimitsConfig,

    /// Gemini model settings
    pub gemini: GeminiConfig,

    /// Studio behaviour
    pub studio: StudioConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.toonify.toonify/config.toml
    /// - Linux: ~/.config/toonify/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\toonify\config\config.toml
    ///
    /// Falls back to ~/.toonify/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "toonify", "toonify")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".toonify").join("config.toml")
            })
    }

    /// The style the studio starts with.
    ///
    /// Falls back to the catalog default if the configured key is unknown
    /// (only reachable for configs built in code, since loading validates).
    pub fn default_style(&self) -> &'static StyleOption {
        catalog::style_by_key(&self.studio.default_style).unwrap_or_else(catalog::default_style)
    }

    /// Rotation period of the processing status message.
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.studio.status_interval_ms)
    }

    /// Resolved output path for saved results (with ~ expansion).
    pub fn output_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.studio.output_file);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

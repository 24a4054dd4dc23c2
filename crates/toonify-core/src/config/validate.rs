//! Configuration validation with range checks.

use crate::catalog;
use crate::error::ConfigError;

use super::types::MAX_FILE_SIZE_MB_CEILING;
use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb > MAX_FILE_SIZE_MB_CEILING {
            return Err(ConfigError::ValidationError(format!(
                "limits.max_file_size_mb must be <= {MAX_FILE_SIZE_MB_CEILING}"
            )));
        }
        if self.studio.status_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "studio.status_interval_ms must be > 0".into(),
            ));
        }
        if self.studio.output_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "studio.output_file must not be empty".into(),
            ));
        }
        if catalog::style_by_key(&self.studio.default_style).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "studio.default_style '{}' is not an available style",
                self.studio.default_style
            )));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.model must not be empty".into(),
            ));
        }
        if !self.gemini.endpoint.starts_with("http://")
            && !self.gemini.endpoint.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(
                "gemini.endpoint must be an http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Limits applied to user input before anything is sent out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum source image size in megabytes
    pub max_file_size_mb: u64,
}

impl LimitsConfig {
    /// The limit in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Largest accepted `limits.max_file_size_mb`.
pub const MAX_FILE_SIZE_MB_CEILING: u64 = 1024;

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 5,
        }
    }
}

/// Gemini image model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base URL (without the `/models/...` path)
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            api_key: "${GEMINI_API_KEY}".to_string(),
        }
    }
}

/// Studio behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Style key selected at startup (e.g. "classic-comic")
    pub default_style: String,

    /// How often the processing status message rotates, in milliseconds
    pub status_interval_ms: u64,

    /// File name used when saving a result
    pub output_file: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            default_style: "classic-comic".to_string(),
            status_interval_ms: 2500,
            output_file: "toonify-blend.png".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_file_size_bytes() {
        assert_eq!(LimitsConfig::default().max_file_size_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_max_file_size_bytes_saturates() {
        let limits = LimitsConfig {
            max_file_size_mb: u64::MAX,
        };
        assert_eq!(limits.max_file_size_bytes(), u64::MAX);
    }
}

//! Error types for Toonify.
//!
//! Errors are split by where they originate: local input validation never
//! reaches the network, transformation errors come from the model call.
//! The `Display` text of [`InputError`] and [`TransformError`] is exactly
//! what the user sees.

use std::path::PathBuf;
use thiserror::Error;

/// Fallback message when a service or transport error carries no text.
pub const GENERIC_TRANSFORM_FAILURE: &str = "Failed to transform image. Please try again.";

/// Message used when the model answered without an image and without text.
pub const GENERIC_NO_IMAGE: &str = "The model could not generate the transformed image.";

/// Top-level error type for Toonify operations.
#[derive(Error, Debug)]
pub enum ToonifyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local validation errors (no request was made)
    #[error(transparent)]
    Input(#[from] InputError),

    /// Errors from the image transformation service
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Local validation failures, surfaced before any request is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Source file exceeds the upload limit
    #[error("File size too large. Please select an image under {max_mb}MB.")]
    FileTooLarge { size_bytes: u64, max_mb: u64 },

    /// A transformation was requested with no source image
    #[error("Please select a photo first.")]
    NoFileSelected,

    /// The source file could not be read
    #[error("Could not read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// The source bytes are not a recognized image
    #[error("Unsupported image file: {0}")]
    UnsupportedFormat(String),

    /// Style key not present in the catalog
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// A transformation is already in flight
    #[error("A transformation is already in progress.")]
    Busy,

    /// Save requested before any transformation succeeded
    #[error("Nothing to save yet. Transform a photo first.")]
    NoResult,
}

/// Failures of a single transformation attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// No API key configured; raised before any network call
    #[error("Gemini API key is missing. Set GEMINI_API_KEY or add it to the config file.")]
    MissingApiKey,

    /// Transport, HTTP, or response decoding failure
    #[error("{message}")]
    Service {
        message: String,
        status_code: Option<u16>,
    },

    /// The model responded without inline image data
    #[error("{0}")]
    NoImage(String),
}

impl TransformError {
    /// Build a service error, substituting the generic message for empty text.
    pub fn service(message: impl Into<String>, status_code: Option<u16>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_TRANSFORM_FAILURE.to_string()
        } else {
            message
        };
        Self::Service {
            message,
            status_code,
        }
    }

    /// Build an empty-result error from whatever text the model returned.
    pub fn no_image(model_text: Option<&str>) -> Self {
        match model_text {
            Some(text) if !text.trim().is_empty() => Self::NoImage(text.to_string()),
            _ => Self::NoImage(GENERIC_NO_IMAGE.to_string()),
        }
    }
}

/// Convenience type alias for Toonify results.
pub type Result<T> = std::result::Result<T, ToonifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let err = InputError::FileTooLarge {
            size_bytes: 6 * 1024 * 1024,
            max_mb: 5,
        };
        assert_eq!(
            err.to_string(),
            "File size too large. Please select an image under 5MB."
        );
    }

    #[test]
    fn test_service_error_falls_back_on_empty_message() {
        let err = TransformError::service("  ", Some(500));
        assert_eq!(err.to_string(), GENERIC_TRANSFORM_FAILURE);
    }

    #[test]
    fn test_service_error_keeps_message() {
        let err = TransformError::service("quota exceeded", Some(429));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_no_image_uses_model_text() {
        assert_eq!(TransformError::no_image(Some("blocked")).to_string(), "blocked");
        assert_eq!(TransformError::no_image(None).to_string(), GENERIC_NO_IMAGE);
        assert_eq!(TransformError::no_image(Some("")).to_string(), GENERIC_NO_IMAGE);
    }

    #[test]
    fn test_top_level_is_transparent_for_user_errors() {
        let err: ToonifyError = InputError::NoFileSelected.into();
        assert_eq!(err.to_string(), "Please select a photo first.");
    }
}

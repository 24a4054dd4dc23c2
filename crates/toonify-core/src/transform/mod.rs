//! Image transformation backends.
//!
//! A transformer takes a source photo and an instruction and returns the
//! generated image as a `data:image/png;base64,...` URL. Gemini is the only
//! hosted backend; the trait exists so sessions can run against a stub.

pub(crate) mod gemini;

pub use gemini::{GeminiTransformer, SYSTEM_INSTRUCTION};

use crate::config::GeminiConfig;
use crate::error::TransformError;
use async_trait::async_trait;

/// One transformation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    /// Source image as a data URL (a bare base64 payload is also accepted)
    pub image: String,
    /// Instruction text
    pub prompt: String,
    /// MIME type of the source image
    pub mime_type: String,
}

/// Trait that all transformation backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (sessions hold an `Arc<dyn ImageTransformer>`).
#[async_trait]
pub trait ImageTransformer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Run one transformation. No retries.
    async fn transform(&self, request: &TransformRequest) -> Result<String, TransformError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Returns `None` for empty values and unset variables.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Builds the configured transformer.
pub struct TransformerFactory;

impl TransformerFactory {
    /// Create a Gemini transformer from config with optional CLI overrides.
    ///
    /// A missing key is not an error here: every transformation attempt
    /// fails with [`TransformError::MissingApiKey`] before touching the
    /// network instead.
    pub fn create(
        config: &GeminiConfig,
        api_key_override: Option<&str>,
        model_override: Option<&str>,
    ) -> GeminiTransformer {
        let api_key = api_key_override
            .and_then(resolve_env_var)
            .or_else(|| resolve_env_var(&config.api_key));
        if api_key.is_none() {
            tracing::warn!("No Gemini API key configured; transformations will fail");
        }
        let model = model_override.unwrap_or(&config.model);
        GeminiTransformer::new(&config.endpoint, model, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_TOONIFY_123}"), None);
    }

    #[test]
    fn test_factory_prefers_override() {
        let config = GeminiConfig {
            api_key: "${DEFINITELY_NOT_SET_TOONIFY_123}".to_string(),
            ..GeminiConfig::default()
        };
        let transformer = TransformerFactory::create(&config, Some("cli-key"), Some("custom"));
        assert!(transformer.has_api_key());
        assert_eq!(transformer.model(), "custom");
    }

    #[test]
    fn test_factory_without_key() {
        let config = GeminiConfig {
            api_key: "${DEFINITELY_NOT_SET_TOONIFY_123}".to_string(),
            ..GeminiConfig::default()
        };
        let transformer = TransformerFactory::create(&config, None, None);
        assert!(!transformer.has_api_key());
        assert_eq!(transformer.model(), "gemini-2.5-flash-image");
    }
}

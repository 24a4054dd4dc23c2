//! Gemini image transformer using the `generateContent` API.
//!
//! Sends the source photo as an inline base64 part next to the instruction
//! text, with a fixed system instruction, and returns the first inline image
//! of the first candidate.

use super::{ImageTransformer, TransformRequest};
use crate::data_url;
use crate::error::TransformError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// System-level framing sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class comic book artist and illustrator. \
     Your goal is to recreate photos as highly stylized art. You NEVER produce photorealistic images. \
     You focus on bold linework, cel-shading, hatching, and non-realistic color palettes. \
     Every output must look like a hand-drawn illustration or a digital painting, \
     never like a filtered photograph.";

/// Gemini transformer.
pub struct GeminiTransformer {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiTransformer {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

// --- Request types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

/// A request part: inline image data or text.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl GenerateContentRequest {
    fn from_transform_request(request: &TransformRequest) -> Self {
        let mime_type = if request.mime_type.is_empty() {
            data_url::mime_type(&request.image).unwrap_or("image/jpeg")
        } else {
            request.mime_type.as_str()
        };
        Self {
            contents: vec![Content {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: InlineDataPayload {
                            mime_type: mime_type.to_string(),
                            data: data_url::payload(&request.image).to_string(),
                        },
                    },
                    RequestPart::Text {
                        text: request.prompt.clone(),
                    },
                ],
            }],
            system_instruction: SystemInstruction {
                parts: vec![RequestPart::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            },
        }
    }
}

// --- Response types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineDataResponse>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct InlineDataResponse {
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Pull the generated image out of a response.
///
/// The first part with inline data wins and is always labelled PNG. With no
/// image, the model's own text (typically a refusal) becomes the error.
fn extract_image(response: GenerateContentResponse) -> Result<String, TransformError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        tracing::warn!("Gemini blocked the prompt: {reason}");
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(TransformError::no_image(None));
    };
    if let Some(reason) = candidate.finish_reason.as_deref() {
        tracing::debug!("Gemini finish reason: {reason}");
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    if let Some(inline) = parts
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty())
    {
        return Ok(data_url::wrap("image/png", &inline.data));
    }

    let text: String = parts
        .iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text.as_deref())
        .collect();
    Err(TransformError::no_image(Some(&text)))
}

/// Best message from a non-2xx response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl ImageTransformer for GeminiTransformer {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn transform(&self, request: &TransformRequest) -> Result<String, TransformError> {
        let api_key = self.api_key.as_deref().ok_or(TransformError::MissingApiKey)?;
        let start = Instant::now();

        let body = GenerateContentRequest::from_transform_request(request);
        tracing::debug!(
            "Gemini request: model={}, mime={}, prompt_chars={}",
            self.model,
            request.mime_type,
            request.prompt.len()
        );

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransformError::service(e.to_string(), None))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(TransformError::service(
                error_message(&text),
                Some(status.as_u16()),
            ));
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| TransformError::service(e.to_string(), Some(status.as_u16())))?;

        let result = extract_image(parsed);
        tracing::info!(
            "Gemini {} in {}ms",
            if result.is_ok() { "returned an image" } else { "returned no image" },
            start.elapsed().as_millis()
        );
        result
    }
}

//! Core data types produced by a transformation.

use serde::{Deserialize, Serialize};

use crate::catalog::ArtStyle;
use crate::data_url;

/// The outcome of one successful transformation.
///
/// Replaced wholesale on every new attempt and discarded on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationResult {
    /// Data URL of the source photo
    pub original_url: String,

    /// Data URL of the generated PNG
    pub transformed_url: String,

    /// Style used for the generation
    pub style: ArtStyle,

    /// Artist names blended in, in selection order
    pub influences: Vec<String>,
}

impl TransformationResult {
    /// Decode the generated image into PNG bytes for saving.
    pub fn png_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        data_url::decode(&self.transformed_url)
    }

    /// Short label for the influences, "Standard Toon" when none were chosen.
    pub fn influence_label(&self) -> String {
        if self.influences.is_empty() {
            "Standard Toon".to_string()
        } else {
            self.influences.join(", ")
        }
    }
}

/// A compact, data-free view of a result for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub style: ArtStyle,
    pub influences: Vec<String>,
    pub source_bytes: usize,
    pub output_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(influences: &[&str]) -> TransformationResult {
        TransformationResult {
            original_url: "data:image/jpeg;base64,/9j/".to_string(),
            transformed_url: "data:image/png;base64,AQID".to_string(),
            style: ArtStyle::ClassicComic,
            influences: influences.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_png_bytes() {
        assert_eq!(result(&[]).png_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_influence_label() {
        assert_eq!(result(&[]).influence_label(), "Standard Toon");
        assert_eq!(result(&["Jim Lee", "Jock"]).influence_label(), "Jim Lee, Jock");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(result(&["Jock"])).unwrap();
        assert_eq!(json["transformedUrl"], "data:image/png;base64,AQID");
        assert_eq!(json["style"], "Classic Comic Book");
        assert_eq!(json["influences"][0], "Jock");
    }
}

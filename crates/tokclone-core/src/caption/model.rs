//! Caption result domain model.

use serde::{Deserialize, Serialize};

pub const NO_API_KEY_CAPTION: &str = "Add your API Key to use AI features!";
pub const NO_API_KEY_HASHTAG: &str = "#noapikey";
pub const FALLBACK_CAPTION: &str = "Could not generate caption at this time.";
pub const FALLBACK_HASHTAG: &str = "#error";
pub const FALLBACK_ANALYSIS: &str = "AI is currently sleeping.";

/// Structured output of the caption assistant.
///
/// This is also the JSON shape requested from the model, so field names
/// match the response schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionResult {
    pub caption: String,
    /// Ordered list of short tags such as `#fyp`
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub analysis: Option<String>,
}

impl CaptionResult {
    /// Placeholder returned when no credential is configured.
    pub fn missing_api_key() -> Self {
        Self {
            caption: NO_API_KEY_CAPTION.to_string(),
            hashtags: vec![NO_API_KEY_HASHTAG.to_string()],
            analysis: None,
        }
    }

    /// Fallback returned for any request or parse failure.
    pub fn fallback() -> Self {
        Self {
            caption: FALLBACK_CAPTION.to_string(),
            hashtags: vec![FALLBACK_HASHTAG.to_string()],
            analysis: Some(FALLBACK_ANALYSIS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_model_output() {
        let result: CaptionResult = serde_json::from_str(
            r##"{
                "caption": "POV: sunrise",
                "hashtags": ["#sun", "#fyp"],
                "analysis": "Warm light."
            }"##,
        )
        .unwrap();

        assert_eq!(result.caption, "POV: sunrise");
        assert_eq!(result.hashtags, vec!["#sun", "#fyp"]);
        assert_eq!(result.analysis.as_deref(), Some("Warm light."));
        assert_ne!(result, CaptionResult::fallback());
    }

    #[test]
    fn test_substitute_payloads_are_distinct() {
        let missing = CaptionResult::missing_api_key();
        let fallback = CaptionResult::fallback();
        assert_ne!(missing, fallback);
        assert!(missing.analysis.is_none());
    }
}

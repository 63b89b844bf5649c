//! Caption assistant backed by Gemini.
//!
//! Turns a video's description and author into a viral caption, hashtags and
//! a short analysis. Every failure is converted into a fixed substitute
//! payload, so callers always get something to display.

use async_trait::async_trait;
use minijinja::{Environment, context};
use serde::Deserialize;
use serde_json::{Value, json};
use tokclone_core::caption::{CaptionResult, CaptionService};
use tokclone_core::config::AiSettings;
use tokclone_core::video::VideoRecord;
use tracing::{debug, error, warn};

use crate::gemini_api_agent::{AgentError, GeminiApiAgent};

const PROMPT_TEMPLATE_NAME: &str = "caption_prompt.txt";
const PROMPT_TEMPLATE: &str = r#"You are a social media expert.
Based on this video description: "{{ description }}" and the username "{{ username }}",
generate a new, more viral, catchy caption and a set of trending hashtags.
Also provide a short witty analysis of why this video might go viral."#;

/// Shape the model is asked to produce. All fields are required.
#[derive(Deserialize)]
struct CaptionOutput {
    caption: String,
    hashtags: Vec<String>,
    analysis: String,
}

/// Gemini response schema for [`CaptionOutput`].
pub fn caption_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "caption": { "type": "STRING" },
            "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "analysis": { "type": "STRING" }
        },
        "required": ["caption", "hashtags", "analysis"]
    })
}

/// `CaptionService` that calls Gemini once per invocation.
///
/// Without a credential no request is ever made.
pub struct GeminiCaptionAssistant {
    agent: Option<GeminiApiAgent>,
    templates: Environment<'static>,
}

impl GeminiCaptionAssistant {
    /// Creates an assistant. `None` or a blank key disables network calls.
    pub fn new(agent: Option<GeminiApiAgent>) -> Self {
        let mut templates = Environment::new();
        // The template is a compile-time constant; a syntax error would be a bug.
        if let Err(err) = templates.add_template(PROMPT_TEMPLATE_NAME, PROMPT_TEMPLATE) {
            error!(error = %err, "Invalid caption prompt template");
        }
        Self {
            agent: agent.map(|agent| agent.with_response_schema(caption_response_schema())),
            templates,
        }
    }

    /// Builds the assistant from an optional API key and the `[ai]` settings.
    pub fn from_settings(api_key: Option<&str>, settings: &AiSettings) -> Self {
        let agent = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .and_then(|key| match GeminiApiAgent::from_settings(key, settings) {
                Ok(agent) => Some(agent),
                Err(err) => {
                    error!(error = %err, "Failed to configure Gemini client");
                    None
                }
            });
        Self::new(agent)
    }

    pub fn has_credential(&self) -> bool {
        self.agent.is_some()
    }

    fn render_prompt(&self, video: &VideoRecord) -> Result<String, minijinja::Error> {
        self.templates.get_template(PROMPT_TEMPLATE_NAME)?.render(context! {
            description => &video.description,
            username => &video.username,
        })
    }

    async fn request_caption(
        &self,
        agent: &GeminiApiAgent,
        video: &VideoRecord,
    ) -> Result<CaptionResult, CaptionError> {
        let prompt = self.render_prompt(video)?;
        let text = agent.generate(&prompt).await?;
        parse_caption_output(&text)
    }
}

#[derive(Debug, thiserror::Error)]
enum CaptionError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("prompt rendering failed: {0}")]
    Template(#[from] minijinja::Error),
    #[error("malformed caption JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses model output, tolerating a surrounding Markdown code fence.
fn parse_caption_output(text: &str) -> Result<CaptionResult, CaptionError> {
    let trimmed = text.trim();
    let json_text = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    let output: CaptionOutput = serde_json::from_str(json_text)?;
    Ok(CaptionResult {
        caption: output.caption,
        hashtags: output.hashtags,
        analysis: Some(output.analysis),
    })
}

#[async_trait]
impl CaptionService for GeminiCaptionAssistant {
    async fn generate_caption(&self, video: &VideoRecord) -> CaptionResult {
        let Some(agent) = &self.agent else {
            warn!("No API key provided");
            return CaptionResult::missing_api_key();
        };

        debug!(video_id = %video.id, model = agent.model(), "Requesting caption");
        match self.request_caption(agent, video).await {
            Ok(result) => result,
            Err(err) => {
                error!(video_id = %video.id, error = %err, "Gemini API error");
                CaptionResult::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokclone_core::caption::{FALLBACK_CAPTION, NO_API_KEY_CAPTION, NO_API_KEY_HASHTAG};

    fn video() -> VideoRecord {
        VideoRecord {
            id: "1".to_string(),
            url: "https://example.com/1.mp4".to_string(),
            username: "@fire_chaser".to_string(),
            avatar: String::new(),
            description: "Campfire at dusk".to_string(),
            song: "Original Sound".to_string(),
            likes: 1,
            comments: 0,
            shares: 0,
        }
    }

    #[tokio::test]
    async fn test_missing_key_returns_placeholder() {
        let assistant = GeminiCaptionAssistant::from_settings(None, &AiSettings::default());
        assert!(!assistant.has_credential());

        let result = assistant.generate_caption(&video()).await;
        assert_eq!(result.caption, NO_API_KEY_CAPTION);
        assert!(result.hashtags.iter().any(|tag| tag == NO_API_KEY_HASHTAG));
    }

    #[tokio::test]
    async fn test_blank_key_is_treated_as_missing() {
        let assistant = GeminiCaptionAssistant::from_settings(Some("  "), &AiSettings::default());
        assert!(!assistant.has_credential());
        assert_eq!(
            assistant.generate_caption(&video()).await,
            CaptionResult::missing_api_key()
        );
    }

    #[tokio::test]
    async fn test_network_failure_returns_fallback() {
        let settings = AiSettings {
            // Nothing listens on the discard port locally
            base_url: "http://127.0.0.1:9/v1beta/models".to_string(),
            request_timeout_secs: 5,
            ..AiSettings::default()
        };
        let assistant = GeminiCaptionAssistant::from_settings(Some("test-key"), &settings);
        assert!(assistant.has_credential());

        let result = assistant.generate_caption(&video()).await;
        assert_eq!(result, CaptionResult::fallback());
        assert_eq!(result.caption, FALLBACK_CAPTION);
    }

    #[test]
    fn test_prompt_embeds_description_and_username() {
        let assistant = GeminiCaptionAssistant::new(None);
        let prompt = assistant.render_prompt(&video()).unwrap();
        assert!(prompt.contains("\"Campfire at dusk\""));
        assert!(prompt.contains("\"@fire_chaser\""));
    }

    #[test]
    fn test_parse_plain_and_fenced_output() {
        let raw = r##"{
            "caption": "Cozy vibes",
            "hashtags": ["#camp", "#fyp"],
            "analysis": "Fire is hypnotic."
        }"##;
        let plain = parse_caption_output(raw).unwrap();
        assert_eq!(plain.hashtags, vec!["#camp", "#fyp"]);
        assert_eq!(plain.analysis.as_deref(), Some("Fire is hypnotic."));

        let fenced = parse_caption_output(&format!("```json\n{raw}\n```")).unwrap();
        assert_eq!(fenced, plain);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_caption_output(r#"{"caption": "only"}"#).is_err());
        assert!(parse_caption_output("not json").is_err());
    }
}

//! GeminiApiAgent - Direct REST API client for Gemini.
//!
//! Sends a single text prompt to `generateContent` and returns the text of
//! the first candidate. An optional response schema switches the model to
//! JSON output.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokclone_core::config::{AiSettings, DEFAULT_AI_BASE_URL, DEFAULT_AI_MODEL};

/// Failure of a single Gemini request.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Transport failure (DNS, connect, TLS, timeout)
    #[error("Gemini API request failed: {0}")]
    Transport(String),
    /// Non-success HTTP status
    #[error("Gemini API returned {status}: {message}")]
    Http { status: u16, message: String },
    /// Response body could not be decoded
    #[error("Failed to parse Gemini response: {0}")]
    InvalidResponse(String),
    /// Response contained no text
    #[error("Gemini API returned no text in the response candidates")]
    EmptyResponse,
    #[error("Failed to build Gemini client: {0}")]
    Client(String),
}

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    response_schema: Option<Value>,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            response_schema: None,
        }
    }

    /// Creates an agent from the `[ai]` config section.
    pub fn from_settings(
        api_key: impl Into<String>,
        settings: &AiSettings,
    ) -> Result<Self, AgentError> {
        let model = if settings.model.trim().is_empty() {
            DEFAULT_AI_MODEL
        } else {
            settings.model.as_str()
        };
        let mut agent = Self::new(api_key, model).with_base_url(&settings.base_url);
        if settings.request_timeout_secs > 0 {
            agent = agent.with_timeout(Duration::from_secs(settings.request_timeout_secs))?;
        }
        Ok(agent)
    }

    /// Overrides the endpoint prefix (`{base_url}/{model}:generateContent`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Rebuilds the HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AgentError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AgentError::Client(err.to_string()))?;
        Ok(self)
    }

    /// Requests JSON output matching the given Gemini schema object.
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            }),
        }
    }

    /// Sends one prompt and returns the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let body = self.build_request(prompt);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| AgentError::Transport(err.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AgentError::InvalidResponse(err.without_url().to_string()))?;

        extract_text_response(parsed)
    }
}

impl std::fmt::Debug for GeminiApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, AgentError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(AgentError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> AgentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    AgentError::Http {
        status: status.as_u16(),
        message,
    }
}

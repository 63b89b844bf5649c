//! Configuration domain models.
//!
//! `AppConfig` mirrors `config.toml`; every section and field is optional in
//! the file and falls back to the defaults below. `SecretConfig` mirrors
//! `secret.json` and carries the AI service credential.

use serde::{Deserialize, Serialize};

/// Default Gemini model used for caption generation.
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
/// Default Gemini REST endpoint (model name and method are appended).
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Fraction of a panel that must be visible for it to become active.
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.6;
/// Height of the scroll container when none (or an unusable one) is configured.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
/// Simulated network latency for login and register.
pub const DEFAULT_AUTH_LATENCY_MS: u64 = 1500;

/// Root configuration loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiSettings,
    pub feed: FeedSettings,
    pub auth: AuthSettings,
}

/// Settings for the AI caption assistant.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AiSettings {
    pub model: String,
    pub base_url: String,
    /// Request timeout in seconds; `0` leaves the transport default in place.
    pub request_timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_AI_MODEL.to_string(),
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            request_timeout_secs: 0,
        }
    }
}

/// How the activation store resolves several panels crossing the threshold
/// in one observation batch.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// The last crossing reported in the batch wins.
    #[default]
    LastReported,
    /// The crossing with the highest visible ratio wins; ties go to the later one.
    MostVisible,
}

/// Settings for the scrolling feed.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FeedSettings {
    pub activation_threshold: f64,
    pub activation_policy: ActivationPolicy,
    pub start_muted: bool,
    /// Height of the scroll container in pixels. Every panel is one viewport tall.
    pub viewport_height: f64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            activation_policy: ActivationPolicy::default(),
            start_muted: false,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl FeedSettings {
    /// Threshold clamped into `(0, 1]`; non-finite values fall back to the default.
    pub fn effective_threshold(&self) -> f64 {
        let t = self.activation_threshold;
        if !t.is_finite() || t <= 0.0 {
            DEFAULT_ACTIVATION_THRESHOLD
        } else {
            t.min(1.0)
        }
    }

    /// Viewport height in pixels; zero, negative and non-finite values fall back to the default.
    pub fn effective_viewport_height(&self) -> f64 {
        sanitize_viewport_height(self.viewport_height).unwrap_or(DEFAULT_VIEWPORT_HEIGHT)
    }
}

/// Returns the height if it can lay out panels: finite and above zero.
pub fn sanitize_viewport_height(height: f64) -> Option<f64> {
    (height.is_finite() && height > 0.0).then_some(height)
}

/// Settings for the simulated authentication backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AuthSettings {
    pub simulated_latency_ms: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_AUTH_LATENCY_MS,
        }
    }
}

/// Root structure of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credential.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Returns the configured API key, ignoring blank values.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}

//! External AI integrations for TokClone.
//!
//! - `gemini_api_agent`: thin client for the Gemini `generateContent` REST API
//! - `caption_assistant`: the `CaptionService` built on top of it

pub mod caption_assistant;
pub mod gemini_api_agent;

pub use caption_assistant::GeminiCaptionAssistant;
pub use gemini_api_agent::{AgentError, GeminiApiAgent};

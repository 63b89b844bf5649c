//! AI caption domain module.
//!
//! # Module Structure
//!
//! - `model`: Caption result and the fixed fallback payloads
//! - `service`: Caption service trait

mod model;
mod service;

// Re-export public API
pub use model::{
    CaptionResult, FALLBACK_ANALYSIS, FALLBACK_CAPTION, FALLBACK_HASHTAG, NO_API_KEY_CAPTION,
    NO_API_KEY_HASHTAG,
};
pub use service::CaptionService;

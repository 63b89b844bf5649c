//! Domain layer for TokClone.
//!
//! Models, service traits and the state machines behind the video feed,
//! independent of any storage, network or terminal concerns.

pub mod caption;
pub mod config;
pub mod context;
pub mod error;
pub mod feed;
pub mod navigation;
pub mod user;
pub mod video;

// Re-export common types
pub use context::AppContext;
pub use error::{Result, TokError};

//! Feed domain module.
//!
//! Scroll-driven activation and per-panel playback for the video feed.
//!
//! # Module Structure
//!
//! - `tracker`: Viewport visibility tracking (publishes threshold crossings)
//! - `activation`: The single active-video store (subscribes to crossings)
//! - `media`: Host-provided media playback interface
//! - `playback`: Per-panel playback controller and AI assistant state

mod activation;
mod media;
mod playback;
mod tracker;

// Re-export public API
pub use activation::{ActivationChange, ActivationState};
pub use media::{MediaHandle, PlaybackError};
pub use playback::{AssistantStatus, CaptionTicket, PanelInstanceId, PlaybackController};
pub use tracker::{IntersectionEntry, ViewportEvent, ViewportTracker};

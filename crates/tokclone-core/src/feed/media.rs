//! Host-provided media playback interface.

use std::time::Duration;
use thiserror::Error;

/// Why a playback start request was rejected by the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Autoplay policy refused to start playback
    #[error("play() was not allowed by the host autoplay policy")]
    NotAllowed,
}

/// Media element controlled by a feed panel.
///
/// Decoding and streaming are the host's concern; the panel only starts,
/// stops, rewinds and mutes.
#[async_trait::async_trait]
pub trait MediaHandle: Send + Sync {
    /// Requests playback. The host may reject the request.
    async fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Resets the play position to the beginning.
    fn seek_to_start(&mut self);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    fn is_paused(&self) -> bool;

    /// Current play position.
    fn position(&self) -> Duration;
}

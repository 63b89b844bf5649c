//! Simulated media element.
//!
//! Stands in for a host video element: it tracks play/pause, mute and a
//! looping play position that advances only when the host clock ticks.

use std::time::Duration;

use async_trait::async_trait;
use tokclone_core::feed::{MediaHandle, PlaybackError};

const DEFAULT_CLIP_LENGTH: Duration = Duration::from_secs(15);

/// Whether the host lets playback start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoplayPolicy {
    #[default]
    Allow,
    /// Only muted playback may start, as in most browsers.
    BlockUnmuted,
    /// Every play request is rejected with `NotAllowed`.
    Block,
}

#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    url: String,
    length: Duration,
    position: Duration,
    playing: bool,
    muted: bool,
    policy: AutoplayPolicy,
}

impl SimulatedMedia {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            length: DEFAULT_CLIP_LENGTH,
            position: Duration::ZERO,
            playing: false,
            muted: false,
            policy: AutoplayPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AutoplayPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_length(mut self, length: Duration) -> Self {
        self.length = length;
        self
    }

    /// Media locator this element plays.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Advances the play position by `elapsed` if playing. Clips loop.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        let advanced = self.position + elapsed;
        self.position = if self.length.is_zero() {
            Duration::ZERO
        } else {
            Duration::from_nanos((advanced.as_nanos() % self.length.as_nanos()) as u64)
        };
    }
}

#[async_trait]
impl MediaHandle for SimulatedMedia {
    async fn play(&mut self) -> Result<(), PlaybackError> {
        let allowed = match self.policy {
            AutoplayPolicy::Allow => true,
            AutoplayPolicy::BlockUnmuted => self.muted,
            AutoplayPolicy::Block => false,
        };
        if !allowed {
            return Err(PlaybackError::NotAllowed);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_to_start(&mut self) {
        self.position = Duration::ZERO;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn is_paused(&self) -> bool {
        !self.playing
    }

    fn position(&self) -> Duration {
        self.position
    }
}

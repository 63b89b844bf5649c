//! Per-panel playback controller.
//!
//! A controller owns one mounted panel: its media handle, the local "liked"
//! toggle and the AI assistant state. It reacts to activation changes pushed
//! by the feed and to manual taps.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use super::media::MediaHandle;
use crate::caption::CaptionResult;
use crate::video::VideoRecord;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one mount of a panel.
///
/// Every mount gets a fresh id, so results addressed to a previous mount of
/// the same video can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelInstanceId(u64);

impl PanelInstanceId {
    pub fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PanelInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// A caption request issued for one panel instance.
#[derive(Debug, Clone)]
pub struct CaptionTicket {
    pub instance: PanelInstanceId,
    pub video: VideoRecord,
}

/// State of the AI assistant of one panel instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssistantStatus {
    #[default]
    Idle,
    Loading,
    Ready(CaptionResult),
}

/// Playback controller for one mounted feed panel.
pub struct PlaybackController<M: MediaHandle> {
    instance: PanelInstanceId,
    video: VideoRecord,
    media: M,
    is_active: bool,
    is_playing: bool,
    liked: bool,
    assistant_open: bool,
    assistant: AssistantStatus,
}

impl<M: MediaHandle> PlaybackController<M> {
    /// Mounts a panel. The media inherits the current shared mute state.
    pub fn mount(video: VideoRecord, mut media: M, muted: bool) -> Self {
        media.set_muted(muted);
        Self {
            instance: PanelInstanceId::next(),
            video,
            media,
            is_active: false,
            is_playing: false,
            liked: false,
            assistant_open: false,
            assistant: AssistantStatus::Idle,
        }
    }

    pub fn instance(&self) -> PanelInstanceId {
        self.instance
    }

    pub fn video(&self) -> &VideoRecord {
        &self.video
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Reacts to an activation change for this panel.
    ///
    /// Becoming active requests playback; becoming inactive pauses and
    /// rewinds, overriding any manual play/pause state.
    pub async fn set_active(&mut self, active: bool) {
        self.is_active = active;
        if active {
            self.start_playback().await;
        } else {
            self.media.pause();
            self.media.seek_to_start();
            self.is_playing = false;
        }
    }

    /// Manual tap on the video: toggles play/pause.
    pub async fn tap(&mut self) {
        if self.is_playing {
            self.media.pause();
            self.is_playing = false;
        } else {
            self.start_playback().await;
        }
    }

    async fn start_playback(&mut self) {
        match self.media.play().await {
            Ok(()) => self.is_playing = true,
            Err(err) => {
                warn!(video_id = %self.video.id, error = %err, "Autoplay prevented");
                self.media.pause();
                self.is_playing = false;
            }
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.media.set_muted(muted);
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Toggles the local like and returns the new state.
    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        self.liked
    }

    /// Like count shown in the panel: the base count plus the local like.
    pub fn displayed_likes(&self) -> u64 {
        self.video.likes + u64::from(self.liked)
    }

    pub fn assistant_open(&self) -> bool {
        self.assistant_open
    }

    pub fn assistant(&self) -> &AssistantStatus {
        &self.assistant
    }

    /// Opens the AI panel.
    ///
    /// Returns a ticket only when nothing is cached or in flight; the caller
    /// must run exactly one caption request for it.
    pub fn open_assistant(&mut self) -> Option<CaptionTicket> {
        self.assistant_open = true;
        match self.assistant {
            AssistantStatus::Idle => {
                self.assistant = AssistantStatus::Loading;
                Some(CaptionTicket {
                    instance: self.instance,
                    video: self.video.clone(),
                })
            }
            AssistantStatus::Loading | AssistantStatus::Ready(_) => None,
        }
    }

    /// Hides the AI panel. Any cached or pending result is kept.
    pub fn close_assistant(&mut self) {
        self.assistant_open = false;
    }

    /// Stores the result of this panel's caption request.
    ///
    /// Returns false if the result was not expected (wrong instance, or no
    /// request in flight).
    pub fn deliver_caption(&mut self, instance: PanelInstanceId, result: CaptionResult) -> bool {
        if instance != self.instance || self.assistant != AssistantStatus::Loading {
            debug!(video_id = %self.video.id, %instance, "Ignoring unexpected caption result");
            return false;
        }
        self.assistant = AssistantStatus::Ready(result);
        true
    }
}

impl<M: MediaHandle> fmt::Debug for PlaybackController<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("instance", &self.instance)
            .field("video_id", &self.video.id)
            .field("is_active", &self.is_active)
            .field("is_playing", &self.is_playing)
            .field("liked", &self.liked)
            .field("assistant_open", &self.assistant_open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::media::PlaybackError;
    use std::time::Duration;

    #[derive(Default)]
    struct TestMedia {
        playing: bool,
        muted: bool,
        position: Duration,
        reject: bool,
    }

    #[async_trait::async_trait]
    impl MediaHandle for TestMedia {
        async fn play(&mut self) -> Result<(), PlaybackError> {
            if self.reject {
                return Err(PlaybackError::NotAllowed);
            }
            self.playing = true;
            self.position += Duration::from_secs(3);
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

    fn video() -> VideoRecord {
        VideoRecord {
            id: "v1".to_string(),
            url: "https://example.com/v1.mp4".to_string(),
            username: "alice".to_string(),
            avatar: "https://example.com/a.png".to_string(),
            description: "Sunrise hike".to_string(),
            song: "Original sound".to_string(),
            likes: 100,
            comments: 5,
            shares: 2,
        }
    }

    #[tokio::test]
    async fn test_deactivation_pauses_and_rewinds() {
        let mut panel = PlaybackController::mount(video(), TestMedia::default(), false);
        panel.set_active(true).await;
        assert!(panel.is_playing());
        assert!(panel.media().position() > Duration::ZERO);

        panel.set_active(false).await;
        assert!(!panel.is_playing());
        assert!(panel.media().is_paused());
        assert_eq!(panel.media().position(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_deactivation_overrides_manual_pause() {
        let mut panel = PlaybackController::mount(video(), TestMedia::default(), false);
        panel.set_active(true).await;
        panel.tap().await;
        assert!(!panel.is_playing());

        panel.set_active(false).await;
        assert_eq!(panel.media().position(), Duration::ZERO);
        assert!(panel.media().is_paused());
    }

    #[tokio::test]
    async fn test_rejected_autoplay_stays_paused() {
        let media = TestMedia {
            reject: true,
            ..Default::default()
        };
        let mut panel = PlaybackController::mount(video(), media, false);
        panel.set_active(true).await;

        assert!(panel.is_active());
        assert!(!panel.is_playing());
        assert!(panel.media().is_paused());

        // Tapping after a rejection is also caught
        panel.tap().await;
        assert!(!panel.is_playing());
    }

    #[tokio::test]
    async fn test_tap_toggles() {
        let mut panel = PlaybackController::mount(video(), TestMedia::default(), false);
        panel.tap().await;
        assert!(panel.is_playing());
        panel.tap().await;
        assert!(!panel.is_playing());
    }

    #[test]
    fn test_like_toggle_is_plus_minus_one() {
        let mut panel = PlaybackController::mount(video(), TestMedia::default(), false);
        assert_eq!(panel.displayed_likes(), 100);
        assert!(panel.toggle_like());
        assert_eq!(panel.displayed_likes(), 101);
        assert!(!panel.toggle_like());
        assert_eq!(panel.displayed_likes(), 100);
    }

    #[test]
    fn test_mount_inherits_mute() {
        let panel = PlaybackController::mount(video(), TestMedia::default(), true);
        assert!(panel.media().is_muted());
    }

    #[test]
    fn test_assistant_issues_one_ticket() {
        let mut panel = PlaybackController::mount(video(), TestMedia::default(), false);

        let ticket = panel.open_assistant().expect("first open issues a request");
        assert_eq!(ticket.instance, panel.instance());
        assert_eq!(*panel.assistant(), AssistantStatus::Loading);

        // Re-open while loading
        panel.close_assistant();
        assert!(panel.open_assistant().is_none());

        assert!(panel.deliver_caption(ticket.instance, CaptionResult::fallback()));
        panel.close_assistant();
        assert!(!panel.assistant_open());

        // Re-open after caching
        assert!(panel.open_assistant().is_none());
        assert_eq!(*panel.assistant(), AssistantStatus::Ready(CaptionResult::fallback()));
    }

    #[test]
    fn test_deliver_rejects_foreign_instance() {
        let mut first = PlaybackController::mount(video(), TestMedia::default(), false);
        let mut second = PlaybackController::mount(video(), TestMedia::default(), false);
        assert_ne!(first.instance(), second.instance());

        let ticket = first.open_assistant().unwrap();
        second.open_assistant();
        assert!(!second.deliver_caption(ticket.instance, CaptionResult::fallback()));
        assert_eq!(*second.assistant(), AssistantStatus::Loading);
    }
}

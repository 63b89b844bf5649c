//! Feed controller.
//!
//! Wires the viewport tracker to the activation store and the mounted panels:
//! the tracker publishes threshold crossings, the activation store picks the
//! active video, and the controller pushes the change to the two panels
//! involved.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use tokclone_core::AppContext;
use tokclone_core::caption::CaptionResult;
use tokclone_core::config::FeedSettings;
use tokclone_core::feed::{
    ActivationChange, ActivationState, CaptionTicket, MediaHandle, PanelInstanceId,
    PlaybackController, ViewportEvent, ViewportTracker,
};
use tokclone_core::video::VideoRecord;
use tokclone_infrastructure::SimulatedMedia;
use tracing::debug;

/// One mounted feed: a panel per catalog record.
pub struct FeedController<M: MediaHandle> {
    context: Arc<AppContext>,
    tracker: ViewportTracker,
    activation: ActivationState,
    panels: Vec<PlaybackController<M>>,
}

impl<M: MediaHandle> FeedController<M> {
    /// Mounts the feed and starts playback of the first record.
    pub async fn mount<F>(
        videos: &[VideoRecord],
        settings: &FeedSettings,
        context: Arc<AppContext>,
        mut make_media: F,
    ) -> Result<Self>
    where
        F: FnMut(&VideoRecord) -> M,
    {
        let Some(first) = videos.first() else {
            bail!("cannot mount a feed without videos");
        };

        let muted = context.is_muted();
        let panels: Vec<_> = videos
            .iter()
            .map(|video| PlaybackController::mount(video.clone(), make_media(video), muted))
            .collect();

        let mut tracker = ViewportTracker::new(
            settings.effective_threshold(),
            settings.effective_viewport_height(),
        );
        let mut activation = ActivationState::new(first.id.clone(), settings.activation_policy);
        let initial = tracker.observe(videos.iter().map(|video| video.id.clone()));
        activation.apply(&initial);

        let mut feed = Self {
            context,
            tracker,
            activation,
            panels,
        };
        let active = feed.activation.active().to_string();
        if let Some(panel) = feed.panel_mut(&active) {
            panel.set_active(true).await;
        }
        debug!(videos = feed.panels.len(), active = %active, "Feed mounted");
        Ok(feed)
    }

    /// Feeds a geometry change through the tracker and applies the result.
    pub async fn handle_viewport(&mut self, event: ViewportEvent) -> Option<ActivationChange> {
        let entries = self.tracker.handle(event);
        let change = self.activation.apply(&entries)?;

        debug!(previous = %change.previous, current = %change.current, "Active video changed");
        if let Some(panel) = self.panel_mut(&change.previous) {
            panel.set_active(false).await;
        }
        if let Some(panel) = self.panel_mut(&change.current) {
            panel.set_active(true).await;
        }
        Some(change)
    }

    /// Swipes to the next panel.
    pub async fn next(&mut self) -> Option<ActivationChange> {
        let event = self.tracker.snap_next();
        self.handle_viewport(event).await
    }

    /// Swipes to the previous panel.
    pub async fn prev(&mut self) -> Option<ActivationChange> {
        let event = self.tracker.snap_prev();
        self.handle_viewport(event).await
    }

    pub async fn snap_to(&mut self, index: usize) -> Option<ActivationChange> {
        let event = self.tracker.snap_to(index);
        self.handle_viewport(event).await
    }

    /// Scrolls by `delta` pixels without snapping.
    pub async fn scroll_by(&mut self, delta: f64) -> Option<ActivationChange> {
        let event = self.tracker.scroll_by(delta);
        self.handle_viewport(event).await
    }

    pub async fn resize(&mut self, height: f64) -> Option<ActivationChange> {
        self.handle_viewport(ViewportEvent::Resize { height }).await
    }

    pub fn active_id(&self) -> &str {
        self.activation.active()
    }

    pub fn active_panel(&self) -> Option<&PlaybackController<M>> {
        self.panel(self.activation.active())
    }

    pub fn active_panel_mut(&mut self) -> Option<&mut PlaybackController<M>> {
        let active = self.activation.active().to_string();
        self.panel_mut(&active)
    }

    pub fn panels(&self) -> &[PlaybackController<M>] {
        &self.panels
    }

    pub fn panel(&self, video_id: &str) -> Option<&PlaybackController<M>> {
        self.panels.iter().find(|panel| panel.video().id == video_id)
    }

    pub fn panel_mut(&mut self, video_id: &str) -> Option<&mut PlaybackController<M>> {
        self.panels.iter_mut().find(|panel| panel.video().id == video_id)
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// Position of the active panel in the feed.
    pub fn active_index(&self) -> usize {
        self.panels
            .iter()
            .position(|panel| panel.video().id == self.activation.active())
            .unwrap_or_default()
    }

    /// Taps the active panel's video.
    pub async fn tap_active(&mut self) {
        if let Some(panel) = self.active_panel_mut() {
            panel.tap().await;
        }
    }

    /// Toggles the like on the active panel, returning the new state.
    pub fn toggle_like_active(&mut self) -> Option<bool> {
        self.active_panel_mut().map(|panel| panel.toggle_like())
    }

    /// Flips the shared mute flag and applies it to every mounted panel.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.context.toggle_mute();
        for panel in &mut self.panels {
            panel.set_muted(muted);
        }
        muted
    }

    pub fn is_muted(&self) -> bool {
        self.context.is_muted()
    }

    /// Opens the AI panel of the active video.
    ///
    /// Returns a ticket when a caption request must be issued.
    pub fn open_assistant_active(&mut self) -> Option<CaptionTicket> {
        self.active_panel_mut()?.open_assistant()
    }

    pub fn close_assistant_active(&mut self) {
        if let Some(panel) = self.active_panel_mut() {
            panel.close_assistant();
        }
    }

    /// Delivers a caption result to the panel instance that requested it.
    ///
    /// Results for instances that are no longer mounted are discarded.
    pub fn deliver_caption(&mut self, instance: PanelInstanceId, result: CaptionResult) -> bool {
        match self.panels.iter_mut().find(|panel| panel.instance() == instance) {
            Some(panel) => panel.deliver_caption(instance, result),
            None => {
                debug!(%instance, "Discarding caption for unmounted panel");
                false
            }
        }
    }

    /// Stops observation and playback. Panel state is dropped with the feed.
    pub fn unmount(mut self) {
        self.tracker.disconnect();
        for panel in &mut self.panels {
            panel.media_mut().pause();
        }
        debug!("Feed unmounted");
    }
}

impl FeedController<SimulatedMedia> {
    /// Advances every simulated media clock.
    pub fn tick(&mut self, elapsed: Duration) {
        for panel in &mut self.panels {
            panel.media_mut().tick(elapsed);
        }
    }
}

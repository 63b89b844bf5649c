//! Top-level application shell.
//!
//! Owns the router and whatever the selected tab has mounted: the feed while
//! the feed tab is selected, the profile page while the profile view is
//! visible, and the auth form otherwise. All mutation happens through this
//! type on the caller's loop.

use std::sync::Arc;

use anyhow::Result;
use tokclone_core::AppContext;
use tokclone_core::caption::CaptionService;
use tokclone_core::config::FeedSettings;
use tokclone_core::feed::MediaHandle;
use tokclone_core::navigation::{Tab, View, ViewRouter};
use tokclone_core::user::AuthService;
use tokclone_core::video::{VideoCatalog, VideoRecord};
use tracing::{debug, info};

use crate::auth_form::{AuthFormUseCase, SubmitOutcome};
use crate::caption_dispatch::{CaptionDelivery, CaptionDispatcher};
use crate::feed_controller::FeedController;
use crate::profile::ProfilePage;

/// Creates the media handle for a newly mounted panel.
pub type MediaFactory<M> = Box<dyn Fn(&VideoRecord) -> M + Send + Sync>;

/// External collaborators injected into the shell.
pub struct AppServices {
    pub catalog: Arc<dyn VideoCatalog>,
    pub auth: Arc<dyn AuthService>,
    pub captions: Arc<dyn CaptionService>,
}

pub struct AppShell<M: MediaHandle> {
    context: Arc<AppContext>,
    catalog: Arc<dyn VideoCatalog>,
    auth: Arc<dyn AuthService>,
    captions: CaptionDispatcher,
    feed_settings: FeedSettings,
    media_factory: MediaFactory<M>,
    router: ViewRouter,
    feed: Option<FeedController<M>>,
    auth_form: AuthFormUseCase,
    profile: Option<ProfilePage>,
}

impl<M: MediaHandle> AppShell<M> {
    /// Starts on the feed tab with the feed mounted.
    pub async fn start(
        context: Arc<AppContext>,
        services: AppServices,
        feed_settings: FeedSettings,
        media_factory: MediaFactory<M>,
    ) -> Result<Self> {
        let mut shell = Self {
            context,
            catalog: services.catalog,
            auth: services.auth,
            captions: CaptionDispatcher::new(services.captions),
            feed_settings,
            media_factory,
            router: ViewRouter::new(),
            feed: None,
            auth_form: AuthFormUseCase::new(),
            profile: None,
        };
        shell.mount_feed().await?;
        Ok(shell)
    }

    async fn mount_feed(&mut self) -> Result<()> {
        let factory = &self.media_factory;
        let feed = FeedController::mount(
            self.catalog.videos(),
            &self.feed_settings,
            Arc::clone(&self.context),
            |video| factory(video),
        )
        .await?;
        self.feed = Some(feed);
        Ok(())
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    pub fn tab(&self) -> Tab {
        self.router.tab()
    }

    /// The view rendered for the selected tab.
    pub fn view(&self) -> View {
        self.router.view(self.context.current_user().as_ref())
    }

    /// Switches tabs, unmounting and mounting views as needed.
    pub async fn select_tab(&mut self, tab: Tab) -> Result<()> {
        let previous = self.router.select(tab);
        if previous == tab {
            return Ok(());
        }
        info!(from = %previous, to = %tab, "Tab switched");

        if previous == Tab::Feed {
            if let Some(feed) = self.feed.take() {
                feed.unmount();
            }
        }
        if tab == Tab::Feed {
            self.mount_feed().await?;
        }
        self.refresh_profile();
        Ok(())
    }

    pub fn feed(&self) -> Option<&FeedController<M>> {
        self.feed.as_ref()
    }

    pub fn feed_mut(&mut self) -> Option<&mut FeedController<M>> {
        self.feed.as_mut()
    }

    pub fn auth_form(&self) -> &AuthFormUseCase {
        &self.auth_form
    }

    pub fn auth_form_mut(&mut self) -> &mut AuthFormUseCase {
        &mut self.auth_form
    }

    /// Submits the auth form and waits for the simulated request.
    pub async fn submit_auth(&mut self) -> SubmitOutcome {
        let outcome = self
            .auth_form
            .submit(self.auth.as_ref(), &self.context)
            .await;
        self.refresh_profile();
        outcome
    }

    pub fn logout(&mut self) {
        self.context.logout();
        self.refresh_profile();
    }

    pub fn profile(&self) -> Option<&ProfilePage> {
        self.profile.as_ref()
    }

    fn refresh_profile(&mut self) {
        match self.view() {
            View::Profile(user) => {
                let unchanged = self.profile.as_ref().is_some_and(|page| page.user == user);
                if !unchanged {
                    self.profile = Some(ProfilePage::generate(user, &mut rand::thread_rng()));
                }
            }
            _ => self.profile = None,
        }
    }

    /// Flips the shared mute flag, applying it to the mounted feed if any.
    pub fn toggle_mute(&mut self) -> bool {
        match self.feed.as_mut() {
            Some(feed) => feed.toggle_mute(),
            None => self.context.toggle_mute(),
        }
    }

    /// Opens the AI panel on the active video. Returns true if a request was issued.
    pub fn open_assistant(&mut self) -> bool {
        let Some(ticket) = self.feed.as_mut().and_then(|feed| feed.open_assistant_active()) else {
            return false;
        };
        self.captions.dispatch(ticket);
        true
    }

    pub fn close_assistant(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            feed.close_assistant_active();
        }
    }

    pub fn captions_in_flight(&self) -> usize {
        self.captions.in_flight()
    }

    /// Applies every caption result that has arrived. Returns how many reached a panel.
    pub fn collect_captions(&mut self) -> usize {
        let deliveries = self.captions.try_collect();
        let mut delivered = 0;
        for delivery in deliveries {
            if self.deliver(delivery) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Waits for the next caption result and applies it.
    pub async fn wait_for_caption(&mut self) -> bool {
        match self.captions.next().await {
            Some(delivery) => self.deliver(delivery),
            None => false,
        }
    }

    fn deliver(&mut self, delivery: CaptionDelivery) -> bool {
        match self.feed.as_mut() {
            Some(feed) => feed.deliver_caption(delivery.instance, delivery.result),
            None => {
                debug!(video_id = %delivery.video_id, "Discarding caption, feed is not mounted");
                false
            }
        }
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokclone_application::{AppServices, AppShell, AuthMode, SubmitOutcome};
use tokclone_core::AppContext;
use tokclone_core::caption::{CaptionResult, CaptionService, NO_API_KEY_HASHTAG};
use tokclone_core::config::{AiSettings, FeedSettings};
use tokclone_core::feed::{AssistantStatus, MediaHandle};
use tokclone_core::navigation::{Tab, View};
use tokclone_core::user::UserStats;
use tokclone_core::video::VideoRecord;
use tokclone_infrastructure::auth::WELCOME_BIO;
use tokclone_infrastructure::{MockAuthService, SimulatedMedia, StaticVideoCatalog};
use tokclone_interaction::GeminiCaptionAssistant;

/// Caption service that counts calls instead of reaching the network.
#[derive(Default)]
struct CountingCaptions {
    calls: AtomicUsize,
}

#[async_trait]
impl CaptionService for CountingCaptions {
    async fn generate_caption(&self, video: &VideoRecord) -> CaptionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CaptionResult {
            caption: format!("Caption for {}", video.id),
            hashtags: vec!["#fyp".to_string()],
            analysis: Some("Looks great.".to_string()),
        }
    }
}

async fn start_shell(captions: Arc<dyn CaptionService>) -> AppShell<SimulatedMedia> {
    let services = AppServices {
        catalog: Arc::new(StaticVideoCatalog::builtin()),
        auth: Arc::new(MockAuthService::new(Duration::from_millis(1500))),
        captions,
    };
    AppShell::start(
        Arc::new(AppContext::new()),
        services,
        FeedSettings::default(),
        Box::new(|video: &VideoRecord| SimulatedMedia::new(&video.url)),
    )
    .await
    .expect("shell should start")
}

#[tokio::test]
async fn test_missing_api_key_shows_placeholder() {
    let assistant = GeminiCaptionAssistant::from_settings(None, &AiSettings::default());
    let mut shell = start_shell(Arc::new(assistant)).await;

    assert!(shell.open_assistant());
    assert!(shell.wait_for_caption().await);

    let panel = shell.feed().unwrap().active_panel().unwrap();
    match panel.assistant() {
        AssistantStatus::Ready(result) => {
            assert!(result.hashtags.iter().any(|tag| tag == NO_API_KEY_HASHTAG));
        }
        other => panic!("unexpected assistant state: {other:?}"),
    }
}

#[tokio::test]
async fn test_assistant_requested_once_per_panel() {
    let captions = Arc::new(CountingCaptions::default());
    let mut shell = start_shell(captions.clone()).await;

    assert!(shell.open_assistant());
    shell.close_assistant();
    assert!(!shell.open_assistant());
    assert!(shell.wait_for_caption().await);

    shell.close_assistant();
    assert!(!shell.open_assistant());
    assert_eq!(shell.captions_in_flight(), 0);
    assert_eq!(captions.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_caption_for_unmounted_feed_is_discarded() {
    let captions = Arc::new(CountingCaptions::default());
    let mut shell = start_shell(captions).await;

    assert!(shell.open_assistant());
    shell.select_tab(Tab::Discover).await.unwrap();
    assert!(shell.feed().is_none());
    shell.select_tab(Tab::Feed).await.unwrap();

    // The request completes, but its panel instance is gone
    assert!(!shell.wait_for_caption().await);
    let panel = shell.feed().unwrap().active_panel().unwrap();
    assert_eq!(*panel.assistant(), AssistantStatus::Idle);
    assert!(!panel.assistant_open());
}

#[tokio::test]
async fn test_session_gated_tabs_show_auth() {
    let mut shell = start_shell(Arc::new(CountingCaptions::default())).await;

    shell.select_tab(Tab::Inbox).await.unwrap();
    assert_eq!(shell.view(), View::Auth);
    shell.select_tab(Tab::Profile).await.unwrap();
    assert_eq!(shell.view(), View::Auth);
    assert!(shell.profile().is_none());

    shell.select_tab(Tab::Discover).await.unwrap();
    assert_eq!(shell.view(), View::Discover);
}

#[tokio::test(start_paused = true)]
async fn test_login_opens_profile() {
    let mut shell = start_shell(Arc::new(CountingCaptions::default())).await;
    shell.select_tab(Tab::Profile).await.unwrap();

    let form = shell.auth_form_mut();
    form.email = "a@b.com".to_string();
    form.password = "x".to_string();
    assert_eq!(shell.submit_auth().await, SubmitOutcome::SignedIn);

    let View::Profile(user) = shell.view() else {
        panic!("expected the profile view");
    };
    assert_eq!(user.username, "a");
    assert_eq!(user.stats.followers, "8.5k");

    let page = shell.profile().expect("profile page mounted");
    assert_eq!(page.user, user);
    assert_eq!(page.tiles.len(), 9);

    shell.logout();
    assert_eq!(shell.view(), View::Auth);
    assert!(shell.profile().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_register_creates_fresh_account() {
    let mut shell = start_shell(Arc::new(CountingCaptions::default())).await;
    shell.select_tab(Tab::Inbox).await.unwrap();

    let form = shell.auth_form_mut();
    form.toggle_mode();
    assert_eq!(form.mode, AuthMode::Register);
    form.username = "newuser".to_string();
    form.email = "new@user.com".to_string();
    form.password = "secret".to_string();
    assert_eq!(shell.submit_auth().await, SubmitOutcome::SignedIn);

    assert_eq!(shell.view(), View::Inbox);
    let user = shell.context().current_user().unwrap();
    assert_eq!(user.username, "newuser");
    assert_eq!(user.bio, WELCOME_BIO);
    assert_eq!(user.stats, UserStats::zero());
}

#[tokio::test]
async fn test_mute_survives_feed_remount() {
    let mut shell = start_shell(Arc::new(CountingCaptions::default())).await;
    assert!(shell.toggle_mute());

    shell.select_tab(Tab::Discover).await.unwrap();
    // Toggling without a mounted feed still flips the shared flag
    assert!(!shell.toggle_mute());
    assert!(shell.toggle_mute());
    shell.select_tab(Tab::Feed).await.unwrap();

    let feed = shell.feed().unwrap();
    assert!(feed.is_muted());
    assert!(feed.panels().iter().all(|panel| panel.media().is_muted()));
}

#[tokio::test]
async fn test_reselecting_feed_keeps_position() {
    let mut shell = start_shell(Arc::new(CountingCaptions::default())).await;
    shell.feed_mut().unwrap().next().await;

    shell.select_tab(Tab::Feed).await.unwrap();
    assert_eq!(shell.feed().unwrap().active_id(), "2");

    // Leaving and coming back starts over from the first video
    shell.select_tab(Tab::Discover).await.unwrap();
    shell.select_tab(Tab::Feed).await.unwrap();
    assert_eq!(shell.feed().unwrap().active_id(), "1");
}

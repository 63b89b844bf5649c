//! Simulated authentication backend.
//!
//! There is no account server: both operations wait for a fixed latency and
//! then fabricate a user from their inputs.

use std::time::Duration;

use async_trait::async_trait;
use tokclone_core::Result;
use tokclone_core::config::AuthSettings;
use tokclone_core::user::{AuthService, User, UserStats};
use tracing::debug;
use uuid::Uuid;

const LOGIN_USER_ID: &str = "u_123";
const LOGIN_AVATAR: &str = "https://picsum.photos/150/150?random=99";
const LOGIN_BIO: &str = "Just here for the vibes ✨";
pub const WELCOME_BIO: &str = "New to TokClone! 👋";

/// `AuthService` that simulates network latency and never rejects.
#[derive(Debug, Clone)]
pub struct MockAuthService {
    latency: Duration,
}

impl MockAuthService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(Duration::from_millis(settings.simulated_latency_ms))
    }

    async fn simulate_request(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::from_settings(&AuthSettings::default())
    }
}

/// Account id for a new registration, stable for a given username.
fn registration_id(username: &str) -> String {
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, username.as_bytes());
    let simple = uuid.simple().to_string();
    format!("u_{}", &simple[..9])
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, email: &str, _password: &str) -> Result<User> {
        debug!(latency_ms = self.latency.as_millis() as u64, "Simulating login request");
        self.simulate_request().await;

        let username = email.split('@').next().unwrap_or_default();
        Ok(User {
            id: LOGIN_USER_ID.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            avatar: LOGIN_AVATAR.to_string(),
            bio: LOGIN_BIO.to_string(),
            stats: UserStats {
                following: "142".to_string(),
                followers: "8.5k".to_string(),
                likes: "45.2k".to_string(),
            },
        })
    }

    async fn register(&self, username: &str, email: &str, _password: &str) -> Result<User> {
        debug!(latency_ms = self.latency.as_millis() as u64, "Simulating register request");
        self.simulate_request().await;

        Ok(User {
            id: registration_id(username),
            username: username.to_string(),
            email: email.to_string(),
            avatar: format!("https://ui-avatars.com/api/?name={username}&background=random"),
            bio: WELCOME_BIO.to_string(),
            stats: UserStats::zero(),
        })
    }
}

//! Process-wide client state.
//!
//! `AppContext` is the single holder of state shared across views: the
//! session slot, the pending-auth flag, and the feed-wide mute flag. It is
//! created once at startup and injected as `Arc<AppContext>`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::user::User;

/// Shared client state with explicit mutation entry points.
#[derive(Debug)]
pub struct AppContext {
    session: RwLock<Option<User>>,
    loading: AtomicBool,
    muted: AtomicBool,
}

impl AppContext {
    /// Creates an unauthenticated, unmuted context.
    pub fn new() -> Self {
        Self::with_muted(false)
    }

    pub fn with_muted(muted: bool) -> Self {
        Self {
            session: RwLock::new(None),
            loading: AtomicBool::new(false),
            muted: AtomicBool::new(muted),
        }
    }

    /// Returns a snapshot of the signed-in user.
    pub fn current_user(&self) -> Option<User> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn replace_session(&self, user: Option<User>) -> Option<User> {
        let mut slot = self.session.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, user)
    }

    /// Replaces the session with a signed-in user.
    pub fn set_user(&self, user: User) {
        info!(user_id = %user.id, username = %user.username, "Signed in");
        self.replace_session(Some(user));
    }

    /// Clears the session.
    pub fn logout(&self) {
        if let Some(previous) = self.replace_session(None) {
            info!(user_id = %previous.id, "Signed out");
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Flips the shared mute flag and returns the new value.
    pub fn toggle_mute(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::SeqCst)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

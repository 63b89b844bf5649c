//! Login / register form use case.

use tokclone_core::AppContext;
use tokclone_core::user::AuthService;
use tokclone_core::{Result, TokError};
use tracing::{info, warn};

/// The single message shown for any failed submission.
pub const GENERIC_AUTH_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    SignedIn,
    Failed,
    /// Another submission is still pending.
    Ignored,
}

/// State of the authentication view's form.
#[derive(Debug, Clone, Default)]
pub struct AuthFormUseCase {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl AuthFormUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switches between login and register.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    fn validate(&self) -> Result<()> {
        let missing = self.email.is_empty()
            || self.password.is_empty()
            || (self.mode == AuthMode::Register && self.username.is_empty());
        if missing {
            return Err(TokError::validation("Please fill in all fields"));
        }
        Ok(())
    }

    /// Validates and submits the form, storing the user on success.
    ///
    /// Pending submissions cannot be cancelled; a submission while one is
    /// pending is ignored.
    pub async fn submit(&mut self, auth: &dyn AuthService, context: &AppContext) -> SubmitOutcome {
        if context.is_loading() {
            return SubmitOutcome::Ignored;
        }
        self.error = None;

        if let Err(err) = self.validate() {
            warn!(error = %err, "Auth form rejected");
            self.error = Some(GENERIC_AUTH_ERROR.to_string());
            return SubmitOutcome::Failed;
        }

        context.set_loading(true);
        let result = match self.mode {
            AuthMode::Login => auth.login(&self.email, &self.password).await,
            AuthMode::Register => auth.register(&self.username, &self.email, &self.password).await,
        };
        context.set_loading(false);

        match result {
            Ok(user) => {
                info!(mode = ?self.mode, username = %user.username, "Authentication succeeded");
                context.set_user(user);
                *self = Self {
                    mode: self.mode,
                    ..Self::default()
                };
                SubmitOutcome::SignedIn
            }
            Err(err) => {
                warn!(error = %err, "Authentication failed");
                self.error = Some(GENERIC_AUTH_ERROR.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokclone_core::user::{User, UserStats};

    #[derive(Default)]
    struct CountingAuth {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl AuthService for CountingAuth {
        async fn login(&self, email: &str, _password: &str) -> Result<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TokError::Io {
                    message: "backend down".to_string(),
                });
            }
            Ok(User {
                id: "u_1".to_string(),
                username: email.to_string(),
                email: email.to_string(),
                avatar: String::new(),
                bio: String::new(),
                stats: UserStats::zero(),
            })
        }

        async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
            let mut user = self.login(email, password).await?;
            user.username = username.to_string();
            Ok(user)
        }
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_service() {
        let auth = CountingAuth::default();
        let context = AppContext::new();
        let mut form = AuthFormUseCase::new();
        form.email = "a@b.com".to_string();

        assert_eq!(form.submit(&auth, &context).await, SubmitOutcome::Failed);
        assert_eq!(form.error(), Some(GENERIC_AUTH_ERROR));
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
        assert!(!context.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_requires_username() {
        let auth = CountingAuth::default();
        let context = AppContext::new();
        let mut form = AuthFormUseCase::new();
        form.toggle_mode();
        form.email = "a@b.com".to_string();
        form.password = "x".to_string();

        assert_eq!(form.submit(&auth, &context).await, SubmitOutcome::Failed);
        form.username = "newuser".to_string();
        assert_eq!(form.submit(&auth, &context).await, SubmitOutcome::SignedIn);
        assert_eq!(context.current_user().unwrap().username, "newuser");
        assert!(form.error().is_none());
        assert_eq!(form.mode, AuthMode::Register);
        assert!(form.password.is_empty());
    }

    #[tokio::test]
    async fn test_service_error_shows_generic_message() {
        let auth = CountingAuth {
            fail: true,
            ..Default::default()
        };
        let context = AppContext::new();
        let mut form = AuthFormUseCase::new();
        form.email = "a@b.com".to_string();
        form.password = "x".to_string();

        assert_eq!(form.submit(&auth, &context).await, SubmitOutcome::Failed);
        assert_eq!(form.error(), Some(GENERIC_AUTH_ERROR));
        assert!(!context.is_loading());
    }

    #[tokio::test]
    async fn test_fields_reach_service_verbatim() {
        let auth = CountingAuth::default();
        let context = AppContext::new();
        let mut form = AuthFormUseCase::new();
        form.email = " a@b.com ".to_string();
        form.password = "x".to_string();

        assert_eq!(form.submit(&auth, &context).await, SubmitOutcome::SignedIn);
        assert_eq!(context.current_user().unwrap().email, " a@b.com ");
    }

    #[tokio::test]
    async fn test_pending_submission_ignores_new_submit() {
        let auth = CountingAuth::default();
        let context = AppContext::new();
        context.set_loading(true);
        let mut form = AuthFormUseCase::new();
        form.email = "a@b.com".to_string();
        form.password = "x".to_string();

        assert_eq!(form.submit(&auth, &context).await, SubmitOutcome::Ignored);
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
    }
}

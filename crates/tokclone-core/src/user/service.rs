//! Authentication service trait.

use super::model::User;
use crate::error::Result;

/// Service that signs users in or creates accounts.
///
/// Callers validate form input before invoking either operation. Neither
/// operation can be cancelled once started.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in with an email and password and returns the resulting user.
    async fn login(&self, email: &str, password: &str) -> Result<User>;

    /// Creates an account and returns the resulting user.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<User>;
}

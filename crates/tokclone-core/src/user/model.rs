//! User domain model.

use serde::{Deserialize, Serialize};

/// Display-formatted profile counters.
///
/// Counters are stored pre-formatted (e.g. `"8.5k"`) exactly as they are shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub following: String,
    pub followers: String,
    pub likes: String,
}

impl UserStats {
    /// Stats of a freshly registered account.
    pub fn zero() -> Self {
        Self {
            following: "0".to_string(),
            followers: "0".to_string(),
            likes: "0".to_string(),
        }
    }
}

/// The signed-in user held by the session slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Avatar image URL
    pub avatar: String,
    pub bio: String,
    pub stats: UserStats,
}

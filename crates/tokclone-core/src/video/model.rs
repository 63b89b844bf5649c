//! VideoRecord domain model.

use serde::{Deserialize, Serialize};

/// A single entry of the video feed.
///
/// Records are immutable for the lifetime of the client; engagement counters
/// shown in the UI are derived from these base values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    /// Unique identifier within the catalog
    pub id: String,
    /// Media locator
    pub url: String,
    /// Author name
    pub username: String,
    /// Author avatar URL
    pub avatar: String,
    pub description: String,
    /// Song label shown under the description
    pub song: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

//! Video catalog trait.

use super::model::VideoRecord;

/// Read-only, ordered source of feed videos.
///
/// Implementations must return the same order on every call. The feed mounts
/// one panel per record in this order and activates the first one initially.
pub trait VideoCatalog: Send + Sync {
    /// Returns all records in feed order.
    fn videos(&self) -> &[VideoRecord];

    /// Looks up a record by id.
    fn find(&self, id: &str) -> Option<&VideoRecord> {
        self.videos().iter().find(|video| video.id == id)
    }
}

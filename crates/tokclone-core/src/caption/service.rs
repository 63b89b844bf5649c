//! Caption service trait.

use super::model::CaptionResult;
use crate::video::VideoRecord;

/// Generates a viral caption, hashtags and a short analysis for a video.
///
/// The operation is infallible by signature: implementations convert every
/// failure into a substitute [`CaptionResult`].
#[async_trait::async_trait]
pub trait CaptionService: Send + Sync {
    async fn generate_caption(&self, video: &VideoRecord) -> CaptionResult;
}

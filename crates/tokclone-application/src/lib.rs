//! Application layer for TokClone.
//!
//! Use cases that coordinate domain state machines with the injected
//! services: the feed, the auth form, the profile page and the shell that
//! routes between them.

pub mod app_shell;
pub mod auth_form;
pub mod caption_dispatch;
pub mod feed_controller;
pub mod profile;

pub use app_shell::{AppServices, AppShell, MediaFactory};
pub use auth_form::{AuthFormUseCase, AuthMode, GENERIC_AUTH_ERROR, SubmitOutcome};
pub use caption_dispatch::{CaptionDelivery, CaptionDispatcher};
pub use feed_controller::FeedController;
pub use profile::{ProfilePage, ProfileTile};

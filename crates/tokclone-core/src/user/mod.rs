//! User domain module.
//!
//! This module contains the signed-in user model and the authentication
//! service interface.
//!
//! # Module Structure
//!
//! - `model`: User and profile stats domain models
//! - `service`: Authentication service trait
//!
//! # Usage
//!
//! ```ignore
//! use tokclone_core::user::{AuthService, User, UserStats};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{User, UserStats};
pub use service::AuthService;

//! Video domain module.
//!
//! # Module Structure
//!
//! - `model`: Video record domain model
//! - `catalog`: Read-only catalog trait

mod catalog;
mod model;

// Re-export public API
pub use catalog::VideoCatalog;
pub use model::VideoRecord;

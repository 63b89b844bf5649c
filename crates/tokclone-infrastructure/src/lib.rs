pub mod auth;
pub mod catalog;
pub mod media;
pub mod paths;
pub mod storage;

pub use crate::auth::MockAuthService;
pub use crate::catalog::StaticVideoCatalog;
pub use crate::media::{AutoplayPolicy, SimulatedMedia};
pub use crate::paths::TokPaths;
pub use crate::storage::{ConfigStorage, SecretStorage};

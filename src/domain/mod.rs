//! Domain layer - core business logic and types.
//!
//! This layer contains pure domain models and error types
//! without any external dependencies (DB, network, etc.).

pub mod error;
pub mod models;
pub mod sync;

pub use error::{AppError, Result};
pub use models::{seed_quotes, Quote, SyncReport, ALL_CATEGORIES};
pub use sync::{AppConfig, PathConfig, RemoteConfig, SyncConfig, ViewState};

//! Infrastructure layer - external adapters (database, filesystem, network).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod kv;
pub mod remote;

pub use config::{ensure_config_exists, load_config, save_config};
pub use kv::{KvStore, MemoryKv, SessionKv, SqliteKv};
pub use remote::{HttpRemote, QuoteRemote, RemoteRecord};

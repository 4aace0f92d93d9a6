//! Application layer - use cases and orchestration.
//!
//! This layer contains the main business logic for storing, selecting,
//! transferring and reconciling quotes.

pub mod formatter;
pub mod selector;
pub mod store;
pub mod sync_service;
pub mod transfer;

pub use formatter::{
    format_quotes_json, format_quotes_plain, format_quotes_table, format_selected, notify_report,
    notify_sync_failure, OutputFormat,
};
pub use selector::{categories, filter_by_category, restore_from, Selected, Selector};
pub use store::QuoteStore;
pub use sync_service::{map_record, merge_remote, MergeStats, SyncService};
pub use transfer::{export_json, import_json};

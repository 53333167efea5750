// Expense Tracker - Core Library
// In-memory ledger (transactions) and catalog (products) stores, with the
// optional HTTP layer behind the `server` feature.

pub mod error;
pub mod config;
pub mod entities;
pub mod validator;
pub mod repository;
pub mod query;
pub mod stats;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::{AppConfig, CategoryConfig, ServerConfig};
pub use entities::{
    CatalogEntry, CatalogPatch, CategoryScope, EntryKind, LedgerEntry, LedgerPatch,
    NewCatalogEntry, NewLedgerEntry, Record,
};
pub use validator::{Validate, Validator};
pub use repository::Repository;
pub use query::{EntryFilter, QueryEngine};
pub use stats::{
    average_amount, balance, category_counts, most_common_category, total_by_kind,
    CatalogSummary, CategoryCount, LedgerSummary, Summarize,
};
pub use store::{CatalogStore, LedgerStore, Store};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

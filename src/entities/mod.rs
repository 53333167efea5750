// Entity Models - Ledger entries (transactions) and catalog entries (products)
//
// Each entity has:
// - Stable identity (integer id) assigned by the repository, NEVER changes
// - Creation timestamp, assigned once, NEVER changes
// - Mutable values replaced through patches

pub mod kind;
pub mod ledger;
pub mod catalog;

pub use kind::EntryKind;
pub use ledger::{LedgerEntry, LedgerPatch, NewLedgerEntry};
pub use catalog::{CatalogEntry, CatalogPatch, NewCatalogEntry};

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// Which allow-list family governs a record's category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    /// Category set selected by the entry kind
    Ledger,
    /// One flat category set
    Catalog,
}

/// Common shape of every stored record
///
/// The repository, validator and query engine only see records through
/// this trait, so both entry kinds share one implementation of each.
pub trait Record: Clone {
    /// Fields supplied on creation (everything except id and created_at)
    type Draft: DeserializeOwned + Into<Self::Patch> + Send + 'static;

    /// Fields supplied on update, all optional
    type Patch: Default + DeserializeOwned + Send + 'static;

    const SCOPE: CategoryScope;

    /// Assemble a stored record from a draft. Fails only when a raw tag in
    /// the draft does not parse.
    fn build(id: u64, created_at: DateTime<Utc>, draft: Self::Draft) -> Result<Self>;

    /// New record with the patch merged over self; id and created_at are kept
    fn merge(&self, patch: Self::Patch) -> Result<Self>;

    fn id(&self) -> u64;
    fn amount(&self) -> f64;
    fn category(&self) -> &str;

    /// Income/expense tag, only ledger entries carry one
    fn kind(&self) -> Option<EntryKind> {
        None
    }

    /// Free-text fields searched by the term filter
    fn search_fields(&self) -> Vec<&str>;
}

/// Supplied text wins unless it is absent or empty
pub(crate) fn merge_text(supplied: Option<String>, existing: &str) -> String {
    match supplied {
        Some(value) if !value.is_empty() => value,
        _ => existing.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_text_keeps_existing_when_absent_or_empty() {
        assert_eq!(merge_text(None, "Lunch"), "Lunch");
        assert_eq!(merge_text(Some(String::new()), "Lunch"), "Lunch");
        assert_eq!(merge_text(Some("Dinner".to_string()), "Lunch"), "Dinner");
    }
}

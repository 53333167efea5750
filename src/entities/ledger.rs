// 💸 Ledger Entry - a personal-finance transaction tagged income or expense
//
// Identity: id + created_at (assigned by the repository, never change)
// Values: description, amount, category, kind (replaced through LedgerPatch)

use super::{merge_text, CategoryScope, EntryKind, Record};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    // ========================================================================
    // IDENTITY (never changes)
    // ========================================================================
    pub id: u64,
    pub created_at: DateTime<Utc>,

    // ========================================================================
    // VALUES
    // ========================================================================
    /// What the money was for (3-100 characters)
    pub description: String,

    /// Strictly positive; the sign lives in `kind`
    pub amount: f64,

    /// Must belong to the allow-list of `kind`
    pub category: String,

    pub kind: EntryKind,
}

/// Payload for creating a ledger entry
///
/// `kind` stays raw text until the entry is built, so an unknown tag is
/// reported as `InvalidKind` rather than as a malformed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub kind: String,
}

impl NewLedgerEntry {
    pub fn new(description: &str, amount: f64, category: &str, kind: EntryKind) -> Self {
        NewLedgerEntry {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Partial update: absent (or empty text) fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub kind: Option<String>,
}

impl From<NewLedgerEntry> for LedgerPatch {
    fn from(entry: NewLedgerEntry) -> Self {
        LedgerPatch {
            description: Some(entry.description),
            amount: Some(entry.amount),
            category: Some(entry.category),
            kind: Some(entry.kind),
        }
    }
}

impl Record for LedgerEntry {
    type Draft = NewLedgerEntry;
    type Patch = LedgerPatch;

    const SCOPE: CategoryScope = CategoryScope::Ledger;

    fn build(id: u64, created_at: DateTime<Utc>, draft: NewLedgerEntry) -> Result<Self> {
        Ok(LedgerEntry {
            id,
            created_at,
            kind: draft.kind.parse()?,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
        })
    }

    fn merge(&self, patch: LedgerPatch) -> Result<Self> {
        let kind = match patch.kind {
            Some(tag) => tag.parse()?,
            None => self.kind,
        };

        Ok(LedgerEntry {
            id: self.id,
            created_at: self.created_at,
            description: merge_text(patch.description, &self.description),
            amount: patch.amount.unwrap_or(self.amount),
            category: merge_text(patch.category, &self.category),
            kind,
        })
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn kind(&self) -> Option<EntryKind> {
        Some(self.kind)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn create_test_entry() -> LedgerEntry {
        LedgerEntry::build(
            3,
            Utc::now(),
            NewLedgerEntry::new("Groceries run", 42.5, "Food", EntryKind::Expense),
        )
        .unwrap()
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let entry = create_test_entry();
        assert_eq!(entry.merge(LedgerPatch::default()).unwrap(), entry);
    }

    #[test]
    fn test_merge_replaces_supplied_fields_only() {
        let entry = create_test_entry();
        let patch = LedgerPatch {
            amount: Some(10.0),
            description: Some(String::new()),
            ..Default::default()
        };

        let merged = entry.merge(patch).unwrap();
        assert_eq!(merged.amount, 10.0);
        assert_eq!(merged.description, "Groceries run");
        assert_eq!(merged.category, "Food");
        assert_eq!(merged.kind, EntryKind::Expense);
    }

    #[test]
    fn test_merge_keeps_identity() {
        let entry = create_test_entry();
        let patch: LedgerPatch =
            NewLedgerEntry::new("Monthly salary", 3000.0, "Salary", EntryKind::Income).into();

        let merged = entry.merge(patch).unwrap();
        assert_eq!(merged.id, entry.id);
        assert_eq!(merged.created_at, entry.created_at);
        assert_eq!(merged.description, "Monthly salary");
        assert_eq!(merged.kind, EntryKind::Income);
    }

    #[test]
    fn test_patch_deserializes_missing_fields_as_none() {
        let patch: LedgerPatch = serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();
        assert_eq!(patch.amount, Some(12.5));
        assert!(patch.description.is_none());
        assert!(patch.kind.is_none());
    }

    #[test]
    fn test_unknown_kind_tag_is_invalid_kind() {
        let draft: NewLedgerEntry = serde_json::from_str(
            r#"{"description": "Paycheck", "amount": 10.0, "category": "Salary", "kind": "loan"}"#,
        )
        .unwrap();
        assert_eq!(
            LedgerEntry::build(1, Utc::now(), draft).unwrap_err(),
            Error::InvalidKind("loan".to_string())
        );

        let entry = create_test_entry();
        let patch = LedgerPatch {
            kind: Some("Income".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.merge(patch).unwrap_err(), Error::InvalidKind("Income".to_string()));
    }
}

// 📊 Derived statistics - recomputed from the records on every call

use crate::entities::{CatalogEntry, EntryKind, LedgerEntry, Record};
use serde::{Deserialize, Serialize};

/// Arithmetic mean of the amounts, 0 for an empty slice
pub fn average_amount<R: Record>(records: &[R]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.amount()).sum::<f64>() / records.len() as f64
}

/// Sum of amounts over one kind
pub fn total_by_kind<R: Record>(records: &[R], kind: EntryKind) -> f64 {
    records
        .iter()
        .filter(|r| r.kind() == Some(kind))
        .map(|r| r.amount())
        .sum()
}

/// Sum of income amounts. Expenses are not subtracted.
pub fn balance<R: Record>(records: &[R]) -> f64 {
    total_by_kind(records, EntryKind::Income)
}

/// How many records use each category, in first-seen order
pub fn category_counts<R: Record>(records: &[R]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for record in records {
        match counts.iter_mut().find(|c| c.category == record.category()) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: record.category().to_string(),
                count: 1,
            }),
        }
    }

    counts
}

/// Category with the highest count. On a tie the category that appeared
/// first in insertion order wins. None when there are no records.
pub fn most_common_category<R: Record>(records: &[R]) -> Option<String> {
    let mut best: Option<CategoryCount> = None;

    for candidate in category_counts(records) {
        // strict > keeps the earlier category on ties
        if best.as_ref().map_or(true, |b| candidate.count > b.count) {
            best = Some(candidate);
        }
    }

    best.map(|b| b.category)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Summary of the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_entries: usize,
    pub average_amount: f64,
    /// Income total, see `balance`
    pub balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub most_common_category: Option<String>,
    pub by_category: Vec<CategoryCount>,
}

impl LedgerSummary {
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        LedgerSummary {
            total_entries: records.len(),
            average_amount: average_amount(records),
            balance: balance(records),
            total_income: total_by_kind(records, EntryKind::Income),
            total_expenses: total_by_kind(records, EntryKind::Expense),
            most_common_category: most_common_category(records),
            by_category: category_counts(records),
        }
    }
}

/// Summary of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_entries: usize,
    pub average_price: f64,
    pub most_common_category: Option<String>,
    pub by_category: Vec<CategoryCount>,
}

impl CatalogSummary {
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        CatalogSummary {
            total_entries: records.len(),
            average_price: average_amount(records),
            most_common_category: most_common_category(records),
            by_category: category_counts(records),
        }
    }
}

/// Record kinds that have a summary view
pub trait Summarize: Record {
    type Summary: Serialize + Send;

    fn summarize(records: &[Self]) -> Self::Summary;
}

impl Summarize for LedgerEntry {
    type Summary = LedgerSummary;

    fn summarize(records: &[Self]) -> LedgerSummary {
        LedgerSummary::from_records(records)
    }
}

impl Summarize for CatalogEntry {
    type Summary = CatalogSummary;

    fn summarize(records: &[Self]) -> CatalogSummary {
        CatalogSummary::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{LedgerEntry, NewLedgerEntry};
    use crate::repository::Repository;

    fn repo_with(entries: &[(&str, f64, EntryKind)]) -> Repository<LedgerEntry> {
        let mut repo = Repository::new();
        for (category, amount, kind) in entries {
            repo.create(NewLedgerEntry::new("Some entry", *amount, category, *kind))
                .unwrap();
        }
        repo
    }

    #[test]
    fn test_average_amount() {
        let empty: Vec<LedgerEntry> = Vec::new();
        assert_eq!(average_amount(&empty), 0.0);

        let repo = repo_with(&[
            ("Food", 10.0, EntryKind::Expense),
            ("Food", 20.0, EntryKind::Expense),
            ("Bills", 30.0, EntryKind::Expense),
        ]);
        assert_eq!(average_amount(repo.list()), 20.0);
    }

    #[test]
    fn test_balance_sums_incomes_only() {
        let repo = repo_with(&[
            ("Salary", 100.0, EntryKind::Income),
            ("Food", 40.0, EntryKind::Expense),
        ]);

        assert_eq!(balance(repo.list()), 100.0);
        assert_eq!(total_by_kind(repo.list(), EntryKind::Expense), 40.0);
    }

    #[test]
    fn test_most_common_category() {
        let repo = repo_with(&[
            ("Bills", 1.0, EntryKind::Expense),
            ("Food", 1.0, EntryKind::Expense),
            ("Food", 1.0, EntryKind::Expense),
        ]);
        assert_eq!(most_common_category(repo.list()), Some("Food".to_string()));

        let empty: Vec<LedgerEntry> = Vec::new();
        assert_eq!(most_common_category(&empty), None);
    }

    #[test]
    fn test_most_common_category_tie_prefers_first_seen() {
        let repo = repo_with(&[
            ("Leisure", 1.0, EntryKind::Expense),
            ("Bills", 1.0, EntryKind::Expense),
            ("Bills", 1.0, EntryKind::Expense),
            ("Leisure", 1.0, EntryKind::Expense),
        ]);
        assert_eq!(most_common_category(repo.list()), Some("Leisure".to_string()));
    }

    #[test]
    fn test_category_counts_first_seen_order() {
        let repo = repo_with(&[
            ("Food", 1.0, EntryKind::Expense),
            ("Salary", 1.0, EntryKind::Income),
            ("Food", 1.0, EntryKind::Expense),
        ]);

        let counts = category_counts(repo.list());
        assert_eq!(
            counts,
            vec![
                CategoryCount { category: "Food".to_string(), count: 2 },
                CategoryCount { category: "Salary".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_ledger_summary() {
        let repo = repo_with(&[
            ("Salary", 300.0, EntryKind::Income),
            ("Food", 60.0, EntryKind::Expense),
            ("Food", 30.0, EntryKind::Expense),
        ]);

        let summary = LedgerSummary::from_records(repo.list());
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.average_amount, 130.0);
        assert_eq!(summary.balance, 300.0);
        assert_eq!(summary.total_income, 300.0);
        assert_eq!(summary.total_expenses, 90.0);
        assert_eq!(summary.most_common_category.as_deref(), Some("Food"));
    }
}

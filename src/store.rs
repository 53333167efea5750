// 🧾 Stores - one owned object per record kind
//
// A store owns its repository and validator. Every write goes through the
// validator first; reads go through the query engine. There is no global
// state: callers hold the store and pass it by reference.

use crate::config::CategoryConfig;
use crate::entities::{CatalogEntry, LedgerEntry, Record};
use crate::error::Result;
use crate::query::{EntryFilter, QueryEngine};
use crate::repository::Repository;
use crate::stats::Summarize;
use crate::validator::{Validate, Validator};

pub type LedgerStore = Store<LedgerEntry>;
pub type CatalogStore = Store<CatalogEntry>;

#[derive(Debug, Clone)]
pub struct Store<R: Record + Validate> {
    repository: Repository<R>,
    validator: Validator,
}

impl<R: Record + Validate> Store<R> {
    pub fn new(categories: CategoryConfig) -> Self {
        Store {
            repository: Repository::new(),
            validator: Validator::new(categories),
        }
    }

    /// Validate and store a new record
    pub fn create(&mut self, draft: R::Draft) -> Result<R> {
        let validator = &self.validator;
        self.repository
            .try_create(draft, |candidate| candidate.validate_with(validator))
    }

    pub fn get(&self, id: u64) -> Result<R> {
        self.repository.get(id).cloned()
    }

    pub fn list(&self) -> &[R] {
        self.repository.list()
    }

    /// Merge `patch` over record `id`
    ///
    /// The merged record is validated as a whole, so a patch that only changes
    /// the kind still fails when the kept category does not fit the new kind.
    pub fn update(&mut self, id: u64, patch: R::Patch) -> Result<R> {
        let validator = &self.validator;
        self.repository
            .try_replace(id, patch, |merged| merged.validate_with(validator))
    }

    pub fn delete(&mut self, id: u64) -> Result<R> {
        self.repository.delete(id)
    }

    pub fn search(&self, filter: &EntryFilter) -> Result<Vec<R>> {
        QueryEngine::new(&self.validator).search(self.repository.list(), filter)
    }

    pub fn len(&self) -> usize {
        self.repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }
}

impl<R: Record + Validate> Default for Store<R> {
    fn default() -> Self {
        Self::new(CategoryConfig::default())
    }
}

impl<R: Record + Validate + Summarize> Store<R> {
    /// Statistics over every stored record, recomputed on each call
    pub fn summary(&self) -> R::Summary {
        R::summarize(self.list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CatalogPatch, EntryKind, LedgerPatch, NewCatalogEntry, NewLedgerEntry};
    use crate::error::Error;

    fn expense(description: &str, amount: f64, category: &str) -> NewLedgerEntry {
        NewLedgerEntry::new(description, amount, category, EntryKind::Expense)
    }

    #[test]
    fn test_create_validates_category() {
        let mut store = LedgerStore::default();

        let err = store.create(expense("Cinema", 12.0, "Salary")).unwrap_err();
        assert!(matches!(err, Error::InvalidCategory { .. }));
        assert!(store.is_empty());

        let entry = store.create(expense("Cinema", 12.0, "Leisure")).unwrap();
        assert_eq!(entry.id, 1);
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let mut store = LedgerStore::default();
        assert!(store.create(expense("Cinema", 0.0, "Leisure")).is_err());

        // Rejected creates do not burn ids
        assert_eq!(store.create(expense("Cinema", 1.0, "Leisure")).unwrap().id, 1);
    }

    #[test]
    fn test_update_revalidates_supplied_category() {
        let mut store = LedgerStore::default();
        store.create(expense("Cinema", 12.0, "Leisure")).unwrap();

        let patch = LedgerPatch {
            category: Some("Salary".to_string()),
            ..Default::default()
        };
        assert!(store.update(1, patch).is_err());
        assert_eq!(store.get(1).unwrap().category, "Leisure");
    }

    #[test]
    fn test_update_kind_only_checks_resulting_pair() {
        let mut store = LedgerStore::default();
        store.create(expense("Cinema", 12.0, "Leisure")).unwrap();

        // Leisure is not an income category
        let patch = LedgerPatch {
            kind: Some("income".to_string()),
            ..Default::default()
        };
        let err = store.update(1, patch).unwrap_err();
        assert!(matches!(err, Error::InvalidCategory { ref category, .. } if category == "Leisure"));

        // Other is valid for both kinds
        store
            .update(
                1,
                LedgerPatch {
                    category: Some("Other".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let updated = store
            .update(
                1,
                LedgerPatch {
                    kind: Some("income".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.kind, EntryKind::Income);
    }

    #[test]
    fn test_update_preserves_identity_and_timestamp() {
        let mut store = LedgerStore::default();
        let original = store.create(expense("Cinema", 12.0, "Leisure")).unwrap();

        let updated = store
            .update(1, NewLedgerEntry::new("Bonus", 500.0, "Salary", EntryKind::Income).into())
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.amount, 500.0);

        let unchanged = store.update(1, LedgerPatch::default()).unwrap();
        assert_eq!(unchanged, updated);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let mut store = LedgerStore::default();
        store.create(expense("Cinema", 12.0, "Leisure")).unwrap();

        assert_eq!(store.update(5, LedgerPatch::default()).unwrap_err(), Error::NotFound(5));
        assert_eq!(store.delete(5).unwrap_err(), Error::NotFound(5));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_search_and_summary() {
        let mut store = LedgerStore::default();
        store.create(expense("Groceries", 10.0, "Food")).unwrap();
        store.create(expense("Water bill", 50.0, "Bills")).unwrap();
        store.create(expense("Restaurant", 30.0, "Food")).unwrap();

        let food = store.search(&EntryFilter::new().category("Food")).unwrap();
        assert_eq!(food.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);

        let summary = store.summary();
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.average_amount, 30.0);
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.most_common_category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_catalog_store() {
        let mut store = CatalogStore::default();
        store
            .create(NewCatalogEntry::new("Chemistry notes", "Full semester", 0.0, "Books", "lia"))
            .unwrap();

        let err = store
            .create(NewCatalogEntry::new("Mystery box", "Surprise", 5.0, "Bogus", "lia"))
            .unwrap_err();
        assert!(err.to_string().contains("Electronics"));

        let updated = store
            .update(
                1,
                CatalogPatch {
                    price: Some(3.5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 3.5);

        let summary = store.summary();
        assert_eq!(summary.total_entries, 1);
        assert_eq!(summary.average_price, 3.5);
    }
}

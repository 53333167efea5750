// 📐 Validator - category allow-lists and field bounds
// Pure checks: no side effects, same answer for the same input and configuration.

use crate::config::CategoryConfig;
use crate::entities::{CatalogEntry, CategoryScope, EntryKind, LedgerEntry};
use crate::error::{Error, Result};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct Validator {
    categories: CategoryConfig,
}

impl Validator {
    pub fn new(categories: CategoryConfig) -> Self {
        Validator { categories }
    }

    // ========================================================================
    // KIND & CATEGORY
    // ========================================================================

    /// Accepts exactly "income" or "expense"
    pub fn parse_kind(&self, raw: &str) -> Result<EntryKind> {
        raw.parse()
    }

    pub fn allowed_categories(&self, kind: EntryKind) -> &[String] {
        match kind {
            EntryKind::Income => &self.categories.income,
            EntryKind::Expense => &self.categories.expense,
        }
    }

    /// Union of income and expense categories, first-seen order, no duplicates
    pub fn all_ledger_categories(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for name in self.categories.income.iter().chain(&self.categories.expense) {
            if !all.contains(name) {
                all.push(name.clone());
            }
        }
        all
    }

    pub fn catalog_categories(&self) -> &[String] {
        &self.categories.catalog
    }

    pub fn validate_category(&self, kind: EntryKind, category: &str) -> Result<()> {
        check_member(category, self.allowed_categories(kind))
    }

    pub fn validate_catalog_category(&self, category: &str) -> Result<()> {
        check_member(category, self.catalog_categories())
    }

    /// Category check for a query filter
    ///
    /// Ledger: against the kind's list when a kind filter is present, else
    /// against every ledger category. Catalog: against the flat list.
    pub fn validate_filter_category(
        &self,
        scope: CategoryScope,
        kind: Option<EntryKind>,
        category: &str,
    ) -> Result<()> {
        match (scope, kind) {
            (CategoryScope::Ledger, Some(kind)) => self.validate_category(kind, category),
            (CategoryScope::Ledger, None) => check_member(category, &self.all_ledger_categories()),
            (CategoryScope::Catalog, _) => self.validate_catalog_category(category),
        }
    }

    // ========================================================================
    // WHOLE RECORDS
    // ========================================================================

    pub fn validate_ledger_entry(&self, entry: &LedgerEntry) -> Result<()> {
        check_length("description", &entry.description, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
        check_amount("amount", entry.amount, false)?;
        self.validate_category(entry.kind, &entry.category)
    }

    pub fn validate_catalog_entry(&self, entry: &CatalogEntry) -> Result<()> {
        check_length("title", &entry.title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
        check_length("description", &entry.description, TITLE_MIN_CHARS, DESCRIPTION_MAX_CHARS)?;
        check_amount("price", entry.price, true)?;
        if entry.seller.trim().is_empty() {
            return Err(Error::invalid_argument("seller", "must not be empty"));
        }
        self.validate_catalog_category(&entry.category)
    }
}

/// Whole-record check run before a record is admitted or replaced
pub trait Validate {
    fn validate_with(&self, validator: &Validator) -> Result<()>;
}

impl Validate for LedgerEntry {
    fn validate_with(&self, validator: &Validator) -> Result<()> {
        validator.validate_ledger_entry(self)
    }
}

impl Validate for CatalogEntry {
    fn validate_with(&self, validator: &Validator) -> Result<()> {
        validator.validate_catalog_entry(self)
    }
}

fn check_member(category: &str, allowed: &[String]) -> Result<()> {
    if allowed.iter().any(|c| c == category) {
        Ok(())
    } else {
        Err(Error::InvalidCategory {
            category: category.to_string(),
            allowed: allowed.to_vec(),
        })
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let chars = value.chars().count();
    if chars < min || chars > max {
        return Err(Error::invalid_argument(
            field,
            format!("must be between {} and {} characters, got {}", min, max, chars),
        ));
    }
    Ok(())
}

fn check_amount(field: &str, value: f64, allow_zero: bool) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_argument(field, "must be a finite number"));
    }
    if value < 0.0 || (!allow_zero && value == 0.0) {
        let bound = if allow_zero { ">= 0" } else { "> 0" };
        return Err(Error::invalid_argument(
            field,
            format!("must be {}, got {}", bound, value),
        ));
    }
    Ok(())
}

// 🔍 Query Engine - optional filters over a snapshot of the repository
//
// Every supplied filter must hold (logical AND). Order of the input is kept.
// Parameters are checked up front, so a bad filter fails even when there is
// nothing to scan.

use crate::entities::{CategoryScope, EntryKind, Record};
use crate::error::{Error, Result};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};

pub const MIN_TERM_CHARS: usize = 2;

/// Filter parameters as they arrive from a caller; all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFilter {
    /// Exact category match
    pub category: Option<String>,

    /// Case-insensitive substring of the searchable text
    pub term: Option<String>,

    /// Inclusive lower bound on amount/price
    #[serde(alias = "price_min")]
    pub amount_min: Option<f64>,

    /// Inclusive upper bound on amount/price
    #[serde(alias = "price_max")]
    pub amount_max: Option<f64>,

    /// Raw kind tag, ledger entries only
    pub kind: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn term(mut self, term: &str) -> Self {
        self.term = Some(term.to_string());
        self
    }

    pub fn amount_min(mut self, min: f64) -> Self {
        self.amount_min = Some(min);
        self
    }

    pub fn amount_max(mut self, max: f64) -> Self {
        self.amount_max = Some(max);
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Empty text counts as not supplied, the same way patches treat it
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Checked form of `EntryFilter`, ready to run against records
#[derive(Debug)]
struct Predicates<'f> {
    kind: Option<EntryKind>,
    category: Option<&'f str>,
    min: Option<f64>,
    max: Option<f64>,
    term: Option<String>,
}

impl Predicates<'_> {
    /// Equality checks first, then bounds, substring scan last
    fn matches<R: Record>(&self, record: &R) -> bool {
        if let Some(kind) = self.kind {
            if record.kind() != Some(kind) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if record.category() != category {
                return false;
            }
        }

        let amount = record.amount();
        if self.min.is_some_and(|min| amount < min) || self.max.is_some_and(|max| amount > max) {
            return false;
        }

        match &self.term {
            Some(term) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(term.as_str())),
            None => true,
        }
    }
}

pub struct QueryEngine<'v> {
    validator: &'v Validator,
}

impl<'v> QueryEngine<'v> {
    pub fn new(validator: &'v Validator) -> Self {
        QueryEngine { validator }
    }

    /// Records matching every supplied filter, in their original order
    pub fn search<R: Record>(&self, records: &[R], filter: &EntryFilter) -> Result<Vec<R>> {
        let predicates = self.compile::<R>(filter)?;

        Ok(records
            .iter()
            .filter(|record| predicates.matches(*record))
            .cloned()
            .collect())
    }

    fn compile<'f, R: Record>(&self, filter: &'f EntryFilter) -> Result<Predicates<'f>> {
        let kind = match supplied(&filter.kind) {
            None => None,
            Some(_) if R::SCOPE == CategoryScope::Catalog => {
                return Err(Error::invalid_argument(
                    "kind",
                    "only ledger entries can be filtered by kind",
                ));
            }
            Some(raw) => Some(self.validator.parse_kind(raw)?),
        };

        for (field, bound) in [("amount_min", filter.amount_min), ("amount_max", filter.amount_max)] {
            if bound.is_some_and(|b| !b.is_finite()) {
                return Err(Error::invalid_argument(field, "must be a finite number"));
            }
        }
        if let (Some(min), Some(max)) = (filter.amount_min, filter.amount_max) {
            if min > max {
                return Err(Error::InvalidRange { min, max });
            }
        }

        let term = match supplied(&filter.term) {
            Some(term) if term.chars().count() < MIN_TERM_CHARS => {
                return Err(Error::invalid_argument(
                    "term",
                    format!("must be at least {} characters", MIN_TERM_CHARS),
                ));
            }
            Some(term) => Some(term.to_lowercase()),
            None => None,
        };

        let category = supplied(&filter.category);
        if let Some(category) = category {
            self.validator
                .validate_filter_category(R::SCOPE, kind, category)?;
        }

        Ok(Predicates {
            kind,
            category,
            min: filter.amount_min,
            max: filter.amount_max,
            term,
        })
    }
}

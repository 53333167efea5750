// 🛍️ Catalog Entry - a marketplace listing offered by a seller
//
// Identity: id + created_at (assigned by the repository, never change)
// Values: title, description, price, category, seller

use super::{merge_text, CategoryScope, Record};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub created_at: DateTime<Utc>,

    /// Listing headline (3-100 characters)
    pub title: String,

    /// Longer free text (3-500 characters), searched together with the title
    pub description: String,

    /// Zero is allowed (free items)
    pub price: f64,

    /// Must belong to the flat catalog allow-list
    pub category: String,

    /// Free-text seller identity, no allow-list
    pub seller: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCatalogEntry {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub seller: String,
}

impl NewCatalogEntry {
    pub fn new(title: &str, description: &str, price: f64, category: &str, seller: &str) -> Self {
        NewCatalogEntry {
            title: title.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            seller: seller.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub seller: Option<String>,
}

impl From<NewCatalogEntry> for CatalogPatch {
    fn from(entry: NewCatalogEntry) -> Self {
        CatalogPatch {
            title: Some(entry.title),
            description: Some(entry.description),
            price: Some(entry.price),
            category: Some(entry.category),
            seller: Some(entry.seller),
        }
    }
}

impl Record for CatalogEntry {
    type Draft = NewCatalogEntry;
    type Patch = CatalogPatch;

    const SCOPE: CategoryScope = CategoryScope::Catalog;

    fn build(id: u64, created_at: DateTime<Utc>, draft: NewCatalogEntry) -> Result<Self> {
        Ok(CatalogEntry {
            id,
            created_at,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            seller: draft.seller,
        })
    }

    fn merge(&self, patch: CatalogPatch) -> Result<Self> {
        Ok(CatalogEntry {
            id: self.id,
            created_at: self.created_at,
            title: merge_text(patch.title, &self.title),
            description: merge_text(patch.description, &self.description),
            price: patch.price.unwrap_or(self.price),
            category: merge_text(patch.category, &self.category),
            seller: merge_text(patch.seller, &self.seller),
        })
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn amount(&self) -> f64 {
        self.price
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_merge() {
        let entry = CatalogEntry::build(
            1,
            Utc::now(),
            NewCatalogEntry::new("Calculus book", "Used, good shape", 25.0, "Books", "ana"),
        )
        .unwrap();

        let merged = entry.merge(CatalogPatch {
            price: Some(0.0),
            seller: Some(String::new()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(merged.price, 0.0);
        assert_eq!(merged.seller, "ana");
        assert_eq!(merged.title, "Calculus book");
        assert_eq!(merged.created_at, entry.created_at);
    }

    #[test]
    fn test_catalog_search_fields() {
        let entry = CatalogEntry::build(
            1,
            Utc::now(),
            NewCatalogEntry::new("Desk lamp", "LED, warm light", 15.0, "Furniture", "bo"),
        )
        .unwrap();

        assert_eq!(entry.search_fields(), vec!["Desk lamp", "LED, warm light"]);
        assert_eq!(entry.kind(), None);
        assert_eq!(entry.amount(), 15.0);
    }
}

//! Catalog domain model.
//!
//! # Responsibility
//! - Define purchasable items as supplied by an external catalog source.
//! - Provide lookup helpers used by the cart entry box.
//!
//! # Invariants
//! - `CatalogItem::id` is unique within one `Catalog`.
//! - Core never mutates catalog contents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier of one catalog item.
pub type ItemId = u64;

/// One purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    /// Unit price. Expected to be non-negative.
    pub price: Decimal,
    /// Display label such as `pcs` or `kg`.
    pub unit: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Decimal,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            unit: unit.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered, read-only list of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the first item whose name contains `query`, ignoring case.
    ///
    /// Blank queries never match; this mirrors the scan box where an empty
    /// Enter press must not add anything to the cart.
    pub fn find_by_name(&self, query: &str) -> Option<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.name.to_lowercase().contains(needle.as_str()))
    }
}

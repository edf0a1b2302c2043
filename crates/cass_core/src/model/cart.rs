//! Cart aggregation model.
//!
//! # Responsibility
//! - Accumulate selected catalog items with quantities.
//! - Derive subtotal and tax-adjusted totals.
//!
//! # Invariants
//! - At most one `CartLine` per item id; repeated adds increment quantity.
//! - Quantity is never negative. Zero-quantity lines are kept until removed.
//! - Aggregation never fails; invalid quantity input leaves state unchanged.

use crate::model::catalog::{CatalogItem, ItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Multiplier selection applied to the subtotal.
///
/// `WithoutTax` applies a 10% reduction rather than a zero-tax passthrough.
/// Existing receipts were issued with that arithmetic, so it is kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    #[default]
    WithTax,
    WithoutTax,
}

impl TaxMode {
    /// Factor applied to the subtotal: `1.10` or `0.90`.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::WithTax => Decimal::new(110, 2),
            Self::WithoutTax => Decimal::new(90, 2),
        }
    }

    /// Short label printed next to the total on receipts.
    pub fn label(self) -> &'static str {
        match self {
            Self::WithTax => "+10%",
            Self::WithoutTax => "-10%",
        }
    }
}

/// One selected item plus its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// Session-scoped cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    tax_mode: TaxMode,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tax_mode(tax_mode: TaxMode) -> Self {
        Self {
            lines: Vec::new(),
            tax_mode,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn tax_mode(&self) -> TaxMode {
        self.tax_mode
    }

    pub fn set_tax_mode(&mut self, tax_mode: TaxMode) {
        self.tax_mode = tax_mode;
    }

    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    /// Adds one unit of `item`.
    ///
    /// Increments the existing line for the same id, otherwise appends a new
    /// line with quantity 1.
    pub fn add_item(&mut self, item: &CatalogItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine {
            item: item.clone(),
            quantity: 1,
        });
    }

    /// Replaces the quantity of an existing line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: ItemId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == id) {
            line.quantity = quantity;
        }
    }

    /// Applies raw quantity text from an input field.
    ///
    /// Returns `true` when the quantity was applied. Empty, negative or
    /// non-numeric text is ignored and the previous quantity is retained.
    pub fn set_quantity_input(&mut self, id: ItemId, raw: &str) -> bool {
        match raw.trim().parse::<u32>() {
            Ok(quantity) if self.line(id).is_some() => {
                self.set_quantity(id, quantity);
                true
            }
            _ => false,
        }
    }

    /// Removes the line for `id`. No-op when absent.
    pub fn remove_item(&mut self, id: ItemId) {
        self.lines.retain(|line| line.item.id != id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` across all lines.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal adjusted by the cart's current tax mode. Unrounded.
    pub fn total(&self) -> Decimal {
        self.total_with(self.tax_mode)
    }

    pub fn total_with(&self, tax_mode: TaxMode) -> Decimal {
        self.subtotal() * tax_mode.multiplier()
    }
}

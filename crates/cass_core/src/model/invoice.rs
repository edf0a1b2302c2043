//! Finalized invoice model.
//!
//! # Responsibility
//! - Snapshot a cart plus customer metadata into an immutable record.
//! - Own the persisted JSON shape of one history entry.
//!
//! # Invariants
//! - Fields are private and only readable after construction.
//! - `lines` is a copy of the cart at finalization, never a live reference.
//! - `total` is rounded to 2 decimal places and serialized as a fixed
//!   2-decimal string (e.g. `"18.70"`).
//! - `taxMode` is written for new records; entries stored before it existed
//!   fall back to the mode their total was computed with.

use crate::model::cart::{Cart, TaxMode};
use crate::model::catalog::ItemId;
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

/// Timestamp layout stored in `Invoice::date`.
///
/// Sortable and substring-friendly: `2024-01` matches every January 2024 row.
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Free-text customer fields captured at checkout. No format rules apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub customer_name: String,
    pub customer_phone: String,
    pub company_reg: String,
}

/// Snapshot of one cart line as stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl InvoiceLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Immutable finalized invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    invoice_number: String,
    customer_name: String,
    customer_phone: String,
    company_reg: String,
    date: String,
    cart: Vec<InvoiceLine>,
    #[serde(serialize_with = "serialize_money")]
    total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tax_mode: Option<TaxMode>,
}

impl Invoice {
    /// Snapshots `cart` into a new invoice.
    ///
    /// `invoice_number` is accepted verbatim; callers may override the
    /// suggested number and no uniqueness check is performed here.
    pub fn finalize(
        invoice_number: impl Into<String>,
        customer: &CustomerDetails,
        cart: &Cart,
        finalized_at: NaiveDateTime,
    ) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| InvoiceLine {
                id: line.item.id,
                name: line.item.name.clone(),
                description: line.item.description.clone(),
                unit: line.item.unit.clone(),
                price: line.item.price,
                quantity: line.quantity,
            })
            .collect();

        Self {
            invoice_number: invoice_number.into(),
            customer_name: customer.customer_name.clone(),
            customer_phone: customer.customer_phone.clone(),
            company_reg: customer.company_reg.clone(),
            date: finalized_at.format(INVOICE_DATE_FORMAT).to_string(),
            cart: lines,
            total: round_money(cart.total()),
            tax_mode: Some(cart.tax_mode()),
        }
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    pub fn company_reg(&self) -> &str {
        &self.company_reg
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.cart
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Recomputes the pre-adjustment subtotal from the stored lines.
    pub fn subtotal(&self) -> Decimal {
        self.cart.iter().map(InvoiceLine::line_total).sum()
    }

    /// Tax mode the total was computed with.
    ///
    /// Records without a stored mode are matched against the `-10%` total;
    /// anything else, including an empty cart, reads as `WithTax`.
    pub fn tax_mode(&self) -> TaxMode {
        if let Some(mode) = self.tax_mode {
            return mode;
        }
        let subtotal = self.subtotal();
        let reduced = round_money(subtotal * TaxMode::WithoutTax.multiplier());
        if !subtotal.is_zero() && reduced == self.total {
            TaxMode::WithoutTax
        } else {
            TaxMode::WithTax
        }
    }
}

/// Rounds half away from zero and pins the scale to 2 digits.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn serialize_money<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&round_money(*value).to_string())
}

#[cfg(test)]
mod tests {
    use super::{round_money, CustomerDetails, Invoice};
    use crate::model::cart::{Cart, TaxMode};
    use crate::model::catalog::CatalogItem;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn at(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|date| date.and_hms_opt(hour, 30, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn finalize_snapshots_cart() {
        let mut cart = Cart::new();
        let tea = CatalogItem::new(1, "Tea", Decimal::new(250, 2), "cup").with_description("hot");
        cart.add_item(&tea);
        cart.add_item(&tea);

        let customer = CustomerDetails {
            customer_name: "Ann".to_string(),
            customer_phone: "0100".to_string(),
            company_reg: "REG-1".to_string(),
        };
        let invoice = Invoice::finalize("INV00001", &customer, &cart, at(9));

        cart.set_quantity(1, 10);
        assert_eq!(invoice.lines()[0].quantity, 2);
        assert_eq!(invoice.lines()[0].description.as_deref(), Some("hot"));
        assert_eq!(invoice.total().to_string(), "5.50");
        assert_eq!(invoice.subtotal(), Decimal::new(500, 2));
        assert_eq!(invoice.date(), "2024-01-15 09:30:00");
        assert_eq!(invoice.company_reg(), "REG-1");
    }

    #[test]
    fn total_uses_cart_tax_mode() {
        let mut cart = Cart::with_tax_mode(TaxMode::WithoutTax);
        cart.add_item(&CatalogItem::new(7, "Soap", Decimal::new(333, 2), "pcs"));
        let invoice = Invoice::finalize("X", &CustomerDetails::default(), &cart, at(10));
        // 3.33 * 0.90 = 2.997
        assert_eq!(invoice.total().to_string(), "3.00");
        assert_eq!(invoice.tax_mode(), TaxMode::WithoutTax);
    }

    #[test]
    fn tax_mode_roundtrips_and_is_inferred_for_old_records() {
        let mut cart = Cart::with_tax_mode(TaxMode::WithoutTax);
        cart.add_item(&CatalogItem::new(1, "Tea", Decimal::new(10, 0), "cup"));
        let invoice = Invoice::finalize("INV00004", &CustomerDetails::default(), &cart, at(12));

        let value = serde_json::to_value(&invoice).expect("invoice should serialize");
        assert_eq!(value["taxMode"], "without_tax");
        let decoded: Invoice = serde_json::from_value(value).expect("invoice should parse");
        assert_eq!(decoded.tax_mode(), TaxMode::WithoutTax);

        let old = |total: &str| -> Invoice {
            let raw = format!(
                r#"{{"invoiceNumber":"INV00001","customerName":"","customerPhone":"",
                "companyReg":"","date":"","cart":[{{"id":1,"name":"Tea","unit":"cup",
                "price":"10","quantity":1}}],"total":"{total}"}}"#
            );
            serde_json::from_str(&raw).expect("old record should parse")
        };
        assert_eq!(old("9.00").tax_mode(), TaxMode::WithoutTax);
        assert_eq!(old("11.00").tax_mode(), TaxMode::WithTax);
        assert!(serde_json::to_value(old("11.00"))
            .expect("invoice should serialize")
            .get("taxMode")
            .is_none());
    }

    #[test]
    fn round_money_fixes_two_decimal_scale() {
        assert_eq!(round_money(Decimal::new(110, 0)).to_string(), "110.00");
        assert_eq!(round_money(Decimal::new(12345, 3)).to_string(), "12.35");
    }

    #[test]
    fn serialized_shape_uses_camel_case_and_string_total() {
        let mut cart = Cart::new();
        cart.add_item(&CatalogItem::new(1, "Tea", Decimal::new(10, 0), "cup"));
        let invoice = Invoice::finalize("INV00003", &CustomerDetails::default(), &cart, at(11));

        let value = serde_json::to_value(&invoice).expect("invoice should serialize");
        assert_eq!(value["invoiceNumber"], "INV00003");
        assert_eq!(value["total"], "11.00");
        assert_eq!(value["cart"][0]["quantity"], 1);
        assert!(value.get("companyReg").is_some());
    }
}

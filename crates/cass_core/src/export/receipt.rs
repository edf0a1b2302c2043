//! Printable receipt layout.

use super::{DocumentExporter, ExportError};
use crate::model::invoice::{round_money, Invoice};
use std::io::Write;

/// Column headings of the line-item table.
pub const RECEIPT_COLUMNS: [&str; 6] = ["Product", "Description", "Qty", "Unit", "Price", "Total"];

const SIGNATURE_LINE: &str = "Signature: _________________________";

/// Receipt content ready for a document backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLayout {
    /// Ordered `(label, value)` header fields.
    pub header: Vec<(&'static str, String)>,
    pub rows: Vec<[String; 6]>,
    pub subtotal: String,
    /// E.g. `Total (+10%)`.
    pub total_label: String,
    pub total: String,
    pub signature: &'static str,
}

impl ReceiptLayout {
    /// Builds the receipt for `invoice`, labelled with its own tax mode.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let header = vec![
            ("Company Reg No", invoice.company_reg().to_string()),
            ("Date", invoice.date().to_string()),
            ("Invoice #", invoice.invoice_number().to_string()),
            ("Customer", invoice.customer_name().to_string()),
            ("Phone", invoice.customer_phone().to_string()),
        ];

        let rows = invoice
            .lines()
            .iter()
            .map(|line| {
                [
                    line.name.clone(),
                    line.description
                        .clone()
                        .filter(|value| !value.is_empty())
                        .unwrap_or_else(|| "-".to_string()),
                    line.quantity.to_string(),
                    line.unit.clone(),
                    format!("${}", line.price),
                    format!("${}", round_money(line.line_total())),
                ]
            })
            .collect();

        Self {
            header,
            rows,
            subtotal: format!("${}", round_money(invoice.subtotal())),
            total_label: format!("Total ({})", invoice.tax_mode().label()),
            total: format!("${}", round_money(invoice.total())),
            signature: SIGNATURE_LINE,
        }
    }
}

/// Writes receipts as plain UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReceiptExporter;

impl DocumentExporter for PlainTextReceiptExporter {
    fn export_invoice(&self, receipt: &ReceiptLayout) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::new();
        for (label, value) in &receipt.header {
            writeln!(out, "{label}: {value}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", RECEIPT_COLUMNS.join(" | "))?;
        for row in &receipt.rows {
            writeln!(out, "{}", row.join(" | "))?;
        }
        writeln!(out)?;
        writeln!(out, "Subtotal: {}", receipt.subtotal)?;
        writeln!(out, "{}: {}", receipt.total_label, receipt.total)?;
        writeln!(out)?;
        writeln!(out, "{}", receipt.signature)?;
        Ok(out)
    }
}

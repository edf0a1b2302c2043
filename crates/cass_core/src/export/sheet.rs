//! Spreadsheet layout for invoice history.

use super::{ExportError, TabularExporter};
use crate::model::invoice::{round_money, Invoice};
use std::io::Write;

pub const SHEET_NAME: &str = "Invoices";

pub const SHEET_COLUMNS: [&str; 7] = [
    "invoiceNumber",
    "customerName",
    "customerPhone",
    "companyReg",
    "date",
    "items",
    "total",
];

/// One sheet, one row per invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySheet {
    pub name: &'static str,
    pub rows: Vec<[String; 7]>,
}

impl HistorySheet {
    pub fn from_invoices(invoices: &[&Invoice]) -> Self {
        let rows = invoices
            .iter()
            .map(|invoice| {
                [
                    invoice.invoice_number().to_string(),
                    invoice.customer_name().to_string(),
                    invoice.customer_phone().to_string(),
                    invoice.company_reg().to_string(),
                    invoice.date().to_string(),
                    invoice.lines().len().to_string(),
                    round_money(invoice.total()).to_string(),
                ]
            })
            .collect();
        Self {
            name: SHEET_NAME,
            rows,
        }
    }
}

/// Writes a sheet as delimiter-separated text with a header row.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedSheetExporter {
    delimiter: char,
}

impl Default for DelimitedSheetExporter {
    fn default() -> Self {
        Self { delimiter: '\t' }
    }
}

impl DelimitedSheetExporter {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    fn clean(&self, cell: &str) -> String {
        cell.chars()
            .map(|ch| {
                if ch == self.delimiter || ch == '\n' || ch == '\r' {
                    ' '
                } else {
                    ch
                }
            })
            .collect()
    }
}

impl TabularExporter for DelimitedSheetExporter {
    fn export_rows(&self, sheet: &HistorySheet) -> Result<Vec<u8>, ExportError> {
        let separator = self.delimiter.to_string();
        let mut out = Vec::new();
        writeln!(out, "{}", SHEET_COLUMNS.join(separator.as_str()))?;
        for row in &sheet.rows {
            let cells: Vec<String> = row.iter().map(|cell| self.clean(cell)).collect();
            writeln!(out, "{}", cells.join(separator.as_str()))?;
        }
        Ok(out)
    }
}

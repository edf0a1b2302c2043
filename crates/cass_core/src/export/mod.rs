//! Export collaborator contracts.
//!
//! # Responsibility
//! - Shape finalized invoices into printable receipt and spreadsheet layouts.
//! - Define the exporter traits that turn layouts into bytes.
//!
//! # Invariants
//! - Layout building is pure; only exporters may fail.
//! - Exporters never mutate invoices or history.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod receipt;
pub mod sheet;

pub use receipt::{PlainTextReceiptExporter, ReceiptLayout};
pub use sheet::{DelimitedSheetExporter, HistorySheet};

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    /// Exporter cannot render this layout (e.g. backend not configured).
    Unsupported(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "export write failed: {err}"),
            Self::Unsupported(reason) => write!(f, "export unsupported: {reason}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Unsupported(_) => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Renders one receipt into a printable document.
pub trait DocumentExporter {
    fn export_invoice(&self, receipt: &ReceiptLayout) -> Result<Vec<u8>, ExportError>;
}

/// Renders filtered history into a downloadable spreadsheet.
pub trait TabularExporter {
    fn export_rows(&self, sheet: &HistorySheet) -> Result<Vec<u8>, ExportError>;
}

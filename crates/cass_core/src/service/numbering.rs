//! Invoice number derivation.
//!
//! # Responsibility
//! - Suggest the next `INV` + zero-padded sequence number from history.
//!
//! # Invariants
//! - Empty history always yields `INV00001`.
//! - Padding only adds zeros; sequences past 99999 widen (`INV100000`).
//! - A malformed predecessor is an error, never a corrupted suggestion.

use crate::model::invoice::Invoice;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const INVOICE_PREFIX: &str = "INV";
const SEQUENCE_WIDTH: usize = 5;

static INVOICE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^INV(\d+)$").expect("valid invoice number regex"));

/// How the predecessor sequence number is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStrategy {
    /// Use the physically last history entry.
    #[default]
    LastAppended,
    /// Use the highest well-formed number anywhere in history.
    HighestExisting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberingError {
    /// Predecessor number does not look like `INV<digits>` (or overflows).
    MalformedInvoiceNumber(String),
}

impl Display for NumberingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInvoiceNumber(value) => write!(
                f,
                "cannot derive next invoice number from `{value}`; enter one manually"
            ),
        }
    }
}

impl Error for NumberingError {}

/// Suggests the next invoice number using the last appended entry.
pub fn next_invoice_number(history: &[Invoice]) -> Result<String, NumberingError> {
    next_invoice_number_with(history, NumberingStrategy::LastAppended)
}

/// Suggests the next invoice number using `strategy`.
///
/// The result is only a default; callers may finalize with any number.
pub fn next_invoice_number_with(
    history: &[Invoice],
    strategy: NumberingStrategy,
) -> Result<String, NumberingError> {
    let previous = match strategy {
        NumberingStrategy::LastAppended => match history.last() {
            Some(last) => parse_sequence(last.invoice_number())?,
            None => 0,
        },
        NumberingStrategy::HighestExisting => highest_sequence(history)?,
    };

    let next = previous.checked_add(1).ok_or_else(|| {
        NumberingError::MalformedInvoiceNumber(format_invoice_number(previous))
    })?;
    Ok(format_invoice_number(next))
}

/// Renders `sequence` as `INV` + at least five digits.
pub fn format_invoice_number(sequence: u64) -> String {
    format!("{INVOICE_PREFIX}{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Extracts the numeric sequence from `INV<digits>`.
pub fn parse_sequence(invoice_number: &str) -> Result<u64, NumberingError> {
    INVOICE_NUMBER_RE
        .captures(invoice_number)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
        .ok_or_else(|| NumberingError::MalformedInvoiceNumber(invoice_number.to_string()))
}

fn highest_sequence(history: &[Invoice]) -> Result<u64, NumberingError> {
    let Some(last) = history.last() else {
        return Ok(0);
    };
    history
        .iter()
        .filter_map(|invoice| parse_sequence(invoice.invoice_number()).ok())
        .max()
        .ok_or_else(|| NumberingError::MalformedInvoiceNumber(last.invoice_number().to_string()))
}

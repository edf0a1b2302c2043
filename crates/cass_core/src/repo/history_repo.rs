//! Invoice history log on top of a key-value store.
//!
//! # Responsibility
//! - Load and persist the ordered list of finalized invoices.
//! - Provide substring filtering and 1-indexed pagination over history.
//!
//! # Invariants
//! - Insertion order equals finalization order and is never rewritten.
//! - Reads fail soft: absent or corrupt data yields an empty history.
//! - A failed write is reported, but the in-memory append is not rolled back.

use crate::model::invoice::Invoice;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known key holding the serialized history sequence.
pub const DEFAULT_HISTORY_KEY: &str = "invoiceHistory";

/// Error returned by history writes.
#[derive(Debug)]
pub enum HistoryError {
    /// History could not be encoded to JSON.
    Serialize(serde_json::Error),
    /// Backend write failed; in-memory history already contains the record.
    Persist(StoreError),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to encode invoice history: {err}"),
            Self::Persist(err) => write!(f, "invoice history not durably saved: {err}"),
        }
    }
}

impl Error for HistoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<StoreError> for HistoryError {
    fn from(value: StoreError) -> Self {
        Self::Persist(value)
    }
}

/// Substring filter over history rows. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Raw substring matched against `Invoice::date`, e.g. `2024-01`.
    pub date: String,
    pub company_reg: String,
}

impl HistoryFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        let date_match = self.date.is_empty() || invoice.date().contains(self.date.as_str());
        let reg_match = self.company_reg.is_empty()
            || invoice.company_reg().contains(self.company_reg.as_str());
        date_match && reg_match
    }
}

/// Append-only invoice history bound to one store key.
pub struct InvoiceHistoryStore<S: KeyValueStore> {
    store: S,
    key: String,
    invoices: Vec<Invoice>,
}

impl<S: KeyValueStore> InvoiceHistoryStore<S> {
    /// Opens history under [`DEFAULT_HISTORY_KEY`].
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_HISTORY_KEY)
    }

    /// Opens history under a caller-chosen key and loads it once.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let mut history = Self {
            store,
            key: key.into(),
            invoices: Vec::new(),
        };
        history.invoices = history.load();
        history
    }

    /// Reads the persisted sequence without touching in-memory state.
    ///
    /// Never fails: missing, unreadable or unparsable data is logged and
    /// treated as an empty history so new invoices are not blocked.
    pub fn load(&self) -> Vec<Invoice> {
        let raw = match self.store.get(self.key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=history_load module=repo status=degraded reason=read_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Invoice>>(raw.as_str()) {
            Ok(invoices) => invoices,
            Err(err) => {
                // Error text may echo stored values; keep only position info.
                warn!(
                    "event=history_load module=repo status=degraded reason=parse_failed key={} line={} column={}",
                    self.key,
                    err.line(),
                    err.column()
                );
                Vec::new()
            }
        }
    }

    /// Replaces in-memory state with the persisted sequence.
    pub fn reload(&mut self) {
        self.invoices = self.load();
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Appends one invoice and writes the full sequence back.
    ///
    /// # Errors
    /// - `HistoryError::Serialize` or `HistoryError::Persist` when the write
    ///   could not be completed. The invoice stays in memory either way; the
    ///   caller decides whether to retry via [`Self::flush`] or warn the user.
    pub fn append(&mut self, invoice: Invoice) -> Result<(), HistoryError> {
        self.invoices.push(invoice);
        self.flush()
    }

    /// Writes the current in-memory sequence to the store.
    pub fn flush(&mut self) -> Result<(), HistoryError> {
        let encoded = serde_json::to_string(&self.invoices).map_err(HistoryError::Serialize)?;
        self.store.set(self.key.as_str(), encoded.as_str())?;
        info!(
            "event=history_write module=repo status=ok key={} count={}",
            self.key,
            self.invoices.len()
        );
        Ok(())
    }

    /// Returns invoices matching `filter`, in history order.
    pub fn filter(&self, filter: &HistoryFilter) -> Vec<&Invoice> {
        self.invoices
            .iter()
            .filter(|invoice| filter.matches(invoice))
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Returns the 1-indexed page `[(page-1)*page_size, page*page_size)`.
///
/// Out-of-range pages, `page == 0` and `page_size == 0` yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` rows.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Whether a page after `page` has rows. Page 0 and size 0 address no page.
pub fn has_next_page(page: usize, page_size: usize, len: usize) -> bool {
    if page == 0 || page_size == 0 {
        return false;
    }
    page.saturating_mul(page_size) < len
}

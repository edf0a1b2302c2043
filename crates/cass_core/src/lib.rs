//! Core domain logic for the Cass point-of-sale screens.
//! This crate is the single source of truth for checkout and history rules.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod settings;

pub use export::{
    DelimitedSheetExporter, DocumentExporter, ExportError, HistorySheet,
    PlainTextReceiptExporter, ReceiptLayout, TabularExporter,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendance::{
    AttendanceError, AttendanceRecord, ClockKind, ClockSubmission, GeoPoint, Office,
};
pub use model::cart::{Cart, CartLine, TaxMode};
pub use model::catalog::{Catalog, CatalogItem, ItemId};
pub use model::invoice::{CustomerDetails, Invoice, InvoiceLine, INVOICE_DATE_FORMAT};
pub use repo::history_repo::{
    has_next_page, page_count, paginate, HistoryError, HistoryFilter, InvoiceHistoryStore,
    DEFAULT_HISTORY_KEY,
};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use service::attendance_service::{group_by_month, MonthGroup, MonthKey};
pub use service::invoice_service::{HistoryPage, InvoicingService};
pub use service::numbering::{
    next_invoice_number, next_invoice_number_with, NumberingError, NumberingStrategy,
};
pub use settings::{Settings, SettingsError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

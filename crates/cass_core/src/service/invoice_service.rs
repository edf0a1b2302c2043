//! Checkout and history use-case service.
//!
//! # Responsibility
//! - Turn an active cart into a finalized invoice and append it to history.
//! - Suggest invoice numbers and serve filtered, paginated history views.
//! - Hand receipts and history sheets to export collaborators.
//!
//! # Invariants
//! - Service APIs never bypass history persistence contracts.
//! - The cart is only cleared after a durable write, and only when enabled.

use crate::export::{DocumentExporter, ExportError, HistorySheet, ReceiptLayout, TabularExporter};
use crate::model::cart::Cart;
use crate::model::invoice::{CustomerDetails, Invoice};
use crate::repo::history_repo::{
    has_next_page, page_count, paginate, HistoryError, HistoryFilter, InvoiceHistoryStore,
};
use crate::repo::kv_store::KeyValueStore;
use crate::service::numbering::{next_invoice_number_with, NumberingError};
use crate::settings::Settings;
use chrono::{Local, NaiveDateTime};
use log::{error, info, warn};

/// One page of filtered history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage<'a> {
    pub items: Vec<&'a Invoice>,
    /// Requested 1-indexed page.
    pub page: usize,
    /// Rows matching the filter across all pages.
    pub total_matches: usize,
    pub page_count: usize,
    pub has_next: bool,
}

/// Checkout facade over one history store.
pub struct InvoicingService<S: KeyValueStore> {
    history: InvoiceHistoryStore<S>,
    settings: Settings,
}

impl<S: KeyValueStore> InvoicingService<S> {
    /// Opens history under `settings.history_key`.
    pub fn new(store: S, settings: Settings) -> Self {
        let history = InvoiceHistoryStore::open_with_key(store, settings.history_key.clone());
        info!(
            "event=service_open module=service status=ok history_count={}",
            history.len()
        );
        Self { history, settings }
    }

    pub fn history(&self) -> &InvoiceHistoryStore<S> {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Default invoice number for the next checkout.
    ///
    /// On error the caller should ask the user for a number.
    pub fn suggest_invoice_number(&self) -> Result<String, NumberingError> {
        next_invoice_number_with(self.history.invoices(), self.settings.numbering_strategy)
            .inspect_err(|_| {
                warn!(
                    "event=invoice_number module=service status=error error_code=malformed_predecessor history_count={}",
                    self.history.len()
                );
            })
    }

    /// Finalizes `cart` with the current local time.
    pub fn finalize(
        &mut self,
        cart: &mut Cart,
        invoice_number: impl Into<String>,
        customer: &CustomerDetails,
    ) -> Result<Invoice, HistoryError> {
        self.finalize_at(cart, invoice_number, customer, Local::now().naive_local())
    }

    /// Finalizes `cart` at `finalized_at` and appends the snapshot.
    ///
    /// # Errors
    /// - Returns `HistoryError` when the history write fails. The invoice is
    ///   still present in `history().invoices()` and the cart is left intact;
    ///   use [`Self::retry_persist`] to try the write again.
    pub fn finalize_at(
        &mut self,
        cart: &mut Cart,
        invoice_number: impl Into<String>,
        customer: &CustomerDetails,
        finalized_at: NaiveDateTime,
    ) -> Result<Invoice, HistoryError> {
        let invoice = Invoice::finalize(invoice_number, customer, cart, finalized_at);
        if let Err(err) = self.history.append(invoice.clone()) {
            error!(
                "event=invoice_finalize module=service status=error error_code=history_write_failed line_count={} error={}",
                invoice.lines().len(),
                err
            );
            return Err(err);
        }

        info!(
            "event=invoice_finalize module=service status=ok line_count={} history_count={}",
            invoice.lines().len(),
            self.history.len()
        );
        if self.settings.clear_cart_on_finalize {
            cart.clear();
        }
        Ok(invoice)
    }

    /// Re-attempts writing in-memory history after a failed finalize.
    pub fn retry_persist(&mut self) -> Result<(), HistoryError> {
        self.history.flush()
    }

    /// Filtered history, paged with `settings.page_size`.
    pub fn search_history(&self, filter: &HistoryFilter, page: usize) -> HistoryPage<'_> {
        let matches = self.history.filter(filter);
        let page_size = self.settings.page_size;
        HistoryPage {
            items: paginate(&matches, page, page_size).to_vec(),
            page,
            total_matches: matches.len(),
            page_count: page_count(matches.len(), page_size),
            has_next: has_next_page(page, page_size, matches.len()),
        }
    }

    /// Renders one receipt through `exporter`.
    pub fn export_receipt(
        &self,
        invoice: &Invoice,
        exporter: &dyn DocumentExporter,
    ) -> Result<Vec<u8>, ExportError> {
        exporter.export_invoice(&ReceiptLayout::from_invoice(invoice))
    }

    /// Renders every invoice matching `filter` (all pages) through `exporter`.
    pub fn export_history(
        &self,
        filter: &HistoryFilter,
        exporter: &dyn TabularExporter,
    ) -> Result<Vec<u8>, ExportError> {
        let matches = self.history.filter(filter);
        exporter.export_rows(&HistorySheet::from_invoices(&matches))
    }

    pub fn into_history(self) -> InvoiceHistoryStore<S> {
        self.history
    }
}

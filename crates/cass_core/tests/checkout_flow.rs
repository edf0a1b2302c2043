use cass_core::db::{open_db, open_db_in_memory};
use cass_core::{
    Cart, Catalog, CatalogItem, CustomerDetails, DelimitedSheetExporter, HistoryError,
    HistoryFilter, InvoicingService, KeyValueStore, MemoryKeyValueStore, NumberingError,
    NumberingStrategy, PlainTextReceiptExporter, Settings, SqliteKeyValueStore, StoreError,
    StoreResult, TaxMode,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Memory store that can be switched into a failing state.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_writes: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        CatalogItem::new(1, "Green Tea", Decimal::new(250, 2), "cup").with_description("hot"),
        CatalogItem::new(2, "Jasmine Rice", Decimal::new(1200, 2), "kg"),
    ])
}

fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .unwrap()
}

fn customer(company_reg: &str) -> CustomerDetails {
    CustomerDetails {
        customer_name: "Ann".to_string(),
        customer_phone: "0100".to_string(),
        company_reg: company_reg.to_string(),
    }
}

#[test]
fn checkout_assigns_sequential_numbers() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let mut service = InvoicingService::new(store, Settings::default());
    let catalog = catalog();

    let mut cart = Cart::new();
    cart.add_item(catalog.find_by_name("tea").unwrap());
    cart.add_item(catalog.find_by_name("tea").unwrap());
    cart.add_item(catalog.get(2).unwrap());

    let number = service.suggest_invoice_number().unwrap();
    assert_eq!(number, "INV00001");
    let invoice = service
        .finalize_at(&mut cart, number, &customer("R1"), at(2))
        .unwrap();
    assert_eq!(invoice.total().to_string(), "18.70");
    assert_eq!(invoice.lines().len(), 2);
    assert!(!cart.is_empty());

    assert_eq!(service.suggest_invoice_number().unwrap(), "INV00002");
}

#[test]
fn caller_supplied_number_is_accepted_verbatim() {
    let mut service = InvoicingService::new(MemoryKeyValueStore::new(), Settings::default());
    let mut cart = Cart::new();
    cart.add_item(catalog().get(1).unwrap());

    service
        .finalize_at(&mut cart, "INV00001", &customer("R1"), at(2))
        .unwrap();
    service
        .finalize_at(&mut cart, "INV00001", &customer("R1"), at(3))
        .unwrap();
    assert_eq!(service.history().len(), 2);

    service
        .finalize_at(&mut cart, "walk-in", &customer("R1"), at(4))
        .unwrap();
    let err = service.suggest_invoice_number().unwrap_err();
    assert_eq!(
        err,
        NumberingError::MalformedInvoiceNumber("walk-in".to_string())
    );
}

#[test]
fn highest_existing_strategy_recovers_from_manual_numbers() {
    let settings = Settings {
        numbering_strategy: NumberingStrategy::HighestExisting,
        ..Settings::default()
    };
    let mut service = InvoicingService::new(MemoryKeyValueStore::new(), settings);
    let mut cart = Cart::new();

    service
        .finalize_at(&mut cart, "INV00041", &customer(""), at(2))
        .unwrap();
    service
        .finalize_at(&mut cart, "walk-in", &customer(""), at(3))
        .unwrap();
    assert_eq!(service.suggest_invoice_number().unwrap(), "INV00042");
}

#[test]
fn clear_cart_only_after_durable_write() {
    let settings = Settings {
        clear_cart_on_finalize: true,
        ..Settings::default()
    };
    let store = FlakyStore {
        fail_writes: true,
        ..FlakyStore::default()
    };
    let mut service = InvoicingService::new(store, settings);
    let mut cart = Cart::new();
    cart.add_item(catalog().get(1).unwrap());

    let err = service
        .finalize_at(&mut cart, "INV00001", &customer("R1"), at(2))
        .unwrap_err();
    assert!(matches!(err, HistoryError::Persist(_)));
    assert!(!cart.is_empty());
    assert_eq!(service.history().len(), 1);
    assert!(service.history().load().is_empty());

    let mut history = service.into_history();
    assert!(history.flush().is_err());
}

#[test]
fn retry_persist_writes_pending_history() {
    let mut service = InvoicingService::new(FlakyStore::default(), Settings::default());
    let mut cart = Cart::new();
    cart.add_item(catalog().get(2).unwrap());
    service
        .finalize_at(&mut cart, "INV00001", &customer("R1"), at(2))
        .unwrap();
    assert_eq!(service.history().load().len(), 1);

    let settings = Settings {
        clear_cart_on_finalize: true,
        ..Settings::default()
    };
    let mut service = InvoicingService::new(FlakyStore::default(), settings);
    service
        .finalize_at(&mut cart, "INV00001", &customer("R1"), at(2))
        .unwrap();
    assert!(cart.is_empty());
    service.retry_persist().unwrap();
    assert_eq!(service.history().load().len(), 1);
}

#[test]
fn search_history_pages_filtered_rows() {
    let mut service = InvoicingService::new(MemoryKeyValueStore::new(), Settings::default());
    let mut cart = Cart::new();
    for day in 1..=7 {
        let number = service.suggest_invoice_number().unwrap();
        service
            .finalize_at(&mut cart, number, &customer("ACME"), at(day))
            .unwrap();
    }

    let filter = HistoryFilter {
        date: "2024-01".to_string(),
        company_reg: "ACME".to_string(),
    };
    let first = service.search_history(&filter, 1);
    assert_eq!(first.items.len(), 5);
    assert_eq!(first.total_matches, 7);
    assert_eq!(first.page_count, 2);
    assert!(first.has_next);

    let second = service.search_history(&filter, 2);
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[0].invoice_number(), "INV00006");
    assert!(!second.has_next);

    assert!(service.search_history(&filter, 3).items.is_empty());

    let before_first = service.search_history(&filter, 0);
    assert!(before_first.items.is_empty());
    assert!(!before_first.has_next);
}

#[test]
fn exports_receipt_and_history_sheet() {
    let mut service = InvoicingService::new(MemoryKeyValueStore::new(), Settings::default());
    let mut cart = Cart::with_tax_mode(TaxMode::WithoutTax);
    cart.add_item(catalog().get(2).unwrap());
    let invoice = service
        .finalize_at(&mut cart, "INV00001", &customer("R1"), at(5))
        .unwrap();

    let receipt = service
        .export_receipt(&invoice, &PlainTextReceiptExporter)
        .unwrap();
    let receipt = String::from_utf8(receipt).unwrap();
    assert!(receipt.contains("Invoice #: INV00001"));
    assert!(receipt.contains("Total (-10%): $10.80"));

    let sheet = service
        .export_history(&HistoryFilter::default(), &DelimitedSheetExporter::with_delimiter(','))
        .unwrap();
    let sheet = String::from_utf8(sheet).unwrap();
    assert_eq!(sheet.lines().count(), 2);
    assert!(sheet.contains("INV00001,Ann,0100,R1,2024-01-05 09:00:00,1,10.80"));
}

#[test]
fn reprints_receipt_from_reopened_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cass.db");
    let catalog = catalog();

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut service = InvoicingService::new(store, Settings::default());
        let mut cart = Cart::with_tax_mode(TaxMode::WithoutTax);
        cart.add_item(catalog.get(1).unwrap());
        cart.add_item(catalog.get(1).unwrap());
        cart.add_item(catalog.get(2).unwrap());
        cart.set_quantity(2, 0);
        service
            .finalize_at(&mut cart, "INV00001", &customer("R1"), at(6))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let service = InvoicingService::new(store, Settings::default());
    let stored = &service.history().invoices()[0];
    assert_eq!(stored.tax_mode(), TaxMode::WithoutTax);

    let receipt = service
        .export_receipt(stored, &PlainTextReceiptExporter)
        .unwrap();
    let receipt = String::from_utf8(receipt).unwrap();
    let lines: Vec<&str> = receipt.lines().collect();
    assert_eq!(
        &lines[..5],
        &[
            "Company Reg No: R1",
            "Date: 2024-01-06 09:00:00",
            "Invoice #: INV00001",
            "Customer: Ann",
            "Phone: 0100",
        ]
    );
    assert!(lines.contains(&"Green Tea | hot | 2 | cup | $2.50 | $5.00"));
    assert!(lines.contains(&"Jasmine Rice | - | 0 | kg | $12.00 | $0.00"));
    assert!(lines.contains(&"Subtotal: $5.00"));
    assert!(lines.contains(&"Total (-10%): $4.50"));
}

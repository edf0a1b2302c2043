//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `cass_core` linkage with deterministic output.
//! - Optionally summarize the invoice history stored in a database file.

use cass_core::db::open_db;
use cass_core::{
    default_log_level, init_logging, HistoryFilter, InvoicingService, Settings,
    SqliteKeyValueStore,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Prints core linkage info and, given a database, its invoice history summary.
#[derive(Debug, Parser)]
#[command(name = "cass_cli", version, about)]
struct Args {
    /// SQLite database holding the invoice history.
    db_path: Option<PathBuf>,

    /// Directory for rotated log files; logging stays off when omitted.
    #[arg(long, env = "CASS_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("cass_core ping={}", cass_core::ping());
    println!("cass_core version={}", cass_core::core_version());

    if let Some(log_dir) = args.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(db_path) = args.db_path else {
        return ExitCode::SUCCESS;
    };

    match summarize(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_summary module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let service = InvoicingService::new(store, Settings::default());

    let page = service.search_history(&HistoryFilter::default(), 1);
    println!("history count={}", page.total_matches);
    println!("history pages={}", page.page_count);
    match service.suggest_invoice_number() {
        Ok(number) => println!("next invoice={number}"),
        Err(err) => println!("next invoice=<manual> reason={err}"),
    }
    Ok(())
}

//! Opening SQLite handles for the key-value store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Create the `kv_entries` table on first use and stamp its version.
//!
//! # Invariants
//! - Every open attempt emits exactly one terminal `db_open` event.
//! - A file stamped with a version above `KV_SCHEMA_VERSION` is never touched.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Layout version written to `PRAGMA user_version` once `kv_entries` exists.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_SCHEMA_SQL: &str = include_str!("kv_schema.sql");

/// Opens (creating if missing) the SQLite file holding persisted history.
///
/// Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory store with the same layout as `open_db`.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with<F>(mode: &'static str, connect: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect().map_err(DbError::from).and_then(|mut conn| {
        // Single writer; a second handle on the same file waits instead of failing.
        conn.busy_timeout(Duration::from_secs(5))?;
        ensure_kv_schema(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            mode,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={} error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn ensure_kv_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > KV_SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: KV_SCHEMA_VERSION,
        });
    }
    if found == KV_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)?;
    tx.commit()?;

    info!("event=kv_schema_create module=db status=ok version={KV_SCHEMA_VERSION}");
    Ok(())
}

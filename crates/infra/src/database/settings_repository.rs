//! SQLite-backed implementation of the `CounterStore` port.
//!
//! The settings singleton row carries the three document-number counters.
//! Increments go through one `UPDATE ... RETURNING` statement so concurrent
//! callers can never observe or persist the same value, with or without a
//! surrounding transaction.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::format_document_number;
use atelier_core::sequence::ports::CounterStore;
use atelier_domain::{
    AppSettings, CounterKind, DocumentNumber, Result as DomainResult, SequenceSlot,
};
use rusqlite::Connection;
use tokio::task;

use super::helpers::{map_join_error, map_sql_error};
use super::manager::DbManager;

/// SQLite-backed counter store over the settings singleton.
pub struct SqliteCounterStore {
    db: Arc<DbManager>,
}

impl SqliteCounterStore {
    /// Create a new store backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Read the full settings row (prefixes and next counter values).
    pub async fn settings(&self) -> DomainResult<AppSettings> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<AppSettings> {
            let conn = db.get_connection()?;
            conn.query_row(SETTINGS_SELECT, [], |row| {
                Ok(AppSettings {
                    order_prefix: row.get(0)?,
                    next_order_number: row.get(1)?,
                    invoice_prefix: row.get(2)?,
                    next_invoice_number: row.get(3)?,
                    proposal_prefix: row.get(4)?,
                    next_proposal_number: row.get(5)?,
                })
            })
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl CounterStore for SqliteCounterStore {
    async fn increment_and_fetch(&self, kind: CounterKind) -> DomainResult<SequenceSlot> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<SequenceSlot> {
            let conn = db.get_connection()?;
            increment_counter(&conn, kind)
        })
        .await
        .map_err(map_join_error)?
    }
}

const SETTINGS_SELECT: &str = "SELECT
        order_prefix, next_order_number,
        invoice_prefix, next_invoice_number,
        proposal_prefix, next_proposal_number
    FROM app_settings
    WHERE id = 1";

fn counter_columns(kind: CounterKind) -> (&'static str, &'static str) {
    match kind {
        CounterKind::Order => ("next_order_number", "order_prefix"),
        CounterKind::Invoice => ("next_invoice_number", "invoice_prefix"),
        CounterKind::Proposal => ("next_proposal_number", "proposal_prefix"),
    }
}

/// Atomically bump the counter for `kind` and return the post-increment
/// value with its prefix. Single statement; never read-then-write.
pub(crate) fn increment_counter(conn: &Connection, kind: CounterKind) -> DomainResult<SequenceSlot> {
    let (value_col, prefix_col) = counter_columns(kind);
    let sql = format!(
        "UPDATE app_settings SET {value_col} = {value_col} + 1 WHERE id = 1
         RETURNING {value_col}, {prefix_col}"
    );
    conn.query_row(&sql, [], |row| {
        Ok(SequenceSlot { value: row.get(0)?, prefix: row.get(1)? })
    })
    .map_err(map_sql_error)
}

/// Bump the counter for `kind` and format the resulting document number.
///
/// Used from inside the proposal-acceptance transaction, where the number
/// must be allocated on the same connection as the surrounding writes.
pub(crate) fn allocate_number(
    conn: &Connection,
    kind: CounterKind,
    year: i32,
) -> DomainResult<DocumentNumber> {
    let slot = increment_counter(conn, kind)?;
    let formatted = format_document_number(&slot.prefix, year, slot.value);
    Ok(DocumentNumber { prefix: slot.prefix, value: slot.value, formatted })
}

//! SQLite-backed implementation of the `ProposalRepository` port.
//!
//! The ACCEPTED branch is the engine's widest transaction: proposal status,
//! order creation (with its counter increment), proposal-to-order linkage,
//! invoice creation (with its counter increment) and the invoice's items all
//! commit as one unit. A failure anywhere rolls everything back; an order
//! without its invoice never becomes visible.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::proposals::ports::{AcceptanceOutcome, ProposalRepository};
use atelier_core::proposals::{derive_invoice, derive_order};
use atelier_domain::{
    AtelierError, CounterKind, Invoice, Order, Proposal, ProposalItem, ProposalStatus,
    Result as DomainResult,
};
use chrono::{DateTime, Datelike, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tokio::task;

use super::helpers::{datetime_from, map_join_error, map_sql_error, opt_datetime_from, parse_enum};
use super::manager::DbManager;
use super::settings_repository::allocate_number;

/// SQLite-backed proposal repository.
pub struct SqliteProposalRepository {
    db: Arc<DbManager>,
}

impl SqliteProposalRepository {
    /// Create a new repository backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProposalRepository for SqliteProposalRepository {
    async fn accept(
        &self,
        proposal_id: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<AcceptanceOutcome> {
        let db = Arc::clone(&self.db);
        let proposal_id = proposal_id.to_owned();
        let client_id = client_id.to_owned();

        task::spawn_blocking(move || -> DomainResult<AcceptanceOutcome> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let mut proposal = load_eligible(&tx, &proposal_id, &client_id)?;
            settle(&tx, &proposal_id, ProposalStatus::Accepted, now)?;

            let year = now.year();
            let order_number = allocate_number(&tx, CounterKind::Order, year)?;
            let initial_status = initial_order_status(&tx)?;
            let order = derive_order(&proposal, &order_number, &initial_status, now);
            insert_order(&tx, &order)?;

            tx.execute(
                "UPDATE proposals SET order_id = ?1 WHERE id = ?2",
                params![order.id, proposal_id],
            )
            .map_err(map_sql_error)?;

            let invoice_number = allocate_number(&tx, CounterKind::Invoice, year)?;
            let invoice = derive_invoice(&proposal, &order.id, &invoice_number, now);
            insert_invoice(&tx, &invoice)?;

            tx.commit().map_err(map_sql_error)?;

            proposal.status = ProposalStatus::Accepted;
            proposal.responded_at = Some(now);
            proposal.order_id = Some(order.id.clone());
            proposal.updated_at = now;
            Ok(AcceptanceOutcome { proposal, order, invoice })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn reject(
        &self,
        proposal_id: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Proposal> {
        let db = Arc::clone(&self.db);
        let proposal_id = proposal_id.to_owned();
        let client_id = client_id.to_owned();

        task::spawn_blocking(move || -> DomainResult<Proposal> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let mut proposal = load_eligible(&tx, &proposal_id, &client_id)?;
            settle(&tx, &proposal_id, ProposalStatus::Rejected, now)?;

            tx.commit().map_err(map_sql_error)?;

            proposal.status = ProposalStatus::Rejected;
            proposal.responded_at = Some(now);
            proposal.updated_at = now;
            Ok(proposal)
        })
        .await
        .map_err(map_join_error)?
    }
}

const PROPOSAL_SELECT: &str = "SELECT
        id, client_id, order_id, number, title, status,
        total_amount, currency, responded_at, created_at, updated_at
    FROM proposals
    WHERE id = ?1 AND client_id = ?2";

const PROPOSAL_ITEMS_SELECT: &str = "SELECT
        id, proposal_id, description, quantity, unit_price, total, position
    FROM proposal_items
    WHERE proposal_id = ?1
    ORDER BY position ASC";

/// Load the proposal if it exists, belongs to the client and is awaiting a
/// response. All three violations collapse into `NotFound` so a caller
/// cannot probe for proposals that are not theirs.
fn load_eligible(
    conn: &Connection,
    proposal_id: &str,
    client_id: &str,
) -> DomainResult<Proposal> {
    find_proposal_for_client(conn, proposal_id, client_id)?
        .filter(|proposal| proposal.status.is_awaiting_response())
        .ok_or_else(|| AtelierError::NotFound(format!("proposal {proposal_id} not found")))
}

fn settle(
    conn: &Connection,
    proposal_id: &str,
    status: ProposalStatus,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    conn.execute(
        "UPDATE proposals SET status = ?1, responded_at = ?2, updated_at = ?3 WHERE id = ?4",
        params![status.to_string(), now.timestamp(), now.timestamp(), proposal_id],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

fn find_proposal_for_client(
    conn: &Connection,
    proposal_id: &str,
    client_id: &str,
) -> DomainResult<Option<Proposal>> {
    let proposal = conn
        .query_row(PROPOSAL_SELECT, params![proposal_id, client_id], map_proposal_row)
        .optional()
        .map_err(map_sql_error)?;

    let Some(mut proposal) = proposal else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(PROPOSAL_ITEMS_SELECT).map_err(map_sql_error)?;
    let items = stmt
        .query_map(params![proposal.id], map_proposal_item_row)
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<ProposalItem>>>()
        .map_err(map_sql_error)?;
    proposal.items = items;

    Ok(Some(proposal))
}

/// The catalog's designated initial status, falling back to the first entry
/// by position when none is flagged.
fn initial_order_status(conn: &Connection) -> DomainResult<String> {
    conn.query_row(
        "SELECT id FROM order_statuses ORDER BY is_initial DESC, position ASC LIMIT 1",
        [],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(map_sql_error)?
    .ok_or_else(|| AtelierError::InvalidState("order status catalog is empty".into()))
}

fn insert_order(conn: &Connection, order: &Order) -> DomainResult<()> {
    conn.execute(
        "INSERT INTO orders (
            id, number, title, priority, progress_percent, status_id,
            client_id, manager_id, currency, estimated_budget, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            order.id,
            order.number,
            order.title,
            order.priority.to_string(),
            order.progress_percent,
            order.status_id,
            order.client_id,
            order.manager_id,
            order.currency,
            order.estimated_budget,
            order.created_at.timestamp(),
            order.updated_at.timestamp(),
        ],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

fn insert_invoice(conn: &Connection, invoice: &Invoice) -> DomainResult<()> {
    conn.execute(
        "INSERT INTO invoices (
            id, client_id, order_id, number, status, subtotal,
            tax_amount, discount_amount, total, currency, issued_at, due_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            invoice.id,
            invoice.client_id,
            invoice.order_id,
            invoice.number,
            invoice.status.to_string(),
            invoice.subtotal,
            invoice.tax_amount,
            invoice.discount_amount,
            invoice.total,
            invoice.currency,
            invoice.issued_at.timestamp(),
            invoice.due_date.timestamp(),
        ],
    )
    .map_err(map_sql_error)?;

    for item in &invoice.items {
        conn.execute(
            "INSERT INTO invoice_items (
                id, invoice_id, description, quantity, unit_price, total, position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                item.id,
                item.invoice_id,
                item.description,
                item.quantity,
                item.unit_price,
                item.total,
                item.position,
            ],
        )
        .map_err(map_sql_error)?;
    }
    Ok(())
}

fn map_proposal_row(row: &Row<'_>) -> rusqlite::Result<Proposal> {
    Ok(Proposal {
        id: row.get(0)?,
        client_id: row.get(1)?,
        order_id: row.get(2)?,
        number: row.get(3)?,
        title: row.get(4)?,
        status: parse_enum(row.get(5)?, 5)?,
        total_amount: row.get(6)?,
        currency: row.get(7)?,
        responded_at: opt_datetime_from(row.get(8)?, 8)?,
        items: Vec::new(),
        created_at: datetime_from(row.get(9)?, 9)?,
        updated_at: datetime_from(row.get(10)?, 10)?,
    })
}

fn map_proposal_item_row(row: &Row<'_>) -> rusqlite::Result<ProposalItem> {
    Ok(ProposalItem {
        id: row.get(0)?,
        proposal_id: row.get(1)?,
        description: row.get(2)?,
        quantity: row.get(3)?,
        unit_price: row.get(4)?,
        total: row.get(5)?,
        position: row.get(6)?,
    })
}

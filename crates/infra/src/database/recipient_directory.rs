//! SQLite-backed implementation of the `RecipientDirectory` port.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::RecipientDirectory;
use atelier_domain::Result as DomainResult;
use rusqlite::{params, Connection};
use tokio::task;

use super::helpers::{map_join_error, map_sql_error};
use super::manager::DbManager;

/// Users watching an order: every admin, the order's manager and the
/// assignees of its tasks. `UNION` deduplicates across the three sources.
const ORDER_RECIPIENTS_SQL: &str = "SELECT id FROM users WHERE role = 'admin'
    UNION
    SELECT manager_id FROM orders WHERE id = ?1 AND manager_id IS NOT NULL
    UNION
    SELECT assignee_id FROM tasks WHERE order_id = ?1 AND assignee_id IS NOT NULL";

const STAFF_RECIPIENTS_SQL: &str =
    "SELECT id FROM users WHERE role IN ('admin', 'manager') ORDER BY id";

const CLIENT_RECIPIENTS_SQL: &str = "SELECT u.id FROM users u
    JOIN orders o ON o.client_id = u.client_id
    WHERE o.id = ?1 AND u.role = 'client'
    ORDER BY u.id";

/// Resolves recipient sets from the users, orders and tasks tables.
pub struct SqliteRecipientDirectory {
    db: Arc<DbManager>,
}

impl SqliteRecipientDirectory {
    /// Create a new directory backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn query_ids(
        &self,
        sql: &'static str,
        order_id: Option<String>,
    ) -> DomainResult<Vec<String>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<String>> {
            let conn = db.get_connection()?;
            match order_id {
                Some(order_id) => collect_ids(&conn, sql, params![order_id]),
                None => collect_ids(&conn, sql, []),
            }
        })
        .await
        .map_err(map_join_error)?
    }
}

fn collect_ids(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> DomainResult<Vec<String>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let ids = stmt
        .query_map(params, |row| row.get::<_, String>(0))
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<String>>>()
        .map_err(map_sql_error)?;
    Ok(ids)
}

#[async_trait]
impl RecipientDirectory for SqliteRecipientDirectory {
    async fn order_recipients(&self, order_id: &str) -> DomainResult<Vec<String>> {
        self.query_ids(ORDER_RECIPIENTS_SQL, Some(order_id.to_owned())).await
    }

    async fn staff_recipients(&self) -> DomainResult<Vec<String>> {
        self.query_ids(STAFF_RECIPIENTS_SQL, None).await
    }

    async fn client_recipients(&self, order_id: &str) -> DomainResult<Vec<String>> {
        self.query_ids(CLIENT_RECIPIENTS_SQL, Some(order_id.to_owned())).await
    }
}

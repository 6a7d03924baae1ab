//! Transactional notification outbox.
//!
//! Events land in `notification_outbox` with a NULL `dispatched_at`; a
//! delivery worker drains them with [`OutboxNotificationEmitter::pending`]
//! and marks each row once it has been handed off. The engine only ever
//! appends here.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::NotificationEmitter;
use atelier_domain::{NotificationEvent, Result as DomainResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tokio::task;
use uuid::Uuid;

use crate::database::helpers::{
    datetime_from, map_join_error, map_sql_error, opt_datetime_from, parse_enum,
};
use crate::database::DbManager;

/// An outbox row awaiting dispatch.
#[derive(Debug, Clone)]
pub struct PendingNotification {
    pub id: String,
    pub event: NotificationEvent,
    pub created_at: DateTime<Utc>,
    pub dispatched_at: Option<DateTime<Utc>>,
}

/// Persists notification events into the outbox table.
pub struct OutboxNotificationEmitter {
    db: Arc<DbManager>,
}

impl OutboxNotificationEmitter {
    /// Create a new emitter backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Fetch up to `limit` undispatched events, oldest first.
    pub async fn pending(&self, limit: i64) -> DomainResult<Vec<PendingNotification>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<PendingNotification>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, event_type, title, description, link_url,
                            entity_kind, entity_id, recipients_json,
                            created_at, dispatched_at
                     FROM notification_outbox
                     WHERE dispatched_at IS NULL
                     ORDER BY created_at ASC
                     LIMIT ?1",
                )
                .map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![limit], map_pending_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<PendingNotification>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    /// Mark an outbox row as handed off to delivery.
    pub async fn mark_dispatched(&self, id: &str, now: DateTime<Utc>) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_owned();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "UPDATE notification_outbox SET dispatched_at = ?1 WHERE id = ?2",
                params![now.timestamp(), id],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl NotificationEmitter for OutboxNotificationEmitter {
    async fn emit(&self, event: NotificationEvent) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let recipients_json =
                serde_json::to_string(&event.recipient_user_ids).map_err(crate::errors::InfraError::from)?;
            conn.execute(
                "INSERT INTO notification_outbox (
                    id, event_type, title, description, link_url,
                    entity_kind, entity_id, recipients_json, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    Uuid::new_v4().to_string(),
                    event.event_type.to_string(),
                    event.title,
                    event.description,
                    event.link_url,
                    event.entity_kind.to_string(),
                    event.entity_id,
                    recipients_json,
                    Utc::now().timestamp(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_pending_row(row: &Row<'_>) -> rusqlite::Result<PendingNotification> {
    let recipients_json: String = row.get(7)?;
    let recipient_user_ids: Vec<String> =
        serde_json::from_str(&recipients_json).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })?;

    Ok(PendingNotification {
        id: row.get(0)?,
        event: NotificationEvent {
            event_type: parse_enum(row.get(1)?, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            link_url: row.get(4)?,
            entity_kind: parse_enum(row.get(5)?, 5)?,
            entity_id: row.get(6)?,
            recipient_user_ids,
        },
        created_at: datetime_from(row.get(8)?, 8)?,
        dispatched_at: opt_datetime_from(row.get(9)?, 9)?,
    })
}

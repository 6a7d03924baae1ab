//! SQLite-backed implementation of the `FulfillmentRepository` port.
//!
//! Each port method runs as one immediate transaction: the task write, the
//! milestone recompute and the order rollup commit together or not at all.
//! All cascade decisions come from `atelier_core::cascade`, applied to state
//! read inside the same transaction.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::cascade::{self, MilestoneTransition};
use atelier_core::fulfillment::ports::{
    FulfillmentRepository, MilestoneCascadeOutcome, OrderStatusChange, TaskTransitionOutcome,
};
use atelier_domain::{
    AtelierError, Milestone, Order, OrderStatusHistoryEntry, Result as DomainResult, Task,
    TaskStatus,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tokio::task;
use uuid::Uuid;

use super::helpers::{
    datetime_from, map_join_error, map_sql_error, opt_datetime_from, opt_ts, parse_enum,
};
use super::manager::DbManager;

/// SQLite-backed fulfillment repository.
pub struct SqliteFulfillmentRepository {
    db: Arc<DbManager>,
}

impl SqliteFulfillmentRepository {
    /// Create a new repository backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FulfillmentRepository for SqliteFulfillmentRepository {
    async fn set_task_status(
        &self,
        task_id: &str,
        new_status: TaskStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<TaskTransitionOutcome> {
        let db = Arc::clone(&self.db);
        let task_id = task_id.to_owned();

        task::spawn_blocking(move || -> DomainResult<TaskTransitionOutcome> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let mut task = find_task(&tx, &task_id)?
                .ok_or_else(|| AtelierError::NotFound(format!("task {task_id} not found")))?;

            let completed_at = cascade::completion_timestamp(new_status, now);
            tx.execute(
                "UPDATE tasks SET status = ?1, completed_at = ?2, updated_at = ?3 WHERE id = ?4",
                params![new_status.to_string(), opt_ts(completed_at), now.timestamp(), task.id],
            )
            .map_err(map_sql_error)?;
            task.status = new_status;
            task.completed_at = completed_at;
            task.updated_at = now;

            let milestone = match task.milestone_id.as_deref() {
                Some(milestone_id) => Some(recompute_milestone_tx(&tx, milestone_id, now)?),
                None => None,
            };
            let order_progress = recompute_order_tx(&tx, &task.order_id, now)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(TaskTransitionOutcome { task, milestone, order_progress })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn recompute_milestone(
        &self,
        milestone_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<MilestoneCascadeOutcome> {
        let db = Arc::clone(&self.db);
        let milestone_id = milestone_id.to_owned();

        task::spawn_blocking(move || -> DomainResult<MilestoneCascadeOutcome> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let outcome = recompute_milestone_tx(&tx, &milestone_id, now)?;
            recompute_order_tx(&tx, &outcome.milestone.order_id, now)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(outcome)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn recompute_order(&self, order_id: &str) -> DomainResult<Option<i64>> {
        let db = Arc::clone(&self.db);
        let order_id = order_id.to_owned();
        let now = Utc::now();

        task::spawn_blocking(move || -> DomainResult<Option<i64>> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let progress = recompute_order_tx(&tx, &order_id, now)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(progress)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn change_order_status(
        &self,
        change: OrderStatusChange,
        now: DateTime<Utc>,
    ) -> DomainResult<OrderStatusHistoryEntry> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<OrderStatusHistoryEntry> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let updated = tx
                .execute(
                    "UPDATE orders SET status_id = ?1, updated_at = ?2 WHERE id = ?3",
                    params![change.status_id, now.timestamp(), change.order_id],
                )
                .map_err(map_sql_error)?;
            if updated == 0 {
                return Err(AtelierError::NotFound(format!(
                    "order {} not found",
                    change.order_id
                )));
            }

            let entry = OrderStatusHistoryEntry {
                id: Uuid::new_v4().to_string(),
                order_id: change.order_id,
                status_id: change.status_id,
                changed_by: change.changed_by,
                note: change.note,
                changed_at: now,
            };
            tx.execute(
                "INSERT INTO order_status_history (id, order_id, status_id, changed_by, note, changed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.id,
                    entry.order_id,
                    entry.status_id,
                    entry.changed_by,
                    entry.note,
                    entry.changed_at.timestamp(),
                ],
            )
            .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(entry)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_order(&self, order_id: &str) -> DomainResult<Option<Order>> {
        let db = Arc::clone(&self.db);
        let order_id = order_id.to_owned();

        task::spawn_blocking(move || -> DomainResult<Option<Order>> {
            let conn = db.get_connection()?;
            find_order(&conn, &order_id)
        })
        .await
        .map_err(map_join_error)?
    }
}

const TASK_SELECT: &str = "SELECT
        id, order_id, milestone_id, title, status, priority,
        assignee_id, completed_at, created_at, updated_at
    FROM tasks
    WHERE id = ?1";

const MILESTONE_SELECT: &str = "SELECT
        id, order_id, name, status, progress_percent, requires_approval,
        position, completed_at, client_approved_at, created_at, updated_at
    FROM milestones
    WHERE id = ?1";

const ORDER_SELECT: &str = "SELECT
        id, number, title, priority, progress_percent, status_id,
        client_id, manager_id, currency, estimated_budget, created_at, updated_at
    FROM orders
    WHERE id = ?1";

const MILESTONE_TASK_COUNTS: &str = "SELECT
        COUNT(*),
        COALESCE(SUM(CASE WHEN status = 'done' THEN 1 ELSE 0 END), 0)
    FROM tasks
    WHERE milestone_id = ?1";

const ORDER_MILESTONE_COUNTS: &str = "SELECT
        COUNT(*),
        COALESCE(SUM(CASE WHEN status IN ('completed', 'approved') THEN 1 ELSE 0 END), 0)
    FROM milestones
    WHERE order_id = ?1";

fn find_task(conn: &Connection, task_id: &str) -> DomainResult<Option<Task>> {
    conn.query_row(TASK_SELECT, params![task_id], map_task_row)
        .optional()
        .map_err(map_sql_error)
}

fn find_milestone(conn: &Connection, milestone_id: &str) -> DomainResult<Option<Milestone>> {
    conn.query_row(MILESTONE_SELECT, params![milestone_id], map_milestone_row)
        .optional()
        .map_err(map_sql_error)
}

pub(crate) fn find_order(conn: &Connection, order_id: &str) -> DomainResult<Option<Order>> {
    conn.query_row(ORDER_SELECT, params![order_id], map_order_row)
        .optional()
        .map_err(map_sql_error)
}

/// Recompute a milestone's progress from its current task set and apply the
/// forward/reverse transition. Must run inside the caller's transaction.
fn recompute_milestone_tx(
    conn: &Connection,
    milestone_id: &str,
    now: DateTime<Utc>,
) -> DomainResult<MilestoneCascadeOutcome> {
    let mut milestone = find_milestone(conn, milestone_id)?
        .ok_or_else(|| AtelierError::NotFound(format!("milestone {milestone_id} not found")))?;

    let (total, done): (usize, usize) = conn
        .query_row(MILESTONE_TASK_COUNTS, params![milestone_id], |row| {
            Ok((row.get::<_, i64>(0)? as usize, row.get::<_, i64>(1)? as usize))
        })
        .map_err(map_sql_error)?;

    let percent = cascade::milestone_progress(done, total);
    let transition = cascade::plan_milestone_transition(milestone.status, percent);

    match transition {
        MilestoneTransition::Completed => {
            conn.execute(
                "UPDATE milestones SET progress_percent = ?1, status = 'completed',
                     completed_at = ?2, updated_at = ?3 WHERE id = ?4",
                params![percent, now.timestamp(), now.timestamp(), milestone_id],
            )
            .map_err(map_sql_error)?;
            milestone.status = atelier_domain::MilestoneStatus::Completed;
            milestone.completed_at = Some(now);
        }
        MilestoneTransition::Reopened => {
            conn.execute(
                "UPDATE milestones SET progress_percent = ?1, status = 'in_progress',
                     completed_at = NULL, updated_at = ?2 WHERE id = ?3",
                params![percent, now.timestamp(), milestone_id],
            )
            .map_err(map_sql_error)?;
            milestone.status = atelier_domain::MilestoneStatus::InProgress;
            milestone.completed_at = None;
        }
        MilestoneTransition::None => {
            conn.execute(
                "UPDATE milestones SET progress_percent = ?1, updated_at = ?2 WHERE id = ?3",
                params![percent, now.timestamp(), milestone_id],
            )
            .map_err(map_sql_error)?;
        }
    }
    milestone.progress_percent = percent;
    milestone.updated_at = now;

    Ok(MilestoneCascadeOutcome { milestone, transition })
}

/// Roll milestone states up into the order's progress percentage. Orders
/// without milestones are left untouched. Must run inside the caller's
/// transaction.
fn recompute_order_tx(
    conn: &Connection,
    order_id: &str,
    now: DateTime<Utc>,
) -> DomainResult<Option<i64>> {
    let (total, finished): (usize, usize) = conn
        .query_row(ORDER_MILESTONE_COUNTS, params![order_id], |row| {
            Ok((row.get::<_, i64>(0)? as usize, row.get::<_, i64>(1)? as usize))
        })
        .map_err(map_sql_error)?;

    let Some(percent) = cascade::order_progress(finished, total) else {
        return Ok(None);
    };

    conn.execute(
        "UPDATE orders SET progress_percent = ?1, updated_at = ?2 WHERE id = ?3",
        params![percent, now.timestamp(), order_id],
    )
    .map_err(map_sql_error)?;
    Ok(Some(percent))
}

fn map_task_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        order_id: row.get(1)?,
        milestone_id: row.get(2)?,
        title: row.get(3)?,
        status: parse_enum(row.get(4)?, 4)?,
        priority: parse_enum(row.get(5)?, 5)?,
        assignee_id: row.get(6)?,
        completed_at: opt_datetime_from(row.get(7)?, 7)?,
        created_at: datetime_from(row.get(8)?, 8)?,
        updated_at: datetime_from(row.get(9)?, 9)?,
    })
}

fn map_milestone_row(row: &Row<'_>) -> rusqlite::Result<Milestone> {
    Ok(Milestone {
        id: row.get(0)?,
        order_id: row.get(1)?,
        name: row.get(2)?,
        status: parse_enum(row.get(3)?, 3)?,
        progress_percent: row.get(4)?,
        requires_approval: row.get::<_, i64>(5)? != 0,
        position: row.get(6)?,
        completed_at: opt_datetime_from(row.get(7)?, 7)?,
        client_approved_at: opt_datetime_from(row.get(8)?, 8)?,
        created_at: datetime_from(row.get(9)?, 9)?,
        updated_at: datetime_from(row.get(10)?, 10)?,
    })
}

pub(crate) fn map_order_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        number: row.get(1)?,
        title: row.get(2)?,
        priority: parse_enum(row.get(3)?, 3)?,
        progress_percent: row.get(4)?,
        status_id: row.get(5)?,
        client_id: row.get(6)?,
        manager_id: row.get(7)?,
        currency: row.get(8)?,
        estimated_budget: row.get(9)?,
        created_at: datetime_from(row.get(10)?, 10)?,
        updated_at: datetime_from(row.get(11)?, 11)?,
    })
}

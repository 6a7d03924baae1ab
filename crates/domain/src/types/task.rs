//! Task model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{Priority, TaskStatus};

/// Atomic unit of work.
///
/// Belongs to exactly one order and optionally one milestone; a task with no
/// milestone is "standalone" and does not feed any rollup.
///
/// Invariant: `completed_at` is non-null iff `status == Done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub order_id: String,
    pub milestone_id: Option<String>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

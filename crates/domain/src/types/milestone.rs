//! Milestone model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::MilestoneStatus;

/// A phase of an order's work.
///
/// Invariants maintained by the cascade engine:
/// - `progress_percent == round(100 * done_tasks / total_tasks)` (0 when the
///   milestone has no tasks)
/// - status is `Completed`/`Approved` only while every task is done
/// - `completed_at` is set exactly while the milestone is `Completed` by the
///   forward cascade; `Approved` is a higher-authority state that the
///   cascade never reverts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub order_id: String,
    pub name: String,
    pub status: MilestoneStatus,
    /// Derived 0-100 completion, from the task set.
    pub progress_percent: i64,
    /// Whether completion should be put in front of the client for review.
    pub requires_approval: bool,
    /// Ordering within the parent order.
    pub position: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub client_approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

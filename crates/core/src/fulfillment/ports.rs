//! Port interfaces for the fulfillment cascade
//!
//! These traits define the boundary between the cascade business logic and
//! the transactional persistence layer. One port call is one database
//! transaction: the multi-step write sequences described by the cascade
//! rules must never be observable half-applied.

use async_trait::async_trait;
use atelier_domain::{
    Milestone, Order, OrderStatusHistoryEntry, Result, Task, TaskStatus,
};
use chrono::{DateTime, Utc};

use super::cascade::MilestoneTransition;

/// Result of a milestone recompute, including the applied transition.
#[derive(Debug, Clone)]
pub struct MilestoneCascadeOutcome {
    /// The milestone's post-recompute state.
    pub milestone: Milestone,
    /// The status movement the cascade applied (if any).
    pub transition: MilestoneTransition,
}

/// Result of a task status change, including the cascade it triggered.
#[derive(Debug, Clone)]
pub struct TaskTransitionOutcome {
    /// The task's post-update state.
    pub task: Task,
    /// Milestone cascade result; `None` for standalone tasks.
    pub milestone: Option<MilestoneCascadeOutcome>,
    /// Order progress after the rollup; `None` when the order has no
    /// milestones and was left untouched.
    pub order_progress: Option<i64>,
}

/// An explicit, user-driven order status change.
#[derive(Debug, Clone)]
pub struct OrderStatusChange {
    pub order_id: String,
    /// Target entry in the order-status catalog.
    pub status_id: String,
    pub changed_by: String,
    pub note: Option<String>,
}

/// Trait for the transactional store behind the fulfillment cascade.
///
/// Every method runs as a single database transaction; on error nothing is
/// committed. Decision logic (progress math, transition planning) comes from
/// [`super::cascade`] and implementations must call it against state read
/// inside the same transaction.
#[async_trait]
pub trait FulfillmentRepository: Send + Sync {
    /// Apply a task status change with its full cascade: task update
    /// (status + `completed_at` rule), milestone recompute and order rollup
    /// as one atomic unit.
    async fn set_task_status(
        &self,
        task_id: &str,
        new_status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<TaskTransitionOutcome>;

    /// Recompute a milestone's progress from its current task set and apply
    /// forward/reverse transitions. Idempotent: a second call with no task
    /// changes reports `MilestoneTransition::None`.
    async fn recompute_milestone(
        &self,
        milestone_id: &str,
        now: DateTime<Utc>,
    ) -> Result<MilestoneCascadeOutcome>;

    /// Recompute an order's progress from its milestones. Returns the
    /// persisted percentage, or `None` when the order has no milestones.
    async fn recompute_order(&self, order_id: &str) -> Result<Option<i64>>;

    /// Apply an explicit order status change and append the history entry in
    /// the same transaction.
    async fn change_order_status(
        &self,
        change: OrderStatusChange,
        now: DateTime<Utc>,
    ) -> Result<OrderStatusHistoryEntry>;

    /// Fetch an order (used to build notification payloads).
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>>;
}

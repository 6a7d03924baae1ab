//! Pure cascade decision functions
//!
//! Everything here is deterministic math over already-loaded state. The
//! transactional repository calls these from inside its write transaction,
//! and the unit tests exercise them directly.

use atelier_domain::{MilestoneStatus, TaskStatus};
use chrono::{DateTime, Utc};

/// What the cascade decided to do with a milestone after a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneTransition {
    /// Percent unchanged in a way that needs no status movement.
    None,
    /// Forward cascade: all tasks done, milestone moved to `Completed`.
    Completed,
    /// Reverse cascade: a task was un-done, milestone moved back to
    /// `InProgress`.
    Reopened,
}

/// Milestone completion percentage over its current task set.
///
/// `round(100 * done / total)`, 0 for an empty milestone.
pub fn milestone_progress(done_count: usize, total_count: usize) -> i64 {
    percent_of(done_count, total_count)
}

/// Order completion percentage over its milestones.
///
/// `None` when the order has no milestones: standalone-task orders are left
/// untouched by the rollup.
pub fn order_progress(completed_or_approved: usize, milestone_count: usize) -> Option<i64> {
    if milestone_count == 0 {
        return None;
    }
    Some(percent_of(completed_or_approved, milestone_count))
}

/// Decide the milestone status movement for a freshly computed percentage.
///
/// Forward: 100% while `InProgress` completes the milestone. Reverse: less
/// than 100% while `Completed` reopens it. An `Approved` milestone never
/// auto-reverts; only an explicit client/team action can undo approval.
pub fn plan_milestone_transition(current: MilestoneStatus, percent: i64) -> MilestoneTransition {
    match current {
        MilestoneStatus::InProgress if percent == 100 => MilestoneTransition::Completed,
        MilestoneStatus::Completed if percent < 100 => MilestoneTransition::Reopened,
        _ => MilestoneTransition::None,
    }
}

/// The `completed_at` value a task must carry for a given status.
///
/// Set exactly when the status becomes `Done`, cleared for everything else.
pub fn completion_timestamp(status: TaskStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    status.is_done().then_some(now)
}

fn percent_of(part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = 100.0 * part as f64 / whole as f64;
    #[allow(clippy::cast_possible_truncation)]
    {
        ratio.round() as i64
    }
}

//! Status and priority enums
//!
//! All of these are persisted as TEXT columns; string forms are provided via
//! [`impl_status_conversions`](crate::impl_status_conversions) and must stay
//! stable across releases.

use serde::{Deserialize, Serialize};

use crate::impl_status_conversions;

/// Task workflow status.
///
/// Any status is freely settable: the engine does not enforce a transition
/// table (e.g. `Todo` straight to `Done` is allowed). `Cancelled` exists as
/// a UI affordance and behaves like any other non-done status here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Cancelled,
}

impl_status_conversions!(TaskStatus {
    Todo => "todo",
    InProgress => "in_progress",
    Review => "review",
    Done => "done",
    Cancelled => "cancelled",
});

impl TaskStatus {
    /// Whether this status counts toward milestone completion.
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Milestone lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Completed,
    Approved,
    Cancelled,
}

impl_status_conversions!(MilestoneStatus {
    Pending => "pending",
    InProgress => "in_progress",
    Completed => "completed",
    Approved => "approved",
    Cancelled => "cancelled",
});

impl MilestoneStatus {
    /// Whether this milestone counts as finished for the order rollup.
    pub fn counts_as_completed(self) -> bool {
        matches!(self, Self::Completed | Self::Approved)
    }
}

/// Proposal lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Viewed,
    Accepted,
    Rejected,
    Expired,
}

impl_status_conversions!(ProposalStatus {
    Draft => "draft",
    Sent => "sent",
    Viewed => "viewed",
    Accepted => "accepted",
    Rejected => "rejected",
    Expired => "expired",
});

impl ProposalStatus {
    /// A proposal can only be responded to while it is out with the client.
    pub fn is_awaiting_response(self) -> bool {
        matches!(self, Self::Sent | Self::Viewed)
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl_status_conversions!(InvoiceStatus {
    Draft => "draft",
    Sent => "sent",
    Paid => "paid",
    Overdue => "overdue",
    Cancelled => "cancelled",
});

/// Shared priority scale for orders and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl_status_conversions!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn task_status_round_trips_through_strings() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
            TaskStatus::Cancelled,
        ] {
            let parsed = TaskStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn only_done_counts_as_done() {
        assert!(TaskStatus::Done.is_done());
        assert!(!TaskStatus::Review.is_done());
        assert!(!TaskStatus::Cancelled.is_done());
    }

    #[test]
    fn completed_and_approved_count_for_rollup() {
        assert!(MilestoneStatus::Completed.counts_as_completed());
        assert!(MilestoneStatus::Approved.counts_as_completed());
        assert!(!MilestoneStatus::InProgress.counts_as_completed());
        assert!(!MilestoneStatus::Cancelled.counts_as_completed());
    }

    #[test]
    fn only_sent_and_viewed_await_response() {
        assert!(ProposalStatus::Sent.is_awaiting_response());
        assert!(ProposalStatus::Viewed.is_awaiting_response());
        assert!(!ProposalStatus::Draft.is_awaiting_response());
        assert!(!ProposalStatus::Accepted.is_awaiting_response());
        assert!(!ProposalStatus::Rejected.is_awaiting_response());
        assert!(!ProposalStatus::Expired.is_awaiting_response());
    }
}

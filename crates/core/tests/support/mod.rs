//! Shared fixtures and mocks for core service tests

pub mod repositories;

use atelier_domain::{
    Milestone, MilestoneStatus, Order, Priority, Proposal, ProposalItem, ProposalStatus, Task,
    TaskStatus,
};
use chrono::Utc;

/// Build an order fixture with sane defaults.
pub fn sample_order(id: &str) -> Order {
    let now = Utc::now();
    Order {
        id: id.to_string(),
        number: "ORD-2026-001".into(),
        title: "Brand refresh".into(),
        priority: Priority::Medium,
        progress_percent: 0,
        status_id: "status-new".into(),
        client_id: "client-1".into(),
        manager_id: Some("user-manager".into()),
        currency: "EUR".into(),
        estimated_budget: Some(500_000),
        created_at: now,
        updated_at: now,
    }
}

/// Build a milestone fixture attached to the given order.
pub fn sample_milestone(id: &str, order_id: &str, status: MilestoneStatus) -> Milestone {
    let now = Utc::now();
    Milestone {
        id: id.to_string(),
        order_id: order_id.to_string(),
        name: "Discovery".into(),
        status,
        progress_percent: 0,
        requires_approval: false,
        position: 0,
        completed_at: None,
        client_approved_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Build a task fixture attached to the given order/milestone.
pub fn sample_task(id: &str, order_id: &str, milestone_id: Option<&str>) -> Task {
    let now = Utc::now();
    Task {
        id: id.to_string(),
        order_id: order_id.to_string(),
        milestone_id: milestone_id.map(str::to_string),
        title: "Wireframes".into(),
        status: TaskStatus::Todo,
        priority: Priority::Medium,
        assignee_id: Some("user-designer".into()),
        completed_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Build a proposal fixture with two line items totaling 15,000.00.
pub fn sample_proposal(id: &str, client_id: &str, status: ProposalStatus) -> Proposal {
    let now = Utc::now();
    Proposal {
        id: id.to_string(),
        client_id: client_id.to_string(),
        order_id: None,
        number: "PRO-2026-003".into(),
        title: "Website redesign".into(),
        status,
        total_amount: 1_500_000,
        currency: "EUR".into(),
        responded_at: None,
        items: vec![
            ProposalItem {
                id: format!("{id}-item-1"),
                proposal_id: id.to_string(),
                description: "Design phase".into(),
                quantity: 1,
                unit_price: 600_000,
                total: 600_000,
                position: 0,
            },
            ProposalItem {
                id: format!("{id}-item-2"),
                proposal_id: id.to_string(),
                description: "Implementation".into(),
                quantity: 3,
                unit_price: 300_000,
                total: 900_000,
                position: 1,
            },
        ],
        created_at: now,
        updated_at: now,
    }
}

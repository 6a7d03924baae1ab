//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the core ports, enabling deterministic
//! service tests without database dependencies.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atelier_core::fulfillment::ports::{
    FulfillmentRepository, MilestoneCascadeOutcome, OrderStatusChange, TaskTransitionOutcome,
};
use atelier_core::notification_ports::{NotificationEmitter, RecipientDirectory};
use atelier_core::proposals::ports::{AcceptanceOutcome, ProposalRepository};
use atelier_domain::{
    AtelierError, NotificationEvent, Order, OrderStatusHistoryEntry, Proposal,
    Result as DomainResult, Task, TaskStatus,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// In-memory mock for `FulfillmentRepository`.
///
/// Returns pre-configured outcomes; calls are recorded for assertions. The
/// cascade outcome is consumed by the first `set_task_status` /
/// `recompute_milestone` call, after which recomputes report
/// `MilestoneTransition::None` - mirroring the idempotence of the real
/// store.
#[derive(Default)]
pub struct MockFulfillmentRepository {
    pub order: Mutex<Option<Order>>,
    pub task: Mutex<Option<Task>>,
    pub cascade_outcomes: Mutex<Vec<MilestoneCascadeOutcome>>,
    pub order_progress: Mutex<Option<i64>>,
    pub recorded_statuses: Mutex<Vec<(String, TaskStatus)>>,
}

impl MockFulfillmentRepository {
    /// Seed the mock with an order lookup result.
    pub fn with_order(self, order: Order) -> Self {
        *self.order.lock().unwrap() = Some(order);
        self
    }

    /// Seed the mock with the task returned by `set_task_status`.
    pub fn with_task(self, task: Task) -> Self {
        *self.task.lock().unwrap() = Some(task);
        self
    }

    /// Queue a cascade outcome for the next recompute call.
    pub fn with_cascade_outcome(self, outcome: MilestoneCascadeOutcome) -> Self {
        self.cascade_outcomes.lock().unwrap().push(outcome);
        self
    }

    fn next_cascade(&self) -> Option<MilestoneCascadeOutcome> {
        let mut outcomes = self.cascade_outcomes.lock().unwrap();
        if outcomes.is_empty() {
            None
        } else {
            Some(outcomes.remove(0))
        }
    }
}

#[async_trait]
impl FulfillmentRepository for MockFulfillmentRepository {
    async fn set_task_status(
        &self,
        task_id: &str,
        new_status: TaskStatus,
        _now: DateTime<Utc>,
    ) -> DomainResult<TaskTransitionOutcome> {
        let task = self
            .task
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AtelierError::NotFound(format!("task {task_id} not found")))?;
        self.recorded_statuses.lock().unwrap().push((task_id.to_string(), new_status));

        Ok(TaskTransitionOutcome {
            task,
            milestone: self.next_cascade(),
            order_progress: *self.order_progress.lock().unwrap(),
        })
    }

    async fn recompute_milestone(
        &self,
        milestone_id: &str,
        _now: DateTime<Utc>,
    ) -> DomainResult<MilestoneCascadeOutcome> {
        self.next_cascade()
            .ok_or_else(|| AtelierError::NotFound(format!("milestone {milestone_id} not found")))
    }

    async fn recompute_order(&self, _order_id: &str) -> DomainResult<Option<i64>> {
        Ok(*self.order_progress.lock().unwrap())
    }

    async fn change_order_status(
        &self,
        change: OrderStatusChange,
        now: DateTime<Utc>,
    ) -> DomainResult<OrderStatusHistoryEntry> {
        Ok(OrderStatusHistoryEntry {
            id: Uuid::new_v4().to_string(),
            order_id: change.order_id,
            status_id: change.status_id,
            changed_by: change.changed_by,
            note: change.note,
            changed_at: now,
        })
    }

    async fn get_order(&self, _order_id: &str) -> DomainResult<Option<Order>> {
        Ok(self.order.lock().unwrap().clone())
    }
}

/// In-memory mock for `ProposalRepository`.
#[derive(Default)]
pub struct MockProposalRepository {
    pub acceptance: Mutex<Option<AcceptanceOutcome>>,
    pub rejection: Mutex<Option<Proposal>>,
}

impl MockProposalRepository {
    /// Seed the outcome returned by `accept`.
    pub fn with_acceptance(self, outcome: AcceptanceOutcome) -> Self {
        *self.acceptance.lock().unwrap() = Some(outcome);
        self
    }

    /// Seed the proposal returned by `reject`.
    pub fn with_rejection(self, proposal: Proposal) -> Self {
        *self.rejection.lock().unwrap() = Some(proposal);
        self
    }
}

#[async_trait]
impl ProposalRepository for MockProposalRepository {
    async fn accept(
        &self,
        proposal_id: &str,
        _client_id: &str,
        _now: DateTime<Utc>,
    ) -> DomainResult<AcceptanceOutcome> {
        self.acceptance
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AtelierError::NotFound(format!("proposal {proposal_id} not found")))
    }

    async fn reject(
        &self,
        proposal_id: &str,
        _client_id: &str,
        _now: DateTime<Utc>,
    ) -> DomainResult<Proposal> {
        self.rejection
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AtelierError::NotFound(format!("proposal {proposal_id} not found")))
    }
}

/// Static recipient directory for tests.
pub struct StaticRecipientDirectory {
    pub order: Vec<String>,
    pub staff: Vec<String>,
    pub client: Vec<String>,
}

impl Default for StaticRecipientDirectory {
    fn default() -> Self {
        Self {
            order: vec!["user-manager".into(), "user-designer".into()],
            staff: vec!["user-admin".into(), "user-manager".into()],
            client: vec!["user-client".into()],
        }
    }
}

#[async_trait]
impl RecipientDirectory for StaticRecipientDirectory {
    async fn order_recipients(&self, _order_id: &str) -> DomainResult<Vec<String>> {
        Ok(self.order.clone())
    }

    async fn staff_recipients(&self) -> DomainResult<Vec<String>> {
        Ok(self.staff.clone())
    }

    async fn client_recipients(&self, _order_id: &str) -> DomainResult<Vec<String>> {
        Ok(self.client.clone())
    }
}

/// Notification emitter that records every event, optionally failing.
#[derive(Default)]
pub struct RecordingEmitter {
    pub events: Arc<Mutex<Vec<NotificationEvent>>>,
    pub fail: bool,
}

impl RecordingEmitter {
    /// An emitter whose `emit` always errors, for fire-and-forget tests.
    pub fn failing() -> Self {
        Self { events: Arc::new(Mutex::new(Vec::new())), fail: true }
    }

    /// Snapshot of everything emitted so far.
    pub fn emitted(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationEmitter for RecordingEmitter {
    async fn emit(&self, event: NotificationEvent) -> DomainResult<()> {
        if self.fail {
            return Err(AtelierError::Internal("notification channel down".into()));
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

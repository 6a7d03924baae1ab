//! Fulfillment orchestration service - core business logic

use std::sync::Arc;

use atelier_domain::{
    EntityKind, Milestone, NotificationEvent, Order, OrderStatusHistoryEntry, Result, TaskStatus,
};
use chrono::Utc;
use tracing::warn;

use super::cascade::MilestoneTransition;
use super::ports::{
    FulfillmentRepository, MilestoneCascadeOutcome, OrderStatusChange, TaskTransitionOutcome,
};
use crate::notification_ports::{NotificationEmitter, RecipientDirectory};

/// Entry point for task status changes and progress recomputation.
///
/// All writes happen atomically inside the repository; this service
/// orchestrates and fans out notification events after the transaction
/// committed. Notification emission is fire-and-forget: a delivery failure
/// is logged, never surfaced to the caller.
pub struct FulfillmentService {
    repository: Arc<dyn FulfillmentRepository>,
    recipients: Arc<dyn RecipientDirectory>,
    notifier: Arc<dyn NotificationEmitter>,
}

impl FulfillmentService {
    /// Create a new fulfillment service.
    pub fn new(
        repository: Arc<dyn FulfillmentRepository>,
        recipients: Arc<dyn RecipientDirectory>,
        notifier: Arc<dyn NotificationEmitter>,
    ) -> Self {
        Self { repository, recipients, notifier }
    }

    /// Apply a task status change and its full cascade.
    ///
    /// Any status is freely settable; there is no transition-table
    /// validation. `completed_at` is set when the task becomes `Done` and
    /// cleared otherwise. The task write, milestone recompute and order
    /// rollup commit (or fail) as one unit.
    pub async fn set_task_status(
        &self,
        task_id: &str,
        new_status: TaskStatus,
    ) -> Result<TaskTransitionOutcome> {
        let now = Utc::now();
        let outcome = self.repository.set_task_status(task_id, new_status, now).await?;

        if let Some(cascade) = &outcome.milestone {
            self.notify_milestone_cascade(cascade).await;
        }

        Ok(outcome)
    }

    /// Recompute a milestone's progress and apply auto transitions.
    ///
    /// Idempotent end to end: a second call with no intervening task changes
    /// persists the same percentage, applies no transition and emits no
    /// duplicate notification.
    pub async fn recompute_milestone(&self, milestone_id: &str) -> Result<MilestoneCascadeOutcome> {
        let outcome = self.repository.recompute_milestone(milestone_id, Utc::now()).await?;
        self.notify_milestone_cascade(&outcome).await;
        Ok(outcome)
    }

    /// Recompute an order's progress from its milestones.
    pub async fn recompute_order(&self, order_id: &str) -> Result<Option<i64>> {
        self.repository.recompute_order(order_id).await
    }

    /// Apply an explicit, user-driven order status change.
    ///
    /// Writes the order's new catalog status and the append-only history
    /// entry in one transaction, then notifies the order's watchers.
    pub async fn change_order_status(
        &self,
        change: OrderStatusChange,
    ) -> Result<OrderStatusHistoryEntry> {
        let order_id = change.order_id.clone();
        let entry = self.repository.change_order_status(change, Utc::now()).await?;

        if let Some(order) = self.load_order_for_notification(&order_id).await {
            let event = NotificationEvent::status(
                "Order status updated",
                format!("Order {} moved to a new status", order.number),
                format!("/orders/{}", order.id),
                EntityKind::Order,
                order.id.clone(),
                self.resolve_order_recipients(&order.id).await,
            );
            self.emit_best_effort(event).await;
        }

        Ok(entry)
    }

    /// Fan out the events a milestone transition calls for.
    async fn notify_milestone_cascade(&self, outcome: &MilestoneCascadeOutcome) {
        if outcome.transition != MilestoneTransition::Completed {
            return;
        }

        let milestone = &outcome.milestone;
        let Some(order) = self.load_order_for_notification(&milestone.order_id).await else {
            return;
        };

        let event = NotificationEvent::status(
            "Milestone completed",
            format!("Milestone \"{}\" of order {} is complete", milestone.name, order.number),
            format!("/orders/{}", order.id),
            EntityKind::Milestone,
            milestone.id.clone(),
            self.resolve_order_recipients(&order.id).await,
        );
        self.emit_best_effort(event).await;

        if milestone.requires_approval {
            self.notify_client_review(milestone, &order).await;
        }
    }

    /// Ask the client to review a completed milestone (separate channel from
    /// the team-facing status event).
    async fn notify_client_review(&self, milestone: &Milestone, order: &Order) {
        let recipients = match self.recipients.client_recipients(&order.id).await {
            Ok(recipients) => recipients,
            Err(err) => {
                warn!(error = %err, order_id = %order.id, "failed to resolve client recipients");
                return;
            }
        };

        let event = NotificationEvent::status(
            "Milestone ready for review",
            format!("Milestone \"{}\" of order {} is ready for your review", milestone.name, order.number),
            format!("/portal/orders/{}", order.id),
            EntityKind::Milestone,
            milestone.id.clone(),
            recipients,
        );
        self.emit_best_effort(event).await;
    }

    async fn load_order_for_notification(&self, order_id: &str) -> Option<Order> {
        match self.repository.get_order(order_id).await {
            Ok(Some(order)) => Some(order),
            Ok(None) => {
                warn!(%order_id, "order vanished before notification fan-out");
                None
            }
            Err(err) => {
                warn!(error = %err, %order_id, "failed to load order for notification");
                None
            }
        }
    }

    async fn resolve_order_recipients(&self, order_id: &str) -> Vec<String> {
        match self.recipients.order_recipients(order_id).await {
            Ok(recipients) => recipients,
            Err(err) => {
                warn!(error = %err, %order_id, "failed to resolve order recipients");
                Vec::new()
            }
        }
    }

    async fn emit_best_effort(&self, event: NotificationEvent) {
        if let Err(err) = self.notifier.emit(event).await {
            warn!(error = %err, "failed to emit notification event");
        }
    }
}

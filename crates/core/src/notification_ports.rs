//! Ports for notification emission and recipient resolution
//!
//! The engine computes recipient sets and event payloads; delivery,
//! rendering and channel selection are a collaborator's concern.

use async_trait::async_trait;
use atelier_domain::{NotificationEvent, Result};

/// Trait for handing a structured event to the delivery collaborator.
///
/// Emission is best-effort from the engine's point of view: services log
/// failures and never fail the triggering operation on them.
#[async_trait]
pub trait NotificationEmitter: Send + Sync {
    /// Emit one event for delivery.
    async fn emit(&self, event: NotificationEvent) -> Result<()>;
}

/// Trait for resolving notification recipient sets.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Users watching an order: its manager, task assignees and admins,
    /// deduplicated.
    async fn order_recipients(&self, order_id: &str) -> Result<Vec<String>>;

    /// All admins and managers (proposal responses fan out to these).
    async fn staff_recipients(&self) -> Result<Vec<String>>;

    /// The client-side users of an order (milestone review requests go
    /// here).
    async fn client_recipients(&self, order_id: &str) -> Result<Vec<String>>;
}

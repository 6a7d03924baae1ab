//! Notification event types
//!
//! The engine only *emits* these; rendering, channel selection and delivery
//! belong to an external collaborator (here: the notification outbox).

use serde::{Deserialize, Serialize};

use crate::impl_status_conversions;

/// Broad category of a notification event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Status,
    Comment,
    Assignment,
}

impl_status_conversions!(NotificationType {
    Status => "status",
    Comment => "comment",
    Assignment => "assignment",
});

/// The kind of entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Order,
    Milestone,
    Task,
    Proposal,
    Invoice,
}

impl_status_conversions!(EntityKind {
    Order => "order",
    Milestone => "milestone",
    Task => "task",
    Proposal => "proposal",
    Invoice => "invoice",
});

/// A structured notification event with its resolved recipient set.
///
/// The engine computes the recipients; everything downstream of this struct
/// is the delivery collaborator's problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub event_type: NotificationType,
    pub title: String,
    pub description: String,
    pub link_url: String,
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub recipient_user_ids: Vec<String>,
}

impl NotificationEvent {
    /// Build a status-change event.
    pub fn status(
        title: impl Into<String>,
        description: impl Into<String>,
        link_url: impl Into<String>,
        entity_kind: EntityKind,
        entity_id: impl Into<String>,
        recipient_user_ids: Vec<String>,
    ) -> Self {
        Self {
            event_type: NotificationType::Status,
            title: title.into(),
            description: description.into(),
            link_url: link_url.into(),
            entity_kind,
            entity_id: entity_id.into(),
            recipient_user_ids,
        }
    }
}

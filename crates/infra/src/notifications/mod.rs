//! Notification delivery adapters

pub mod outbox;

pub use outbox::{OutboxNotificationEmitter, PendingNotification};

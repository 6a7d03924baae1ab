//! Domain types and models

pub mod invoice;
pub mod milestone;
pub mod notification;
pub mod order;
pub mod proposal;
pub mod settings;
pub mod status;
pub mod task;

// Re-export for convenience
pub use invoice::{Invoice, InvoiceItem};
pub use milestone::Milestone;
pub use notification::{EntityKind, NotificationEvent, NotificationType};
pub use order::{Order, OrderStatusHistoryEntry};
pub use proposal::{Proposal, ProposalItem, ProposalResponse};
pub use settings::{AppSettings, CounterKind, DocumentNumber, SequenceSlot};
pub use status::{InvoiceStatus, MilestoneStatus, Priority, ProposalStatus, TaskStatus};
pub use task::Task;

//! # Atelier Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The fulfillment consistency rules (task status machine, milestone
//!   cascade, order rollup) as pure decision functions
//! - Port/adapter interfaces (traits)
//! - Orchestration services
//!
//! ## Architecture Principles
//! - Only depends on `atelier-domain`
//! - No database or I/O code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod fulfillment;
pub mod proposals;
pub mod sequence;

// Infrastructure ports
pub mod notification_ports;

// Re-export specific items to avoid ambiguity
pub use fulfillment::cascade::{self, MilestoneTransition};
pub use fulfillment::ports::{
    FulfillmentRepository, MilestoneCascadeOutcome, OrderStatusChange, TaskTransitionOutcome,
};
pub use fulfillment::FulfillmentService;
pub use notification_ports::{NotificationEmitter, RecipientDirectory};
pub use proposals::ports::{AcceptanceOutcome, ProposalRepository};
pub use proposals::ProposalService;
pub use sequence::ports::CounterStore;
pub use sequence::{format_document_number, SequenceService};

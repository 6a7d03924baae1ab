//! Order-fulfillment consistency rules
//!
//! Keeps `Task`, `Milestone` and `Order` progress/status fields mutually
//! consistent: a task status change recomputes its milestone's progress,
//! applies forward/reverse milestone transitions and rolls milestone states
//! up into the order's progress percentage, all inside one transaction.

pub mod cascade;
pub mod ports;
pub mod service;

pub use cascade::MilestoneTransition;
pub use service::FulfillmentService;

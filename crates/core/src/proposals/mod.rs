//! Proposal acceptance pipeline
//!
//! Turns a client's response to a proposal into the settled proposal state
//! and, on acceptance, atomically materializes an order plus a derived
//! invoice with value-copied line items.

pub mod pipeline;
pub mod ports;
pub mod service;

pub use pipeline::{derive_invoice, derive_order};
pub use service::ProposalService;

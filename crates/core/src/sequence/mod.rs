//! Business-document numbering
//!
//! Issues unique, monotonically increasing order/invoice/proposal numbers
//! backed by the settings singleton's per-kind counters.

pub mod format;
pub mod ports;
pub mod service;

pub use format::format_document_number;
pub use service::SequenceService;

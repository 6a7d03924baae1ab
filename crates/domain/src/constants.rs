//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! engine.

// Business-document numbering
pub const DEFAULT_ORDER_PREFIX: &str = "ORD";
pub const DEFAULT_INVOICE_PREFIX: &str = "INV";
pub const DEFAULT_PROPOSAL_PREFIX: &str = "PRO";
/// Width the numeric part of a document number is zero-padded to.
pub const DOCUMENT_NUMBER_PAD_WIDTH: usize = 3;

// Invoicing
/// Days until an invoice derived from an accepted proposal falls due.
pub const INVOICE_DUE_DAYS: i64 = 14;

// Settings singleton
/// Fixed primary key of the single `app_settings` row.
pub const SETTINGS_ROW_ID: i64 = 1;

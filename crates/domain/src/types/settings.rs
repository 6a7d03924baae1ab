//! Settings singleton and document-numbering types

use serde::{Deserialize, Serialize};

use crate::impl_status_conversions;

/// The settings singleton row.
///
/// Each `next_*` column holds the *next* value the counter will hand out;
/// the atomic increment returns the post-increment value and the issued
/// document number embeds `value - 1`. That off-by-one convention is load
/// bearing: already-issued numbers depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub order_prefix: String,
    pub next_order_number: i64,
    pub invoice_prefix: String,
    pub next_invoice_number: i64,
    pub proposal_prefix: String,
    pub next_proposal_number: i64,
}

/// Which of the three independent counters a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    Order,
    Invoice,
    Proposal,
}

impl_status_conversions!(CounterKind {
    Order => "order",
    Invoice => "invoice",
    Proposal => "proposal",
});

/// Raw result of an atomic counter increment: the configured prefix and the
/// post-increment stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSlot {
    pub prefix: String,
    pub value: i64,
}

/// A fully formatted business-document number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNumber {
    pub prefix: String,
    /// Post-increment counter value backing this number.
    pub value: i64,
    /// Rendered form, e.g. `ORD-2026-041`.
    pub formatted: String,
}

//! Proposal model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::ProposalStatus;
use crate::impl_status_conversions;

/// A priced offer to a client.
///
/// Immutable once responded to, except for the acceptance-triggered link to
/// the order it materializes (`order_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub client_id: String,
    /// Set when the proposal is accepted and an order is created from it.
    pub order_id: Option<String>,
    /// Unique business number, e.g. `PRO-2026-007`.
    pub number: String,
    pub title: String,
    pub status: ProposalStatus,
    /// Sum of line totals in minor currency units (cents).
    pub total_amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub items: Vec<ProposalItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single priced line of a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalItem {
    pub id: String,
    pub proposal_id: String,
    pub description: String,
    pub quantity: i64,
    /// Price per unit in minor currency units (cents).
    pub unit_price: i64,
    /// Line total in minor currency units (cents).
    pub total: i64,
    /// Ordering within the proposal.
    pub position: i64,
}

/// A client's answer to a proposal.
///
/// Only these two values are valid responses; they are deliberately separate
/// from [`ProposalStatus`] so a caller cannot "respond" with `Draft` or
/// `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalResponse {
    Accepted,
    Rejected,
}

impl_status_conversions!(ProposalResponse {
    Accepted => "accepted",
    Rejected => "rejected",
});

impl ProposalResponse {
    /// The proposal status this response settles the proposal into.
    pub fn as_status(self) -> ProposalStatus {
        match self {
            Self::Accepted => ProposalStatus::Accepted,
            Self::Rejected => ProposalStatus::Rejected,
        }
    }
}

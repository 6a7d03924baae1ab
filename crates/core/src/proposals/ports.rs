//! Port interfaces for the proposal acceptance pipeline

use async_trait::async_trait;
use atelier_domain::{Invoice, Order, Proposal, Result};
use chrono::{DateTime, Utc};

/// Everything a successful acceptance materialized.
#[derive(Debug, Clone)]
pub struct AcceptanceOutcome {
    /// The settled (accepted, order-linked) proposal.
    pub proposal: Proposal,
    /// The order created from the proposal.
    pub order: Order,
    /// The invoice derived from the proposal's items.
    pub invoice: Invoice,
}

/// Trait for the transactional store behind proposal responses.
///
/// Preconditions are checked inside the transaction: the proposal must
/// belong to the responding client and be awaiting a response (sent or
/// viewed). Violations surface as `NotFound` without distinguishing the two
/// cases, so a wrong client learns nothing about the proposal's existence.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Accept a proposal: settle its status, create the order (numbered via
    /// the order counter), link the proposal to it, and create the derived
    /// invoice with value-copied items - all in one transaction. Any failure
    /// rolls the whole unit back; an order without its invoice never
    /// survives.
    async fn accept(
        &self,
        proposal_id: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AcceptanceOutcome>;

    /// Reject a proposal: settle its status and `responded_at`.
    async fn reject(
        &self,
        proposal_id: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Proposal>;
}

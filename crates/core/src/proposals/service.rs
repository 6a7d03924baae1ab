//! Proposal response orchestration - core business logic

use std::sync::Arc;

use atelier_domain::{
    EntityKind, NotificationEvent, Proposal, ProposalResponse, Result,
};
use chrono::Utc;
use tracing::warn;

use super::ports::ProposalRepository;
use crate::notification_ports::{NotificationEmitter, RecipientDirectory};

/// Entry point for client responses to proposals.
pub struct ProposalService {
    repository: Arc<dyn ProposalRepository>,
    recipients: Arc<dyn RecipientDirectory>,
    notifier: Arc<dyn NotificationEmitter>,
}

impl ProposalService {
    /// Create a new proposal service.
    pub fn new(
        repository: Arc<dyn ProposalRepository>,
        recipients: Arc<dyn RecipientDirectory>,
        notifier: Arc<dyn NotificationEmitter>,
    ) -> Self {
        Self { repository, recipients, notifier }
    }

    /// Record a client's response to a proposal.
    ///
    /// Eligibility (ownership and sent/viewed status) is enforced inside the
    /// repository transaction; violations come back as `NotFound`. On
    /// acceptance exactly one order and one invoice are created atomically
    /// with the status change. Staff are notified after commit, best-effort.
    pub async fn respond(
        &self,
        proposal_id: &str,
        client_id: &str,
        response: ProposalResponse,
    ) -> Result<Proposal> {
        let now = Utc::now();

        let (proposal, order_number) = match response {
            ProposalResponse::Accepted => {
                let outcome = self.repository.accept(proposal_id, client_id, now).await?;
                (outcome.proposal, Some(outcome.order.number))
            }
            ProposalResponse::Rejected => {
                let proposal = self.repository.reject(proposal_id, client_id, now).await?;
                (proposal, None)
            }
        };

        self.notify_staff(&proposal, response, order_number.as_deref()).await;

        Ok(proposal)
    }

    async fn notify_staff(
        &self,
        proposal: &Proposal,
        response: ProposalResponse,
        order_number: Option<&str>,
    ) {
        let recipients = match self.recipients.staff_recipients().await {
            Ok(recipients) => recipients,
            Err(err) => {
                warn!(error = %err, "failed to resolve staff recipients");
                return;
            }
        };

        let description = match order_number {
            Some(number) => format!(
                "Proposal {} was accepted; order {number} has been created",
                proposal.number
            ),
            None => format!("Proposal {} was {response}", proposal.number),
        };

        let event = NotificationEvent::status(
            format!("Proposal {response}"),
            description,
            format!("/proposals/{}", proposal.id),
            EntityKind::Proposal,
            proposal.id.clone(),
            recipients,
        );

        if let Err(err) = self.notifier.emit(event).await {
            warn!(error = %err, "failed to emit proposal notification");
        }
    }
}

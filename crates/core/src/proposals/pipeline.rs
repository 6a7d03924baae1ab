//! Pure derivation logic for proposal acceptance
//!
//! These functions build the order and invoice an accepted proposal
//! materializes into. Persisting them atomically is the repository's job;
//! the values themselves are decided here.

use atelier_domain::constants::INVOICE_DUE_DAYS;
use atelier_domain::{
    DocumentNumber, Invoice, InvoiceItem, InvoiceStatus, Order, Priority, Proposal,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Build the order an accepted proposal materializes into.
///
/// Title, client and currency are copied from the proposal; the proposal's
/// total becomes the order's estimated budget. The order starts at the
/// catalog's initial status with zero progress.
pub fn derive_order(
    proposal: &Proposal,
    number: &DocumentNumber,
    initial_status_id: &str,
    now: DateTime<Utc>,
) -> Order {
    Order {
        id: Uuid::new_v4().to_string(),
        number: number.formatted.clone(),
        title: proposal.title.clone(),
        priority: Priority::Medium,
        progress_percent: 0,
        status_id: initial_status_id.to_string(),
        client_id: proposal.client_id.clone(),
        manager_id: None,
        currency: proposal.currency.clone(),
        estimated_budget: Some(proposal.total_amount),
        created_at: now,
        updated_at: now,
    }
}

/// Build the invoice derived from an accepted proposal.
///
/// Line items are a value copy of the proposal's items at this moment;
/// later proposal edits must not retroactively change the invoice. The
/// subtotal and total are the sum of line totals, tax and discount are zero,
/// and the invoice falls due [`INVOICE_DUE_DAYS`] days after issue.
pub fn derive_invoice(
    proposal: &Proposal,
    order_id: &str,
    number: &DocumentNumber,
    now: DateTime<Utc>,
) -> Invoice {
    let invoice_id = Uuid::new_v4().to_string();
    let items: Vec<InvoiceItem> = proposal
        .items
        .iter()
        .map(|item| InvoiceItem {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice_id.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total: item.total,
            position: item.position,
        })
        .collect();
    let subtotal: i64 = items.iter().map(|item| item.total).sum();

    Invoice {
        id: invoice_id,
        client_id: proposal.client_id.clone(),
        order_id: Some(order_id.to_string()),
        number: number.formatted.clone(),
        status: InvoiceStatus::Sent,
        subtotal,
        tax_amount: 0,
        discount_amount: 0,
        total: subtotal,
        currency: proposal.currency.clone(),
        issued_at: now,
        due_date: now + Duration::days(INVOICE_DUE_DAYS),
        items,
    }
}

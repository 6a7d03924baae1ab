//! Invoice model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::InvoiceStatus;

/// A billing document.
///
/// Always belongs to exactly one client and optionally one order. When
/// derived from an accepted proposal, the items are a value copy of the
/// proposal's items at acceptance time; later proposal edits never reach the
/// invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub client_id: String,
    pub order_id: Option<String>,
    /// Unique business number, e.g. `INV-2026-112`.
    pub number: String,
    pub status: InvoiceStatus,
    /// All monetary fields are minor currency units (cents).
    pub subtotal: i64,
    pub tax_amount: i64,
    pub discount_amount: i64,
    pub total: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    pub issued_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
}

/// A single billed line of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub description: String,
    pub quantity: i64,
    /// Price per unit in minor currency units (cents).
    pub unit_price: i64,
    /// Line total in minor currency units (cents).
    pub total: i64,
    /// Ordering within the invoice.
    pub position: i64,
}

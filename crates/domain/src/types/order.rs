//! Order model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Priority;

/// A unit of client work.
///
/// `progress_percent` is derived by the order rollup from milestone states;
/// `status_id` references the user-managed order-status catalog, which is
/// opaque data to this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Unique business number, e.g. `ORD-2026-041`.
    pub number: String,
    pub title: String,
    pub priority: Priority,
    /// Derived 0-100 completion, from the milestone rollup.
    pub progress_percent: i64,
    /// Reference into the order-status catalog.
    pub status_id: String,
    pub client_id: String,
    pub manager_id: Option<String>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Estimated budget in minor currency units (cents).
    pub estimated_budget: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only record of an explicit order status change.
///
/// Written by user/manager-driven status changes, never by the progress
/// rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusHistoryEntry {
    pub id: String,
    pub order_id: String,
    pub status_id: String,
    pub changed_by: String,
    pub note: Option<String>,
    pub changed_at: DateTime<Utc>,
}

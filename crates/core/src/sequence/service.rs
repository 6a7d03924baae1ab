//! Sequence generation service

use std::sync::Arc;

use atelier_domain::{CounterKind, DocumentNumber, Result};
use chrono::{Datelike, Utc};

use super::format::format_document_number;
use super::ports::CounterStore;

/// Issues the next business-document number for a named counter.
///
/// On store failure the caller must not create the parent document; an
/// order/invoice/proposal without a number never exists.
pub struct SequenceService {
    store: Arc<dyn CounterStore>,
}

impl SequenceService {
    /// Create a new sequence service over the given counter store.
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Issue the next number for `kind`, formatted as
    /// `{prefix}-{year}-{value - 1, zero-padded}`.
    pub async fn next_number(&self, kind: CounterKind) -> Result<DocumentNumber> {
        let slot = self.store.increment_and_fetch(kind).await?;
        let year = Utc::now().year();
        let formatted = format_document_number(&slot.prefix, year, slot.value);
        Ok(DocumentNumber { prefix: slot.prefix, value: slot.value, formatted })
    }
}

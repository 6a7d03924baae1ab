//! Integration tests for document numbering over the settings singleton.

mod support;

use std::collections::HashSet;
use std::sync::Arc;

use atelier_core::sequence::ports::CounterStore;
use atelier_core::SequenceService;
use atelier_domain::CounterKind;
use atelier_infra::SqliteCounterStore;
use chrono::{Datelike, Utc};

use support::TestDatabase;

#[tokio::test]
async fn counters_are_independent_per_document_kind() {
    let db = TestDatabase::new();
    let store = Arc::new(SqliteCounterStore::new(db.manager.clone()));
    let service = SequenceService::new(store.clone());
    let year = Utc::now().year();

    let order = service.next_number(CounterKind::Order).await.unwrap();
    let invoice = service.next_number(CounterKind::Invoice).await.unwrap();
    let proposal = service.next_number(CounterKind::Proposal).await.unwrap();

    // Fresh counters store 1; the first issued number embeds 2 - 1 = 1
    assert_eq!(order.formatted, format!("ORD-{year}-001"));
    assert_eq!(invoice.formatted, format!("INV-{year}-001"));
    assert_eq!(proposal.formatted, format!("PRO-{year}-001"));

    let settings = store.settings().await.unwrap();
    assert_eq!(settings.next_order_number, 2);
    assert_eq!(settings.next_invoice_number, 2);
    assert_eq!(settings.next_proposal_number, 2);
}

#[tokio::test]
async fn padding_gives_way_to_wider_values() {
    let db = TestDatabase::new();
    db.execute_batch("UPDATE app_settings SET next_order_number = 10000 WHERE id = 1");
    let service = SequenceService::new(Arc::new(SqliteCounterStore::new(db.manager.clone())));
    let year = Utc::now().year();

    let number = service.next_number(CounterKind::Order).await.unwrap();

    assert_eq!(number.formatted, format!("ORD-{year}-10000"));
}

#[tokio::test]
async fn concurrent_allocations_never_collide() {
    let db = TestDatabase::new();
    let store = Arc::new(SqliteCounterStore::new(db.manager.clone()));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.increment_and_fetch(CounterKind::Order).await })
        })
        .collect();

    let mut values = HashSet::new();
    for handle in handles {
        let slot = handle.await.expect("task joined").expect("counter incremented");
        assert!(values.insert(slot.value), "value {} issued twice", slot.value);
    }

    // Ten post-increment values, contiguous from the stored seed of 1
    assert_eq!(values, (2..=11).collect::<HashSet<i64>>());
    let next: i64 = db.query_i64("SELECT next_order_number FROM app_settings WHERE id = 1");
    assert_eq!(next, 11);
}

//! Port interfaces for document numbering

use async_trait::async_trait;
use atelier_domain::{CounterKind, Result, SequenceSlot};

/// Trait for the durable counter store behind the sequence generator.
///
/// Implementations must perform the read-and-increment as one atomic
/// operation against the counter row (e.g. `UPDATE ... RETURNING`), never a
/// read-then-write pair: two concurrent callers may never observe the same
/// value, even when their enclosing transactions are not serialized against
/// each other.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically bump the counter for `kind` and return the post-increment
    /// value together with the configured prefix.
    async fn increment_and_fetch(&self, kind: CounterKind) -> Result<SequenceSlot>;
}

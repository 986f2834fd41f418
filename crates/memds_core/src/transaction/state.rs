//! Transaction state.

use crate::entity::{Entity, Key};
use crate::types::TransactionHandle;
use std::collections::HashMap;

/// A write staged in a transaction overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite {
    /// Insert or replace the entity.
    Put(Entity),
    /// Remove the entity. Distinct from "no pending change".
    Delete,
}

/// An open transaction and its private staging overlay.
///
/// Staged writes are invisible to every reader until commit, including
/// reads issued on behalf of this same transaction.
#[derive(Debug)]
pub struct Transaction {
    handle: TransactionHandle,
    writes: HashMap<Key, PendingWrite>,
}

impl Transaction {
    /// Creates an empty transaction.
    pub(crate) fn new(handle: TransactionHandle) -> Self {
        Self {
            handle,
            writes: HashMap::new(),
        }
    }

    /// Returns the transaction handle.
    #[must_use]
    pub fn handle(&self) -> TransactionHandle {
        self.handle
    }

    /// Stages a put, replacing any earlier staged write for the same key.
    pub fn put(&mut self, entity: Entity) {
        self.writes
            .insert(entity.key.clone(), PendingWrite::Put(entity));
    }

    /// Stages a tombstone, replacing any earlier staged write for the key.
    pub fn delete(&mut self, key: Key) {
        self.writes.insert(key, PendingWrite::Delete);
    }

    /// Returns the staged write for a key.
    #[must_use]
    pub fn pending_write(&self, key: &Key) -> Option<&PendingWrite> {
        self.writes.get(key)
    }

    /// Returns the number of staged writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Consumes the transaction, yielding its staged writes.
    pub(crate) fn into_writes(self) -> impl Iterator<Item = (Key, PendingWrite)> {
        self.writes.into_iter()
    }
}

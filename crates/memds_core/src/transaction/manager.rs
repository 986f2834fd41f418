//! Transaction manager.

use crate::entity::{Entity, EntityStore, Key};
use crate::error::{CoreError, CoreResult};
use crate::transaction::state::{PendingWrite, Transaction};
use crate::types::TransactionHandle;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Tracks open transactions and applies them to the committed store.
///
/// Each handle owns exactly one overlay. Handles are issued in increasing
/// order and never reused, even after the transaction finishes.
#[derive(Debug)]
pub struct TransactionManager {
    /// Handle issued by the next `begin`, `None` once handles run out.
    next_handle: Option<TransactionHandle>,
    /// Open transactions by handle.
    open: HashMap<TransactionHandle, Transaction>,
}

impl TransactionManager {
    /// Creates a manager whose first transaction gets `first_handle`.
    #[must_use]
    pub fn new(first_handle: TransactionHandle) -> Self {
        Self {
            next_handle: Some(first_handle),
            open: HashMap::new(),
        }
    }

    /// Opens a new transaction with an empty overlay.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` once every handle has been issued.
    pub fn begin(&mut self) -> CoreResult<TransactionHandle> {
        let handle = self
            .next_handle
            .ok_or_else(|| CoreError::invalid_request("transaction handles exhausted"))?;
        self.next_handle = handle.next();
        self.open.insert(handle, Transaction::new(handle));
        debug!(%handle, "transaction started");
        Ok(handle)
    }

    /// Stages a put in the transaction's overlay.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the handle is not open.
    pub fn put(&mut self, handle: TransactionHandle, entity: Entity) -> CoreResult<()> {
        self.transaction_mut(handle)?.put(entity);
        Ok(())
    }

    /// Stages a tombstone in the transaction's overlay.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the handle is not open.
    pub fn delete(&mut self, handle: TransactionHandle, key: Key) -> CoreResult<()> {
        self.transaction_mut(handle)?.delete(key);
        Ok(())
    }

    /// Applies every staged write to `store` and closes the transaction.
    ///
    /// Puts replace the stored entity and tombstones remove it. The caller
    /// holds the store exclusively for the whole call, so no reader can
    /// observe a partially applied overlay. Returns the number of writes
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the handle is not open.
    pub fn commit(
        &mut self,
        handle: TransactionHandle,
        store: &mut EntityStore,
    ) -> CoreResult<usize> {
        let txn = self
            .open
            .remove(&handle)
            .ok_or_else(|| CoreError::transaction_not_found(handle))?;

        let mut applied = 0;
        for (key, write) in txn.into_writes() {
            match write {
                PendingWrite::Put(entity) => {
                    trace!(%handle, %key, "commit put");
                    store.put(entity);
                }
                PendingWrite::Delete => {
                    trace!(%handle, %key, "commit delete");
                    store.delete(&key);
                }
            }
            applied += 1;
        }

        debug!(%handle, applied, "transaction committed");
        Ok(applied)
    }

    /// Discards the transaction's overlay.
    ///
    /// Unknown or already finished handles are ignored. Returns true if an
    /// open transaction was discarded.
    pub fn rollback(&mut self, handle: TransactionHandle) -> bool {
        let discarded = self.open.remove(&handle).is_some();
        debug!(%handle, discarded, "transaction rolled back");
        discarded
    }

    /// Returns the open transaction for a handle.
    #[must_use]
    pub fn get(&self, handle: TransactionHandle) -> Option<&Transaction> {
        self.open.get(&handle)
    }

    /// Returns true if the handle names an open transaction.
    #[must_use]
    pub fn is_open(&self, handle: TransactionHandle) -> bool {
        self.open.contains_key(&handle)
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    fn transaction_mut(&mut self, handle: TransactionHandle) -> CoreResult<&mut Transaction> {
        self.open
            .get_mut(&handle)
            .ok_or_else(|| CoreError::transaction_not_found(handle))
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new(TransactionHandle::new(1))
    }
}

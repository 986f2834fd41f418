//! Datastore facade.
//!
//! `Datastore` owns the committed entity store, the open transactions and
//! the id counter. Every operation takes the single state lock for its
//! whole duration, so batches, commits and queries are each observed as
//! one step by concurrent callers.

mod messages;

pub use messages::{
    AllocateIdsRequest, CommitResponse, DeleteRequest, GetRequest, GetResponse, GetResult,
    NextRequest, PutRequest, PutResponse,
};

use crate::allocator::IdAllocator;
use crate::config::Config;
use crate::entity::{Entity, EntityStore, Key};
use crate::error::{CoreError, CoreResult};
use crate::query::{Query, QueryExecutor, QueryResult};
use crate::transaction::TransactionManager;
use crate::types::{IdRange, TransactionHandle};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Mutable datastore state, guarded by one lock.
struct Inner {
    store: EntityStore,
    txns: TransactionManager,
    ids: IdAllocator,
}

impl Inner {
    fn ensure_open(&self, handle: Option<TransactionHandle>) -> CoreResult<()> {
        match handle {
            Some(handle) if !self.txns.is_open(handle) => {
                warn!(%handle, "request names an unknown transaction");
                Err(CoreError::transaction_not_found(handle))
            }
            _ => Ok(()),
        }
    }

    /// Gives an incomplete entity key a fresh id.
    ///
    /// The entity group follows the key when it was derived from it.
    fn complete_key(&mut self, mut entity: Entity) -> CoreResult<Entity> {
        if !entity.key.is_incomplete() {
            return Ok(entity);
        }
        let id = self.ids.allocate_one()?;
        let completed = entity.key.with_last_id(id);
        if entity.entity_group.as_ref() == Some(&entity.key.group_root()) {
            entity.entity_group = Some(completed.group_root());
        }
        debug!(key = %completed, "completed incomplete key");
        entity.key = completed;
        Ok(entity)
    }
}

/// An in-memory hierarchical document datastore.
pub struct Datastore {
    config: Config,
    inner: Mutex<Inner>,
}

impl Datastore {
    /// Creates an empty datastore with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty datastore.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let inner = Inner {
            store: EntityStore::new(),
            txns: TransactionManager::new(TransactionHandle::new(config.first_transaction)),
            ids: IdAllocator::new(config.first_id),
        };
        Self {
            config,
            inner: Mutex::new(inner),
        }
    }

    /// Returns the configuration this datastore was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stores a batch of entities, or stages them in a transaction.
    ///
    /// Later entities in the batch replace earlier ones with the same key.
    /// Entities whose final key element is incomplete are stored under a
    /// freshly allocated id; the response carries the completed keys.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` for an unknown handle and
    /// `InvalidRequest` if a key has an incomplete ancestor element. Nothing
    /// is written in either case.
    pub fn put(&self, request: PutRequest) -> CoreResult<PutResponse> {
        let mut inner = self.inner.lock();
        inner.ensure_open(request.transaction)?;
        if let Some(entity) = request
            .entities
            .iter()
            .find(|e| e.key.has_incomplete_ancestor())
        {
            warn!(key = %entity.key, "put rejected");
            return Err(CoreError::invalid_request(format!(
                "key {} has an incomplete ancestor",
                entity.key
            )));
        }

        let mut keys = Vec::with_capacity(request.entities.len());
        for entity in request.entities {
            let entity = inner.complete_key(entity)?;
            keys.push(entity.key.clone());
            match request.transaction {
                Some(handle) => inner.txns.put(handle, entity)?,
                None => inner.store.put(entity),
            }
        }
        debug!(count = keys.len(), transaction = ?request.transaction, "put");
        Ok(PutResponse { keys })
    }

    /// Looks up a batch of keys in the committed store.
    ///
    /// A transaction handle on the request is ignored: staged writes are
    /// never visible, not even to their own transaction.
    pub fn get(&self, request: GetRequest) -> GetResponse {
        let inner = self.inner.lock();
        let results: Vec<GetResult> = request
            .keys
            .into_iter()
            .map(|key| GetResult {
                entity: inner.store.get(&key).cloned(),
                key,
            })
            .collect();
        debug!(
            requested = results.len(),
            found = results.iter().filter(|r| r.entity.is_some()).count(),
            "get"
        );
        GetResponse { results }
    }

    /// Removes a batch of keys, or stages tombstones in a transaction.
    ///
    /// Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` for an unknown handle.
    pub fn delete(&self, request: DeleteRequest) -> CoreResult<()> {
        let mut inner = self.inner.lock();
        inner.ensure_open(request.transaction)?;
        let count = request.keys.len();
        for key in request.keys {
            match request.transaction {
                Some(handle) => inner.txns.delete(handle, key)?,
                None => {
                    inner.store.delete(&key);
                }
            }
        }
        debug!(count, transaction = ?request.transaction, "delete");
        Ok(())
    }

    /// Reserves `request.size` ids from the shared counter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for a negative size.
    pub fn allocate_ids(&self, request: AllocateIdsRequest) -> CoreResult<IdRange> {
        let range = self.inner.lock().ids.allocate(request.size)?;
        debug!(size = request.size, %range, "allocated ids");
        Ok(range)
    }

    /// Opens a transaction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` once the handle space is used up.
    pub fn begin_transaction(&self) -> CoreResult<TransactionHandle> {
        self.inner.lock().txns.begin()
    }

    /// Discards a transaction. Unknown handles are ignored.
    pub fn rollback(&self, handle: TransactionHandle) {
        self.inner.lock().txns.rollback(handle);
    }

    /// Applies a transaction's staged writes to the store.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the handle is unknown or already
    /// finished.
    pub fn commit(&self, handle: TransactionHandle) -> CoreResult<CommitResponse> {
        let mut inner = self.inner.lock();
        let Inner { store, txns, .. } = &mut *inner;
        let applied = txns.commit(handle, store)?;
        Ok(CommitResponse { applied })
    }

    /// Runs a query against the committed store.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedQuery` for unsupported query features and
    /// `InvariantViolation` if the order property cannot be sorted.
    pub fn run_query(&self, query: &Query) -> CoreResult<QueryResult> {
        let inner = self.inner.lock();
        QueryExecutor::new(&inner.store).execute(query).map_err(|err| {
            warn!(kind = %query.kind, error = %err, "query failed");
            err
        })
    }

    /// Continues a query. Results are never batched, so this always fails.
    ///
    /// # Errors
    ///
    /// Always returns `UnsupportedOperation`.
    pub fn next(&self, _request: &NextRequest) -> CoreResult<QueryResult> {
        Err(CoreError::unsupported_operation("Next"))
    }

    /// Returns the number of committed entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.inner.lock().store.len()
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn open_transactions(&self) -> usize {
        self.inner.lock().txns.open_count()
    }

    /// Returns true if a committed entity exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.inner.lock().store.contains(key)
    }
}

impl Default for Datastore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Datastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datastore")
            .field("entity_count", &self.entity_count())
            .field("open_transactions", &self.open_transactions())
            .finish_non_exhaustive()
    }
}

//! Request and response payloads of the datastore operations.

use crate::entity::{Entity, Key};
use crate::types::TransactionHandle;
use serde::{Deserialize, Serialize};

/// Stores a batch of entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PutRequest {
    /// Entities to store, in request order.
    pub entities: Vec<Entity>,
    /// Stage the writes in this transaction instead of the store.
    #[serde(default)]
    pub transaction: Option<TransactionHandle>,
}

impl PutRequest {
    /// Creates a non-transactional put.
    #[must_use]
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            transaction: None,
        }
    }

    /// Stages the put in `handle`.
    #[must_use]
    pub fn in_transaction(mut self, handle: TransactionHandle) -> Self {
        self.transaction = Some(handle);
        self
    }
}

/// Keys of the stored entities, in request order.
///
/// Incomplete keys are returned completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutResponse {
    /// Stored keys.
    pub keys: Vec<Key>,
}

/// Looks up a batch of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    /// Keys to look up, in request order.
    pub keys: Vec<Key>,
    /// Accepted for compatibility. Lookups always read committed state.
    #[serde(default)]
    pub transaction: Option<TransactionHandle>,
}

impl GetRequest {
    /// Creates a lookup.
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys,
            transaction: None,
        }
    }

    /// Attaches a transaction handle to the lookup.
    #[must_use]
    pub fn in_transaction(mut self, handle: TransactionHandle) -> Self {
        self.transaction = Some(handle);
        self
    }
}

/// One looked-up key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResult {
    /// The requested key.
    pub key: Key,
    /// The committed entity, if present.
    pub entity: Option<Entity>,
}

/// Results of a lookup, one per requested key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    /// Results in request order.
    pub results: Vec<GetResult>,
}

impl GetResponse {
    /// Returns the found entities, skipping missing keys.
    pub fn found(&self) -> impl Iterator<Item = &Entity> {
        self.results.iter().filter_map(|r| r.entity.as_ref())
    }
}

/// Removes a batch of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Keys to remove.
    pub keys: Vec<Key>,
    /// Stage the deletes in this transaction instead of the store.
    #[serde(default)]
    pub transaction: Option<TransactionHandle>,
}

impl DeleteRequest {
    /// Creates a non-transactional delete.
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys,
            transaction: None,
        }
    }

    /// Stages the delete in `handle`.
    #[must_use]
    pub fn in_transaction(mut self, handle: TransactionHandle) -> Self {
        self.transaction = Some(handle);
        self
    }
}

/// Reserves a block of numeric ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocateIdsRequest {
    /// Number of ids to reserve.
    pub size: i64,
}

/// Outcome of a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResponse {
    /// Number of staged writes applied to the store.
    pub applied: usize,
}

/// Asks for the next batch of a query. Never supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRequest {
    /// Requested batch size.
    #[serde(default)]
    pub count: Option<i32>,
}

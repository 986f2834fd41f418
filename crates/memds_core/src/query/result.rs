//! Result types for query execution.

use crate::entity::{Entity, Key};
use crate::query::spec::Cursor;
use serde::{Deserialize, Serialize};

/// Result of running a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matching entities in result order.
    pub entities: Vec<Entity>,
    /// Position to resume from with a fresh query, if any.
    pub cursor: Option<Cursor>,
    /// Always false: every call returns the full eligible result.
    pub more_results: bool,
}

impl QueryResult {
    /// Creates a result.
    #[must_use]
    pub fn new(entities: Vec<Entity>, cursor: Option<Cursor>) -> Self {
        Self {
            entities,
            cursor,
            more_results: false,
        }
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the keys of the result entities, in result order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        self.entities.iter().map(|e| e.key.clone()).collect()
    }
}

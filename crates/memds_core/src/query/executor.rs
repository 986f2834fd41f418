//! Query executor.
//!
//! Execution order:
//! 1. Select committed entities whose root element has the query kind
//! 2. Apply property filters
//! 3. Restrict to the ancestor, if any
//! 4. Drop entities lacking the order property, if ordered
//! 5. Sort by key, or by the order property
//! 6. Resume strictly after the start cursor
//! 7. Skip the offset
//! 8. Apply the limit
//!
//! The emitted cursor is the last key removed by steps 6–7, replaced by the
//! last returned key whenever the final result is non-empty.

use crate::entity::{Entity, EntityStore, Key};
use crate::error::CoreResult;
use crate::query::filter::PropertyFilter;
use crate::query::result::QueryResult;
use crate::query::sorter::ResultSorter;
use crate::query::spec::{Cursor, Query};
use tracing::{debug, trace};

/// Runs queries against a committed entity store.
pub struct QueryExecutor<'a> {
    store: &'a EntityStore,
}

impl<'a> QueryExecutor<'a> {
    /// Creates an executor over `store`.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    /// Executes `query` and materializes the full result.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedQuery` before doing any work if the query uses
    /// an unsupported feature, and `InvariantViolation` if the order
    /// property holds values that cannot be sorted against each other.
    pub fn execute(&self, query: &Query) -> CoreResult<QueryResult> {
        query.validate()?;

        let mut candidates = Candidates {
            entities: self.store.iter_kind(&query.kind).collect(),
            cursor: None,
        };
        trace!(kind = %query.kind, count = candidates.len(), "selected by kind");

        candidates.filter(&PropertyFilter::new(&query.filters));
        if let Some(ancestor) = &query.ancestor {
            candidates.restrict_to_ancestor(ancestor);
        }

        match query.ordering() {
            Some(order) => {
                candidates.retain_orderable(&order.property);
                ResultSorter::sort_by_property(&mut candidates.entities, order)?;
            }
            None => ResultSorter::sort_by_key(&mut candidates.entities),
        }

        if let Some(cursor) = &query.start_cursor {
            candidates.resume_after(&cursor.key);
        }
        if let Some(offset) = query.offset {
            candidates.skip(offset);
        }
        if let Some(limit) = query.limit {
            candidates.truncate(limit);
        }
        candidates.settle_cursor();

        debug!(
            kind = %query.kind,
            returned = candidates.len(),
            cursor = ?candidates.cursor.map(ToString::to_string),
            "query executed"
        );
        Ok(candidates.into_result())
    }
}

/// Entities surviving the pipeline so far, plus the running cursor.
struct Candidates<'a> {
    entities: Vec<&'a Entity>,
    cursor: Option<&'a Key>,
}

impl<'a> Candidates<'a> {
    fn len(&self) -> usize {
        self.entities.len()
    }

    fn filter(&mut self, filter: &PropertyFilter<'_>) {
        if filter.is_empty() {
            return;
        }
        self.entities.retain(|entity| filter.matches(entity));
        trace!(count = self.len(), "filtered by properties");
    }

    fn restrict_to_ancestor(&mut self, ancestor: &Key) {
        self.entities
            .retain(|entity| entity.entity_group.is_some() && ancestor.is_prefix_of(&entity.key));
        trace!(%ancestor, count = self.len(), "restricted to ancestor");
    }

    fn retain_orderable(&mut self, property: &str) {
        self.entities.retain(|entity| entity.has_property(property));
        trace!(property, count = self.len(), "kept orderable");
    }

    fn resume_after(&mut self, key: &Key) {
        if let Some(pos) = self.entities.iter().position(|entity| &entity.key == key) {
            let resumed: &'a Entity = self.entities[pos];
            self.cursor = Some(&resumed.key);
            self.entities.drain(..=pos);
            trace!(%key, count = self.len(), "resumed after cursor");
        }
    }

    /// Drops the first `offset` entities.
    ///
    /// An offset at or past the end empties the result rather than leaving
    /// it untouched, and the cursor moves to the last entity dropped.
    fn skip(&mut self, offset: i32) {
        let Ok(offset) = usize::try_from(offset) else {
            return;
        };
        if offset == 0 {
            return;
        }
        let skipped = offset.min(self.entities.len());
        if skipped > 0 {
            let last_skipped: &'a Entity = self.entities[skipped - 1];
            self.cursor = Some(&last_skipped.key);
        }
        self.entities.drain(..skipped);
        trace!(offset, count = self.len(), "skipped offset");
    }

    fn truncate(&mut self, limit: i32) {
        // negative limits are unlimited
        if let Ok(limit) = usize::try_from(limit) {
            self.entities.truncate(limit);
            trace!(limit, count = self.len(), "applied limit");
        }
    }

    fn settle_cursor(&mut self) {
        if let Some(&last) = self.entities.last() {
            self.cursor = Some(&last.key);
        }
    }

    fn into_result(self) -> QueryResult {
        QueryResult::new(
            self.entities.into_iter().cloned().collect(),
            self.cursor.cloned().map(Cursor::new),
        )
    }
}

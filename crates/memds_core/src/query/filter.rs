//! Property filtering for query execution.
//!
//! Filters are grouped by property name and an entity must match every
//! group. Within a group the matching mode depends on the entity:
//!
//! - OR mode when the property is a list property on the entity and the
//!   group holds two or more equality filters: some filter must be
//!   satisfied by some value.
//! - AND mode otherwise: every filter must be satisfied by some value,
//!   where each filter may be satisfied by a different value.
//!
//! A missing property, or values that never compare with an operand,
//! fail the group without raising an error.

use crate::entity::Entity;
use crate::query::spec::Filter;

/// How the filters in a group combine for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every filter must be satisfiable.
    All,
    /// One satisfiable filter is enough.
    Any,
}

/// The filters of a query that apply to one property.
#[derive(Debug, Clone)]
pub struct FilterGroup<'a> {
    property: &'a str,
    filters: Vec<&'a Filter>,
}

impl<'a> FilterGroup<'a> {
    /// Returns the property this group applies to.
    #[must_use]
    pub fn property(&self) -> &'a str {
        self.property
    }

    /// Returns the filters in query order.
    #[must_use]
    pub fn filters(&self) -> &[&'a Filter] {
        &self.filters
    }

    fn equality_count(&self) -> usize {
        self.filters.iter().filter(|f| f.op.is_equality()).count()
    }

    /// Returns the matching mode this group uses for `entity`.
    #[must_use]
    pub fn mode_for(&self, entity: &Entity) -> MatchMode {
        if entity.is_multi_valued(self.property) && self.equality_count() >= 2 {
            MatchMode::Any
        } else {
            MatchMode::All
        }
    }

    /// Returns true if `entity` satisfies this group.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        if !entity.has_property(self.property) {
            return false;
        }
        let satisfied = |filter: &&Filter| entity.values(self.property).any(|v| filter.matches(v));
        match self.mode_for(entity) {
            MatchMode::Any => self.filters.iter().any(satisfied),
            MatchMode::All => self.filters.iter().all(satisfied),
        }
    }
}

/// Groups filters by property name, in order of first appearance.
#[must_use]
pub fn group_filters(filters: &[Filter]) -> Vec<FilterGroup<'_>> {
    let mut groups: Vec<FilterGroup<'_>> = Vec::new();
    for filter in filters {
        match groups.iter_mut().find(|g| g.property == filter.property) {
            Some(group) => group.filters.push(filter),
            None => groups.push(FilterGroup {
                property: &filter.property,
                filters: vec![filter],
            }),
        }
    }
    groups
}

/// Evaluates a query's filters against entities.
#[derive(Debug, Clone)]
pub struct PropertyFilter<'a> {
    groups: Vec<FilterGroup<'a>>,
}

impl<'a> PropertyFilter<'a> {
    /// Prepares the filters of a query.
    #[must_use]
    pub fn new(filters: &'a [Filter]) -> Self {
        Self {
            groups: group_filters(filters),
        }
    }

    /// Returns true if there is nothing to filter on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns true if `entity` matches every group.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        self.groups.iter().all(|group| group.matches(entity))
    }
}

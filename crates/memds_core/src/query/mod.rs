//! Query evaluation over the committed store.
//!
//! A query is a single pass over every entity of one kind. Results are
//! fully materialized; there is no batching and no server-side cursor
//! state.

mod executor;
mod filter;
mod result;
mod sorter;
mod spec;

pub use executor::QueryExecutor;
pub use filter::{group_filters, FilterGroup, MatchMode, PropertyFilter};
pub use result::QueryResult;
pub use sorter::ResultSorter;
pub use spec::{Cursor, Direction, Filter, FilterOp, Order, Query};

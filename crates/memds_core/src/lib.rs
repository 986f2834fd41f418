//! # memds core
//!
//! An in-memory stand-in for a hierarchical document datastore, for use in
//! tests of code written against that datastore.
//!
//! This crate provides:
//! - Hierarchical keys with a total order and typed property values
//! - A committed entity store with single-level transaction overlays
//! - A shared numeric id allocator
//! - A query engine with filters, one sort order, ancestors, cursors,
//!   offsets and limits
//! - A service context that routes named method calls to the datastore
//!
//! Everything lives in process memory and disappears with the
//! [`Datastore`].
//!
//! ```rust,ignore
//! use memds_core::{Datastore, Entity, Key, PutRequest, Query, FilterOp};
//!
//! let ds = Datastore::new();
//! ds.put(PutRequest::new(vec![
//!     Entity::new(Key::with_id("Thing", 1)).with_property("IntProp", 1),
//! ]))?;
//! let result = ds.run_query(&Query::new("Thing").filter("IntProp", FilterOp::Equal, 1))?;
//! assert_eq!(result.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod allocator;
mod config;
mod datastore;
mod entity;
mod error;
mod query;
mod service;
mod transaction;
mod types;

pub use allocator::IdAllocator;
pub use config::{Config, DEFAULT_APP_ID};
pub use datastore::{
    AllocateIdsRequest, CommitResponse, Datastore, DeleteRequest, GetRequest, GetResponse,
    GetResult, NextRequest, PutRequest, PutResponse,
};
pub use entity::{
    compare_values, ElementId, Entity, EntityStore, Key, PathElement, Property, Value, ValueKind,
};
pub use error::{CoreError, CoreResult};
pub use query::{
    group_filters, Cursor, Direction, Filter, FilterGroup, FilterOp, MatchMode, Order,
    PropertyFilter, Query, QueryExecutor, QueryResult, ResultSorter,
};
pub use service::{
    Context, ContextOptions, Method, NamespaceService, Request, Response, Service,
    DATASTORE_SERVICE, GO_SERVICE,
};
pub use transaction::{PendingWrite, Transaction, TransactionManager};
pub use types::{IdRange, TransactionHandle};

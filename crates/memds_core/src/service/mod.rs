//! Named-service dispatch.
//!
//! A [`Context`] maps service names to [`Service`] backends and forwards
//! `(service, method, request)` calls to them. The datastore answers under
//! `datastore_v3`; a namespace stub answers under `__go__`.

mod context;
mod dispatch;
mod namespace;
mod request;

pub use context::{Context, ContextOptions, Service};
pub use namespace::NamespaceService;
pub use request::{Method, Request, Response};

/// Service name of the namespace stub.
pub const GO_SERVICE: &str = "__go__";

/// Service name of the datastore.
pub const DATASTORE_SERVICE: &str = "datastore_v3";

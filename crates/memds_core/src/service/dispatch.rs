//! Routes datastore method calls to [`Datastore`] operations.

use crate::datastore::Datastore;
use crate::error::{CoreError, CoreResult};
use crate::service::{Method, Request, Response, Service};
use tracing::warn;

impl Service for Datastore {
    fn call(&self, method: &str, request: Request) -> CoreResult<Response> {
        let method: Method = method.parse()?;
        match (method, request) {
            (Method::Put, Request::Put(req)) => self.put(req).map(Response::Put),
            (Method::Get, Request::Get(req)) => Ok(Response::Get(self.get(req))),
            (Method::Delete, Request::Delete(req)) => self.delete(req).map(|()| Response::Empty),
            (Method::AllocateIds, Request::AllocateIds(req)) => {
                self.allocate_ids(req).map(Response::IdRange)
            }
            (Method::BeginTransaction, Request::Empty) => {
                self.begin_transaction().map(Response::Transaction)
            }
            (Method::Rollback, Request::Transaction(handle)) => {
                self.rollback(handle);
                Ok(Response::Empty)
            }
            (Method::Commit, Request::Transaction(handle)) => {
                self.commit(handle).map(Response::Commit)
            }
            (Method::RunQuery, Request::Query(query)) => {
                self.run_query(&query).map(Response::Query)
            }
            (Method::Next, Request::Next(req)) => self.next(&req).map(Response::Query),
            (method, _) => {
                warn!(%method, "request payload does not match method");
                Err(CoreError::request_mismatch(method.name()))
            }
        }
    }
}

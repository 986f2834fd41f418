//! Method names and payloads routed through a [`Context`](super::Context).

use crate::datastore::{
    AllocateIdsRequest, CommitResponse, DeleteRequest, GetRequest, GetResponse, NextRequest,
    PutRequest, PutResponse,
};
use crate::error::CoreError;
use crate::query::{Query, QueryResult};
use crate::service::DATASTORE_SERVICE;
use crate::types::{IdRange, TransactionHandle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A datastore method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Store entities.
    Put,
    /// Look up keys.
    Get,
    /// Remove keys.
    Delete,
    /// Reserve ids.
    AllocateIds,
    /// Open a transaction.
    BeginTransaction,
    /// Discard a transaction.
    Rollback,
    /// Apply a transaction.
    Commit,
    /// Run a query.
    RunQuery,
    /// Continue a query.
    Next,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 9] = [
        Method::Put,
        Method::Get,
        Method::Delete,
        Method::AllocateIds,
        Method::BeginTransaction,
        Method::Rollback,
        Method::Commit,
        Method::RunQuery,
        Method::Next,
    ];

    /// Returns the wire name of the method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Put => "Put",
            Method::Get => "Get",
            Method::Delete => "Delete",
            Method::AllocateIds => "AllocateIds",
            Method::BeginTransaction => "BeginTransaction",
            Method::Rollback => "Rollback",
            Method::Commit => "Commit",
            Method::RunQuery => "RunQuery",
            Method::Next => "Next",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| CoreError::unknown_method(DATASTORE_SERVICE, s))
    }
}

/// Payload of a service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// No payload.
    Empty,
    /// Payload of `Put`.
    Put(PutRequest),
    /// Payload of `Get`.
    Get(GetRequest),
    /// Payload of `Delete`.
    Delete(DeleteRequest),
    /// Payload of `AllocateIds`.
    AllocateIds(AllocateIdsRequest),
    /// Payload of `Rollback` and `Commit`.
    Transaction(TransactionHandle),
    /// Payload of `RunQuery`.
    Query(Query),
    /// Payload of `Next`.
    Next(NextRequest),
}

/// Result of a service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Nothing to report.
    Empty,
    /// Result of `Put`.
    Put(PutResponse),
    /// Result of `Get`.
    Get(GetResponse),
    /// Result of `AllocateIds`.
    IdRange(IdRange),
    /// Result of `BeginTransaction`.
    Transaction(TransactionHandle),
    /// Result of `Commit`.
    Commit(CommitResponse),
    /// Result of `RunQuery`.
    Query(QueryResult),
    /// A string value, such as a namespace.
    Text(String),
}

impl Response {
    /// Returns the put result, if this is one.
    #[must_use]
    pub fn into_put(self) -> Option<PutResponse> {
        match self {
            Response::Put(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the lookup result, if this is one.
    #[must_use]
    pub fn into_get(self) -> Option<GetResponse> {
        match self {
            Response::Get(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the transaction handle, if this is one.
    #[must_use]
    pub fn into_transaction(self) -> Option<TransactionHandle> {
        match self {
            Response::Transaction(handle) => Some(handle),
            _ => None,
        }
    }

    /// Returns the query result, if this is one.
    #[must_use]
    pub fn into_query(self) -> Option<QueryResult> {
        match self {
            Response::Query(result) => Some(result),
            _ => None,
        }
    }

    /// Returns the string value, if this is one.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Response::Text(text) => Some(text),
            _ => None,
        }
    }
}

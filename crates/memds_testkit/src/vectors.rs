//! Golden query vectors.
//!
//! Each vector names a fixture datastore, a query in its JSON form, and
//! either the expected `IntProp` sequence of the result or the expected
//! error variant. The table lives in `vectors/queries.json`.

use crate::fixtures::{scenarios, TestDatastore};
use memds_core::{CoreError, Query};
use serde::{Deserialize, Serialize};

const QUERY_VECTORS_JSON: &str = include_str!("../vectors/queries.json");

/// Datastore contents a vector runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fixture {
    /// [`scenarios::things`] with this many entities.
    Things(i64),
    /// [`scenarios::scrambled`].
    Scrambled,
}

impl Fixture {
    /// Builds the datastore.
    pub fn build(self) -> TestDatastore {
        match self {
            Fixture::Things(n) => scenarios::things(n),
            Fixture::Scrambled => scenarios::scrambled(),
        }
    }
}

/// A query and its expected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Datastore contents.
    pub fixture: Fixture,
    /// Query to run.
    pub query: Query,
    /// Expected `IntProp` of each result, in order.
    pub expected: Option<Vec<i64>>,
    /// Expected error variant name, if the query should fail.
    pub expected_error: Option<String>,
}

/// Outcome of running one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorOutcome {
    /// The query returned results with these `IntProp` values.
    Results(Vec<i64>),
    /// The query failed with this error variant.
    Error(&'static str),
}

impl QueryVector {
    /// Returns the outcome the vector expects.
    pub fn expected_outcome(&self) -> Option<VectorOutcome> {
        match (&self.expected, &self.expected_error) {
            (Some(seqs), None) => Some(VectorOutcome::Results(seqs.clone())),
            (None, Some(name)) => error_name(name).map(VectorOutcome::Error),
            _ => None,
        }
    }

    /// Runs the vector against a fresh fixture.
    pub fn run(&self) -> VectorOutcome {
        let ds = self.fixture.build();
        match ds.run_query(&self.query) {
            Ok(result) => VectorOutcome::Results(crate::fixtures::seqs(&result.entities)),
            Err(err) => VectorOutcome::Error(variant_name(&err)),
        }
    }
}

/// Returns the variant name of an error.
pub fn variant_name(err: &CoreError) -> &'static str {
    match err {
        CoreError::UnknownService { .. } => "UnknownService",
        CoreError::UnknownMethod { .. } => "UnknownMethod",
        CoreError::RequestMismatch { .. } => "RequestMismatch",
        CoreError::UnsupportedQuery { .. } => "UnsupportedQuery",
        CoreError::UnsupportedOperation { .. } => "UnsupportedOperation",
        CoreError::TransactionNotFound { .. } => "TransactionNotFound",
        CoreError::InvalidRequest { .. } => "InvalidRequest",
        CoreError::InvariantViolation { .. } => "InvariantViolation",
    }
}

fn error_name(name: &str) -> Option<&'static str> {
    [
        "UnknownService",
        "UnknownMethod",
        "RequestMismatch",
        "UnsupportedQuery",
        "UnsupportedOperation",
        "TransactionNotFound",
        "InvalidRequest",
        "InvariantViolation",
    ]
    .into_iter()
    .find(|known| *known == name)
}

/// Loads the golden query vectors.
pub fn query_vectors() -> Vec<QueryVector> {
    serde_json::from_str(QUERY_VECTORS_JSON).expect("query vectors are valid JSON")
}

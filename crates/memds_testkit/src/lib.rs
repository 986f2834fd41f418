//! # memds testkit
//!
//! Test utilities for memds.
//!
//! This crate provides:
//! - Fixture entities and pre-populated datastores
//! - Property-based test generators using proptest
//! - Golden query vectors loaded from JSON
//! - A tracing subscriber for test output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memds_testkit::prelude::*;
//!
//! #[test]
//! fn query_things() {
//!     let ds = scenarios::things(10);
//!     let result = ds.run_query(&Query::new(THING_KIND)).unwrap();
//!     assert_eq!(result.len(), 10);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logging;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
    pub use crate::vectors::*;
    pub use memds_core::*;
}

pub use fixtures::*;
pub use generators::*;
pub use logging::*;
pub use vectors::*;

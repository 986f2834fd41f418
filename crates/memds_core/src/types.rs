//! Core type definitions for memds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle identifying an open transaction.
///
/// Handles are monotonically increasing and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionHandle(pub u64);

impl TransactionHandle {
    /// Creates a new transaction handle.
    #[must_use]
    pub const fn new(handle: u64) -> Self {
        Self(handle)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the handle issued after this one, or `None` once the
    /// handle space is used up.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn:{}", self.0)
    }
}

/// An inclusive range of allocated numeric ids.
///
/// A range with `high < low` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    /// First id in the range.
    pub low: i64,
    /// Last id in the range (inclusive).
    pub high: i64,
}

impl IdRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Returns the number of ids in the range.
    #[must_use]
    pub const fn len(&self) -> i64 {
        if self.high < self.low {
            0
        } else {
            self.high - self.low + 1
        }
    }

    /// Returns true if the range holds no ids.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.high < self.low
    }

    /// Returns true if `id` lies within the range.
    #[must_use]
    pub const fn contains(&self, id: i64) -> bool {
        self.low <= id && id <= self.high
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

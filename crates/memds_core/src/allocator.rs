//! Numeric id allocation.

use crate::error::{CoreError, CoreResult};
use crate::types::IdRange;

/// Hands out contiguous, never reused ranges of numeric ids.
///
/// The counter is shared by every kind and ancestor.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `first`.
    #[must_use]
    pub const fn new(first: i64) -> Self {
        Self { next: first }
    }

    /// Reserves `count` ids and returns them as an inclusive range.
    ///
    /// A count of zero returns an empty range and leaves the counter alone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if `count` is negative or the counter
    /// would overflow.
    pub fn allocate(&mut self, count: i64) -> CoreResult<IdRange> {
        if count < 0 {
            return Err(CoreError::invalid_request(format!(
                "cannot allocate a negative number of ids: {count}"
            )));
        }
        let low = self.next;
        let next = low
            .checked_add(count)
            .ok_or_else(|| CoreError::invalid_request("id space exhausted"))?;
        self.next = next;
        // an empty range at i64::MIN has no id below it to end on
        Ok(match next.checked_sub(1) {
            Some(high) => IdRange::new(low, high),
            None => IdRange::new(low + 1, low),
        })
    }

    /// Reserves a single id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the id space is exhausted.
    pub fn allocate_one(&mut self) -> CoreResult<i64> {
        Ok(self.allocate(1)?.low)
    }

    /// Returns the id the next allocation will start at.
    #[must_use]
    pub const fn peek(&self) -> i64 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

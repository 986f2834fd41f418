//! Result sorting for query execution.

use crate::entity::{compare_values, Entity, Value};
use crate::error::{CoreError, CoreResult};
use crate::query::spec::{Direction, Order};
use std::cmp::Ordering;

/// Sorts query candidates.
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts entities by key, ascending.
    pub fn sort_by_key(entities: &mut [&Entity]) {
        entities.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// Sorts entities by the first value of the order property.
    ///
    /// Every entity must carry the property. Entities with equal values
    /// keep no particular relative order.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if a value is missing or two values
    /// cannot be compared. Nothing is reordered in that case.
    pub fn sort_by_property(entities: &mut [&Entity], order: &Order) -> CoreResult<()> {
        let values = entities
            .iter()
            .map(|entity| {
                entity.first_value(&order.property).ok_or_else(|| {
                    CoreError::invariant_violation(format!(
                        "entity {} has no {} property to sort on",
                        entity.key, order.property
                    ))
                })
            })
            .collect::<CoreResult<Vec<&Value>>>()?;

        if let Some(first) = values.first() {
            for value in &values {
                // self-comparison rules out NaN and unsupported kinds
                if compare_values(first, value).is_none()
                    || compare_values(value, value).is_none()
                {
                    return Err(CoreError::invariant_violation(format!(
                        "cannot sort {} values against {} values on property {}",
                        value.kind(),
                        first.kind(),
                        order.property
                    )));
                }
            }
        }

        entities.sort_by(|a, b| {
            let ordering = Self::compare(a, b, &order.property);
            match order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        Ok(())
    }

    fn compare(a: &Entity, b: &Entity, property: &str) -> Ordering {
        match (a.first_value(property), b.first_value(property)) {
            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }
}

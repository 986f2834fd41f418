//! Entity types and storage.

mod key;
mod record;
mod store;
mod value;

pub use key::{ElementId, Key, PathElement};
pub use record::{Entity, Property};
pub use store::EntityStore;
pub use value::{compare_values, Value, ValueKind};

//! Property-based test generators using proptest.
//!
//! Kinds and names are drawn from small alphabets so that generated keys
//! collide and share prefixes often enough to exercise ordering ties.

use memds_core::{ElementId, Entity, FilterOp, Key, PathElement, Value};
use proptest::prelude::*;

/// Strategy for kind names.
pub fn kind_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "Kind", "Other"]).prop_map(str::to_string)
}

/// Strategy for complete element identifiers.
pub fn element_id_strategy() -> impl Strategy<Value = ElementId> {
    prop_oneof![
        (-5i64..50).prop_map(ElementId::Id),
        "[a-c]{0,3}".prop_map(ElementId::Name),
    ]
}

/// Strategy for complete path elements.
pub fn path_element_strategy() -> impl Strategy<Value = PathElement> {
    (kind_strategy(), element_id_strategy()).prop_map(|(kind, id)| PathElement { kind, id })
}

/// Strategy for complete keys with one to three path elements.
pub fn key_strategy() -> impl Strategy<Value = Key> {
    prop::collection::vec(path_element_strategy(), 1..=3)
        .prop_map(|path| Key::from_path(path).expect("path is never empty"))
}

/// Strategy for values of one comparable kind, chosen by `tag`.
///
/// Tags: 0 = Int64, 1 = Bool, 2 = String, anything else = Double.
pub fn comparable_value_of(tag: u8) -> BoxedStrategy<Value> {
    match tag {
        0 => (-100i64..100).prop_map(Value::Int64).boxed(),
        1 => any::<bool>().prop_map(Value::Bool).boxed(),
        2 => "[a-z]{0,4}".prop_map(Value::String).boxed(),
        _ => (-100.0f64..100.0).prop_map(Value::Double).boxed(),
    }
}

/// Strategy for any comparable value.
pub fn comparable_value_strategy() -> impl Strategy<Value = Value> {
    (0u8..4).prop_flat_map(comparable_value_of)
}

/// Strategy for any value, including kinds that never compare.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => comparable_value_strategy(),
        1 => (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(lat, lng)| Value::Point { lat, lng }),
        1 => "[a-z]{1,5}".prop_map(|name| Value::User {
            email: format!("{name}@example.com"),
            auth_domain: "example.com".to_string(),
        }),
        1 => key_strategy().prop_map(Value::Reference),
    ]
}

/// Strategy for filter operators.
pub fn filter_op_strategy() -> impl Strategy<Value = FilterOp> {
    prop::sample::select(vec![
        FilterOp::Equal,
        FilterOp::LessThan,
        FilterOp::LessThanOrEqual,
        FilterOp::GreaterThan,
        FilterOp::GreaterThanOrEqual,
    ])
}

/// Strategy for batches of root-level entities of `kind` with an integer
/// `IntProp` in `0..10`.
///
/// Ids are unique within a batch.
pub fn int_entities_strategy(
    kind: &'static str,
    max: usize,
) -> impl Strategy<Value = Vec<Entity>> {
    prop::collection::btree_map(1i64..1_000, 0i64..10, 0..=max).prop_map(move |by_id| {
        by_id
            .into_iter()
            .map(|(id, value)| Entity::new(Key::with_id(kind, id)).with_property("IntProp", value))
            .collect()
    })
}

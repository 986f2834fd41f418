//! Property values and their partial order.

use crate::entity::Key;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A property value.
///
/// `Point`, `User` and `Reference` values can be stored and read back but
/// never take part in comparisons: filters on them never match, and
/// ordering on them is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Signed 64-bit integer.
    Int64(i64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    String(String),
    /// Double-precision float.
    Double(f64),
    /// Geographical point.
    Point {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
    /// User identity.
    User {
        /// Email address.
        email: String,
        /// Authentication domain.
        auth_domain: String,
    },
    /// Reference to another entity.
    Reference(Key),
}

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Int64`]
    Int64,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::String`]
    String,
    /// [`Value::Double`]
    Double,
    /// [`Value::Point`]
    Point,
    /// [`Value::User`]
    User,
    /// [`Value::Reference`]
    Reference,
}

impl ValueKind {
    /// Returns true if values of this kind can be compared.
    #[must_use]
    pub const fn is_comparable(self) -> bool {
        matches!(self, Self::Int64 | Self::Bool | Self::String | Self::Double)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Double => "double",
            Self::Point => "point",
            Self::User => "user",
            Self::Reference => "reference",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Returns the discriminant of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int64(_) => ValueKind::Int64,
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Double(_) => ValueKind::Double,
            Self::Point { .. } => ValueKind::Point,
            Self::User { .. } => ValueKind::User,
            Self::Reference(_) => ValueKind::Reference,
        }
    }

    /// Returns this value as an integer, if it is one.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns this value as a string slice, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compares two values.
    ///
    /// Returns `None` when the values carry different kinds or an
    /// unsupported kind. Callers must treat `None` as "cannot evaluate",
    /// never as equality.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        compare_values(self, other)
    }
}

/// Compares two property values.
///
/// Integers and doubles compare numerically, strings byte-wise, and
/// booleans with `false < true`. Mixed kinds, unsupported kinds and NaN
/// operands are not comparable.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Some(x.as_bytes().cmp(y.as_bytes())),
        (Value::Double(x), Value::Double(y)) => x.partial_cmp(y),
        _ => None,
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int64(i64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Double(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        Self::Reference(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_kind_comparisons() {
        assert_eq!(
            compare_values(&Value::Int64(1), &Value::Int64(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Value::Double(2.5), &Value::Double(1.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_values(&Value::from("Thing1"), &Value::from("Thing1")),
            Some(Ordering::Equal)
        );
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn extreme_integers_do_not_overflow() {
        assert_eq!(
            compare_values(&Value::Int64(i64::MIN), &Value::Int64(i64::MAX)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn strings_compare_bytewise() {
        assert_eq!(
            compare_values(&Value::from("Z"), &Value::from("a")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn mixed_kinds_are_not_comparable() {
        assert_eq!(compare_values(&Value::Int64(1), &Value::Double(1.0)), None);
        assert_eq!(compare_values(&Value::from("1"), &Value::Int64(1)), None);
        assert_eq!(compare_values(&Value::Bool(true), &Value::Int64(1)), None);
    }

    #[test]
    fn unsupported_kinds_are_not_comparable() {
        let point = Value::Point { lat: 1.0, lng: 2.0 };
        assert_eq!(compare_values(&point, &point), None);

        let user = Value::User {
            email: "a@example.com".into(),
            auth_domain: "example.com".into(),
        };
        assert_eq!(compare_values(&user, &user), None);

        let reference = Value::from(Key::with_id("Kind", 1));
        assert_eq!(compare_values(&reference, &reference), None);
        assert!(!reference.kind().is_comparable());
    }

    #[test]
    fn nan_is_not_comparable() {
        assert_eq!(
            compare_values(&Value::Double(f64::NAN), &Value::Double(1.0)),
            None
        );
    }

    fn comparable_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::Int64),
            any::<bool>().prop_map(Value::Bool),
            "[a-c]{0,3}".prop_map(Value::String),
            (-1.0e6f64..1.0e6).prop_map(Value::Double),
        ]
    }

    proptest! {
        #[test]
        fn antisymmetric(a in comparable_value(), b in comparable_value()) {
            let ab = compare_values(&a, &b);
            let ba = compare_values(&b, &a);
            prop_assert_eq!(ab, ba.map(Ordering::reverse));
            prop_assert_eq!(ab.is_some(), a.kind() == b.kind());
        }

        #[test]
        fn transitive(a in comparable_value(), b in comparable_value(), c in comparable_value()) {
            let le = |x: &Value, y: &Value| {
                matches!(compare_values(x, y), Some(Ordering::Less | Ordering::Equal))
            };
            if le(&a, &b) && le(&b, &c) {
                prop_assert!(le(&a, &c));
            }
        }
    }
}

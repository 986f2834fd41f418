//! Query specification types.

use crate::entity::{Key, Value};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a property filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    /// `=`
    Equal,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
}

impl FilterOp {
    /// Returns true if a stored value comparing `ordering` to the operand
    /// satisfies this operator.
    #[must_use]
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering == Ordering::Equal,
            Self::LessThan => ordering == Ordering::Less,
            Self::LessThanOrEqual => ordering != Ordering::Greater,
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    /// Returns true for the equality operator.
    #[must_use]
    pub fn is_equality(self) -> bool {
        self == Self::Equal
    }

    /// Returns the operator's symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for FilterOp {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "=" => Ok(Self::Equal),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessThanOrEqual),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterThanOrEqual),
            other => Err(CoreError::unsupported_query(format!(
                "filter operator {other:?}"
            ))),
        }
    }
}

/// A single property filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Property the filter applies to.
    pub property: String,
    /// Comparison operator.
    pub op: FilterOp,
    /// Operand the stored values are compared against.
    pub value: Value,
}

impl Filter {
    /// Creates a filter.
    pub fn new(property: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    /// Parses a `"Name op"` filter string such as `"IntProp >="`.
    ///
    /// Whitespace between the name and the operator is optional.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the property name is missing and
    /// `UnsupportedQuery` for an unknown operator.
    pub fn parse(spec: &str, value: impl Into<Value>) -> CoreResult<Self> {
        let spec = spec.trim();
        let split = spec
            .find(|c| matches!(c, '=' | '<' | '>'))
            .ok_or_else(|| CoreError::invalid_request(format!("missing operator in {spec:?}")))?;
        let (property, op) = spec.split_at(split);
        let property = property.trim();
        if property.is_empty() {
            return Err(CoreError::invalid_request(format!(
                "missing property name in {spec:?}"
            )));
        }
        Ok(Self::new(property, op.trim().parse()?, value))
    }

    /// Returns true if `value` satisfies this filter.
    ///
    /// Values that cannot be compared with the operand never match.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        value
            .compare(&self.value)
            .is_some_and(|ordering| self.op.accepts(ordering))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Ordering on a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Property to order by.
    pub property: String,
    /// Sort direction.
    pub direction: Direction,
}

impl Order {
    /// Creates an ascending order.
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    /// Creates a descending order.
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Descending,
        }
    }

    /// Parses a field name, a leading `-` meaning descending.
    #[must_use]
    pub fn parse(field: &str) -> Self {
        match field.strip_prefix('-') {
            Some(property) => Self::desc(property.trim()),
            None => Self::asc(field.trim()),
        }
    }
}

/// A position in a query's result order.
///
/// Resuming from a cursor continues strictly after the entity it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    /// Key of the last entity already seen.
    pub key: Key,
}

impl Cursor {
    /// Creates a cursor positioned at `key`.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cursor({})", self.key)
    }
}

/// A query over the committed entities of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Kind of the root element of matching keys.
    pub kind: String,
    /// Property filters.
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Orderings; at most one is supported.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Restrict results to this key and its descendants.
    #[serde(default)]
    pub ancestor: Option<Key>,
    /// Resume strictly after this position.
    #[serde(default)]
    pub start_cursor: Option<Cursor>,
    /// Stop at this position. Not supported.
    #[serde(default)]
    pub end_cursor: Option<Cursor>,
    /// Number of leading results to skip.
    #[serde(default)]
    pub offset: Option<i32>,
    /// Maximum number of results; negative means unlimited.
    #[serde(default)]
    pub limit: Option<i32>,
    /// Projected property names. Not supported.
    #[serde(default)]
    pub projection: Vec<String>,
    /// Group-by property names. Not supported.
    #[serde(default)]
    pub group_by: Vec<String>,
    /// Distinct results. Not supported.
    #[serde(default)]
    pub distinct: bool,
}

impl Query {
    /// Creates a query over all entities of `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            filters: Vec::new(),
            orders: Vec::new(),
            ancestor: None,
            start_cursor: None,
            end_cursor: None,
            offset: None,
            limit: None,
            projection: Vec::new(),
            group_by: Vec::new(),
            distinct: false,
        }
    }

    /// Adds a property filter.
    #[must_use]
    pub fn filter(
        mut self,
        property: impl Into<String>,
        op: FilterOp,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(Filter::new(property, op, value));
        self
    }

    /// Adds an ordering parsed from a field name (`"-Field"` is descending).
    #[must_use]
    pub fn order(mut self, field: &str) -> Self {
        self.orders.push(Order::parse(field));
        self
    }

    /// Restricts the query to `ancestor` and its descendants.
    #[must_use]
    pub fn ancestor(mut self, ancestor: Key) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    /// Resumes strictly after `cursor`.
    #[must_use]
    pub fn start(mut self, cursor: Cursor) -> Self {
        self.start_cursor = Some(cursor);
        self
    }

    /// Sets an end cursor. Execution rejects it.
    #[must_use]
    pub fn end(mut self, cursor: Cursor) -> Self {
        self.end_cursor = Some(cursor);
        self
    }

    /// Skips the first `offset` results.
    #[must_use]
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limits the number of results.
    #[must_use]
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Projects the given properties. Execution rejects it.
    #[must_use]
    pub fn project<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.projection.extend(names.into_iter().map(Into::into));
        self
    }

    /// Requests distinct results. Execution rejects it.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Returns the single ordering, if any.
    #[must_use]
    pub fn ordering(&self) -> Option<&Order> {
        self.orders.first()
    }

    /// Rejects features the engine does not implement.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedQuery` naming the first unsupported feature.
    pub fn validate(&self) -> CoreResult<()> {
        if self.end_cursor.is_some() {
            return Err(CoreError::unsupported_query("end cursor"));
        }
        if !self.projection.is_empty() {
            return Err(CoreError::unsupported_query("projection"));
        }
        if self.distinct || !self.group_by.is_empty() {
            return Err(CoreError::unsupported_query("distinct"));
        }
        if self.orders.len() > 1 {
            return Err(CoreError::unsupported_query(format!(
                "ordering on {} properties",
                self.orders.len()
            )));
        }
        Ok(())
    }
}

//! Hierarchical entity keys and their total order.
//!
//! A key is a non-empty path of elements. Every element but the last names
//! an ancestor; the last names the entity itself.
//!
//! Keys order the way the emulated datastore orders them:
//! - element by element from the root, the first difference deciding
//! - within an element, kind first (byte-wise), then identifier
//! - numeric ids precede string names among siblings of the same kind
//! - when one path is a prefix of the other, the shorter path sorts first
//!
//! The derived `Ord` impls below rely on field and variant declaration
//! order to express exactly these rules.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier carried by a single path element.
///
/// Variant order is significant: `Incomplete < Id < Name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementId {
    /// No identifier assigned yet.
    Incomplete,
    /// Numeric identifier.
    Id(i64),
    /// String identifier.
    Name(String),
}

impl ElementId {
    /// Returns true if no identifier has been assigned.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }

    /// Returns the numeric id, if any.
    #[must_use]
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the string name, if any.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// One element of a key path.
///
/// Field order is significant: kind compares before identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathElement {
    /// Kind of the entity at this level.
    pub kind: String,
    /// Identifier at this level.
    pub id: ElementId,
}

impl PathElement {
    /// Creates an element with a numeric id.
    pub fn with_id(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id: ElementId::Id(id),
        }
    }

    /// Creates an element with a string name.
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: ElementId::Name(name.into()),
        }
    }

    /// Creates an element with no identifier.
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: ElementId::Incomplete,
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            ElementId::Incomplete => write!(f, "{},?", self.kind),
            ElementId::Id(id) => write!(f, "{},{}", self.kind, id),
            ElementId::Name(name) => write!(f, "{},{:?}", self.kind, name),
        }
    }
}

/// A hierarchical entity key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathElement>", into = "Vec<PathElement>")]
pub struct Key {
    path: Vec<PathElement>,
}

impl Key {
    /// Creates a root key with a numeric id.
    pub fn with_id(kind: impl Into<String>, id: i64) -> Self {
        Self {
            path: vec![PathElement::with_id(kind, id)],
        }
    }

    /// Creates a root key with a string name.
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: vec![PathElement::with_name(kind, name)],
        }
    }

    /// Creates an incomplete root key.
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self {
            path: vec![PathElement::incomplete(kind)],
        }
    }

    /// Creates a key from a full path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the path is empty.
    pub fn from_path(path: Vec<PathElement>) -> CoreResult<Self> {
        if path.is_empty() {
            return Err(CoreError::invalid_request("key path must not be empty"));
        }
        Ok(Self { path })
    }

    /// Returns a child key with `self` as parent.
    #[must_use]
    pub fn child(&self, element: PathElement) -> Self {
        let mut path = self.path.clone();
        path.push(element);
        Self { path }
    }

    /// Returns the full path, root first.
    #[must_use]
    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> &PathElement {
        &self.path[0]
    }

    /// Returns the element naming the entity itself.
    #[must_use]
    pub fn last(&self) -> &PathElement {
        &self.path[self.path.len() - 1]
    }

    /// Returns the kind of the root element.
    #[must_use]
    pub fn root_kind(&self) -> &str {
        &self.root().kind
    }

    /// Returns the kind of the entity itself.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.last().kind
    }

    /// Returns the parent key, if this is not a root key.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.path.len() > 1 {
            Some(Self {
                path: self.path[..self.path.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// Returns the root key of this key's entity group.
    #[must_use]
    pub fn group_root(&self) -> Self {
        Self {
            path: vec![self.root().clone()],
        }
    }

    /// Returns true if the final element has no identifier.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.last().id.is_incomplete()
    }

    /// Returns true if any element before the final one lacks an id.
    #[must_use]
    pub fn has_incomplete_ancestor(&self) -> bool {
        self.path[..self.path.len() - 1]
            .iter()
            .any(|element| element.id.is_incomplete())
    }

    /// Returns true if `self` is `other` or one of its ancestors.
    ///
    /// Compares element by element with full element equality.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Key) -> bool {
        other.path.len() >= self.path.len()
            && self
                .path
                .iter()
                .zip(other.path.iter())
                .all(|(a, b)| a == b)
    }

    /// Returns a copy of this key with the final element's id replaced.
    #[must_use]
    pub(crate) fn with_last_id(&self, id: i64) -> Self {
        let mut path = self.path.clone();
        let last = path.len() - 1;
        path[last].id = ElementId::Id(id);
        Self { path }
    }
}

impl TryFrom<Vec<PathElement>> for Key {
    type Error = CoreError;

    fn try_from(path: Vec<PathElement>) -> CoreResult<Self> {
        Self::from_path(path)
    }
}

impl From<Key> for Vec<PathElement> {
    fn from(key: Key) -> Self {
        key.path
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn kind_dominates() {
        let a = Key::with_name("A", "zzz");
        let b = Key::with_id("B", 1);
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn incomplete_ancestor_detection() {
        assert!(!Key::incomplete("A").has_incomplete_ancestor());
        let child = Key::incomplete("A").child(PathElement::with_id("B", 1));
        assert!(child.has_incomplete_ancestor());
        assert!(!Key::with_id("A", 1)
            .child(PathElement::incomplete("B"))
            .has_incomplete_ancestor());
    }

    #[test]
    fn numeric_ids_precede_names() {
        let by_id = Key::with_id("Kind", i64::MAX);
        let by_name = Key::with_name("Kind", "");
        assert_eq!(by_id.cmp(&by_name), Ordering::Less);
    }

    #[test]
    fn ids_compare_numerically_and_names_bytewise() {
        assert!(Key::with_id("Kind", 2) < Key::with_id("Kind", 10));
        assert!(Key::with_name("Kind", "B") < Key::with_name("Kind", "a"));
        assert!(Key::with_name("Kind", "a") < Key::with_name("Kind", "ab"));
    }

    #[test]
    fn prefix_sorts_first() {
        let parent = Key::with_name("Kind", "G1");
        let child = parent.child(PathElement::with_name("Kind", "G1.P1"));
        let sibling = Key::with_name("Kind", "G2");
        assert!(parent < child);
        assert!(child < sibling);
    }

    #[test]
    fn ancestor_decides_before_depth() {
        let k1 = Key::with_id("Kind", 1).child(PathElement::with_id("Kind", 99));
        let k2 = Key::with_id("Kind", 2);
        assert!(k1 < k2);
    }

    #[test]
    fn prefix_relation() {
        let g1 = Key::with_name("Kind", "G1");
        let p1 = g1.child(PathElement::with_name("Kind", "P1"));
        let c1 = p1.child(PathElement::with_name("Kind", "C1"));
        assert!(g1.is_prefix_of(&c1));
        assert!(p1.is_prefix_of(&c1));
        assert!(c1.is_prefix_of(&c1));
        assert!(!c1.is_prefix_of(&p1));
        assert!(!Key::with_name("Kind", "G2").is_prefix_of(&c1));
    }

    #[test]
    fn empty_path_rejected() {
        assert!(Key::from_path(Vec::new()).is_err());
    }

    #[test]
    fn parent_and_group_root() {
        let root = Key::with_id("Parent", 1);
        let child = root.child(PathElement::with_name("Child", "c"));
        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(child.group_root(), root);
        assert_eq!(child.root_kind(), "Parent");
        assert_eq!(child.kind(), "Child");
        assert!(root.parent().is_none());
    }

    #[test]
    fn display() {
        let key = Key::with_id("A", 1).child(PathElement::with_name("B", "x"));
        assert_eq!(key.to_string(), "A,1/B,\"x\"");
    }

    fn element_strategy() -> impl Strategy<Value = PathElement> {
        let id = prop_oneof![
            Just(ElementId::Incomplete),
            (-5i64..5).prop_map(ElementId::Id),
            "[ab]{0,2}".prop_map(ElementId::Name),
        ];
        ("[AB]", id).prop_map(|(kind, id)| PathElement { kind, id })
    }

    fn key_strategy() -> impl Strategy<Value = Key> {
        prop::collection::vec(element_strategy(), 1..4)
            .prop_map(|path| Key::from_path(path).unwrap())
    }

    proptest! {
        #[test]
        fn ordering_is_antisymmetric(a in key_strategy(), b in key_strategy()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        }

        #[test]
        fn ordering_is_transitive(a in key_strategy(), b in key_strategy(), c in key_strategy()) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }
    }
}

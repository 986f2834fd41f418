//! Fixture entities and pre-populated datastores.

use memds_core::{
    Datastore, Entity, GetRequest, Key, PathElement, PutRequest, Query, QueryResult, Value,
};

/// Kind used by the fixture entities.
pub const THING_KIND: &str = "Kind";

/// Builds the fixture payload for sequence number `seq` under `key`.
///
/// Every property is derived from `seq`:
/// - `IntProp`: `seq`
/// - `StrProp`: `"Thing{seq}"`
/// - `BoolProp`: `seq` is even
/// - `DblProp`: `seq + 0.5`
pub fn thing_at(key: Key, seq: i64) -> Entity {
    Entity::new(key)
        .with_property("IntProp", seq)
        .with_property("StrProp", format!("Thing{seq}"))
        .with_property("BoolProp", seq % 2 == 0)
        .with_property("DblProp", seq as f64 + 0.5)
}

/// Builds fixture `seq` under the root key `Kind/seq`.
pub fn thing(seq: i64) -> Entity {
    thing_at(Key::with_id(THING_KIND, seq), seq)
}

/// Returns the `IntProp` of every entity in order.
pub fn seqs<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Vec<i64> {
    entities
        .into_iter()
        .filter_map(|e| e.first_value("IntProp").and_then(Value::as_int64))
        .collect()
}

/// A datastore with test helpers that panic on error.
#[derive(Debug, Default)]
pub struct TestDatastore {
    /// The datastore instance.
    pub ds: Datastore,
}

impl TestDatastore {
    /// Creates an empty datastore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entities` outside any transaction and returns their keys.
    pub fn put_all(&self, entities: Vec<Entity>) -> Vec<Key> {
        self.ds
            .put(PutRequest::new(entities))
            .expect("put failed")
            .keys
    }

    /// Returns the committed entity under `key`.
    pub fn get_one(&self, key: &Key) -> Option<Entity> {
        self.ds
            .get(GetRequest::new(vec![key.clone()]))
            .results
            .pop()
            .and_then(|r| r.entity)
    }

    /// Runs `query` and panics on error.
    pub fn query(&self, query: &Query) -> QueryResult {
        self.ds.run_query(query).expect("query failed")
    }

    /// Runs `query` and returns the `IntProp` of each result.
    pub fn query_seqs(&self, query: &Query) -> Vec<i64> {
        seqs(&self.query(query).entities)
    }
}

impl std::ops::Deref for TestDatastore {
    type Target = Datastore;

    fn deref(&self) -> &Self::Target {
        &self.ds
    }
}

/// Runs a test against a fresh datastore.
pub fn with_datastore<F, R>(f: F) -> R
where
    F: FnOnce(&TestDatastore) -> R,
{
    let ds = TestDatastore::new();
    f(&ds)
}

/// Pre-populated datastores.
pub mod scenarios {
    use super::*;

    /// Fixtures `1..=n` under keys `Kind/1..=n`.
    pub fn things(n: i64) -> TestDatastore {
        let ds = TestDatastore::new();
        ds.put_all((1..=n).map(thing).collect());
        ds
    }

    /// Fixtures 1 to 5 under key ids chosen so that key order differs from
    /// payload order.
    ///
    /// Key order is ids 1..=5 holding fixtures 3, 5, 4, 1, 2.
    pub fn scrambled() -> TestDatastore {
        let ds = TestDatastore::new();
        let placed = [(1, 3), (4, 1), (2, 5), (5, 2), (3, 4)];
        ds.put_all(
            placed
                .into_iter()
                .map(|(id, seq)| thing_at(Key::with_id(THING_KIND, id), seq))
                .collect(),
        );
        ds
    }

    /// Named keys of the ancestor tree.
    #[derive(Debug, Clone)]
    pub struct Tree {
        /// `G1`
        pub g1: Key,
        /// `G1/G1.P1`
        pub g1p1: Key,
        /// `G1/G1.P1/G1.P1.C1`
        pub g1p1c1: Key,
        /// `G1/G1.P1/G1.P1.C2`
        pub g1p1c2: Key,
        /// `G1/G1.P2`
        pub g1p2: Key,
        /// `G1/G1.P2/G1.P2.C1`
        pub g1p2c1: Key,
        /// `G2`
        pub g2: Key,
        /// `G2/G2.P1`
        pub g2p1: Key,
    }

    impl Tree {
        /// Every key, in key order.
        pub fn all(&self) -> Vec<Key> {
            vec![
                self.g1.clone(),
                self.g1p1.clone(),
                self.g1p1c1.clone(),
                self.g1p1c2.clone(),
                self.g1p2.clone(),
                self.g1p2c1.clone(),
                self.g2.clone(),
                self.g2p1.clone(),
            ]
        }
    }

    /// Two entity groups of named keys, each entity holding its own name
    /// in `StrProp`.
    pub fn ancestor_tree() -> (TestDatastore, Tree) {
        let named = |parent: Option<&Key>, name: &str| match parent {
            Some(parent) => parent.child(PathElement::with_name(THING_KIND, name)),
            None => Key::with_name(THING_KIND, name),
        };
        let g1 = named(None, "G1");
        let g1p1 = named(Some(&g1), "G1.P1");
        let g1p2 = named(Some(&g1), "G1.P2");
        let g2 = named(None, "G2");
        let tree = Tree {
            g1p1c1: named(Some(&g1p1), "G1.P1.C1"),
            g1p1c2: named(Some(&g1p1), "G1.P1.C2"),
            g1p2c1: named(Some(&g1p2), "G1.P2.C1"),
            g2p1: named(Some(&g2), "G2.P1"),
            g1,
            g1p1,
            g1p2,
            g2,
        };

        let ds = TestDatastore::new();
        ds.put_all(
            tree.all()
                .into_iter()
                .map(|key| {
                    let name = key.last().id.as_name().unwrap_or_default().to_string();
                    Entity::new(key).with_property("StrProp", name)
                })
                .collect(),
        );
        (ds, tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thing_properties() {
        let e = thing(4);
        assert_eq!(e.first_value("IntProp"), Some(&Value::Int64(4)));
        assert_eq!(e.first_value("StrProp"), Some(&Value::from("Thing4")));
        assert_eq!(e.first_value("BoolProp"), Some(&Value::Bool(true)));
        assert_eq!(e.first_value("DblProp"), Some(&Value::Double(4.5)));
    }

    #[test]
    fn scrambled_key_order() {
        let ds = scenarios::scrambled();
        assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![3, 5, 4, 1, 2]);
    }

    #[test]
    fn tree_is_populated() {
        let (ds, tree) = scenarios::ancestor_tree();
        assert_eq!(ds.entity_count(), 8);
        assert!(ds.get_one(&tree.g2p1).is_some());
    }
}

//! Committed entity storage.

use crate::entity::{Entity, Key};
use std::collections::BTreeMap;

/// Holds the committed entities of a datastore.
///
/// Entities are keyed by their full key, so iteration yields them in key
/// order. The store itself is not synchronized; the owning datastore
/// guards it together with the open transactions.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    entities: BTreeMap<Key, Entity>,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entity stored under its key.
    pub fn put(&mut self, entity: Entity) {
        self.entities.insert(entity.key.clone(), entity);
    }

    /// Returns the entity stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Removes the entity stored under `key`.
    ///
    /// Removing a missing key is a no-op.
    pub fn delete(&mut self, key: &Key) -> Option<Entity> {
        self.entities.remove(key)
    }

    /// Returns true if an entity is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.entities.contains_key(key)
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over all entities in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterates over the entities whose root element has the given kind.
    pub fn iter_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities
            .values()
            .filter(move |entity| entity.key.root_kind() == kind)
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{PathElement, Value};

    #[test]
    fn put_get_roundtrip() {
        let mut store = EntityStore::new();
        let entity = Entity::new(Key::with_id("Kind1", 1)).with_property("IntProp", 1);
        store.put(entity.clone());

        assert_eq!(store.get(&entity.key), Some(&entity));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_overwrites_previous() {
        let mut store = EntityStore::new();
        let key = Key::with_id("Kind", 1);
        store.put(Entity::new(key.clone()).with_property("IntProp", 1));
        store.put(Entity::new(key.clone()).with_property("IntProp", 2));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&key).and_then(|e| e.first_value("IntProp")),
            Some(&Value::Int64(2))
        );
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut store = EntityStore::new();
        let key = Key::with_id("Kind", 1);
        assert!(store.delete(&key).is_none());

        store.put(Entity::new(key.clone()));
        assert!(store.delete(&key).is_some());
        assert!(!store.contains(&key));
        assert!(store.delete(&key).is_none());
    }

    #[test]
    fn same_element_under_different_parents_are_distinct() {
        let mut store = EntityStore::new();
        let k1 = Key::with_id("Kind1", 1).child(PathElement::with_id("Kind1", 1));
        let k2 = Key::with_id("Kind2", 1).child(PathElement::with_id("Kind1", 1));
        store.put(Entity::new(k1.clone()).with_property("IntProp", 1));
        store.put(Entity::new(k2.clone()).with_property("IntProp", 2));

        assert_eq!(store.len(), 2);
        assert_ne!(store.get(&k1), store.get(&k2));
    }

    #[test]
    fn iteration_follows_key_order() {
        let mut store = EntityStore::new();
        for id in [5, 1, 3] {
            store.put(Entity::new(Key::with_id("Kind", id)));
        }
        store.put(Entity::new(Key::with_name("Kind", "a")));
        store.put(Entity::new(Key::with_id("Other", 2)));

        let keys: Vec<_> = store.iter_kind("Kind").map(|e| e.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                Key::with_id("Kind", 1),
                Key::with_id("Kind", 3),
                Key::with_id("Kind", 5),
                Key::with_name("Kind", "a"),
            ]
        );
    }
}

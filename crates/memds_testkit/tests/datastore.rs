//! Put, get, delete and id allocation through the public API.

use memds_testkit::prelude::*;

#[test]
fn empty_batches() {
    with_datastore(|ds| {
        assert!(ds.put_all(Vec::new()).is_empty());
        assert!(ds.get(GetRequest::new(Vec::new())).results.is_empty());
        ds.delete(DeleteRequest::new(Vec::new())).unwrap();
    });
}

#[test]
fn multiple_kinds_and_id_types() {
    with_datastore(|ds| {
        let keys = vec![
            Key::with_id("Kind1", 1),
            Key::with_id("Kind2", 1),
            Key::with_name("Kind3", "name"),
        ];
        let entities: Vec<_> = keys
            .iter()
            .zip(1..)
            .map(|(key, seq)| thing_at(key.clone(), seq))
            .collect();
        assert_eq!(ds.put_all(entities.clone()), keys);

        let response = ds.get(GetRequest::new(keys));
        let found: Vec<_> = response.found().cloned().collect();
        assert_eq!(found, entities);
    });
}

#[test]
fn missing_entity_is_reported_in_place() {
    with_datastore(|ds| {
        ds.put_all(vec![thing_at(Key::with_id("Kind1", 1), 1)]);
        let response = ds.get(GetRequest::new(vec![
            Key::with_id("Kind1", 1),
            Key::with_id("Kind2", 1),
        ]));
        assert_eq!(seqs(response.found()), vec![1]);
        assert!(response.results[1].entity.is_none());
    });
}

#[test]
fn same_leaf_under_different_parents() {
    with_datastore(|ds| {
        let a = Key::with_id("Kind1", 1).child(PathElement::with_id("Kind1", 1));
        let b = Key::with_id("Kind2", 1).child(PathElement::with_id("Kind1", 1));
        ds.put_all(vec![thing_at(a.clone(), 1), thing_at(b.clone(), 2)]);
        assert_eq!(seqs(ds.get_one(&a).iter()), vec![1]);
        assert_eq!(seqs(ds.get_one(&b).iter()), vec![2]);
    });
}

#[test]
fn delete_then_get() {
    let ds = scenarios::things(3);
    ds.delete(DeleteRequest::new(vec![Key::with_id(THING_KIND, 2)]))
        .unwrap();
    let response = ds.get(GetRequest::new(
        (1..=3).map(|i| Key::with_id(THING_KIND, i)).collect(),
    ));
    assert_eq!(seqs(response.found()), vec![1, 3]);
}

#[test]
fn delete_is_idempotent() {
    let ds = scenarios::things(1);
    let req = DeleteRequest::new(vec![Key::with_id(THING_KIND, 1)]);
    ds.delete(req.clone()).unwrap();
    ds.delete(req).unwrap();
    assert_eq!(ds.entity_count(), 0);
}

#[test]
fn allocated_ranges_never_overlap() {
    with_datastore(|ds| {
        let mut next = 1;
        for size in [1, 10, 3, 0, 7] {
            let range = ds.allocate_ids(AllocateIdsRequest { size }).unwrap();
            assert_eq!(range.low, next);
            assert_eq!(range.len(), size);
            next += size;
        }
    });
}

#[test]
fn incomplete_keys_share_the_counter() {
    with_datastore(|ds| {
        let range = ds.allocate_ids(AllocateIdsRequest { size: 5 }).unwrap();
        let keys = ds.put_all(vec![
            Entity::new(Key::incomplete("A")),
            Entity::new(Key::incomplete("B")),
        ]);
        assert_eq!(keys, vec![Key::with_id("A", 6), Key::with_id("B", 7)]);
        assert!(!range.contains(6));
        assert!(keys.iter().all(|k| ds.contains(k)));
    });
}

#[test]
fn unsupported_values_round_trip() {
    with_datastore(|ds| {
        let key = Key::with_id(THING_KIND, 1);
        let entity = Entity::new(key.clone())
            .with_property("Where", Value::Point { lat: 1.5, lng: -2.0 })
            .with_property(
                "Who",
                Value::User {
                    email: "a@example.com".into(),
                    auth_domain: "example.com".into(),
                },
            )
            .with_property("Ref", Key::with_name("Other", "x"));
        ds.put_all(vec![entity.clone()]);
        assert_eq!(ds.get_one(&key), Some(entity));
    });
}

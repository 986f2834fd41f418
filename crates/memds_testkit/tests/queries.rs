//! Query behavior against fixture datastores.

use memds_testkit::prelude::*;

#[test]
fn golden_query_vectors() {
    init_test_logging();
    for vector in query_vectors() {
        let expected = vector
            .expected_outcome()
            .unwrap_or_else(|| panic!("vector {} has no expectation", vector.id));
        assert_eq!(vector.run(), expected, "{}: {}", vector.id, vector.description);
    }
}

#[test]
fn limit_sweep() {
    let ds = scenarios::things(20);
    for limit in (5..=25).step_by(5) {
        let got = ds.query(&Query::new(THING_KIND).limit(limit));
        assert_eq!(got.len(), usize::try_from(limit.min(20)).unwrap());
    }
}

#[test]
fn offset_sweep() {
    let ds = scenarios::things(5);
    for offset in 0..5 {
        let expected: Vec<i64> = (i64::from(offset) + 1..=5).collect();
        assert_eq!(
            ds.query_seqs(&Query::new(THING_KIND).offset(offset)),
            expected
        );
    }
}

#[test]
fn boolean_order() {
    let ds = TestDatastore::new();
    ds.put_all(vec![
        thing_at(Key::with_id(THING_KIND, 1), 1).with_property("Flag", true),
        thing_at(Key::with_id(THING_KIND, 2), 2).with_property("Flag", false),
    ]);
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND).order("Flag")), vec![2, 1]);
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND).order("-Flag")), vec![1, 2]);
}

#[test]
fn stepping_with_cursors_visits_every_entity_once() {
    let ds = scenarios::things(5);
    let mut cursor = None;
    let mut seen = Vec::new();
    loop {
        let mut query = Query::new(THING_KIND).limit(1);
        if let Some(cursor) = cursor.take() {
            query = query.start(cursor);
        }
        let result = ds.query(&query);
        if result.is_empty() {
            break;
        }
        seen.extend(seqs(&result.entities));
        cursor = result.cursor;
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn cursor_after_offset_only_is_last_skipped() {
    let ds = scenarios::things(3);
    let result = ds.query(&Query::new(THING_KIND).offset(2).limit(0));
    assert!(result.is_empty());
    assert_eq!(result.cursor, Some(Cursor::new(Key::with_id(THING_KIND, 2))));
    assert!(!result.more_results);
}

#[test]
fn ancestor_queries() {
    let (ds, tree) = scenarios::ancestor_tree();
    let names = |ancestor: &Key| -> Vec<Key> {
        ds.query(&Query::new(THING_KIND).ancestor(ancestor.clone()))
            .keys()
    };

    assert_eq!(names(&tree.g1p1c1), vec![tree.g1p1c1.clone()]);
    assert_eq!(names(&tree.g2p1), vec![tree.g2p1.clone()]);
    assert_eq!(
        names(&tree.g1p1),
        vec![tree.g1p1.clone(), tree.g1p1c1.clone(), tree.g1p1c2.clone()]
    );
    assert_eq!(names(&tree.g1p2), vec![tree.g1p2.clone(), tree.g1p2c1.clone()]);
    assert_eq!(names(&tree.g2), vec![tree.g2.clone(), tree.g2p1.clone()]);
    assert_eq!(names(&tree.g1), tree.all()[..6].to_vec());
}

#[test]
fn ancestor_with_filter_and_order() {
    let (ds, tree) = scenarios::ancestor_tree();
    let query = Query::new(THING_KIND)
        .ancestor(tree.g1.clone())
        .filter("StrProp", FilterOp::GreaterThanOrEqual, "G1.P2")
        .order("-StrProp");
    assert_eq!(
        ds.query(&query).keys(),
        vec![tree.g1p2c1.clone(), tree.g1p2.clone()]
    );
}

#[test]
fn entities_without_group_ignore_ancestor_queries() {
    let ds = TestDatastore::new();
    let key = Key::with_id(THING_KIND, 1);
    ds.put_all(vec![thing_at(key.clone(), 1).with_entity_group(None)]);
    assert!(ds.query(&Query::new(THING_KIND).ancestor(key)).is_empty());
    assert_eq!(ds.query(&Query::new(THING_KIND)).len(), 1);
}

#[test]
fn list_properties() {
    let ds = TestDatastore::new();
    ds.put_all(vec![
        thing(1).with_list("Tags", [1i64, 7]),
        thing(2).with_list("Tags", [99i64]),
        thing(3).with_list("Tags", [2i64, 3]),
    ]);

    let any_of = Query::new(THING_KIND)
        .filter("Tags", FilterOp::Equal, 7)
        .filter("Tags", FilterOp::Equal, 99);
    assert_eq!(ds.query_seqs(&any_of), vec![1, 2]);

    let thing2_only = Query::new(THING_KIND).filter("Tags", FilterOp::Equal, 99);
    assert_eq!(ds.query_seqs(&thing2_only), vec![2]);

    let bounds = Query::new(THING_KIND)
        .filter("Tags", FilterOp::GreaterThan, 2)
        .filter("Tags", FilterOp::LessThan, 3);
    assert_eq!(ds.query_seqs(&bounds), vec![1, 3]);
}

#[test]
fn sorting_mixed_types_is_an_internal_error() {
    let ds = TestDatastore::new();
    ds.put_all(vec![
        Entity::new(Key::with_id(THING_KIND, 1)).with_property("P", 1),
        Entity::new(Key::with_id(THING_KIND, 2)).with_property("P", "one"),
    ]);
    let err = ds.run_query(&Query::new(THING_KIND).order("P")).unwrap_err();
    assert!(err.is_internal());

    // filtering the same data is not an error
    let filtered = ds.query(&Query::new(THING_KIND).filter("P", FilterOp::Equal, 1));
    assert_eq!(filtered.len(), 1);
}

#[test]
fn next_is_unsupported() {
    let ds = scenarios::things(1);
    assert!(matches!(
        ds.next(&NextRequest::default()),
        Err(CoreError::UnsupportedOperation { .. })
    ));
}

//! Transaction staging, commit, rollback and isolation.

use memds_testkit::prelude::*;

fn put_in(ds: &Datastore, txn: TransactionHandle, entities: Vec<Entity>) {
    ds.put(PutRequest::new(entities).in_transaction(txn))
        .unwrap();
}

#[test]
fn rollback_reverts_puts_and_deletes() {
    let ds = scenarios::things(2);
    let txn = ds.begin_transaction().unwrap();
    put_in(&ds, txn, vec![thing(3)]);
    ds.delete(DeleteRequest::new(vec![Key::with_id(THING_KIND, 1)]).in_transaction(txn))
        .unwrap();
    ds.rollback(txn);

    assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![1, 2]);
    assert_eq!(ds.open_transactions(), 0);
}

#[test]
fn commit_applies_puts_and_deletes() {
    let ds = scenarios::things(2);
    let txn = ds.begin_transaction().unwrap();
    put_in(&ds, txn, vec![thing(3), thing_at(Key::with_id(THING_KIND, 2), 20)]);
    ds.delete(DeleteRequest::new(vec![Key::with_id(THING_KIND, 1)]).in_transaction(txn))
        .unwrap();

    let applied = ds.commit(txn).unwrap().applied;
    assert_eq!(applied, 3);
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![20, 3]);
}

#[test]
fn put_then_delete_in_one_transaction_deletes() {
    let ds = scenarios::things(1);
    let txn = ds.begin_transaction().unwrap();
    put_in(&ds, txn, vec![thing(1).with_property("Extra", 1)]);
    ds.delete(DeleteRequest::new(vec![Key::with_id(THING_KIND, 1)]).in_transaction(txn))
        .unwrap();
    ds.commit(txn).unwrap();
    assert_eq!(ds.entity_count(), 0);
}

#[test]
fn transactions_are_isolated_from_each_other() {
    let ds = TestDatastore::new();
    let a = ds.begin_transaction().unwrap();
    let b = ds.begin_transaction().unwrap();
    put_in(&ds, a, vec![thing(1)]);
    put_in(&ds, b, vec![thing(2)]);

    ds.commit(a).unwrap();
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![1]);

    ds.rollback(b);
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![1]);
}

#[test]
fn reads_never_see_staged_writes() {
    let ds = scenarios::things(1);
    let txn = ds.begin_transaction().unwrap();
    put_in(&ds, txn, vec![thing_at(Key::with_id(THING_KIND, 1), 100), thing(2)]);

    let key = Key::with_id(THING_KIND, 1);
    let in_txn = ds.get(GetRequest::new(vec![key.clone()]).in_transaction(txn));
    assert_eq!(seqs(in_txn.found()), vec![1]);
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![1]);
}

#[test]
fn last_commit_wins() {
    let ds = TestDatastore::new();
    let a = ds.begin_transaction().unwrap();
    let b = ds.begin_transaction().unwrap();
    put_in(&ds, a, vec![thing_at(Key::with_id(THING_KIND, 1), 10)]);
    put_in(&ds, b, vec![thing_at(Key::with_id(THING_KIND, 1), 20)]);
    ds.commit(b).unwrap();
    ds.commit(a).unwrap();
    assert_eq!(ds.query_seqs(&Query::new(THING_KIND)), vec![10]);
}

#[test]
fn finished_handles_are_rejected() {
    let ds = TestDatastore::new();
    let txn = ds.begin_transaction().unwrap();
    ds.commit(txn).unwrap();

    assert_eq!(ds.commit(txn), Err(CoreError::transaction_not_found(txn)));
    assert!(ds.put(PutRequest::new(vec![thing(1)]).in_transaction(txn)).is_err());
    ds.rollback(txn);
    assert_eq!(ds.entity_count(), 0);
}

#[test]
fn concurrent_commits_are_atomic() {
    use std::sync::Arc;
    use std::thread;

    let ds = Arc::new(Datastore::new());
    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let ds = Arc::clone(&ds);
            thread::spawn(move || {
                for round in 0..25 {
                    let txn = ds.begin_transaction().unwrap();
                    let base = worker * 1_000 + round * 10;
                    let batch = (base..base + 10).map(thing).collect();
                    ds.put(PutRequest::new(batch).in_transaction(txn)).unwrap();
                    ds.commit(txn).unwrap();
                }
            })
        })
        .collect();

    // every observed snapshot holds whole transactions only
    for _ in 0..50 {
        let count = ds.run_query(&Query::new(THING_KIND)).unwrap().len();
        assert_eq!(count % 10, 0);
    }
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(ds.entity_count(), 4 * 25 * 10);
}

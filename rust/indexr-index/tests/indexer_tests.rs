use std::collections::HashSet;

use indexr_collections::{Collection, Record, Value};
use indexr_index::{Descriptor, IndexedView, KeySource, index, multi_bucket};
use indexr_testkit::{
    data_gen::{generate_keyed_tasks, generate_task_sequence},
    fixtures::{reference_collection, reference_item},
};
use serde_json::json;

fn keyed(entries: &[(&str, &str)]) -> Collection {
    Collection::keyed(
        entries
            .iter()
            .map(|(key, id)| (Value::from(*key), reference_item(id))),
    )
}

fn identity_keys(collection: &Collection) -> Vec<Value> {
    collection.entries().filter_map(|(key, _)| key.cloned()).collect()
}

#[test]
fn test_index_reference_by_field() {
    let result = index(&reference_collection(), &"key1".into());
    let expected = IndexedView::from_groups([
        (Value::from("a"), keyed(&[("id1", "id1"), ("id2", "id2")])),
        (Value::from("b"), keyed(&[("id3", "id3")])),
    ]);
    assert_eq!(result, expected);
}

#[test]
fn test_index_reference_by_sequence() {
    let result = index(&reference_collection(), &["key1", "key2", "key3"].into());
    let items = |id: &str| reference_item(id).to_json();
    assert_eq!(
        result.to_json(),
        json!({
            "a": {
                "b": {
                    "c": { "id1": items("id1") },
                    "d": { "id2": items("id2") },
                },
            },
            "b": {
                "a": {
                    "c": { "id3": items("id3") },
                },
            },
        })
    );
    assert_eq!(result.depth(), 3);
}

#[test]
fn test_field_index_partitions_exactly() {
    for seed in [7, 42, 2985745485] {
        let tasks = generate_keyed_tasks(500, seed);
        let view = index(&tasks, &"owner".into());

        let mut seen = HashSet::new();
        for (key, group) in view.as_groups().expect("groups") {
            let leaf = group.as_leaf().expect("leaf");
            for (id, record) in leaf.entries() {
                assert_eq!(record.get("owner"), key);
                assert!(seen.insert(id.cloned()), "record filed twice: {id:?}");
                assert!(record.ptr_eq(tasks.get(id.expect("keyed")).expect("source record")));
            }
        }
        assert_eq!(seen.len(), tasks.len());
    }
}

#[test]
fn test_group_contents_keep_source_order() {
    let tasks = generate_keyed_tasks(200, 11);
    let view = index(&tasks, &Descriptor::key_fn(|r| r.get("state").clone()));
    let source_order = identity_keys(&tasks);
    for leaf in view.leaves() {
        let keys = identity_keys(leaf);
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| source_order.iter().position(|s| s == k).expect("present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_sequence_equals_recursive_reindex() {
    let tasks = generate_task_sequence(300, 5);
    let levels = ["project", "state", "priority"];
    let nested = index(&tasks, &levels.into());

    let top = index(&tasks, &levels[0].into());
    let manual = top.map_leaves(&mut |group| index(group, &levels[1..].to_vec().into()));
    assert_eq!(nested, manual);
    assert_eq!(nested.record_count(), tasks.len());
}

#[test]
fn test_empty_sequence_returns_input() {
    let tasks = generate_keyed_tasks(10, 1);
    let view = index(&tasks, &Descriptor::sequence(Vec::<Descriptor>::new()));
    assert!(view.as_leaf().is_some_and(|leaf| leaf.ptr_eq(&tasks)));
}

#[test]
fn test_multi_bucket_membership() {
    let tasks = generate_keyed_tasks(400, 99);
    let view = index(&tasks, &multi_bucket("tags").into());
    for (id, record) in tasks.entries() {
        let tags: HashSet<&Value> = record.get("tags").keys().collect();
        for (bucket, group) in view.as_groups().expect("groups") {
            let leaf = group.as_leaf().expect("leaf");
            assert_eq!(
                leaf.get(id.expect("keyed")).is_some(),
                tags.contains(bucket),
                "bucket {bucket:?}, record {id:?}"
            );
        }
    }
}

#[test]
fn test_multi_bucket_sequence_counts_duplicates() {
    let tasks = generate_task_sequence(400, 3);
    let view = index(&tasks, &multi_bucket("tags").into());
    let total_keys: usize = tasks.records().map(|r| r.get("tags").keys().count()).sum();
    assert_eq!(view.record_count(), total_keys);
}

#[test]
fn test_multi_bucket_empty_and_two_keys() {
    let collection = Collection::keyed([
        ("none", Record::from_iter([("keys", Value::from(Vec::<&str>::new()))])),
        ("both", Record::from_iter([("keys", Value::from(vec!["x", "y"]))])),
    ]);
    let strategy = multi_bucket(KeySource::function(|r| r.get("keys").keys().cloned().collect()));
    let view = index(&collection, &strategy.into());
    assert_eq!(view.keys().cloned().collect::<Vec<_>>(), vec![Value::from("x"), Value::from("y")]);
    for bucket in ["x", "y"] {
        let leaf = view.get(&bucket.into()).and_then(IndexedView::as_leaf).expect("bucket");
        assert_eq!(identity_keys(leaf), vec![Value::from("both")]);
    }
}

#[test]
fn test_groups_by_nested_object_fields() {
    let people = Collection::from_json(&json!({
        "p1": { "address": { "city": "Oslo", "zip": "0150" } },
        "p2": { "address": { "zip": "0150", "city": "Oslo" } },
        "p3": { "address": { "city": "Bergen", "zip": "5003" } },
        "p4": { "name": "no address" },
    }))
    .expect("valid people");

    let by_address = index(&people, &"address".into());
    assert_eq!(by_address.keys().count(), 3);
    let oslo = by_address
        .get(people.get(&"p2".into()).expect("p2").get("address"))
        .and_then(IndexedView::as_leaf)
        .expect("oslo");
    assert_eq!(identity_keys(oslo), vec![Value::from("p1"), Value::from("p2")]);
    assert!(by_address.get(&Value::Absent).is_some());

    let by_city = index(&people, &Descriptor::key_fn(|r| r.get("address").member("city").clone()));
    assert_eq!(
        by_city.keys().cloned().collect::<Vec<_>>(),
        vec![Value::from("Oslo"), Value::from("Bergen"), Value::Absent]
    );
}

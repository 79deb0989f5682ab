use indexr_collections::Collection;

use crate::{descriptor::Descriptor, view::IndexedView};

/// Groups `collection` according to `descriptor`.
///
/// Grouping never alters record values. Groups appear in order of the first
/// record carrying their key and each group keeps the source order of its
/// records. Records lacking a field are grouped under `Value::Absent`.
///
/// A sequence descriptor groups by its first element and then indexes every
/// leaf of that result with the remaining elements, so levels may mix field,
/// function and multi-bucket grouping. An empty sequence returns the
/// collection unchanged as a leaf.
pub fn index(collection: &Collection, descriptor: &Descriptor) -> IndexedView {
    match descriptor {
        Descriptor::MultiBucket(strategy) => strategy.group(collection),
        Descriptor::KeyFn(key_fn) => IndexedView::from_groups(collection.group_by(|r| key_fn(r))),
        Descriptor::Field(field) => {
            IndexedView::from_groups(collection.group_by(|r| r.get(field).clone()))
        }
        Descriptor::Sequence(levels) => index_levels(collection, levels),
    }
}

fn index_levels(collection: &Collection, levels: &[Descriptor]) -> IndexedView {
    match levels {
        [] => IndexedView::Leaf(collection.clone()),
        [last] => index(collection, last),
        [first, rest @ ..] => {
            index(collection, first).map_leaves(&mut |group| index_levels(group, rest))
        }
    }
}

#[cfg(test)]
mod tests {
    use indexr_collections::{Record, Value};

    use super::*;
    use crate::multi_bucket::multi_bucket;

    fn tasks() -> Collection {
        Collection::keyed([
            ("t1", Record::from_iter([("owner", Value::from("ann")), ("tags", vec!["ui"].into())])),
            ("t2", Record::from_iter([("owner", Value::from("bob")), ("tags", vec!["ui", "db"].into())])),
            ("t3", Record::from_iter([("tags", Value::from(vec!["db"]))])),
        ])
    }

    #[test]
    fn test_missing_field_groups_under_absent() {
        let view = index(&tasks(), &"owner".into());
        assert_eq!(
            view.keys().cloned().collect::<Vec<_>>(),
            vec![Value::from("ann"), Value::from("bob"), Value::Absent]
        );
        let absent = view.get(&Value::Absent).and_then(IndexedView::as_leaf).expect("absent");
        assert!(absent.get(&"t3".into()).is_some());
    }

    #[test]
    fn test_empty_sequence_is_identity() {
        let collection = tasks();
        let view = index(&collection, &Descriptor::sequence(Vec::<Descriptor>::new()));
        let leaf = view.as_leaf().expect("leaf");
        assert!(leaf.ptr_eq(&collection));
    }

    #[test]
    fn test_mixed_levels() {
        let descriptor = Descriptor::sequence([
            Descriptor::from(multi_bucket("tags")),
            Descriptor::key_fn(|r| Value::from(r.contains("owner"))),
        ]);
        let view = index(&tasks(), &descriptor);
        assert_eq!(view.depth(), 2);
        let path = [Value::from("db"), Value::from(true)];
        let leaf = view.get_in(&path).and_then(IndexedView::as_leaf).expect("leaf");
        assert_eq!(
            leaf.entries().map(|(k, _)| k.cloned()).collect::<Vec<_>>(),
            vec![Some(Value::from("t2"))]
        );
        assert_eq!(view.record_count(), 4);
    }

    #[test]
    fn test_nested_sequence_flattens() {
        let nested = Descriptor::sequence([Descriptor::from(["tags", "owner"]), Descriptor::from("tags")]);
        let flat = Descriptor::from(["tags", "owner", "tags"]);
        assert_eq!(index(&tasks(), &nested), index(&tasks(), &flat));
    }
}

//! Small hand-written collections with known groupings.

use indexr_collections::{Collection, Record};
use serde_json::json;

/// JSON of the three-record reference collection.
///
/// | id  | key1 | key2 | key3 |
/// |-----|------|------|------|
/// | id1 | a    | b    | c    |
/// | id2 | a    | b    | d    |
/// | id3 | b    | a    | c    |
pub fn reference_json() -> serde_json::Value {
    json!({
        "id1": { "id": "id1", "key1": "a", "key2": "b", "key3": "c" },
        "id2": { "id": "id2", "key1": "a", "key2": "b", "key3": "d" },
        "id3": { "id": "id3", "key1": "b", "key2": "a", "key3": "c" },
    })
}

/// The reference collection, keyed by `id`.
pub fn reference_collection() -> Collection {
    Collection::from_json(&reference_json()).expect("reference fixture is valid")
}

/// A single record of the reference collection (`"id1"`, `"id2"` or `"id3"`).
pub fn reference_item(id: &str) -> Record {
    Record::from_json(&reference_json()[id]).expect("reference fixture is valid")
}

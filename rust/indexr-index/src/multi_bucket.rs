//! Multi-bucket grouping: one record may be filed under many keys.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use indexr_collections::{Collection, CollectionBuilder, Record, Value};

use crate::view::IndexedView;

/// A function returning every key a record should be filed under.
pub type KeysFn = Arc<dyn Fn(&Record) -> Vec<Value> + Send + Sync>;

/// Where a multi-bucket strategy reads each record's keys from.
#[derive(Clone)]
pub enum KeySource {
    /// Read keys from a field: a list field yields its elements, an absent
    /// field yields no keys and any other value is a single key.
    Field(Arc<str>),
    /// Compute keys with a function.
    Function(KeysFn),
}

impl KeySource {
    pub fn field(name: impl Into<Arc<str>>) -> KeySource {
        KeySource::Field(name.into())
    }

    pub fn function<F>(f: F) -> KeySource
    where
        F: Fn(&Record) -> Vec<Value> + Send + Sync + 'static,
    {
        KeySource::Function(Arc::new(f))
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Field(name) => write!(f, "{name:?}"),
            KeySource::Function(_) => f.write_str("<fn>"),
        }
    }
}

impl From<&str> for KeySource {
    fn from(name: &str) -> Self {
        KeySource::field(name)
    }
}

impl From<String> for KeySource {
    fn from(name: String) -> Self {
        KeySource::field(name)
    }
}

impl From<KeysFn> for KeySource {
    fn from(f: KeysFn) -> Self {
        KeySource::Function(f)
    }
}

/// Grouping strategy that files each record under every key of its
/// [`KeySource`].
///
/// For a keyed collection each bucket is a keyed collection holding the
/// record under its original identity key, so a key repeated for the same
/// record files it once. For a sequence each bucket is a sequence and a
/// repeated key appends the record again.
#[derive(Clone)]
pub struct MultiBucket {
    source: KeySource,
}

/// Builds a multi-bucket strategy over a field name or a keys function.
///
/// ```
/// use indexr_collections::{Collection, Record, Value};
/// use indexr_index::{KeySource, multi_bucket};
///
/// let by_initial = multi_bucket(KeySource::function(|record| {
///     record
///         .get("name")
///         .as_str()
///         .and_then(|name| name.chars().next())
///         .map(|c| vec![Value::from(c.to_string())])
///         .unwrap_or_default()
/// }));
/// let people = Collection::sequence([Record::from_iter([("name", "ann")])]);
/// let view = by_initial.group(&people);
/// assert!(view.get(&"a".into()).is_some());
/// ```
pub fn multi_bucket(source: impl Into<KeySource>) -> MultiBucket {
    MultiBucket {
        source: source.into(),
    }
}

impl MultiBucket {
    pub fn source(&self) -> &KeySource {
        &self.source
    }

    /// Groups `collection` into buckets. Every call starts from an empty
    /// accumulator.
    pub fn group(&self, collection: &Collection) -> IndexedView {
        let mut buckets = IndexMap::<Value, CollectionBuilder>::new();
        let mut file = |bucket: Value, key: Option<&Value>, record: &Record| {
            buckets
                .entry(bucket)
                .or_insert_with(|| collection.builder())
                .insert(key, record.clone());
        };
        for (key, record) in collection.entries() {
            match &self.source {
                KeySource::Field(field) => {
                    for bucket in record.get(field).keys() {
                        file(bucket.clone(), key, record);
                    }
                }
                KeySource::Function(keys_fn) => {
                    for bucket in keys_fn(record) {
                        file(bucket, key, record);
                    }
                }
            }
        }
        IndexedView::from_groups(
            buckets
                .into_iter()
                .map(|(bucket, builder)| (bucket, builder.finish())),
        )
    }
}

impl fmt::Debug for MultiBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MultiBucket").field(&self.source).finish()
    }
}

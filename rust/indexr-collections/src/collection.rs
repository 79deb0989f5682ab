use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{record::Record, value::Value};

/// An immutable collection of records.
///
/// The variant is the collection's structural kind. Keyed collections map an
/// identity key to each record; sequences are plain ordered lists. Every
/// operation that derives a new collection from an existing one preserves the
/// kind.
///
/// Cloning is cheap. [`Collection::ptr_eq`] compares by reference and is the
/// notion of "unchanged" used by memoized selectors, while `PartialEq` compares
/// contents.
#[derive(Clone)]
pub enum Collection {
    Keyed(Arc<IndexMap<Value, Record>>),
    Sequence(Arc<Vec<Record>>),
}

impl Collection {
    /// Creates a keyed collection. Later duplicates of an identity key replace
    /// earlier ones in place.
    pub fn keyed<K, I>(entries: I) -> Collection
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, Record)>,
    {
        Collection::Keyed(Arc::new(
            entries
                .into_iter()
                .map(|(key, record)| (key.into(), record))
                .collect(),
        ))
    }

    pub fn sequence(records: impl IntoIterator<Item = Record>) -> Collection {
        Collection::Sequence(Arc::new(records.into_iter().collect()))
    }

    pub fn empty_keyed() -> Collection {
        Collection::Keyed(Default::default())
    }

    pub fn empty_sequence() -> Collection {
        Collection::Sequence(Default::default())
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Collection::Keyed(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Keyed(map) => map.len(),
            Collection::Sequence(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a record by identity key (keyed) or by position (sequence,
    /// `Value::Int`).
    pub fn get(&self, key: &Value) -> Option<&Record> {
        match self {
            Collection::Keyed(map) => map.get(key),
            Collection::Sequence(list) => key
                .as_i64()
                .and_then(|pos| usize::try_from(pos).ok())
                .and_then(|pos| list.get(pos)),
        }
    }

    /// Iterates `(identity key, record)` pairs in collection order. The key is
    /// `None` for sequences.
    pub fn entries(&self) -> Entries<'_> {
        match self {
            Collection::Keyed(map) => Entries::Keyed(map.iter()),
            Collection::Sequence(list) => Entries::Sequence(list.iter()),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries().map(|(_, record)| record)
    }

    /// Returns an empty builder of the same kind as this collection.
    pub fn builder(&self) -> CollectionBuilder {
        match self {
            Collection::Keyed(_) => CollectionBuilder::Keyed(IndexMap::new()),
            Collection::Sequence(_) => CollectionBuilder::Sequence(Vec::new()),
        }
    }

    /// Folds every entry of the collection into an accumulator.
    pub fn fold<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, Option<&Value>, &Record) -> A,
    {
        self.entries()
            .fold(init, |acc, (key, record)| f(acc, key, record))
    }

    /// Partitions the collection by `key_fn`.
    ///
    /// Groups appear in order of first occurrence of their key; each group keeps
    /// the source order of its records and the kind (and identity keys) of the
    /// source collection.
    pub fn group_by<F>(&self, mut key_fn: F) -> IndexMap<Value, Collection>
    where
        F: FnMut(&Record) -> Value,
    {
        let mut groups = IndexMap::<Value, CollectionBuilder>::new();
        for (key, record) in self.entries() {
            groups
                .entry(key_fn(record))
                .or_insert_with(|| self.builder())
                .insert(key, record.clone());
        }
        groups
            .into_iter()
            .map(|(key, builder)| (key, builder.finish()))
            .collect()
    }

    /// Returns the records for which `predicate` holds, preserving kind, order
    /// and identity keys.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Record) -> bool,
    {
        let mut builder = self.builder();
        for (key, record) in self.entries() {
            if predicate(record) {
                builder.insert(key, record.clone());
            }
        }
        builder.finish()
    }

    /// Returns `true` when both collections share the same storage.
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        match (self, other) {
            (Collection::Keyed(a), Collection::Keyed(b)) => Arc::ptr_eq(a, b),
            (Collection::Sequence(a), Collection::Sequence(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Collection) -> bool {
        match (self, other) {
            (Collection::Keyed(a), Collection::Keyed(b)) => a == b,
            (Collection::Sequence(a), Collection::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Collection {}

impl Default for Collection {
    fn default() -> Self {
        Collection::empty_keyed()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Collection::sequence(iter)
    }
}

impl<K: Into<Value>> FromIterator<(K, Record)> for Collection {
    fn from_iter<T: IntoIterator<Item = (K, Record)>>(iter: T) -> Self {
        Collection::keyed(iter)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Keyed(map) => f.debug_map().entries(map.iter()).finish(),
            Collection::Sequence(list) => f.debug_list().entries(list.iter()).finish(),
        }
    }
}

/// Iterator over the entries of a [`Collection`].
pub enum Entries<'a> {
    Keyed(indexmap::map::Iter<'a, Value, Record>),
    Sequence(std::slice::Iter<'a, Record>),
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Option<&'a Value>, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Keyed(iter) => iter.next().map(|(key, record)| (Some(key), record)),
            Entries::Sequence(iter) => iter.next().map(|record| (None, record)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Keyed(iter) => iter.size_hint(),
            Entries::Sequence(iter) => iter.size_hint(),
        }
    }
}

/// Mutable accumulator that produces a [`Collection`] of a fixed kind.
#[derive(Debug, Clone)]
pub enum CollectionBuilder {
    Keyed(IndexMap<Value, Record>),
    Sequence(Vec<Record>),
}

impl CollectionBuilder {
    /// Adds a record.
    ///
    /// A keyed builder stores the record under `key`; inserting the same key
    /// twice keeps a single entry. A keyed builder given no key falls back to
    /// the record's position. A sequence builder ignores `key` and appends.
    pub fn insert(&mut self, key: Option<&Value>, record: Record) {
        match self {
            CollectionBuilder::Keyed(map) => {
                let key = match key {
                    Some(key) => key.clone(),
                    None => Value::Int(i64::try_from(map.len()).unwrap_or(i64::MAX)),
                };
                map.insert(key, record);
            }
            CollectionBuilder::Sequence(list) => list.push(record),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CollectionBuilder::Keyed(map) => map.len(),
            CollectionBuilder::Sequence(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self) -> Collection {
        match self {
            CollectionBuilder::Keyed(map) => Collection::Keyed(Arc::new(map)),
            CollectionBuilder::Sequence(list) => Collection::Sequence(Arc::new(list)),
        }
    }
}

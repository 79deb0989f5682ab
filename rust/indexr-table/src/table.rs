use std::sync::Arc;

use indexmap::IndexMap;
use indexr_collections::{Collection, Value, json::json_type};
use indexr_common::{Result, error::Error, verify_arg};
use indexr_index::{Descriptor, FunctionRegistry, IndexedView, index};

use crate::{
    memo::{Memo, MemoKey, MemoStats},
    selector::{Selector, combine, memoize},
};

/// A base selector bound to a fixed set of named, memoized indices.
///
/// Every index is computed lazily the first time its selector is called and
/// recomputed only when the base selector returns a different collection
/// (compared by reference). Tables never share caches: re-deriving the base
/// selector with [`Table::reselect_source`] yields a fresh table with the same
/// index definitions and leaves the original untouched.
///
/// # Examples
///
/// ```
/// use indexr_collections::{Collection, Record};
/// use indexr_index::{Descriptor, multi_bucket};
/// use indexr_table::{Table, selector::selector};
///
/// struct State {
///     tasks: Collection,
/// }
///
/// let table = Table::new(
///     selector(|s: &State| s.tasks.clone()),
///     [
///         ("by_owner", Descriptor::from("owner")),
///         ("by_tag", Descriptor::from(multi_bucket("tags"))),
///     ],
/// )?;
///
/// let state = State {
///     tasks: Collection::keyed([
///         ("t1", Record::from_iter([("owner", "ann")])),
///         ("t2", Record::from_iter([("owner", "bob")])),
///     ]),
/// };
/// let by_owner = table.indexed_selector("by_owner")?;
/// let view = by_owner(&state);
/// assert_eq!(view.get(&"ann".into()).map(|v| v.record_count()), Some(1));
/// assert!(by_owner(&state).ptr_eq(&view));
/// # Ok::<(), indexr_common::error::Error>(())
/// ```
pub struct Table<S> {
    selector: Selector<S, Collection>,
    indices: Arc<IndexMap<String, Descriptor>>,
    indexed: IndexMap<String, IndexedSelector<S>>,
}

struct IndexedSelector<S> {
    select: Selector<S, IndexedView>,
    memo: Arc<Memo<Collection, IndexedView>>,
}

impl<S: 'static> Table<S> {
    /// Creates a table from a base selector and `(name, descriptor)` pairs.
    ///
    /// # Errors
    ///
    /// Fails when a descriptor does not validate, or when an index name is
    /// empty or repeated.
    pub fn new<I, N, D>(selector: Selector<S, Collection>, indices: I) -> Result<Table<S>>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Descriptor>,
    {
        let mut definitions = IndexMap::<String, Descriptor>::new();
        for (name, descriptor) in indices {
            let name = name.into();
            let descriptor = descriptor.into();
            verify_arg!(name, !name.is_empty());
            if definitions.contains_key(&name) {
                return Err(Error::invalid_arg(
                    "indices",
                    format!("duplicate index name `{name}`"),
                ));
            }
            descriptor.validate()?;
            definitions.insert(name, descriptor);
        }
        Ok(Table::with_definitions(selector, Arc::new(definitions)))
    }

    /// Creates a table whose index definitions are given as a JSON object of
    /// `name: descriptor` members. See [`indexr_index::config`] for the
    /// descriptor syntax.
    pub fn from_config(
        selector: Selector<S, Collection>,
        config: &serde_json::Value,
        registry: &FunctionRegistry,
    ) -> Result<Table<S>> {
        let members = config.as_object().ok_or_else(|| {
            Error::invalid_arg(
                "indices",
                format!("expected an object, got {}", json_type(config)),
            )
        })?;
        let definitions = members
            .iter()
            .map(|(name, json)| Ok((name.clone(), Descriptor::from_config(json, registry)?)))
            .collect::<Result<Vec<_>>>()?;
        Table::new(selector, definitions)
    }

    fn with_definitions(
        selector: Selector<S, Collection>,
        indices: Arc<IndexMap<String, Descriptor>>,
    ) -> Table<S> {
        let indexed = indices
            .iter()
            .map(|(name, descriptor)| {
                let memo = Arc::new(Memo::new());
                let select = indexed_selector(
                    name.clone(),
                    descriptor.clone(),
                    selector.clone(),
                    memo.clone(),
                );
                (name.clone(), IndexedSelector { select, memo })
            })
            .collect();
        Table {
            selector,
            indices,
            indexed,
        }
    }

    /// The base selector, exactly as given to the constructor.
    pub fn unindexed_selector(&self) -> Selector<S, Collection> {
        self.selector.clone()
    }

    /// Returns a new table over `f(base collection)`, with the same index
    /// definitions and fresh caches. `f` runs only when the base collection
    /// changes.
    pub fn reselect_source<F>(&self, f: F) -> Table<S>
    where
        F: Fn(&Collection) -> Collection + Send + Sync + 'static,
    {
        let selector = memoize(self.selector.clone(), f);
        Table::with_definitions(selector, self.indices.clone())
    }

    /// Like [`Table::reselect_source`], with one more input selector. `f` runs
    /// only when the base collection or the extra input changes. Several extra
    /// inputs can be joined with [`combine`](crate::selector::combine).
    pub fn reselect_source_with<I, F>(&self, input: Selector<S, I>, f: F) -> Table<S>
    where
        I: MemoKey + Send + 'static,
        F: Fn(&Collection, &I) -> Collection + Send + Sync + 'static,
    {
        let selector = memoize(
            combine(self.selector.clone(), input),
            move |(collection, extra): &(Collection, I)| f(collection, extra),
        );
        Table::with_definitions(selector, self.indices.clone())
    }

    /// Returns the memoized selector for index `name`.
    ///
    /// # Errors
    ///
    /// `UnknownIndex`, listing every index name of the table, when `name` is
    /// not one of them.
    pub fn indexed_selector(&self, name: &str) -> Result<Selector<S, IndexedView>> {
        self.lookup(name).map(|indexed| indexed.select.clone())
    }

    /// Selects index `name` for `state` and follows `path` into it.
    pub fn query<'a, P>(&self, name: &str, state: &S, path: P) -> Result<Option<IndexedView>>
    where
        P: IntoIterator<Item = &'a Value>,
    {
        let view = (self.lookup(name)?.select)(state);
        Ok(view.get_in(path).cloned())
    }

    /// Index names in declaration order.
    pub fn index_names(&self) -> impl Iterator<Item = &str> {
        self.indices.keys().map(String::as_str)
    }

    pub fn descriptor(&self, name: &str) -> Option<&Descriptor> {
        self.indices.get(name)
    }

    /// Cache hit/miss counts of index `name`.
    pub fn stats(&self, name: &str) -> Result<MemoStats> {
        self.lookup(name).map(|indexed| indexed.memo.stats())
    }

    fn lookup(&self, name: &str) -> Result<&IndexedSelector<S>> {
        self.indexed
            .get(name)
            .ok_or_else(|| Error::unknown_index(name, self.indices.keys().cloned()))
    }
}

impl<S> std::fmt::Debug for Table<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("indices", &self.indices)
            .finish_non_exhaustive()
    }
}

fn indexed_selector<S: 'static>(
    name: String,
    descriptor: Descriptor,
    base: Selector<S, Collection>,
    memo: Arc<Memo<Collection, IndexedView>>,
) -> Selector<S, IndexedView> {
    Arc::new(move |state: &S| {
        memo.get_or_compute(base(state), |collection| {
            log::debug!(
                "building index '{name}' ({}) over {} records",
                descriptor.kind(),
                collection.len()
            );
            index(collection, &descriptor)
        })
    })
}

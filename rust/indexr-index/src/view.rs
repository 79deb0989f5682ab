use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use indexr_collections::{Collection, Value};

/// The grouped output of indexing a collection.
///
/// A view is either a leaf holding a sub-collection of the original records, or
/// an ordered mapping from key to a nested view. Each grouping level adds one
/// level of `Groups`; the leaves keep the kind and identity keys of the source
/// collection.
///
/// Cloning is cheap and clones share structure; [`IndexedView::ptr_eq`] tells
/// whether two views are the same computed result.
#[derive(Clone, PartialEq, Eq)]
pub enum IndexedView {
    Leaf(Collection),
    Groups(Arc<IndexMap<Value, IndexedView>>),
}

impl IndexedView {
    /// Builds a one-level view whose groups are leaves.
    pub fn from_groups<I>(groups: I) -> IndexedView
    where
        I: IntoIterator<Item = (Value, Collection)>,
    {
        IndexedView::Groups(Arc::new(
            groups
                .into_iter()
                .map(|(key, group)| (key, IndexedView::Leaf(group)))
                .collect(),
        ))
    }

    pub fn as_leaf(&self) -> Option<&Collection> {
        match self {
            IndexedView::Leaf(collection) => Some(collection),
            IndexedView::Groups(_) => None,
        }
    }

    pub fn as_groups(&self) -> Option<&IndexMap<Value, IndexedView>> {
        match self {
            IndexedView::Leaf(_) => None,
            IndexedView::Groups(groups) => Some(groups),
        }
    }

    /// Returns the sub-view for `key`, or `None` on a leaf or a missing key.
    pub fn get(&self, key: &Value) -> Option<&IndexedView> {
        self.as_groups().and_then(|groups| groups.get(key))
    }

    /// Follows `path` one key per level.
    ///
    /// An empty path returns the view itself.
    pub fn get_in<'a, I>(&self, path: I) -> Option<&IndexedView>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        path.into_iter().try_fold(self, |view, key| view.get(key))
    }

    /// Group keys of this level, in order. Empty for a leaf.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.as_groups().into_iter().flat_map(|groups| groups.keys())
    }

    /// Number of grouping levels below this view.
    pub fn depth(&self) -> usize {
        match self {
            IndexedView::Leaf(_) => 0,
            IndexedView::Groups(groups) => {
                1 + groups.values().map(IndexedView::depth).max().unwrap_or(0)
            }
        }
    }

    /// Leaf collections in depth-first order.
    pub fn leaves(&self) -> Vec<&Collection> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Collection>) {
        match self {
            IndexedView::Leaf(collection) => out.push(collection),
            IndexedView::Groups(groups) => {
                for view in groups.values() {
                    view.collect_leaves(out);
                }
            }
        }
    }

    /// Total number of records across all leaves. A record filed under several
    /// keys is counted once per key.
    pub fn record_count(&self) -> usize {
        self.leaves().iter().map(|leaf| leaf.len()).sum()
    }

    /// Rebuilds the view, replacing every leaf with `f(leaf)`.
    pub fn map_leaves<F>(&self, f: &mut F) -> IndexedView
    where
        F: FnMut(&Collection) -> IndexedView,
    {
        match self {
            IndexedView::Leaf(collection) => f(collection),
            IndexedView::Groups(groups) => IndexedView::Groups(Arc::new(
                groups
                    .iter()
                    .map(|(key, view)| (key.clone(), view.map_leaves(f)))
                    .collect(),
            )),
        }
    }

    /// Returns `true` when both views are the same computed result.
    pub fn ptr_eq(&self, other: &IndexedView) -> bool {
        match (self, other) {
            (IndexedView::Leaf(a), IndexedView::Leaf(b)) => a.ptr_eq(b),
            (IndexedView::Groups(a), IndexedView::Groups(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Renders the view as nested JSON objects with collections at the leaves.
    /// Group keys become member names through [`Value::to_json_key`], so no
    /// two groups share a name.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            IndexedView::Leaf(collection) => collection.to_json(),
            IndexedView::Groups(groups) => serde_json::Value::Object(
                groups
                    .iter()
                    .map(|(key, view)| (key.to_json_key(), view.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Collection> for IndexedView {
    fn from(collection: Collection) -> Self {
        IndexedView::Leaf(collection)
    }
}

impl fmt::Debug for IndexedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexedView::Leaf(collection) => fmt::Debug::fmt(collection, f),
            IndexedView::Groups(groups) => f.debug_map().entries(groups.iter()).finish(),
        }
    }
}

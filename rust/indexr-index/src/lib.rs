//! Recursive grouping of record collections.
//!
//! This crate implements the indexer: given a [`Collection`](indexr_collections::Collection) and a [`Descriptor`]
//! it produces an [`IndexedView`], a (possibly multi-level) grouping of the same
//! records.
//!
//! # Descriptors
//!
//! - [`Descriptor::Field`] groups by the value of a record field. Records lacking
//!   the field are grouped under [`Value::Absent`](indexr_collections::Value::Absent).
//! - [`Descriptor::KeyFn`] groups by the return value of a function.
//! - [`Descriptor::Sequence`] nests: the first descriptor produces the top-level
//!   groups and the remaining ones are applied inside every group.
//! - [`Descriptor::MultiBucket`] files each record under every key its
//!   [`KeySource`] yields; see [`multi_bucket`].
//!
//! # Examples
//!
//! ```
//! use indexr_collections::{Collection, Record, Value};
//! use indexr_index::{Descriptor, index, multi_bucket};
//!
//! let tasks = Collection::keyed([
//!     ("t1", Record::from_iter([("owner", Value::from("ann")), ("tags", vec!["ui", "bug"].into())])),
//!     ("t2", Record::from_iter([("owner", Value::from("bob")), ("tags", vec!["bug"].into())])),
//! ]);
//!
//! let by_owner = index(&tasks, &Descriptor::field("owner"));
//! assert_eq!(by_owner.get(&"ann".into()).map(|v| v.record_count()), Some(1));
//!
//! let by_tag = index(&tasks, &multi_bucket("tags").into());
//! assert_eq!(by_tag.get(&"bug".into()).map(|v| v.record_count()), Some(2));
//! ```

pub mod config;
pub mod descriptor;
pub mod indexer;
pub mod multi_bucket;
pub mod view;

pub use config::FunctionRegistry;
pub use descriptor::{Descriptor, KeyFn};
pub use indexer::index;
pub use multi_bucket::{KeySource, KeysFn, MultiBucket, multi_bucket};
pub use view::IndexedView;

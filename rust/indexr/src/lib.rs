//! # Indexr: memoized multi-level grouping of record collections
//!
//! Indexr turns a flat collection of records into nested groupings ("indexed
//! views") by one or more keys, and exposes those groupings as memoized
//! selectors over external application state. Views are rebuilt only when the
//! selected collection changes, so repeated reads of an unchanged state return
//! the very same view.
//!
//! ## Module Organization
//!
//! * [`collections`] - Immutable values, records and keyed/sequence collections
//! * [`index`] - Index descriptors, the recursive indexer and multi-bucket grouping
//! * [`table`] - Memoization, selector composition and named index tables
//! * [`common`] - Error type and result helpers shared across components
//!
//! The most frequently used items are re-exported at the crate root.
//!
//! ## Getting Started
//!
//! ```
//! use indexr::{Collection, Descriptor, Record, Table, Value, multi_bucket, selector};
//!
//! struct State {
//!     tasks: Collection,
//! }
//!
//! let table = Table::new(
//!     selector(|s: &State| s.tasks.clone()),
//!     [
//!         ("by_project_state", Descriptor::from(["project", "state"])),
//!         ("by_tag", Descriptor::from(multi_bucket("tags"))),
//!     ],
//! )?;
//!
//! let state = State {
//!     tasks: Collection::keyed([
//!         ("t1", Record::from_iter([("project", "core"), ("state", "open")])),
//!         ("t2", Record::from_iter([("project", "core"), ("state", "done")])),
//!     ]),
//! };
//! let open = table.query("by_project_state", &state, &[Value::from("core"), Value::from("open")])?;
//! assert_eq!(open.map(|view| view.record_count()), Some(1));
//! # Ok::<(), indexr::Error>(())
//! ```

pub use indexr_collections as collections;
pub use indexr_common as common;
pub use indexr_index as index;
pub use indexr_table as table;

pub use indexr_collections::{Collection, Record, Value};
pub use indexr_common::{
    Result,
    error::{Error, ErrorKind},
};
pub use indexr_index::{
    Descriptor, FunctionRegistry, IndexedView, KeySource, MultiBucket, multi_bucket,
};
pub use indexr_table::{MemoKey, MemoStats, Selector, Table, combine, memoize, selector};

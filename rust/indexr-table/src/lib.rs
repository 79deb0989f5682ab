//! Named, memoized indices over a selected collection.
//!
//! A [`Table`] binds a base selector (a function from external state to a
//! [`Collection`](indexr_collections::Collection)) to a fixed set of named index
//! descriptors. Each index is exposed as a memoized selector that re-runs the
//! indexer only when the base selector produces a different collection.
//!
//! The building blocks are usable on their own: [`memo::Memo`] is a
//! capacity-one cache, and [`selector::memoize`] / [`selector::combine`]
//! compose selectors the same way tables do internally.
//!
//! Index (re)builds are reported through the `log` facade at `debug` level;
//! cache hits at `trace` level.

pub mod memo;
pub mod selector;
pub mod table;

pub use memo::{Memo, MemoKey, MemoStats};
pub use selector::{Selector, combine, memoize, selector};
pub use table::Table;

//! Immutable data model consumed by the indexing engine.
//!
//! The engine never mutates what it reads: a [`Collection`] is an `Arc`-backed
//! snapshot of [`Record`]s, and grouping produces new collections that share the
//! original record values.
//!
//! A collection carries an explicit structural discriminant:
//!
//! - [`Collection::Keyed`] - an ordered mapping from record identity key to record;
//! - [`Collection::Sequence`] - an ordered list of records without identity keys.
//!
//! Grouping preserves the kind of its input, so a keyed collection is always
//! partitioned into keyed sub-collections and a sequence into sequences.

pub mod collection;
pub mod json;
pub mod record;
pub mod value;

pub use collection::{Collection, CollectionBuilder, Entries};
pub use record::Record;
pub use value::Value;

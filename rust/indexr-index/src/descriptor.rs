use std::{fmt, sync::Arc};

use indexr_collections::{Record, Value};
use indexr_common::{Result, verify_descriptor};

use crate::multi_bucket::{KeySource, MultiBucket};

/// A grouping key function.
pub type KeyFn = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Describes how the indexer derives grouping keys from records.
///
/// The set of shapes is closed; [`Descriptor::validate`] rejects the few
/// values that are representable but meaningless (such as an empty field
/// name).
#[derive(Clone)]
pub enum Descriptor {
    /// Group by the value of a field.
    Field(Arc<str>),
    /// Group by the value returned by a function.
    KeyFn(KeyFn),
    /// Group by the first descriptor, then apply the rest inside each group.
    /// An empty sequence leaves the collection as it is.
    Sequence(Arc<[Descriptor]>),
    /// File each record under zero or more keys.
    MultiBucket(MultiBucket),
}

impl Descriptor {
    pub fn field(name: impl Into<Arc<str>>) -> Descriptor {
        Descriptor::Field(name.into())
    }

    pub fn key_fn<F>(f: F) -> Descriptor
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        Descriptor::KeyFn(Arc::new(f))
    }

    pub fn sequence<D>(levels: impl IntoIterator<Item = D>) -> Descriptor
    where
        D: Into<Descriptor>,
    {
        Descriptor::Sequence(levels.into_iter().map(Into::into).collect())
    }

    /// Short name of the descriptor's shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Descriptor::Field(_) => "field",
            Descriptor::KeyFn(_) => "function",
            Descriptor::Sequence(_) => "sequence",
            Descriptor::MultiBucket(_) => "multi_bucket",
        }
    }

    /// Number of grouping levels the descriptor produces.
    pub fn depth(&self) -> usize {
        match self {
            Descriptor::Sequence(levels) => levels.iter().map(Descriptor::depth).sum(),
            _ => 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Descriptor::Field(name) => {
                verify_descriptor!("field", !name.is_empty());
            }
            Descriptor::KeyFn(_) => (),
            Descriptor::Sequence(levels) => {
                for level in levels.iter() {
                    level.validate()?;
                }
            }
            Descriptor::MultiBucket(strategy) => {
                if let KeySource::Field(name) = strategy.source() {
                    verify_descriptor!("multi_bucket", !name.is_empty());
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Field(name) => write!(f, "{name:?}"),
            Descriptor::KeyFn(_) => f.write_str("<fn>"),
            Descriptor::Sequence(levels) => f.debug_list().entries(levels.iter()).finish(),
            Descriptor::MultiBucket(strategy) => fmt::Debug::fmt(strategy, f),
        }
    }
}

impl From<&str> for Descriptor {
    fn from(name: &str) -> Self {
        Descriptor::field(name)
    }
}

impl From<String> for Descriptor {
    fn from(name: String) -> Self {
        Descriptor::field(name)
    }
}

impl From<MultiBucket> for Descriptor {
    fn from(strategy: MultiBucket) -> Self {
        Descriptor::MultiBucket(strategy)
    }
}

impl<D: Into<Descriptor>> From<Vec<D>> for Descriptor {
    fn from(levels: Vec<D>) -> Self {
        Descriptor::sequence(levels)
    }
}

impl<D: Into<Descriptor>, const N: usize> From<[D; N]> for Descriptor {
    fn from(levels: [D; N]) -> Self {
        Descriptor::sequence(levels)
    }
}

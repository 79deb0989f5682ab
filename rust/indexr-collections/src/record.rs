use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::value::{ABSENT, Value};

/// An immutable associative value (field name to [`Value`]).
///
/// Records are `Arc`-backed: cloning a record shares its fields, and grouping
/// never copies field data. Field order is the order of construction.
///
/// # Examples
///
/// ```
/// use indexr_collections::{Record, Value};
///
/// let record = Record::from_iter([("owner", "ann"), ("state", "open")]);
/// assert_eq!(record.get("owner"), &Value::from("ann"));
/// assert!(record.get("missing").is_absent());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Record(Arc<IndexMap<Arc<str>, Value>>);

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Returns the field value, or [`Value::Absent`] when the record has no
    /// such field.
    pub fn get(&self, field: &str) -> &Value {
        self.0.get(field).unwrap_or(&ABSENT)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_ref(), value))
    }

    /// Returns a copy of this record with `field` set to `value`.
    ///
    /// The receiver is left untouched; fields are shared until the copy is
    /// modified.
    pub fn with(&self, field: impl Into<Arc<str>>, value: impl Into<Value>) -> Record {
        let mut fields = self.0.clone();
        Arc::make_mut(&mut fields).insert(field.into(), value.into());
        Record(fields)
    }

    pub fn ptr_eq(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<Arc<str>>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record(Arc::new(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        ))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields()).finish()
    }
}

use std::{collections::BTreeMap, fmt, sync::Arc};

use ordered_float::OrderedFloat;

pub(crate) static ABSENT: Value = Value::Absent;

/// An immutable dynamic value stored in a record field.
///
/// `Value` doubles as a grouping key and as a record identity key, so it is
/// hashable and totally ordered. Floating-point numbers are wrapped in
/// [`OrderedFloat`] to make that possible.
///
/// [`Value::Absent`] is distinct from [`Value::Null`]: it is what a record
/// reports for a field it does not have, and records lacking a field are
/// grouped together under it.
///
/// Nested mappings are kept as [`Value::Map`] with sorted member names, so two
/// maps with the same members are the same key regardless of member order.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(Arc<str>),
    List(Arc<[Value]>),
    Map(Arc<BTreeMap<Arc<str>, Value>>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Looks up a member of a nested map. Non-maps and missing members
    /// yield `Absent`.
    pub fn member(&self, name: &str) -> &Value {
        match self {
            Value::Map(members) => members.get(name).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }

    /// Short name of the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Iterates the value as a sequence of keys.
    ///
    /// A list yields its elements, `Absent` yields nothing, and any other value
    /// yields itself once.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        let items: &[Value] = match self {
            Value::Absent => &[],
            Value::List(items) => items,
            other => std::slice::from_ref(other),
        };
        items.iter()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("<absent>"),
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{}", v.0),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Map(members) => f.debug_map().entries(members.iter()).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(OrderedFloat(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Arc<str>>, V: Into<Value>> FromIterator<(K, V)> for Value {
    /// Collects `(name, value)` pairs into a [`Value::Map`].
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Value::Map(Arc::new(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        ))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_of_scalars_and_lists() {
        let tags = Value::from(vec!["x", "y"]);
        assert_eq!(
            tags.keys().cloned().collect::<Vec<_>>(),
            vec![Value::from("x"), Value::from("y")]
        );
        assert_eq!(Value::from("x").keys().count(), 1);
        assert_eq!(Value::Absent.keys().count(), 0);
        assert_eq!(Value::Null.keys().count(), 1);
    }

    #[test]
    fn test_absent_is_distinct_from_null() {
        assert_ne!(Value::Absent, Value::Null);
        assert!(Value::default().is_absent());
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_maps_compare_by_members() {
        let a = Value::from_iter([("city", "Oslo"), ("zip", "0150")]);
        let b = Value::from_iter([("zip", "0150"), ("city", "Oslo")]);
        assert_eq!(a, b);
        assert_eq!(a.member("city"), &Value::from("Oslo"));
        assert!(a.member("street").is_absent());
        assert!(Value::from("Oslo").member("city").is_absent());
        assert_eq!(a.type_name(), "map");
    }

    #[test]
    fn test_float_keys_are_hashable() {
        let mut set = std::collections::HashSet::new();
        set.insert(Value::from(1.5));
        set.insert(Value::from(1.5));
        set.insert(Value::from(f64::NAN));
        set.insert(Value::from(f64::NAN));
        assert_eq!(set.len(), 2);
    }
}

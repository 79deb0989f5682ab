//! Conversions between the data model and `serde_json` values.
//!
//! A JSON object of objects becomes a keyed collection (identity keys are the
//! object's member names); a JSON array of objects becomes a sequence. Member
//! order is kept. Nested objects inside a record become [`Value::Map`]s.
//!
//! Keys are rendered as JSON member names by [`Value::to_json_key`], which
//! keeps distinct keys distinct: strings are written as they are, everything
//! else (and strings starting with `#`) as `#` followed by a typed literal.

use indexr_common::{Result, error::Error};
use ordered_float::OrderedFloat;

use crate::{collection::Collection, record::Record, value::Value};

const KEY_TAG: char = '#';

impl Value {
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(*v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Value::Int(v),
                None => Value::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Value::Str(s.as_str().into()),
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            serde_json::Value::Object(members) => members
                .iter()
                .map(|(name, value)| (name.as_str(), Value::from_json(value)))
                .collect(),
        }
    }

    /// Converts to JSON. `Absent` is rendered as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Absent | Value::Null => serde_json::Value::Null,
            Value::Bool(v) => (*v).into(),
            Value::Int(v) => (*v).into(),
            Value::Float(v) => serde_json::Number::from_f64(v.0)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Str(s) => s.as_ref().into(),
            Value::List(items) => items.iter().map(Value::to_json).collect(),
            Value::Map(members) => serde_json::Value::Object(
                members
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Renders the value as a JSON object member name.
    ///
    /// Distinct values always render differently: `Str("1")` is `1`,
    /// `Int(1)` is `#1`, `Float(1.0)` is `#1.0`, `Null` is `#null`, `Absent`
    /// is `#absent` and `Str("#a")` is `#"#a"`.
    pub fn to_json_key(&self) -> String {
        match self {
            Value::Str(s) if !s.starts_with(KEY_TAG) => s.to_string(),
            other => {
                let mut key = String::from(KEY_TAG);
                other.write_key_literal(&mut key);
                key
            }
        }
    }

    fn write_key_literal(&self, out: &mut String) {
        match self {
            Value::Absent => out.push_str("absent"),
            Value::Null => out.push_str("null"),
            Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Value::Int(v) => out.push_str(&v.to_string()),
            // Debug output of a float always carries a `.`, an exponent or a
            // non-finite name, so it never reads as an integer.
            Value::Float(v) => out.push_str(&format!("{:?}", v.0)),
            Value::Str(s) => out.push_str(&serde_json::Value::from(s.as_ref()).to_string()),
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_key_literal(out);
                }
                out.push(']');
            }
            Value::Map(members) => {
                out.push('{');
                for (i, (name, value)) in members.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&serde_json::Value::from(name.as_ref()).to_string());
                    out.push(':');
                    value.write_key_literal(out);
                }
                out.push('}');
            }
        }
    }
}

impl Record {
    pub fn from_json(json: &serde_json::Value) -> Result<Record> {
        let object = json.as_object().ok_or_else(|| {
            Error::invalid_arg("record", format!("expected an object, got {}", json_type(json)))
        })?;
        Ok(object
            .iter()
            .map(|(name, value)| (name.as_str(), Value::from_json(value)))
            .collect())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields()
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect(),
        )
    }
}

impl Collection {
    /// Builds a collection from JSON: an object of records becomes keyed, an
    /// array of records becomes a sequence.
    pub fn from_json(json: &serde_json::Value) -> Result<Collection> {
        match json {
            serde_json::Value::Object(members) => members
                .iter()
                .map(|(key, record)| Ok((key.as_str(), Record::from_json(record)?)))
                .collect::<Result<Vec<_>>>()
                .map(Collection::keyed),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Record::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Collection::sequence),
            other => Err(Error::invalid_arg(
                "collection",
                format!("expected an object or an array, got {}", json_type(other)),
            )),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Collection::Keyed(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, record)| (key.to_json_key(), record.to_json()))
                    .collect(),
            ),
            Collection::Sequence(list) => list.iter().map(Record::to_json).collect(),
        }
    }
}

/// Name of a JSON value's type, as reported in diagnostics.
pub fn json_type(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

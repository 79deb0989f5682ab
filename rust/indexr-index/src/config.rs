//! Index descriptors declared as JSON.
//!
//! Field names, sequences and multi-bucket strategies can be written directly;
//! functions are referenced by name and resolved against a
//! [`FunctionRegistry`]:
//!
//! | JSON | descriptor |
//! |---|---|
//! | `"owner"` | group by field `owner` |
//! | `["project", "state"]` | nested grouping |
//! | `{"fn": "week"}` | group by the registered key function `week` |
//! | `{"multi_bucket": "tags"}` | multi-bucket over field `tags` |
//! | `{"multi_bucket": {"fn": "mentions"}}` | multi-bucket over a registered keys function |
//!
//! Registries are plain values owned by the caller; there is no process-wide
//! registration.

use std::sync::Arc;

use indexmap::IndexMap;
use indexr_collections::{Record, Value, json::json_type};
use indexr_common::{Result, error::Error};

use crate::{
    descriptor::{Descriptor, KeyFn},
    multi_bucket::{KeySource, KeysFn, multi_bucket},
};

const FN_MEMBER: &str = "fn";
const MULTI_BUCKET_MEMBER: &str = "multi_bucket";

/// Named functions that JSON descriptors may reference.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    key_fns: IndexMap<String, KeyFn>,
    keys_fns: IndexMap<String, KeysFn>,
}

impl FunctionRegistry {
    pub fn new() -> FunctionRegistry {
        FunctionRegistry::default()
    }

    /// Registers a grouping key function, replacing any previous one with the
    /// same name.
    pub fn register_key_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.key_fns.insert(name.into(), Arc::new(f));
        self
    }

    /// Registers a multi-bucket keys function, replacing any previous one with
    /// the same name.
    pub fn register_keys_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Record) -> Vec<Value> + Send + Sync + 'static,
    {
        self.keys_fns.insert(name.into(), Arc::new(f));
        self
    }

    pub fn key_fn(&self, name: &str) -> Result<KeyFn> {
        self.key_fns
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_function(name, self.key_fns.keys().cloned()))
    }

    pub fn keys_fn(&self, name: &str) -> Result<KeysFn> {
        self.keys_fns
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_function(name, self.keys_fns.keys().cloned()))
    }
}

impl Descriptor {
    /// Parses a JSON descriptor, resolving function references in `registry`.
    ///
    /// # Errors
    ///
    /// - `InvalidDescriptor` when the JSON is not a string, an array or one of
    ///   the recognized objects, or when a field name is empty;
    /// - `InvalidKeySource` when a multi-bucket source is neither a field name
    ///   nor a function reference;
    /// - `UnknownFunction` when a referenced function is not registered.
    pub fn from_config(json: &serde_json::Value, registry: &FunctionRegistry) -> Result<Descriptor> {
        let descriptor = match json {
            serde_json::Value::String(field) => Descriptor::field(field.as_str()),
            serde_json::Value::Array(levels) => Descriptor::Sequence(
                levels
                    .iter()
                    .map(|level| Descriptor::from_config(level, registry))
                    .collect::<Result<Vec<_>>>()?
                    .into(),
            ),
            serde_json::Value::Object(members) => {
                if let Some(name) = function_reference(json) {
                    Descriptor::KeyFn(registry.key_fn(name)?)
                } else if let Some(source) = members.get(MULTI_BUCKET_MEMBER) {
                    multi_bucket(KeySource::from_config(source, registry)?).into()
                } else {
                    return Err(Error::invalid_descriptor(
                        "object",
                        "expected {\"fn\": name} or {\"multi_bucket\": source}",
                    ));
                }
            }
            other => {
                return Err(Error::invalid_descriptor(
                    json_type(other),
                    "expected a field name, an array or an object",
                ));
            }
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

impl KeySource {
    /// Parses a multi-bucket key source: a field name or `{"fn": name}`.
    pub fn from_config(json: &serde_json::Value, registry: &FunctionRegistry) -> Result<KeySource> {
        if let Some(field) = json.as_str() {
            return Ok(KeySource::field(field));
        }
        match function_reference(json) {
            Some(name) => registry.keys_fn(name).map(KeySource::Function),
            None => Err(Error::invalid_key_source(json_type(json))),
        }
    }
}

/// Returns the function name of a `{"fn": name}` object.
fn function_reference(json: &serde_json::Value) -> Option<&str> {
    let members = json.as_object()?;
    if members.len() != 1 {
        return None;
    }
    members.get(FN_MEMBER)?.as_str()
}

#[cfg(test)]
mod tests {
    use indexr_common::error::ErrorKind;
    use serde_json::json;

    use super::*;

    fn registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        registry
            .register_key_fn("has_owner", |r| Value::from(r.contains("owner")))
            .register_keys_fn("words", |r| {
                r.get("title")
                    .as_str()
                    .map(|title| title.split_whitespace().map(Value::from).collect())
                    .unwrap_or_default()
            });
        registry
    }

    #[test]
    fn test_parses_every_shape() -> Result<()> {
        let registry = registry();
        let descriptor = Descriptor::from_config(
            &json!([
                "project",
                { "fn": "has_owner" },
                { "multi_bucket": "tags" },
                { "multi_bucket": { "fn": "words" } },
            ]),
            &registry,
        )?;
        assert_eq!(descriptor.depth(), 4);
        let Descriptor::Sequence(levels) = &descriptor else {
            panic!("expected a sequence, got {descriptor:?}");
        };
        assert_eq!(
            levels.iter().map(Descriptor::kind).collect::<Vec<_>>(),
            vec!["field", "function", "multi_bucket", "multi_bucket"]
        );
        Ok(())
    }

    #[test]
    fn test_invalid_key_source_names_type() {
        for (source, kind) in [(json!(42), "number"), (json!(["tags"]), "array"), (json!(null), "null")] {
            let err = Descriptor::from_config(&json!({ "multi_bucket": source }), &registry())
                .unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::InvalidKeySource { kind: k } if k == kind),
                "{err}"
            );
            assert!(err.to_string().contains(kind));
        }
    }

    #[test]
    fn test_malformed_descriptors() {
        let registry = registry();
        for json in [json!(1), json!(true), json!(null), json!({ "group": "x" }), json!("")] {
            let err = Descriptor::from_config(&json, &registry).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidDescriptor { .. }), "{err}");
        }
    }

    #[test]
    fn test_unknown_function_lists_registered_names() {
        let err = Descriptor::from_config(&json!({ "fn": "missing" }), &registry()).unwrap_err();
        assert!(err.to_string().contains("[has_owner]"), "{err}");

        let err = Descriptor::from_config(&json!({ "multi_bucket": { "fn": "has_owner" } }), &registry())
            .unwrap_err();
        assert!(err.to_string().contains("[words]"), "{err}");
    }
}

//! Command implementations for indexr-cmd

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use indexr_collections::{Collection, Value};
use indexr_index::IndexedView;

pub mod index;
pub mod query;

/// Reads a JSON collection from `path`.
pub fn load_collection(path: impl AsRef<Path>) -> Result<Collection> {
    let json = load_json(path.as_ref())?;
    Collection::from_json(&json)
        .with_context(|| format!("Invalid collection in {}", path.as_ref().display()))
}

pub fn load_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Parses a path segment typed on the command line.
///
/// Numbers, booleans and `null` become the matching values and a quoted JSON
/// string becomes its contents, so `'"3"'` selects the string key `3`.
/// Anything else is taken as a string key as typed.
pub fn parse_key(segment: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(segment) {
        Ok(
            json @ (serde_json::Value::Number(_)
            | serde_json::Value::Bool(_)
            | serde_json::Value::Null
            | serde_json::Value::String(_)),
        ) => Value::from_json(&json),
        _ => Value::from(segment),
    }
}

pub fn parse_path(path: &[String]) -> Vec<Value> {
    path.iter().map(|segment| parse_key(segment)).collect()
}

/// Writes `view` (already narrowed to `path`) as pretty JSON, or a notice
/// when the path selected nothing.
pub fn write_view(
    out: &mut impl Write,
    view: Option<&IndexedView>,
    path: &[String],
) -> Result<()> {
    match view {
        Some(view) => {
            serde_json::to_writer_pretty(&mut *out, &view.to_json())?;
            writeln!(out)?;
        }
        None => writeln!(out, "No group found at path [{}].", path.join(", "))?,
    }
    Ok(())
}

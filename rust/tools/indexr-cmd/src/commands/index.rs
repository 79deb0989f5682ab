//! Index command implementation

use std::io::Write;

use anyhow::{Context, Result};
use indexr_index::{Descriptor, FunctionRegistry, index};

use crate::commands::{load_collection, parse_path, write_view};

pub fn run(
    out: &mut impl Write,
    file: &str,
    by: Vec<String>,
    descriptor: Option<String>,
    path: &[String],
) -> Result<()> {
    let collection = load_collection(file)?;
    let descriptor = match descriptor {
        Some(text) => parse_descriptor(&text)?,
        None => Descriptor::sequence(by),
    };
    descriptor.validate()?;

    log::info!(
        "indexing {} records from {file} by {descriptor:?}",
        collection.len()
    );
    let view = index(&collection, &descriptor);
    write_view(out, view.get_in(&parse_path(path)), path)
}

fn parse_descriptor(text: &str) -> Result<Descriptor> {
    let json: serde_json::Value =
        serde_json::from_str(text).context("Descriptor is not valid JSON")?;
    Ok(Descriptor::from_config(&json, &FunctionRegistry::new())?)
}

//! Query command implementation

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use indexr_collections::Collection;
use indexr_index::FunctionRegistry;
use indexr_table::{Table, selector};

use crate::commands::{load_collection, load_json, parse_path, write_view};

pub fn run(
    out: &mut impl Write,
    file: &str,
    indices: &str,
    index: &str,
    path: &[String],
) -> Result<()> {
    let collection = load_collection(file)?;
    let config = load_json(Path::new(indices))?;
    let table = Table::from_config(
        selector(|c: &Collection| c.clone()),
        &config,
        &FunctionRegistry::new(),
    )
    .with_context(|| format!("Invalid index configuration in {indices}"))?;
    log::debug!("table indices: {:?}", table.index_names().collect::<Vec<_>>());

    let view = table.query(index, &collection, &parse_path(path))?;
    write_view(out, view.as_ref(), path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::tests::temp_json;

    const TASKS: &str = r#"[
        { "owner": "bob", "tags": ["ui", "ui"] },
        { "owner": "ann", "tags": ["db"] },
        { "tags": ["ui"] }
    ]"#;

    const INDICES: &str = r#"{
        "by_tag": { "multi_bucket": "tags" },
        "by_owner": "owner"
    }"#;

    fn query(index: &str, path: &[&str]) -> Result<String> {
        let tasks = temp_json(TASKS)?;
        let indices = temp_json(INDICES)?;
        let mut out = Vec::new();
        run(
            &mut out,
            &tasks.path().display().to_string(),
            &indices.path().display().to_string(),
            index,
            &path.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_query_prints_groups_in_order() -> Result<()> {
        let output: serde_json::Value = serde_json::from_str(&query("by_owner", &[])?)?;
        let names: Vec<&str> = output
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["bob", "ann", "#absent"]);
        assert_eq!(output["#absent"], json!([{ "tags": ["ui"] }]));
        Ok(())
    }

    #[test]
    fn test_query_follows_path() -> Result<()> {
        let output: serde_json::Value = serde_json::from_str(&query("by_tag", &["ui"])?)?;
        assert_eq!(
            output,
            json!([
                { "owner": "bob", "tags": ["ui", "ui"] },
                { "owner": "bob", "tags": ["ui", "ui"] },
                { "tags": ["ui"] },
            ])
        );
        assert_eq!(query("by_tag", &["perf"])?, "No group found at path [perf].\n");
        Ok(())
    }

    #[test]
    fn test_unknown_index_lists_configured_names() {
        let err = query("by_state", &[]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("[by_tag, by_owner]"), "{message}");
    }
}

//! Serialization of formatted collections
//!
//! Writers fully overwrite the destination path; this is an offline,
//! single-writer tool with no append semantics.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write items as line-delimited JSON: one compact object per line,
/// order preserved.
pub fn write_jsonl<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let mut output = String::new();
    for item in items {
        let line = serde_json::to_string(item)
            .map_err(|e| Error::Serialization(format!("JSONL encoding failed: {e}")))?;
        output.push_str(&line);
        output.push('\n');
    }
    fs::write(path, output)?;
    Ok(())
}

/// Read a line-delimited JSON file back into typed items. Blank lines are
/// ignored.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)?;
    let mut items = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let item = serde_json::from_str(line).map_err(|source| Error::Parse {
            file: path.to_path_buf(),
            source,
        })?;
        items.push(item);
    }
    Ok(items)
}

/// Write a tabular file: a header row plus one row per object, with
/// RFC-4180 quoting for fields containing commas, quotes, or newlines.
pub fn write_csv(path: &Path, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut output = String::new();
    output.push_str(&header.join(","));
    output.push('\n');
    for row in rows {
        let encoded: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        output.push_str(&encoded.join(","));
        output.push('\n');
    }
    fs::write(path, output)?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

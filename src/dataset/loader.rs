//! JSON source file loading
//!
//! Two source shapes exist, resolved once per file from the JSON root
//! type rather than sniffed per entry:
//!
//! - **Keyed map**: an object mapping opaque keys to entries carrying
//!   `instructions`, `metadata`, and `workflow` fields. Each entry becomes
//!   one record with `input = json({metadata, instructions})` and
//!   `output = json({workflow})`, compact-encoded so length statistics
//!   and content hashes are deterministic across runs.
//! - **List**: an array of `{input, output}` objects passed through.
//!
//! A missing or malformed file is fatal for the run; incomplete training
//! data is worse than a loud failure.

use super::{content_id, Record};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Source shape of a JSON data file, determined by its root type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// Object root: opaque keys mapping to workflow entries.
    KeyedMap,
    /// Array root: plain `{input, output}` pairs.
    List,
}

impl SourceShape {
    /// Resolve the shape from a parsed JSON root. Scalar roots have no
    /// shape.
    pub fn detect(root: &Value) -> Option<Self> {
        match root {
            Value::Object(_) => Some(Self::KeyedMap),
            Value::Array(_) => Some(Self::List),
            _ => None,
        }
    }
}

/// One entry of a keyed-map source. Optional fields fall back to empty
/// collections instead of failing.
#[derive(Debug, Deserialize)]
struct KeyedEntry {
    #[serde(default)]
    instructions: Vec<Value>,
    #[serde(default)]
    metadata: Map<String, Value>,
    #[serde(default)]
    workflow: Vec<Value>,
}

#[derive(Serialize)]
struct KeyedInput<'a> {
    metadata: &'a Map<String, Value>,
    instructions: &'a [Value],
}

#[derive(Serialize)]
struct KeyedOutput<'a> {
    workflow: &'a [Value],
}

/// One entry of a list source. `input`/`output` are validated explicitly
/// so an absent field surfaces as a record error, not a type failure.
#[derive(Debug, Deserialize)]
struct RawPair {
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    output: Option<String>,
}

/// Load every `{prefix}*.json` file under `dir`, in sorted filename order.
///
/// Non-matching files (the prompt document in particular) are skipped by
/// the filter. Every produced record carries a content ID.
///
/// # Errors
///
/// Fails if the directory is missing, a file cannot be read, or any file
/// fails to parse.
pub fn load_dir(dir: &Path, prefix: &str) -> Result<Vec<Record>> {
    if !dir.is_dir() {
        return Err(Error::MissingPath(dir.to_path_buf()));
    }

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".json"))
        })
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in &paths {
        records.extend(load_file(path)?);
    }
    Ok(records)
}

/// Load a single JSON source file, resolving its shape from the root type.
///
/// # Errors
///
/// Fails if the file is missing, malformed, has a non-object non-array
/// root, or contains a list entry without `input` or `output`.
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    if !path.is_file() {
        return Err(Error::MissingPath(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&text).map_err(|source| Error::Parse {
        file: path.to_path_buf(),
        source,
    })?;

    let shape = SourceShape::detect(&root)
        .ok_or_else(|| Error::UnsupportedShape(path.to_path_buf()))?;
    match shape {
        SourceShape::KeyedMap => load_keyed_map(path, root),
        SourceShape::List => load_list(path, root),
    }
}

fn load_keyed_map(path: &Path, root: Value) -> Result<Vec<Record>> {
    let Value::Object(entries) = root else {
        return Err(Error::UnsupportedShape(path.to_path_buf()));
    };
    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let entry: KeyedEntry =
            serde_json::from_value(value).map_err(|e| Error::InvalidRecord {
                file: path.to_path_buf(),
                location: format!("key '{key}'"),
                reason: e.to_string(),
            })?;
        let input = compact_json(
            path,
            &key,
            &KeyedInput {
                metadata: &entry.metadata,
                instructions: &entry.instructions,
            },
        )?;
        let output = compact_json(
            path,
            &key,
            &KeyedOutput {
                workflow: &entry.workflow,
            },
        )?;
        records.push(Record::with_content_id(input, output));
    }
    Ok(records)
}

fn load_list(path: &Path, root: Value) -> Result<Vec<Record>> {
    let Value::Array(items) = root else {
        return Err(Error::UnsupportedShape(path.to_path_buf()));
    };
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let pair: RawPair = serde_json::from_value(item).map_err(|e| Error::InvalidRecord {
            file: path.to_path_buf(),
            location: format!("index {index}"),
            reason: e.to_string(),
        })?;
        let (input, output) = match (pair.input, pair.output) {
            (Some(input), Some(output)) => (input, output),
            (None, _) => {
                return Err(invalid_pair(path, index, "input"));
            }
            (_, None) => {
                return Err(invalid_pair(path, index, "output"));
            }
        };
        records.push(Record {
            id: Some(content_id(&input, &output)),
            input,
            output,
        });
    }
    Ok(records)
}

fn invalid_pair(path: &Path, index: usize, field: &str) -> Error {
    Error::InvalidRecord {
        file: path.to_path_buf(),
        location: format!("index {index}"),
        reason: format!("missing '{field}' field"),
    }
}

fn compact_json<T: Serialize>(path: &Path, key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::InvalidRecord {
        file: path.to_path_buf(),
        location: format!("key '{key}'"),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_keyed_map_entry() {
        let file = write_json(
            r#"{"wf-1": {"instructions": ["step"], "metadata": {"k": "v"}, "workflow": [1]}}"#,
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].input,
            r#"{"metadata":{"k":"v"},"instructions":["step"]}"#
        );
        assert_eq!(records[0].output, r#"{"workflow":[1]}"#);
        assert!(records[0].id.is_some());
    }

    #[test]
    fn test_keyed_map_missing_workflow_defaults_to_empty() {
        let file = write_json(r#"{"wf-1": {"instructions": [], "metadata": {}}}"#);
        let records = load_file(file.path()).unwrap();
        let output: Value = serde_json::from_str(&records[0].output).unwrap();
        assert_eq!(output, serde_json::json!({"workflow": []}));
    }

    #[test]
    fn test_keyed_map_missing_all_optional_fields() {
        let file = write_json(r#"{"wf-1": {}}"#);
        let records = load_file(file.path()).unwrap();
        assert_eq!(records[0].input, r#"{"metadata":{},"instructions":[]}"#);
        assert_eq!(records[0].output, r#"{"workflow":[]}"#);
    }

    #[test]
    fn test_list_passthrough_with_content_id() {
        let file = write_json(r#"[{"input": "Q1", "output": "A1"}]"#);
        let records = load_file(file.path()).unwrap();
        assert_eq!(records[0].input, "Q1");
        assert_eq!(records[0].output, "A1");
        assert_eq!(records[0].id.as_deref(), Some(content_id("Q1", "A1").as_str()));
    }

    #[test]
    fn test_list_missing_output_is_record_error() {
        let file = write_json(r#"[{"input": "Q1"}]"#);
        let err = load_file(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("index 0"), "{message}");
        assert!(message.contains("output"), "{message}");
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let file = write_json("{not json");
        assert!(matches!(
            load_file(file.path()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_scalar_root_is_unsupported() {
        let file = write_json("42");
        assert!(matches!(
            load_file(file.path()),
            Err(Error::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_file(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, Error::MissingPath(_)));
    }

    #[test]
    fn test_load_dir_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("prompt.md"), "SYS").unwrap();
        fs::write(
            dir.path().join("data_2.json"),
            r#"[{"input": "B", "output": "b"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("data_1.json"),
            r#"[{"input": "A", "output": "a"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("other.txt"), "skip me").unwrap();

        let records = load_dir(dir.path(), "data_").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input, "A");
        assert_eq!(records[1].input, "B");
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let err = load_dir(Path::new("/nonexistent/dir"), "").unwrap_err();
        assert!(matches!(err, Error::MissingPath(_)));
    }
}

//! System prompt composition
//!
//! The prompt is assembled once per run from one or more source documents
//! and shared read-only by every record formatted in that run.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Concatenate each existing file's contents, separated by a blank line,
/// with the final result stripped of leading and trailing whitespace.
///
/// Non-existent files are silently skipped, supporting optional
/// supplementary context documents.
///
/// # Errors
///
/// Fails only if an existing file cannot be read.
pub fn compose<P: AsRef<Path>>(paths: &[P]) -> Result<String> {
    let mut content = String::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            continue;
        }
        content.push_str(&fs::read_to_string(path)?);
        content.push_str("\n\n");
    }
    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("a.md");
        fs::write(&existing, "X").unwrap();
        let missing = dir.path().join("b.md");

        let prompt = compose(&[existing, missing]).unwrap();
        assert_eq!(prompt, "X");
    }

    #[test]
    fn test_concatenation_with_blank_line() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("prompt.md");
        let second = dir.path().join("extra.md");
        fs::write(&first, "first\n").unwrap();
        fs::write(&second, "second\n").unwrap();

        let prompt = compose(&[first, second]).unwrap();
        assert_eq!(prompt, "first\n\n\nsecond");
    }

    #[test]
    fn test_no_existing_files_yields_empty() {
        let dir = tempdir().unwrap();
        let prompt = compose(&[dir.path().join("none.md")]).unwrap();
        assert_eq!(prompt, "");
    }

    #[test]
    fn test_result_is_trimmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.md");
        fs::write(&path, "  padded  \n").unwrap();
        assert_eq!(compose(&[path]).unwrap(), "padded");
    }
}

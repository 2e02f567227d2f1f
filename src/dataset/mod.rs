//! Training records and JSON source ingestion
//!
//! A [`Record`] is one input/output training example. Records are created
//! here during loading, enriched with a prompt during formatting, and
//! consumed once by the writer; no intermediate state is persisted.

mod loader;

pub use loader::{load_dir, load_file, SourceShape};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One input/output training example.
///
/// The `id`, when present, is the hex SHA-256 digest of `input + output`,
/// giving a stable, collision-resistant identifier for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub input: String,
    pub output: String,
}

impl Record {
    /// Create a record with its content ID precomputed.
    pub fn with_content_id(input: impl Into<String>, output: impl Into<String>) -> Self {
        let input = input.into();
        let output = output.into();
        let id = content_id(&input, &output);
        Self {
            id: Some(id),
            input,
            output,
        }
    }

    /// The record's ID, computing the content hash if it was never set.
    pub fn id_or_computed(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| content_id(&self.input, &self.output))
    }
}

/// Compute the content ID for an input/output pair.
///
/// Hex SHA-256 over the concatenation of `input` and `output`. Pure
/// function: repeated computation over the same pair is identical.
pub fn content_id(input: &str, output: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher.update(output.as_bytes());
    hex::encode(hasher.finalize())
}

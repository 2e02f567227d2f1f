//! Length statistics over prepared records
//!
//! Reported after preparation so sequence-length limits for the external
//! trainer can be chosen from the actual data.

use crate::dataset::Record;
use serde::Serialize;

/// Character-length statistics for a record collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LengthStats {
    pub count: usize,
    pub min_input: usize,
    pub max_input: usize,
    pub min_output: usize,
    pub max_output: usize,
}

impl LengthStats {
    /// Compute stats over records. An empty collection yields all zeros.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut stats = Self::default();
        for record in records {
            let input_len = record.input.chars().count();
            let output_len = record.output.chars().count();
            if stats.count == 0 {
                stats.min_input = input_len;
                stats.max_input = input_len;
                stats.min_output = output_len;
                stats.max_output = output_len;
            } else {
                stats.min_input = stats.min_input.min(input_len);
                stats.max_input = stats.max_input.max(input_len);
                stats.min_output = stats.min_output.min(output_len);
                stats.max_output = stats.max_output.max(output_len);
            }
            stats.count += 1;
        }
        stats
    }

    /// Merge two stats summaries, as when combining datasets.
    pub fn merge(&self, other: &Self) -> Self {
        if self.count == 0 {
            return *other;
        }
        if other.count == 0 {
            return *self;
        }
        Self {
            count: self.count + other.count,
            min_input: self.min_input.min(other.min_input),
            max_input: self.max_input.max(other.max_input),
            min_output: self.min_output.min(other.min_output),
            max_output: self.max_output.max(other.max_output),
        }
    }
}

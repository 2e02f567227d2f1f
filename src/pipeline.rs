//! The preparation pipeline
//!
//! One linear pass per run: load each dataset, shuffle, split with that
//! dataset's named fractions, then combine splits across datasets,
//! reshuffle, format, and write. No retries, no resumption of partial
//! output, no concurrent writers.

use crate::config::PrepareSpec;
use crate::dataset::{self, Record};
use crate::error::Result;
use crate::format::{self, ChatRecord, FormatKind, PromptedPair};
use crate::prompt;
use crate::split;
use crate::stats::LengthStats;
use crate::writer;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Summary of a completed preparation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub train: usize,
    pub test: usize,
    pub val: usize,
    pub stats: LengthStats,
    pub files: Vec<PathBuf>,
}

/// A record paired with its dataset's prompt. The prompt is assembled
/// once per dataset and shared read-only across every record.
#[derive(Debug, Clone)]
struct Prompted {
    record: Record,
    prompt: Arc<str>,
}

/// Run the full pipeline for a validated specification.
pub fn run(spec: &PrepareSpec) -> Result<PipelineReport> {
    let mut train: Vec<Prompted> = Vec::new();
    let mut test: Vec<Prompted> = Vec::new();
    let mut val: Vec<Prompted> = Vec::new();
    let mut stats = LengthStats::default();

    for dataset_spec in &spec.datasets {
        let prompt: Arc<str> = prompt::compose(&dataset_spec.prompt_files)?.into();

        let mut records = dataset::load_dir(&dataset_spec.dir, &dataset_spec.file_prefix)?;
        stats = stats.merge(&LengthStats::from_records(&records));

        split::shuffle(&mut records, spec.seed);
        let splits = split::split(records, &dataset_spec.split);

        train.append(&mut promote(splits.train, &prompt));
        test.append(&mut promote(splits.test, &prompt));
        val.append(&mut promote(splits.val, &prompt));

        // Held-out validation source: loaded as-is, never split
        if let Some(holdout) = &dataset_spec.holdout {
            let held = dataset::load_file(&dataset_spec.dir.join(holdout))?;
            stats = stats.merge(&LengthStats::from_records(&held));
            val.append(&mut promote(held, &prompt));
        }
    }

    // Combined splits mix datasets; reshuffle so consumers don't see
    // one dataset's records grouped at the end.
    split::shuffle(&mut train, spec.seed);
    split::shuffle(&mut test, spec.seed);
    split::shuffle(&mut val, spec.seed);

    fs::create_dir_all(&spec.output.dir)?;
    let files = vec![
        write_split(spec, "training_data", &train)?,
        write_split(spec, "test_data", &test)?,
        write_split(spec, "validation_data", &val)?,
    ];

    Ok(PipelineReport {
        train: train.len(),
        test: test.len(),
        val: val.len(),
        stats,
        files,
    })
}

fn promote(records: Vec<Record>, prompt: &Arc<str>) -> Vec<Prompted> {
    records
        .into_iter()
        .map(|record| Prompted {
            record,
            prompt: Arc::clone(prompt),
        })
        .collect()
}

fn write_split(spec: &PrepareSpec, name: &str, items: &[Prompted]) -> Result<PathBuf> {
    let output = &spec.output;
    match output.format {
        FormatKind::Chat => {
            let path = output.dir.join(format!("{name}.jsonl"));
            let batch: Vec<ChatRecord> = items
                .iter()
                .map(|p| format::chat_record(&p.record, &p.prompt))
                .collect();
            writer::write_jsonl(&path, &batch)?;
            Ok(path)
        }
        FormatKind::Fim => {
            let path = output.dir.join(format!("{name}.csv"));
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|p| {
                    let record = if output.prompt_prefix {
                        format::apply_prompt(&p.prompt, p.record.clone())
                    } else {
                        p.record.clone()
                    };
                    vec![record.id_or_computed(), format::fim_block(&record)]
                })
                .collect();
            writer::write_csv(&path, &["id", "content"], &rows)?;
            Ok(path)
        }
        FormatKind::Tabular if output.prompt_prefix => {
            let path = output.dir.join(format!("{name}.jsonl"));
            let pairs: Vec<PromptedPair> = items
                .iter()
                .map(|p| format::prompted_pair(&p.record, &p.prompt))
                .collect();
            writer::write_jsonl(&path, &pairs)?;
            Ok(path)
        }
        FormatKind::Tabular => {
            let path = output.dir.join(format!("{name}.csv"));
            let rows: Vec<Vec<String>> = items.iter().map(|p| format::qa_row(&p.record)).collect();
            writer::write_csv(&path, &["id", "question", "response"], &rows)?;
            Ok(path)
        }
    }
}

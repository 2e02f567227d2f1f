//! YAML schema definitions for declarative dataset preparation

use crate::format::FormatKind;
use crate::split::SplitFractions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete preparation specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareSpec {
    /// Source datasets, processed in order
    pub datasets: Vec<DatasetSpec>,

    /// Output configuration
    pub output: OutputConfig,

    /// Random seed for shuffling. Unset means the thread-local generator
    /// is used and runs are not reproducible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Optional external fine-tuning configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finetune: Option<FinetuneSpec>,
}

/// One source dataset: a directory of JSON files plus its prompt documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Dataset name, used in reporting
    pub name: String,

    /// Directory containing the JSON data files
    pub dir: PathBuf,

    /// Filename prefix filter for data files (e.g. "data_", "spec_").
    /// Empty matches every `*.json` file in the directory.
    #[serde(default)]
    pub file_prefix: String,

    /// Prompt documents, concatenated in order; missing files are skipped
    #[serde(default)]
    pub prompt_files: Vec<PathBuf>,

    /// Named split fractions for this dataset
    #[serde(default)]
    pub split: SplitFractions,

    /// Optional held-out validation source within `dir` (e.g.
    /// "validity_dataset.json"), loaded unshuffled and appended to the
    /// validation split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holdout: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory, created if absent
    pub dir: PathBuf,

    /// Format selector: chat, fim, or tabular
    #[serde(default)]
    pub format: FormatKind,

    /// Prefix each record's input with its dataset prompt. Chat output
    /// ignores this and carries the prompt as the system message.
    #[serde(default)]
    pub prompt_prefix: bool,
}

/// External fine-tuning configuration. Defaults mirror the external PEFT
/// trainer's own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinetuneSpec {
    /// External trainer program
    pub trainer: PathBuf,

    /// Base model path or identifier
    pub model_path: PathBuf,

    /// Prepared dataset to train on
    pub dataset_path: PathBuf,

    #[serde(default = "default_lora_rank")]
    pub lora_rank: usize,

    #[serde(default = "default_lora_alpha")]
    pub lora_alpha: f32,

    #[serde(default = "default_lora_dropout")]
    pub lora_dropout: f32,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    #[serde(default = "default_lr_scheduler")]
    pub lr_scheduler: String,

    #[serde(default = "default_warmup_steps")]
    pub warmup_steps: usize,

    #[serde(default = "default_weight_decay")]
    pub weight_decay: f64,

    #[serde(default = "default_seq_length")]
    pub seq_length: usize,

    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_grad_accum")]
    pub gradient_accumulation_steps: usize,

    #[serde(default)]
    pub seed: u64,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Optional adapter-merge step run after training
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeSpec>,
}

/// Adapter-merge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSpec {
    /// External merge program
    pub merger: PathBuf,

    /// Trained adapter checkpoint directory
    pub adapter_path: PathBuf,

    /// Destination for the merged standalone model
    pub merged_output_dir: PathBuf,
}

fn default_lora_rank() -> usize {
    16
}

fn default_lora_alpha() -> f32 {
    32.0
}

fn default_lora_dropout() -> f32 {
    0.05
}

fn default_learning_rate() -> f64 {
    5e-6
}

fn default_lr_scheduler() -> String {
    "cosine".to_string()
}

fn default_warmup_steps() -> usize {
    100
}

fn default_weight_decay() -> f64 {
    0.05
}

fn default_seq_length() -> usize {
    2048
}

fn default_max_steps() -> usize {
    10_000
}

fn default_batch_size() -> usize {
    1
}

fn default_grad_accum() -> usize {
    16
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./checkpoints")
}

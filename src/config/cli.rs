//! CLI argument parsing and overrides
//!
//! # Usage
//!
//! ```bash
//! preparar prepare config.yaml
//! preparar prepare config.yaml --output-dir ./out --seed 42
//! preparar validate config.yaml
//! preparar info config.yaml --format json
//! preparar finetune config.yaml --dry-run
//! ```

use super::schema::PrepareSpec;
use crate::format::FormatKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Preparar: Instruction-Tuning Dataset Preparation
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "preparar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Dataset preparation for LoRA fine-tuning: ingestion, splitting, formatting")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Prepare train/test/validation splits from YAML configuration
    Prepare(PrepareArgs),

    /// Validate a configuration file without running
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),

    /// Drive the external LoRA fine-tuning trainer
    Finetune(FinetuneArgs),
}

/// Arguments for the prepare command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PrepareArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override output format
    #[arg(short, long)]
    pub format: Option<FormatArg>,

    /// Enable prompt prefixing regardless of configuration
    #[arg(long)]
    pub prompt_prefix: bool,

    /// Random seed for reproducible shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry run (validate config but don't write anything)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the finetune command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FinetuneArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Print the trainer invocation without launching it
    #[arg(long)]
    pub dry_run: bool,

    /// Also run the adapter-merge step after training
    #[arg(long)]
    pub merge: bool,
}

/// Output format for the info command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Format selector override for the prepare command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Chat,
    Fim,
    Tabular,
}

impl From<FormatArg> for FormatKind {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Chat => FormatKind::Chat,
            FormatArg::Fim => FormatKind::Fim,
            FormatArg::Tabular => FormatKind::Tabular,
        }
    }
}

/// Apply command-line overrides over a loaded specification
pub fn apply_overrides(spec: &mut PrepareSpec, args: &PrepareArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.output.dir = output_dir.clone();
    }
    if let Some(format) = args.format {
        spec.output.format = format.into();
    }
    if args.prompt_prefix {
        spec.output.prompt_prefix = true;
    }
    if let Some(seed) = args.seed {
        spec.seed = Some(seed);
    }
}

//! # Preparar: Instruction-Tuning Dataset Preparation
//!
//! Preparar assembles instruction-tuning datasets from heterogeneous JSON
//! sources, formats them into model-specific training/validation/test
//! splits, and drives LoRA fine-tuning plus adapter-merging through an
//! external trainer.
//!
//! ## Architecture
//!
//! - **dataset**: Record model and JSON source ingestion
//! - **prompt**: System prompt composition from instruction documents
//! - **split**: Shuffling and named-fraction train/test/validation splits
//! - **format**: Chat, fill-in-the-middle, and tabular output shapes
//! - **writer**: Line-delimited JSON and CSV serialization
//! - **pipeline**: The load → shuffle → split → format → write pass
//! - **stats**: Input/output length statistics
//! - **finetune**: External trainer and adapter-merge invocations
//! - **config**: Declarative YAML configuration and CLI

pub mod config;
pub mod dataset;
pub mod finetune;
pub mod format;
pub mod pipeline;
pub mod prompt;
pub mod split;
pub mod stats;
pub mod writer;

pub mod error;

// Re-export commonly used types
pub use dataset::Record;
pub use error::{Error, Result};

//! Declarative YAML configuration
//!
//! # Example
//!
//! ```yaml
//! datasets:
//!   - name: workflow
//!     dir: data/workflow
//!     file_prefix: data_
//!     prompt_files: [data/workflow/prompt.md, WORKFLOW_SPEC.md]
//!     split: {train: 0.8, test: 0.1, val: 0.1}
//!   - name: spec
//!     dir: data/spec
//!     file_prefix: spec_
//!     prompt_files: [data/spec/prompt.md]
//!     split: {train: 0.9, test: 0.1, val: 0.0}
//!     holdout: validity_dataset.json
//!
//! output:
//!   dir: ./out
//!   format: chat
//!
//! seed: 42
//! ```

mod cli;
mod run;
mod schema;
mod validate;



pub use cli::{
    apply_overrides, Cli, Command, FinetuneArgs, FormatArg, InfoArgs, OutputFormat, PrepareArgs,
    ValidateArgs,
};
pub use run::{load_config, prepare_from_yaml};
pub use schema::{DatasetSpec, FinetuneSpec, MergeSpec, OutputConfig, PrepareSpec};
pub use validate::{validate_config, ValidationError};

//! External trainer orchestration
//!
//! LoRA fine-tuning and adapter merging are delegated to an external PEFT
//! trainer; this module only builds its invocations from configuration.
//! Argument vectors are deterministic and constructed without touching
//! the process environment, so they are directly unit-testable.

use crate::config::{FinetuneSpec, MergeSpec};
use crate::error::{Error, Result};
use std::fmt;
use std::process::Command;

/// A fully resolved external command: program plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Run the command, surfacing a non-zero exit status as an error.
    pub fn launch(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| Error::TrainerFailed(format!("{}: {e}", self.program)))?;
        if !status.success() {
            return Err(Error::TrainerFailed(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Build the fine-tuning invocation for the configured external trainer.
pub fn finetune_invocation(spec: &FinetuneSpec) -> Invocation {
    let mut args = vec![
        flag("model_path", spec.model_path.display()),
        flag("dataset_path", spec.dataset_path.display()),
        flag("lora_r", spec.lora_rank),
        flag("lora_alpha", spec.lora_alpha),
        flag("lora_dropout", spec.lora_dropout),
        flag("learning_rate", spec.learning_rate),
        flag("lr_scheduler_type", &spec.lr_scheduler),
        flag("num_warmup_steps", spec.warmup_steps),
        flag("weight_decay", spec.weight_decay),
        flag("seq_length", spec.seq_length),
        flag("max_steps", spec.max_steps),
        flag("batch_size", spec.batch_size),
        flag("gradient_accumulation_steps", spec.gradient_accumulation_steps),
        flag("seed", spec.seed),
        flag("output_dir", spec.output_dir.display()),
    ];
    let args = {
        let mut flat = Vec::with_capacity(args.len() * 2);
        for (name, value) in args.drain(..) {
            flat.push(name);
            flat.push(value);
        }
        flat
    };
    Invocation {
        program: spec.trainer.display().to_string(),
        args,
    }
}

/// Build the adapter-merge invocation: base model plus trained adapter
/// merged into a standalone model directory.
pub fn merge_invocation(spec: &FinetuneSpec, merge: &MergeSpec) -> Invocation {
    let pairs = vec![
        flag("base_model_name_or_path", spec.model_path.display()),
        flag("peft_model_path", merge.adapter_path.display()),
        flag("merged_model_name_or_path", merge.merged_output_dir.display()),
    ];
    let mut args = Vec::with_capacity(pairs.len() * 2);
    for (name, value) in pairs {
        args.push(name);
        args.push(value);
    }
    Invocation {
        program: merge.merger.display().to_string(),
        args,
    }
}

fn flag(name: &str, value: impl ToString) -> (String, String) {
    (format!("--{name}"), value.to_string())
}

//! Preparar CLI
//!
//! Single-command dataset preparation entry point.
//!
//! # Usage
//!
//! ```bash
//! # Prepare splits from config
//! preparar prepare config.yaml
//!
//! # Prepare with overrides
//! preparar prepare config.yaml --output-dir ./out --seed 42 --format fim
//!
//! # Validate config
//! preparar validate config.yaml
//!
//! # Show config info
//! preparar info config.yaml
//!
//! # Drive the external fine-tuning trainer
//! preparar finetune config.yaml --merge
//! ```

use clap::Parser;
use preparar::config::{apply_overrides, load_config, Cli, Command, OutputFormat};
use preparar::finetune::{finetune_invocation, merge_invocation};
use preparar::pipeline;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    let result = match cli.command {
        Command::Prepare(args) => run_prepare(args, log_level),
        Command::Validate(args) => run_validate(args, log_level),
        Command::Info(args) => run_info(args, log_level),
        Command::Finetune(args) => run_finetune(args, log_level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

fn run_prepare(args: preparar::config::PrepareArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Preparar: preparing from {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);

    if args.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - config validated successfully",
        );
        for dataset in &spec.datasets {
            log(
                level,
                LogLevel::Verbose,
                &format!(
                    "  Dataset '{}': dir={}, split={}/{}/{}",
                    dataset.name,
                    dataset.dir.display(),
                    dataset.split.train,
                    dataset.split.test,
                    dataset.split.val
                ),
            );
        }
        log(
            level,
            LogLevel::Verbose,
            &format!("  Output dir: {}", spec.output.dir.display()),
        );
        return Ok(());
    }

    let report = pipeline::run(&spec).map_err(|e| format!("Pipeline error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Prepared {} records: train={}, test={}, val={}",
            report.train + report.test + report.val,
            report.train,
            report.test,
            report.val
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Input length: {}..{}, output length: {}..{}",
            report.stats.min_input,
            report.stats.max_input,
            report.stats.min_output,
            report.stats.max_output
        ),
    );
    for file in &report.files {
        log(level, LogLevel::Verbose, &format!("  Wrote {}", file.display()));
    }
    Ok(())
}

fn run_validate(args: preparar::config::ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        println!();
        println!("Configuration Summary:");
        for dataset in &spec.datasets {
            println!("  Dataset: {}", dataset.name);
            println!("    Directory: {}", dataset.dir.display());
            if !dataset.file_prefix.is_empty() {
                println!("    File prefix: {}", dataset.file_prefix);
            }
            println!(
                "    Split: train={}, test={}, val={}",
                dataset.split.train, dataset.split.test, dataset.split.val
            );
            if let Some(holdout) = &dataset.holdout {
                println!("    Holdout: {holdout}");
            }
        }
        println!();
        println!("  Output dir: {}", spec.output.dir.display());
        println!("  Format: {:?}", spec.output.format);
        println!("  Prompt prefix: {}", spec.output.prompt_prefix);
        if let Some(seed) = spec.seed {
            println!("  Seed: {seed}");
        }

        if let Some(finetune) = &spec.finetune {
            println!();
            println!("  Finetune:");
            println!("    Trainer: {}", finetune.trainer.display());
            println!("    Model: {}", finetune.model_path.display());
            println!(
                "    LoRA: rank={}, alpha={}",
                finetune.lora_rank, finetune.lora_alpha
            );
            println!("    Max steps: {}", finetune.max_steps);
        }
    }

    Ok(())
}

fn run_info(args: preparar::config::InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            for dataset in &spec.datasets {
                println!("Dataset: {} ({})", dataset.name, dataset.dir.display());
            }
            println!("Output: {} ({:?})", spec.output.dir.display(), spec.output.format);
            if spec.finetune.is_some() {
                println!("Finetune: enabled");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&spec)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}

fn run_finetune(args: preparar::config::FinetuneArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    let finetune = spec
        .finetune
        .as_ref()
        .ok_or_else(|| "Config has no finetune section".to_string())?;

    let invocation = finetune_invocation(finetune);
    log(
        level,
        LogLevel::Normal,
        &format!("Trainer invocation: {invocation}"),
    );

    if !args.dry_run {
        invocation
            .launch()
            .map_err(|e| format!("Training error: {e}"))?;
        log(level, LogLevel::Normal, "Training complete");
    }

    if args.merge {
        let merge = finetune
            .merge
            .as_ref()
            .ok_or_else(|| "Config has no finetune.merge section".to_string())?;
        let invocation = merge_invocation(finetune, merge);
        log(
            level,
            LogLevel::Normal,
            &format!("Merge invocation: {invocation}"),
        );
        if !args.dry_run {
            invocation.launch().map_err(|e| format!("Merge error: {e}"))?;
            log(level, LogLevel::Normal, "Adapter merge complete");
        }
    }

    Ok(())
}

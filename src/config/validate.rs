//! Configuration validation

use super::schema::PrepareSpec;
use std::collections::HashSet;

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No datasets configured")]
    NoDatasets,

    #[error("Dataset name must not be empty")]
    EmptyDatasetName,

    #[error("Duplicate dataset name: {0}")]
    DuplicateDatasetName(String),

    #[error("Dataset directory does not exist: {0}")]
    DatasetDirNotFound(String),

    #[error("Invalid split fraction {1} in dataset '{0}' (must be in [0, 1])")]
    InvalidSplitFraction(String, f64),

    #[error("Split fractions in dataset '{0}' sum to {1} (must be <= 1)")]
    SplitSumTooLarge(String, f64),

    #[error("Holdout file name must not be empty in dataset '{0}'")]
    EmptyHoldoutName(String),

    #[error("Invalid LoRA rank: {0} (must be > 0)")]
    InvalidLoRARank(usize),

    #[error("Invalid LoRA dropout: {0} (must be in [0, 1))")]
    InvalidLoRADropout(f32),

    #[error("Invalid learning rate: {0} (must be > 0.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid sequence length: {0} (must be > 0)")]
    InvalidSeqLength(usize),

    #[error("Invalid max steps: {0} (must be > 0)")]
    InvalidMaxSteps(usize),
}

/// Validate a preparation specification
///
/// Checks:
/// - At least one dataset with a unique, non-empty name
/// - Dataset directories exist
/// - Split fractions are in range and sum to at most 1
/// - Fine-tuning hyperparameters are in valid ranges
pub fn validate_config(spec: &PrepareSpec) -> Result<(), ValidationError> {
    if spec.datasets.is_empty() {
        return Err(ValidationError::NoDatasets);
    }

    let mut seen = HashSet::new();
    for dataset in &spec.datasets {
        if dataset.name.is_empty() {
            return Err(ValidationError::EmptyDatasetName);
        }
        if !seen.insert(dataset.name.as_str()) {
            return Err(ValidationError::DuplicateDatasetName(dataset.name.clone()));
        }

        // Skip existence checks in tests where directories may not exist
        #[cfg(not(test))]
        if !dataset.dir.is_dir() {
            return Err(ValidationError::DatasetDirNotFound(
                dataset.dir.display().to_string(),
            ));
        }

        for fraction in [dataset.split.train, dataset.split.test, dataset.split.val] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ValidationError::InvalidSplitFraction(
                    dataset.name.clone(),
                    fraction,
                ));
            }
        }
        if dataset.split.sum() > 1.0 + crate::split::SUM_TOLERANCE {
            return Err(ValidationError::SplitSumTooLarge(
                dataset.name.clone(),
                dataset.split.sum(),
            ));
        }

        if let Some(holdout) = &dataset.holdout {
            if holdout.is_empty() {
                return Err(ValidationError::EmptyHoldoutName(dataset.name.clone()));
            }
        }
    }

    if let Some(finetune) = &spec.finetune {
        if finetune.lora_rank == 0 {
            return Err(ValidationError::InvalidLoRARank(finetune.lora_rank));
        }
        if !(0.0..1.0).contains(&finetune.lora_dropout) {
            return Err(ValidationError::InvalidLoRADropout(finetune.lora_dropout));
        }
        if finetune.learning_rate <= 0.0 {
            return Err(ValidationError::InvalidLearningRate(finetune.learning_rate));
        }
        if finetune.batch_size == 0 {
            return Err(ValidationError::InvalidBatchSize(finetune.batch_size));
        }
        if finetune.seq_length == 0 {
            return Err(ValidationError::InvalidSeqLength(finetune.seq_length));
        }
        if finetune.max_steps == 0 {
            return Err(ValidationError::InvalidMaxSteps(finetune.max_steps));
        }
    }

    Ok(())
}

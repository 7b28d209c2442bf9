// Text Processing Jobs
// Validates a processing request, runs it and packages the result with
// timing, word counts and improvement notes.

use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    HumanizeResult, ProcessedTextResult, ProcessingType, TaskStatus, TextProcessingRequest, VersionComparison,
};
use crate::services::config_store::HumanizerSettings;
use crate::services::humanization::{Humanizer, HumanizerEvaluator};
use crate::services::text_processor::{normalize_punctuation, word_tokens};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text is {len} characters; the limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("Intensity must be within [0, 1], got {0}")]
    InvalidIntensity(f64),

    #[error("Processing type '{}' requires an external language model", .0.as_str())]
    Unsupported(ProcessingType),

    #[error("Processing task failed to complete: {0}")]
    Join(String),
}

/// Request after validation: trimmed, punctuation-normalized text and a resolved intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub text: String,
    pub intensity: f64,
}

pub fn validate_request(
    request: &TextProcessingRequest,
    settings: &HumanizerSettings,
) -> Result<ValidatedRequest, ProcessingError> {
    let trimmed = request.text.trim();
    if trimmed.is_empty() {
        return Err(ProcessingError::EmptyText);
    }

    let len = trimmed.chars().count();
    if len > settings.max_text_chars {
        return Err(ProcessingError::TextTooLong {
            len,
            max: settings.max_text_chars,
        });
    }

    let intensity = request.intensity.unwrap_or(settings.default_intensity);
    if !(0.0..=1.0).contains(&intensity) {
        return Err(ProcessingError::InvalidIntensity(intensity));
    }

    if request.processing_type != ProcessingType::Humanizer {
        return Err(ProcessingError::Unsupported(request.processing_type));
    }

    Ok(ValidatedRequest {
        text: normalize_punctuation(trimmed),
        intensity,
    })
}

/// Human-readable notes on what a humanization run changed.
pub fn summarize_improvements(result: &HumanizeResult, comparison: &VersionComparison) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(error) = &result.error {
        notes.push(format!("Transformation skipped: {}", error));
        return notes;
    }

    if result.was_already_human {
        notes.push("Text already reads as human-written; changes kept minimal".to_string());
    }
    if result.modifications_applied > 0 {
        notes.push(format!("Applied {} modifications", result.modifications_applied));
    }
    if result.words_rewritten > 0 {
        notes.push(format!("Varied vocabulary for {} distinct words", result.words_rewritten));
    }
    if result.quality_metrics.burstiness_increase > 0.0 {
        notes.push("Increased variation in sentence length".to_string());
    }
    if !result.quality_metrics.tone_preserved {
        notes.push("Overall tone shifted during rewriting".to_string());
    }
    if comparison.improvement > 0.0 {
        notes.push(format!(
            "AI-pattern score improved by {:.1} points ({:.1} -> {:.1})",
            comparison.improvement, comparison.original.evasion_score, comparison.humanized.evasion_score
        ));
    }

    notes
}

pub fn process_request(
    request: &TextProcessingRequest,
    settings: &HumanizerSettings,
) -> Result<ProcessedTextResult, ProcessingError> {
    let validated = validate_request(request, settings)?;
    let task_id = uuid::Uuid::new_v4().to_string();
    let started = Instant::now();

    info!(
        task_id = %task_id,
        status = ?TaskStatus::Pending,
        chars = validated.text.chars().count(),
        intensity = validated.intensity,
        "[PROCESSING] request accepted"
    );

    debug!(task_id = %task_id, status = ?TaskStatus::Processing, "[PROCESSING] humanizing");
    let mut humanizer = Humanizer::with_settings(settings);
    let result = humanizer.humanize(&validated.text, validated.intensity);
    let comparison = HumanizerEvaluator::new().compare_versions(&request.text, &result.humanized);
    let improvements = summarize_improvements(&result, &comparison);

    let status = if result.error.is_some() {
        warn!(task_id = %task_id, "[PROCESSING] humanizer fell back to the original text");
        TaskStatus::Failed
    } else {
        TaskStatus::Completed
    };

    let processing_time = started.elapsed().as_secs_f64();
    info!(
        task_id = %task_id,
        modifications = result.modifications_applied,
        seconds = processing_time,
        "[PROCESSING] request finished"
    );

    Ok(ProcessedTextResult {
        task_id,
        status,
        word_count_original: word_tokens(&request.text).len(),
        word_count_processed: word_tokens(&result.humanized).len(),
        original_text: request.text.clone(),
        processed_text: result.humanized,
        processing_type: request.processing_type,
        processing_time,
        improvements,
    })
}

/// Runs `process_request` on the blocking pool; the pipeline is CPU-bound.
pub async fn process_request_async(
    request: TextProcessingRequest,
    settings: HumanizerSettings,
) -> Result<ProcessedTextResult, ProcessingError> {
    tokio::task::spawn_blocking(move || process_request(&request, &settings))
        .await
        .map_err(|e| ProcessingError::Join(e.to_string()))?
}

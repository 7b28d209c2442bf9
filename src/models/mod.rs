// Clearify Data Models
// Shared result and request types for the humanization pipeline

use serde::{Deserialize, Serialize};

// ============ Text Analysis ============

/// Register classification of a passage. Exactly one tone is assigned per analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetTone {
    Formal,
    Technical,
    Casual,
    Professional,
    #[default]
    Neutral,
}

impl TargetTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Technical => "technical",
            Self::Casual => "casual",
            Self::Professional => "professional",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    /// 0-10, formal transitions vs casual markers per sentence
    pub formality_score: f64,
    /// 0-10, technical vocabulary density plus long-word share
    pub technical_score: f64,
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Fraction of words longer than 12 characters
    pub vocabulary_complexity: f64,
    pub target_tone: TargetTone,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub word_count: usize,
    pub unique_word_ratio: f64,
    pub is_already_human: bool,
    pub existing_colloquial_count: usize,
}

// ============ Modification Config ============

/// Probabilities driving the modification engine.
///
/// Only `synonym_replacement` and `max_modifications_per_sentence` are read by
/// the active pipeline. The remaining probabilities are carried so that scaled
/// configs round-trip through logs and results unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModificationConfig {
    pub synonym_replacement: f64,
    pub uncertainty_probability: f64,
    pub colloquial_probability: f64,
    pub sentence_variation: f64,
    pub personal_touches: f64,
    pub structure_modification: f64,
    pub max_modifications_per_sentence: usize,
}

impl ModificationConfig {
    /// Multiply every probability field by `intensity` (clamped to [0,1]).
    pub fn scaled(&self, intensity: f64) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        Self {
            synonym_replacement: self.synonym_replacement * k,
            uncertainty_probability: self.uncertainty_probability * k,
            colloquial_probability: self.colloquial_probability * k,
            sentence_variation: self.sentence_variation * k,
            personal_touches: self.personal_touches * k,
            structure_modification: self.structure_modification * k,
            max_modifications_per_sentence: self.max_modifications_per_sentence,
        }
    }
}

// ============ Humanize Result ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Share of the original distinct words that no longer appear
    pub vocabulary_change_ratio: f64,
    /// Sentence-length variance after minus before
    pub burstiness_increase: f64,
    pub tone_preserved: bool,
    pub length_change_percent: f64,
    pub formality_shift: f64,
    /// Length changed by less than 10%
    pub readability_maintained: bool,
}

impl Default for QualityMetrics {
    fn default() -> Self {
        Self {
            vocabulary_change_ratio: 0.0,
            burstiness_increase: 0.0,
            tone_preserved: true,
            length_change_percent: 0.0,
            formality_shift: 0.0,
            readability_maintained: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResult {
    pub original: String,
    pub humanized: String,
    pub analysis: Option<TextAnalysis>,
    pub modifications_applied: usize,
    pub quality_metrics: QualityMetrics,
    pub was_already_human: bool,
    /// Distinct words rewritten by synonym substitution during this call
    #[serde(default)]
    pub words_rewritten: usize,
    /// Set when a transformation step failed and the original text was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============ Evaluation ============

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectionRisk {
    Low,
    Medium,
    High,
}

impl DetectionRisk {
    pub fn from_score(score: f64) -> Self {
        if score > 85.0 {
            Self::Low
        } else if score > 70.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvasionIssue {
    pub description: String,
    pub occurrences: usize,
    /// Total points deducted for this pattern (negative)
    pub penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvasionReport {
    pub evasion_score: f64,
    pub detection_risk: DetectionRisk,
    pub issues_found: Vec<EvasionIssue>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub original: EvasionReport,
    pub humanized: EvasionReport,
    pub improvement: f64,
    pub recommendation: String,
}

// ============ Processing Jobs ============

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingType {
    #[default]
    Humanizer,
    Professional,
    Style,
    Grammar,
}

impl ProcessingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Humanizer => "humanizer",
            Self::Professional => "professional",
            Self::Style => "style",
            Self::Grammar => "grammar",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProcessingRequest {
    pub text: String,
    #[serde(default)]
    pub processing_type: ProcessingType,
    #[serde(default)]
    pub intensity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTextResult {
    pub task_id: String,
    pub status: TaskStatus,
    pub original_text: String,
    pub processed_text: String,
    pub processing_type: ProcessingType,
    pub word_count_original: usize,
    pub word_count_processed: usize,
    /// Seconds
    pub processing_time: f64,
    #[serde(default)]
    pub improvements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_config_keeps_max_modifications() {
        let config = ModificationConfig {
            synonym_replacement: 0.4,
            uncertainty_probability: 0.2,
            colloquial_probability: 0.0,
            sentence_variation: 0.0,
            personal_touches: 0.0,
            structure_modification: 0.0,
            max_modifications_per_sentence: 3,
        };
        let scaled = config.scaled(0.5);
        assert!((scaled.synonym_replacement - 0.2).abs() < 1e-9);
        assert!((scaled.uncertainty_probability - 0.1).abs() < 1e-9);
        assert_eq!(scaled.max_modifications_per_sentence, 3);
    }

    #[test]
    fn test_risk_buckets() {
        assert_eq!(DetectionRisk::from_score(90.0), DetectionRisk::Low);
        assert_eq!(DetectionRisk::from_score(85.0), DetectionRisk::Medium);
        assert_eq!(DetectionRisk::from_score(70.0), DetectionRisk::High);
    }

    #[test]
    fn test_tone_serializes_lowercase() {
        let json = serde_json::to_string(&TargetTone::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }
}

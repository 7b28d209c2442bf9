// Humanizer
// Public entry point: analyze, configure, run the rewrite passes, clean up
// and measure. Best-effort by contract: any failure returns the original text.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::analyzer::TextAnalyzer;
use super::cleanup::intelligent_cleanup;
use super::engine::ModificationEngine;
use super::error::HumanizeError;
use super::lexicon::{EnglishProcessor, LanguageProcessor};
use crate::models::{HumanizeResult, ModificationConfig, QualityMetrics, TextAnalysis};
use crate::services::config_store::HumanizerSettings;
use crate::services::text_processor::{sentence_length_variance, word_tokens};

pub const DEFAULT_INTENSITY: f64 = 0.6;
pub const MIN_TEXT_CHARS: usize = 10;

const HUMAN_INTENSITY_FACTOR: f64 = 0.15;
const HUMAN_INTENSITY_CAP: f64 = 0.1;
const READABILITY_MAX_LENGTH_CHANGE: f64 = 10.0;

pub struct Humanizer {
    analyzer: TextAnalyzer,
    engine: ModificationEngine,
    rng: StdRng,
    min_text_chars: usize,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Humanizer {
    /// English lexicon, entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_processor(Arc::new(EnglishProcessor), StdRng::from_entropy())
    }

    /// Reproducible output for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_processor(Arc::new(EnglishProcessor), StdRng::seed_from_u64(seed))
    }

    pub fn with_settings(settings: &HumanizerSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            analyzer: TextAnalyzer::new(),
            engine: ModificationEngine::with_recency(
                Arc::new(EnglishProcessor),
                settings.recency_capacity,
                settings.recency_window,
            ),
            rng,
            min_text_chars: settings.min_text_chars,
        }
    }

    pub fn with_processor(processor: Arc<dyn LanguageProcessor>, rng: StdRng) -> Self {
        Self {
            analyzer: TextAnalyzer::new(),
            engine: ModificationEngine::new(processor),
            rng,
            min_text_chars: MIN_TEXT_CHARS,
        }
    }

    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    pub fn engine(&self) -> &ModificationEngine {
        &self.engine
    }

    /// Config actually used for `analysis` at the requested intensity.
    /// Already-human text is damped to `min(intensity * 0.15, 0.1)`.
    pub fn effective_config(&self, analysis: &TextAnalysis, intensity: f64) -> ModificationConfig {
        let mut intensity = sanitize_intensity(intensity);
        if analysis.is_already_human {
            intensity = (intensity * HUMAN_INTENSITY_FACTOR).min(HUMAN_INTENSITY_CAP);
        }
        self.engine
            .get_config_for_tone(analysis.target_tone, analysis.is_already_human)
            .scaled(intensity)
    }

    pub fn humanize(&mut self, text: &str, intensity: f64) -> HumanizeResult {
        self.humanize_with(text, intensity, true)
    }

    pub fn humanize_with(&mut self, text: &str, intensity: f64, preserve_formatting: bool) -> HumanizeResult {
        if text.trim().chars().count() < self.min_text_chars {
            debug!("[HUMANIZER] input too short, returning unchanged");
            return HumanizeResult {
                original: text.to_string(),
                humanized: text.to_string(),
                analysis: None,
                modifications_applied: 0,
                quality_metrics: QualityMetrics::default(),
                was_already_human: false,
                words_rewritten: 0,
                error: None,
            };
        }

        self.engine.reset_tracking();

        let analysis = self.analyzer.analyze(text);
        let config = self.effective_config(&analysis, intensity);

        info!(
            language = self.engine.processor().language(),
            words = analysis.word_count,
            tone = analysis.target_tone.as_str(),
            already_human = analysis.is_already_human,
            synonym_probability = config.synonym_replacement,
            "[HUMANIZER] starting"
        );

        let mut stage = "start";
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(text, &analysis, &config, preserve_formatting, &mut stage)
        }))
        .unwrap_or_else(|payload| {
            Err(HumanizeError::StagePanicked {
                stage,
                message: panic_message(payload.as_ref()),
            })
        });

        match outcome {
            Ok((humanized, modifications_applied)) => {
                let quality_metrics = self.calculate_quality_metrics(text, &humanized);
                info!(
                    modifications = modifications_applied,
                    recent_words = self.engine.recent_words().len(),
                    length_change_percent = quality_metrics.length_change_percent,
                    "[HUMANIZER] finished"
                );
                HumanizeResult {
                    original: text.to_string(),
                    humanized,
                    was_already_human: analysis.is_already_human,
                    analysis: Some(analysis),
                    modifications_applied,
                    quality_metrics,
                    words_rewritten: self.engine.modified_words().len(),
                    error: None,
                }
            }
            Err(e) => {
                warn!("[HUMANIZER] transformation failed, returning original text: {}", e);
                HumanizeResult {
                    original: text.to_string(),
                    humanized: text.to_string(),
                    was_already_human: analysis.is_already_human,
                    analysis: Some(analysis),
                    modifications_applied: 0,
                    quality_metrics: self.calculate_quality_metrics(text, text),
                    words_rewritten: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn run_stages(
        &mut self,
        text: &str,
        analysis: &TextAnalysis,
        config: &ModificationConfig,
        preserve_formatting: bool,
        stage: &mut &'static str,
    ) -> Result<(String, usize), HumanizeError> {
        *stage = "replace_ai_phrases";
        let phrases = self.engine.replace_ai_phrases(text, &mut self.rng)?;
        debug!(modifications = phrases.modifications, "[HUMANIZER] {}", stage);
        let mut current = phrases.text;
        let mut total = phrases.modifications;

        if !analysis.is_already_human {
            *stage = "restructure_nominal_phrases";
            let step = self.engine.restructure_nominal_phrases(&current)?;
            debug!(modifications = step.modifications, "[HUMANIZER] {}", stage);
            total += step.modifications;

            *stage = "replace_synonyms_contextual";
            let step = self.engine.replace_synonyms_contextual(
                &step.text,
                config,
                analysis.target_tone,
                &mut self.rng,
            );
            debug!(modifications = step.modifications, "[HUMANIZER] {}", stage);
            total += step.modifications;

            *stage = "reduce_the_repetition";
            let step = self.engine.reduce_the_repetition(&step.text);
            debug!(modifications = step.modifications, "[HUMANIZER] {}", stage);
            total += step.modifications;

            *stage = "add_human_imperfections";
            let step = self.engine.add_human_imperfections(&step.text, &mut self.rng)?;
            debug!(modifications = step.modifications, "[HUMANIZER] {}", stage);
            total += step.modifications;

            current = step.text;
        }

        *stage = "cleanup";
        let cleaned = intelligent_cleanup(&current, self.engine.processor(), preserve_formatting)?;
        Ok((cleaned, total))
    }

    /// Before/after comparison; re-analyzes both texts.
    pub fn calculate_quality_metrics(&self, original: &str, humanized: &str) -> QualityMetrics {
        let before = self.analyzer.analyze(original);
        let after = self.analyzer.analyze(humanized);

        let original_vocab: HashSet<String> = word_tokens(original).iter().map(|w| w.to_lowercase()).collect();
        let humanized_vocab: HashSet<String> = word_tokens(humanized).iter().map(|w| w.to_lowercase()).collect();
        let vocabulary_change_ratio = if original_vocab.is_empty() {
            0.0
        } else {
            original_vocab.difference(&humanized_vocab).count() as f64 / original_vocab.len() as f64
        };

        let original_len = original.chars().count();
        let length_change_percent = if original_len == 0 {
            0.0
        } else {
            (humanized.chars().count() as f64 - original_len as f64) / original_len as f64 * 100.0
        };

        QualityMetrics {
            vocabulary_change_ratio,
            burstiness_increase: sentence_length_variance(humanized) - sentence_length_variance(original),
            tone_preserved: before.target_tone == after.target_tone,
            length_change_percent,
            formality_shift: after.formality_score - before.formality_score,
            readability_maintained: length_change_percent.abs() < READABILITY_MAX_LENGTH_CHANGE,
        }
    }
}

fn sanitize_intensity(intensity: f64) -> f64 {
    if intensity.is_finite() {
        intensity.clamp(0.0, 1.0)
    } else {
        DEFAULT_INTENSITY
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::humanization::lexicon::{PhrasePattern, RewriteRule};

    static ENGLISH: EnglishProcessor = EnglishProcessor;

    /// Lexicon whose tables fail to load, to exercise the fallback path.
    struct BrokenProcessor;

    impl LanguageProcessor for BrokenProcessor {
        fn language(&self) -> &'static str {
            "broken"
        }
        fn synonyms(&self, word: &str) -> Option<&'static [&'static str]> {
            ENGLISH.synonyms(word)
        }
        fn phrase_patterns(&self) -> Result<&[PhrasePattern], HumanizeError> {
            ENGLISH.phrase_patterns()
        }
        fn nominal_rewrites(&self) -> Result<&[RewriteRule], HumanizeError> {
            Err(HumanizeError::Pattern("(unclosed".to_string()))
        }
        fn imperfection_rewrites(&self) -> Result<&[RewriteRule], HumanizeError> {
            ENGLISH.imperfection_rewrites()
        }
        fn compound_rules(&self) -> Result<&[RewriteRule], HumanizeError> {
            ENGLISH.compound_rules()
        }
        fn connector_rules(&self) -> Result<&[RewriteRule], HumanizeError> {
            ENGLISH.connector_rules()
        }
        fn uncertainty_markers(&self) -> &'static [&'static str] {
            &[]
        }
    }

    const ROBOTIC: &str = "Furthermore, it is important to note that the implementation of robust methodologies is essential. Moreover, the utilization of comprehensive frameworks facilitates substantial improvements.";

    #[test]
    fn test_short_input_is_returned_unchanged() {
        let mut h = Humanizer::with_seed(1);
        for text in ["", "   ", "Hi there", "  Moreover "] {
            let result = h.humanize(text, 1.0);
            assert_eq!(result.humanized, text);
            assert_eq!(result.modifications_applied, 0);
            assert!(result.analysis.is_none());
        }
    }

    #[test]
    fn test_min_length_boundary() {
        let mut h = Humanizer::with_seed(1);
        // 9 trimmed chars
        let result = h.humanize("  Moreover!  ", 1.0);
        assert_eq!(result.humanized, "  Moreover!  ");
        assert!(result.analysis.is_none());
        // 10 trimmed chars
        let result = h.humanize("Moreover!!", 1.0);
        assert!(result.analysis.is_some());
        assert_eq!(result.modifications_applied, 1);
        assert!(!result.humanized.contains("Moreover"));
    }

    #[test]
    fn test_effective_config_damps_already_human() {
        let h = Humanizer::with_seed(1);
        let mut analysis = TextAnalysis::default();
        analysis.is_already_human = true;
        let config = h.effective_config(&analysis, 1.0);
        assert!((config.synonym_replacement - 0.12 * 0.1).abs() < 1e-12);

        analysis.is_already_human = false;
        let config = h.effective_config(&analysis, 0.5);
        assert!((config.synonym_replacement - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_effective_config_sanitizes_intensity() {
        let h = Humanizer::with_seed(1);
        let analysis = TextAnalysis::default();
        assert_eq!(h.effective_config(&analysis, 7.0).synonym_replacement, 0.40);
        assert_eq!(h.effective_config(&analysis, -1.0).synonym_replacement, 0.0);
        assert!((h.effective_config(&analysis, f64::NAN).synonym_replacement - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_failed_stage_falls_back_to_original() {
        let mut h = Humanizer::with_processor(Arc::new(BrokenProcessor), StdRng::seed_from_u64(3));
        let result = h.humanize(ROBOTIC, 0.6);
        assert_eq!(result.humanized, ROBOTIC);
        assert_eq!(result.modifications_applied, 0);
        assert!(result.analysis.is_some());
        assert!(result.error.as_deref().unwrap_or("").contains("(unclosed"));
        assert_eq!(result.quality_metrics.length_change_percent, 0.0);
    }

    #[test]
    fn test_quality_metrics_identity() {
        let h = Humanizer::with_seed(1);
        let metrics = h.calculate_quality_metrics(ROBOTIC, ROBOTIC);
        assert_eq!(metrics.vocabulary_change_ratio, 0.0);
        assert_eq!(metrics.burstiness_increase, 0.0);
        assert!(metrics.tone_preserved);
        assert!(metrics.readability_maintained);
    }

    #[test]
    fn test_words_rewritten_tracked_per_call() {
        let mut h = Humanizer::with_seed(21);
        let first = h.humanize(ROBOTIC, 1.0);
        assert_eq!(first.words_rewritten, h.engine().modified_words().len());
        let second = h.humanize("Plain words without any lexicon entries at all here.", 1.0);
        assert_eq!(second.words_rewritten, 0);
        assert!(h.engine().modified_words().is_empty());
    }
}

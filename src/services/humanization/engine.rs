// Modification Engine
// Individual rewrite passes plus the tone-derived modification config.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, OnceLock};

use super::error::HumanizeError;
use super::lexicon::{LanguageProcessor, SUBSTITUTION_MARK};
use crate::models::{ModificationConfig, TargetTone};
use crate::services::text_processor::{capitalize_first, rewrite_sentences, starts_uppercase};

pub const DEFAULT_RECENCY_CAPACITY: usize = 50;
pub const DEFAULT_RECENCY_WINDOW: usize = 5;

const IMPERFECTION_PROBABILITY: f64 = 0.6;
const SYNONYM_TOP_CANDIDATES: usize = 3;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+").expect("token regex"))
}

/// Bounded FIFO of recently substituted words; the oldest entry is evicted first.
#[derive(Debug, Clone)]
pub struct RecencyBuffer {
    items: VecDeque<String>,
    capacity: usize,
}

impl RecencyBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, word: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(word.into());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.items.iter().any(|w| w == word)
    }

    /// Whether `word` is among the newest `n` entries
    pub fn in_last(&self, word: &str, n: usize) -> bool {
        self.items.iter().rev().take(n).any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Output of a single pass
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub text: String,
    pub modifications: usize,
}

impl Transformed {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            modifications: 0,
        }
    }
}

/// Owns the only cross-call state of the pipeline (the recency buffer).
/// Share an engine across threads only behind a mutex.
pub struct ModificationEngine {
    processor: Arc<dyn LanguageProcessor>,
    recent: RecencyBuffer,
    recency_window: usize,
    modified_words: HashSet<String>,
}

impl ModificationEngine {
    pub fn new(processor: Arc<dyn LanguageProcessor>) -> Self {
        Self::with_recency(processor, DEFAULT_RECENCY_CAPACITY, DEFAULT_RECENCY_WINDOW)
    }

    pub fn with_recency(processor: Arc<dyn LanguageProcessor>, capacity: usize, window: usize) -> Self {
        Self {
            processor,
            recent: RecencyBuffer::new(capacity),
            recency_window: window,
            modified_words: HashSet::new(),
        }
    }

    pub fn processor(&self) -> &dyn LanguageProcessor {
        self.processor.as_ref()
    }

    pub fn recent_words(&self) -> &RecencyBuffer {
        &self.recent
    }

    /// Words rewritten by synonym substitution since the last reset
    pub fn modified_words(&self) -> &HashSet<String> {
        &self.modified_words
    }

    /// Clears per-call tracking; the recency buffer is kept across calls.
    pub fn reset_tracking(&mut self) {
        self.modified_words.clear();
    }

    /// Tone is accepted for future per-register profiles; today only the
    /// already-human gate selects between the two profiles.
    pub fn get_config_for_tone(&self, _tone: TargetTone, is_already_human: bool) -> ModificationConfig {
        if is_already_human {
            ModificationConfig {
                synonym_replacement: 0.12,
                uncertainty_probability: 0.0,
                colloquial_probability: 0.0,
                sentence_variation: 0.0,
                personal_touches: 0.0,
                structure_modification: 0.0,
                max_modifications_per_sentence: 1,
            }
        } else {
            ModificationConfig {
                synonym_replacement: 0.40,
                uncertainty_probability: 0.0,
                colloquial_probability: 0.0,
                sentence_variation: 0.0,
                personal_touches: 0.0,
                structure_modification: 0.0,
                max_modifications_per_sentence: 3,
            }
        }
    }

    /// Patterns run one after another, so an earlier replacement can feed a later pattern.
    /// Each non-empty replacement is prefixed with `SUBSTITUTION_MARK`; cleanup removes it.
    pub fn replace_ai_phrases<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Transformed, HumanizeError> {
        let mut out = text.to_string();
        let mut modifications = 0;

        for pattern in self.processor.phrase_patterns()? {
            if !pattern.regex.is_match(&out) {
                continue;
            }
            out = pattern
                .regex
                .replace_all(&out, |_: &Captures| {
                    modifications += 1;
                    match pattern.replacements.choose(&mut *rng).copied() {
                        Some(r) if !r.is_empty() => format!("{}{}", SUBSTITUTION_MARK, r),
                        _ => String::new(),
                    }
                })
                .into_owned();
        }

        Ok(Transformed {
            text: out,
            modifications,
        })
    }

    pub fn replace_synonyms_contextual<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        config: &ModificationConfig,
        _tone: TargetTone,
        rng: &mut R,
    ) -> Transformed {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut modifications = 0;
        let mut in_sentence = 0;

        for token in token_re().find_iter(text) {
            out.push_str(&text[cursor..token.start()]);
            cursor = token.end();

            let raw = token.as_str();
            let core = raw.trim_end_matches(|c: char| c.is_ascii_punctuation());
            let trailing = &raw[core.len()..];

            let replacement = if core.is_empty() || in_sentence >= config.max_modifications_per_sentence {
                None
            } else {
                self.try_substitute(core, config, rng)
            };

            match replacement {
                Some(word) => {
                    out.push_str(&word);
                    out.push_str(trailing);
                    modifications += 1;
                    in_sentence += 1;
                }
                None => out.push_str(raw),
            }

            if trailing.contains(|c: char| matches!(c, '.' | '!' | '?')) {
                in_sentence = 0;
            }
        }
        out.push_str(&text[cursor..]);

        Transformed {
            text: out,
            modifications,
        }
    }

    fn try_substitute<R: Rng + ?Sized>(
        &mut self,
        core: &str,
        config: &ModificationConfig,
        rng: &mut R,
    ) -> Option<String> {
        let key = core.to_lowercase();
        let candidates = self.processor.synonyms(&key)?;
        if rng.gen::<f64>() >= config.synonym_replacement {
            return None;
        }
        if self.recent.in_last(&key, self.recency_window) {
            return None;
        }

        let chosen = self.choose_best_synonym(candidates, rng)?;
        let word = if starts_uppercase(core) {
            capitalize_first(chosen)
        } else {
            chosen.to_string()
        };

        self.recent.push(key.clone());
        self.modified_words.insert(key);
        Some(word)
    }

    /// Score = brevity + not-recently-used bonus + closeness to the middle of
    /// the authored list; one of the top three is picked at random.
    fn choose_best_synonym<R: Rng + ?Sized>(
        &self,
        candidates: &'static [&'static str],
        rng: &mut R,
    ) -> Option<&'static str> {
        if candidates.is_empty() {
            return None;
        }
        let middle = (candidates.len() / 2) as f64;

        let mut scored: Vec<(f64, &'static str)> = candidates
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                let mut score = 15.0 - 0.5 * candidate.chars().count() as f64;
                if !self.recent.contains(candidate) {
                    score += 10.0;
                }
                score += 10.0 - (i as f64 - middle).abs();
                (score, *candidate)
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let top = scored.len().min(SYNONYM_TOP_CANDIDATES);
        Some(scored[rng.gen_range(0..top)].1)
    }

    pub fn restructure_nominal_phrases(&self, text: &str) -> Result<Transformed, HumanizeError> {
        let mut out = text.to_string();
        let mut modifications = 0;

        for rule in self.processor.nominal_rewrites()? {
            let hits = rule.regex.find_iter(&out).count();
            if hits == 0 {
                continue;
            }
            modifications += hits;
            out = rule
                .regex
                .replace_all(&out, rule.replacement.as_str())
                .into_owned();
        }

        Ok(Transformed {
            text: out,
            modifications,
        })
    }

    /// Drops the leading "The " from every third consecutive sentence that starts with it.
    pub fn reduce_the_repetition(&self, text: &str) -> Transformed {
        let mut streak = 0;
        let mut modifications = 0;

        let out = rewrite_sentences(text, |sentence| {
            if let Some(rest) = sentence.strip_prefix("The ") {
                streak += 1;
                if streak > 2 {
                    streak = 0;
                    modifications += 1;
                    return capitalize_first(rest);
                }
            } else {
                streak = 0;
            }
            sentence.to_string()
        });

        Transformed {
            text: out,
            modifications,
        }
    }

    pub fn add_human_imperfections<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Transformed, HumanizeError> {
        let rules = self.processor.imperfection_rewrites()?;
        if text.is_empty() {
            return Ok(Transformed::unchanged(text));
        }

        let mut out = text.to_string();
        let mut modifications = 0;

        for rule in rules {
            if rng.gen::<f64>() >= IMPERFECTION_PROBABILITY {
                continue;
            }
            let hits = rule.regex.find_iter(&out).count();
            if hits == 0 {
                continue;
            }
            modifications += hits;
            out = rule
                .regex
                .replace_all(&out, rule.replacement.as_str())
                .into_owned();
        }

        Ok(Transformed {
            text: out,
            modifications,
        })
    }
}

// Text Analyzer
// Register analysis (formality, technical density, sentence statistics) that
// decides how aggressively the pipeline rewrites a passage.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::models::{TargetTone, TextAnalysis};
use crate::services::text_processor::{count_paragraphs, split_sentences, word_tokens};

const FORMAL_INDICATORS: &[&str] = &[
    "furthermore", "moreover", "consequently", "therefore", "thus", "hence", "nevertheless",
    "nonetheless", "accordingly", "additionally", "subsequently", "whereby", "wherein", "herein",
    "notwithstanding", "however", "whereas", "regarding",
];

const CASUAL_MARKERS: &[&str] = &[
    "gonna", "wanna", "gotta", "yeah", "yep", "nope", "stuff", "kinda", "sorta", "basically",
    "actually", "really", "pretty", "cool", "awesome", "ok", "okay", "hey", "lol", "totally",
    "honestly", "super", "guess", "anyway",
];

const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "algorithms", "implementation", "framework", "frameworks", "methodology",
    "methodologies", "infrastructure", "optimization", "parameter", "parameters", "architecture",
    "protocol", "database", "api", "interface", "configuration", "deployment", "integration",
    "utilization", "latency", "throughput", "scalability", "module", "runtime", "compiler",
];

const LONG_WORD_CHARS: usize = 12;

fn colloquial_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:you know|i mean|sort of|kind of|to be honest|if you ask me|the way i see it|pretty much|a bunch of|no big deal)\b",
        )
        .expect("colloquial regex")
    })
}

/// Emphasis punctuation, emoji, contractions or first-person pronouns.
fn human_signal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"!|[\u{1F300}-\u{1FAFF}\u{2600}-\u{27BF}]|\b\w+['\u{2019}](?:s|t|re|ve|ll|d|m)\b|\b(?:I|me|my|we|us)\b",
        )
        .expect("human signal regex")
    })
}

fn first_person_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bI\b|(?i:\b(?:my|our)\b)").expect("first person regex"))
}

fn count_in(words: &[String], list: &[&str]) -> usize {
    words.iter().filter(|w| list.contains(&w.as_str())).count()
}

/// First matching rule wins, so every input maps to exactly one tone.
pub fn classify_tone(formality: f64, technical: f64, casual_count: usize) -> TargetTone {
    if formality > 7.0 {
        TargetTone::Formal
    } else if technical > 6.0 {
        TargetTone::Technical
    } else if casual_count > 5 || formality < 3.0 {
        TargetTone::Casual
    } else if formality > 5.0 && technical > 4.0 {
        TargetTone::Professional
    } else {
        TargetTone::Neutral
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let words = word_tokens(text);
        if words.is_empty() {
            return TextAnalysis::default();
        }

        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let word_count = words.len();
        let sentence_count = split_sentences(text).len().max(1);
        let sentences = sentence_count as f64;

        let formal_count = count_in(&lower, FORMAL_INDICATORS);
        let casual_count = count_in(&lower, CASUAL_MARKERS);
        let technical_count = count_in(&lower, TECHNICAL_TERMS);

        let long_words = words
            .iter()
            .filter(|w| w.chars().count() > LONG_WORD_CHARS)
            .count();
        let vocabulary_complexity = long_words as f64 / word_count as f64;

        let formality_score =
            (formal_count as f64 / sentences * 30.0 - casual_count as f64 / sentences * 20.0).clamp(0.0, 10.0);
        let technical_score =
            (technical_count as f64 / sentences * 40.0 + vocabulary_complexity * 30.0).min(10.0);

        let unique: HashSet<&str> = lower.iter().map(|w| w.as_str()).collect();
        let unique_word_ratio = unique.len() as f64 / word_count as f64;

        let existing_colloquial_count = colloquial_re().find_iter(&text.to_lowercase()).count();

        TextAnalysis {
            formality_score,
            technical_score,
            avg_sentence_length: word_count as f64 / sentences,
            vocabulary_complexity,
            target_tone: classify_tone(formality_score, technical_score, casual_count),
            paragraph_count: count_paragraphs(text),
            sentence_count,
            word_count,
            unique_word_ratio,
            is_already_human: self.is_already_human(text, formality_score, casual_count),
            existing_colloquial_count,
        }
    }

    /// Coarse gate, not a classifier: it only controls how hard the pipeline pushes.
    fn is_already_human(&self, text: &str, formality: f64, casual_count: usize) -> bool {
        let mut score = 0;
        if human_signal_re().is_match(text) {
            score += 1;
        }
        if formality < 4.0 {
            score += 1;
        }
        if casual_count >= 3 {
            score += 1;
        }
        if first_person_re().is_match(text) {
            score += 1;
        }
        score >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOTIC: &str = "Furthermore, it is important to note that the implementation of robust methodologies is essential. Moreover, the utilization of comprehensive frameworks facilitates substantial improvements.";

    const CHATTY: &str = "Honestly, I can't believe how fun our trip was! My kids loved the beach and we're totally going back next summer. It was awesome, yeah.";

    #[test]
    fn test_empty_text_is_zeroed_and_neutral() {
        let analysis = TextAnalyzer::new().analyze("");
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.sentence_count, 0);
        assert_eq!(analysis.formality_score, 0.0);
        assert_eq!(analysis.unique_word_ratio, 0.0);
        assert_eq!(analysis.target_tone, TargetTone::Neutral);
        assert!(!analysis.is_already_human);
    }

    #[test]
    fn test_whitespace_only_text_is_zeroed() {
        let analysis = TextAnalyzer::new().analyze("   \n\t ");
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.target_tone, TargetTone::Neutral);
    }

    #[test]
    fn test_robotic_text_is_formal_and_not_human() {
        let analysis = TextAnalyzer::new().analyze(ROBOTIC);
        assert_eq!(analysis.sentence_count, 2);
        assert_eq!(analysis.formality_score, 10.0);
        assert_eq!(analysis.target_tone, TargetTone::Formal);
        assert!(!analysis.is_already_human);
        assert!(analysis.vocabulary_complexity > 0.0);
    }

    #[test]
    fn test_chatty_text_is_already_human() {
        let analysis = TextAnalyzer::new().analyze(CHATTY);
        assert!(analysis.is_already_human);
        assert_eq!(analysis.target_tone, TargetTone::Casual);
    }

    #[test]
    fn test_tone_rules_apply_in_order() {
        assert_eq!(classify_tone(8.0, 9.0, 0), TargetTone::Formal);
        assert_eq!(classify_tone(5.0, 7.0, 0), TargetTone::Technical);
        assert_eq!(classify_tone(6.0, 2.0, 6), TargetTone::Casual);
        assert_eq!(classify_tone(2.0, 5.0, 0), TargetTone::Casual);
        assert_eq!(classify_tone(6.0, 5.0, 0), TargetTone::Professional);
        assert_eq!(classify_tone(4.0, 2.0, 0), TargetTone::Neutral);
    }

    #[test]
    fn test_colloquial_expressions_counted() {
        let analysis = TextAnalyzer::new().analyze("It was, you know, kind of a mess. I mean it.");
        assert_eq!(analysis.existing_colloquial_count, 3);
    }

    #[test]
    fn test_paragraphs_and_ratios() {
        let analysis = TextAnalyzer::new().analyze("One two two.\n\nThree four.");
        assert_eq!(analysis.paragraph_count, 2);
        assert_eq!(analysis.word_count, 5);
        assert!((analysis.unique_word_ratio - 0.8).abs() < 1e-9);
        assert!((analysis.avg_sentence_length - 2.5).abs() < 1e-9);
    }
}

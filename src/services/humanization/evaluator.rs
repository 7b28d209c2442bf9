// Humanizer Evaluator
// Heuristic score of how "AI-typical" a text reads: 100 minus pattern
// penalties. Used to compare a text before and after humanization.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::models::{DetectionRisk, EvasionIssue, EvasionReport, VersionComparison};

const PERFECT_SCORE: f64 = 100.0;
const EXCELLENT_IMPROVEMENT: f64 = 15.0;
const GOOD_IMPROVEMENT: f64 = 5.0;

/// (pattern, penalty per occurrence, description)
const DETECTION_TABLE: &[(&str, f64, &str)] = &[
    (r"\bFurthermore\b", 8.0, "Overused transition 'Furthermore'"),
    (r"\bMoreover\b", 8.0, "Overused transition 'Moreover'"),
    (r"\bAdditionally\b", 6.0, "Overused transition 'Additionally'"),
    (r"\bConsequently\b", 5.0, "Overused transition 'Consequently'"),
    (r"(?i)\bit is important to note\b", 10.0, "Filler phrase 'it is important to note'"),
    (r"(?i)\bit should be noted\b", 10.0, "Filler phrase 'it should be noted'"),
    (r"(?i)\bit is worth noting\b", 10.0, "Filler phrase 'it is worth noting'"),
    (r"(?i)\bin conclusion\b", 8.0, "Formulaic closer 'in conclusion'"),
    (r"(?i)\bin summary\b", 6.0, "Formulaic closer 'in summary'"),
    (r"(?i)\bin today's\s+(?:\w+\s+)?world\b", 10.0, "Cliche opener 'in today's ... world'"),
    (r"(?i)\bdelv(?:e|es|ing)\b", 5.0, "AI-favoured verb 'delve'"),
    (
        r"(?i)\b(?:utilize|utilization|leverage|facilitates?|comprehensive|robust|methodology|methodologies|substantial|paradigm|seamless(?:ly)?|holistic)\b",
        2.0,
        "AI-typical vocabulary",
    ),
    (r"(?i)\bthe \w+(?:tion|ment|ance|ence) of\b", 0.5, "Nominalized construction"),
    (r"(?i)\b(?:undoubtedly|certainly|clearly)\b", 2.0, "Overconfident intensifier"),
    (r"(?m)^(?:Overall|Ultimately),", 4.0, "Formulaic paragraph opener"),
    (r"(?i)\bplays? an? (?:crucial|pivotal|vital) role\b", 6.0, "Cliche 'plays a crucial role'"),
];

struct DetectionPattern {
    regex: Regex,
    penalty: f64,
    description: &'static str,
}

/// Patterns that fail to compile are skipped with a warning.
fn detection_patterns() -> &'static [DetectionPattern] {
    static PATTERNS: OnceLock<Vec<DetectionPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DETECTION_TABLE
            .iter()
            .filter_map(|(pattern, penalty, description)| match Regex::new(pattern) {
                Ok(regex) => Some(DetectionPattern {
                    regex,
                    penalty: *penalty,
                    description,
                }),
                Err(e) => {
                    warn!("[EVALUATOR] skipping invalid pattern {}: {}", pattern, e);
                    None
                }
            })
            .collect()
    })
}

fn recommendation_for(risk: DetectionRisk) -> &'static str {
    match risk {
        DetectionRisk::Low => "Text reads naturally; no further changes needed.",
        DetectionRisk::Medium => "Some AI-typical patterns remain; consider another pass or light manual edits.",
        DetectionRisk::High => "Strong AI-typical patterns detected; rewrite the flagged phrases before use.",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HumanizerEvaluator;

impl HumanizerEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate_ai_detection_evasion(&self, text: &str) -> EvasionReport {
        let mut score = PERFECT_SCORE;
        let mut issues_found = Vec::new();

        for pattern in detection_patterns() {
            let occurrences = pattern.regex.find_iter(text).count();
            if occurrences == 0 {
                continue;
            }
            let penalty = pattern.penalty * occurrences as f64;
            score -= penalty;
            issues_found.push(EvasionIssue {
                description: pattern.description.to_string(),
                occurrences,
                penalty: -penalty,
            });
        }

        let evasion_score = score.clamp(0.0, PERFECT_SCORE);
        let detection_risk = DetectionRisk::from_score(evasion_score);
        EvasionReport {
            evasion_score,
            detection_risk,
            issues_found,
            recommendation: recommendation_for(detection_risk).to_string(),
        }
    }

    pub fn compare_versions(&self, original: &str, humanized: &str) -> VersionComparison {
        let before = self.evaluate_ai_detection_evasion(original);
        let after = self.evaluate_ai_detection_evasion(humanized);
        let improvement = after.evasion_score - before.evasion_score;

        let recommendation = if improvement > EXCELLENT_IMPROVEMENT {
            "Excellent improvement"
        } else if improvement > GOOD_IMPROVEMENT {
            "Good improvement"
        } else {
            "Minimal improvement"
        };

        VersionComparison {
            original: before,
            humanized: after,
            improvement,
            recommendation: recommendation.to_string(),
        }
    }
}

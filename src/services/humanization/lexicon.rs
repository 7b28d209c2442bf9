// Lexicon
// Language-specific knowledge tables behind the LanguageProcessor interface.
// Tables are compiled once per process and shared read-only by every engine.

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::error::HumanizeError;

/// Placed before every phrase replacement so cleanup can tell inserted text
/// from the author's own. Noncharacter, never expected in real input.
pub const SUBSTITUTION_MARK: char = '\u{FDD0}';

/// Emitted by cleanup in place of a dash run, before compounds are restored.
pub const DASH_MARK: char = '\u{FDD1}';

/// AI-typical phrase with candidate replacements. An empty list (or `[""]`) deletes the match.
#[derive(Debug)]
pub struct PhrasePattern {
    pub regex: Regex,
    pub replacements: &'static [&'static str],
}

/// Fixed regex rewrite; `replacement` may reference capture groups (`$1`).
#[derive(Debug)]
pub struct RewriteRule {
    pub regex: Regex,
    pub replacement: String,
}

/// Knowledge tables the modification engine and cleanup pass draw on.
pub trait LanguageProcessor: Send + Sync {
    fn language(&self) -> &'static str;

    /// Candidate replacements for a lowercase word, in authored order.
    ///
    /// The order is significant: synonym selection prefers entries near the
    /// middle of the list, so reordering a list changes output distribution.
    fn synonyms(&self, word: &str) -> Option<&'static [&'static str]>;

    /// Phrase patterns, applied sequentially in this order.
    fn phrase_patterns(&self) -> Result<&[PhrasePattern], HumanizeError>;

    fn nominal_rewrites(&self) -> Result<&[RewriteRule], HumanizeError>;

    fn imperfection_rewrites(&self) -> Result<&[RewriteRule], HumanizeError>;

    /// Rules restoring hyphenated compounds broken apart by dash replacement.
    fn compound_rules(&self) -> Result<&[RewriteRule], HumanizeError>;

    /// Rules collapsing doubled sentence connectors ("So, so" -> "So").
    fn connector_rules(&self) -> Result<&[RewriteRule], HumanizeError>;

    fn uncertainty_markers(&self) -> &'static [&'static str];
}

// ============ English tables ============

const SYNONYM_TABLE: &[(&str, &[&str])] = &[
    // Verbs
    ("analyze", &["examine", "look at", "check out", "dig into", "study", "review", "assess", "evaluate"]),
    ("demonstrate", &["show", "prove", "illustrate", "make clear", "exhibit", "reveal", "display"]),
    ("indicate", &["suggest", "point to", "hint at", "show", "reveal", "imply", "signal"]),
    ("establish", &["set up", "create", "build", "form", "develop", "put in place", "institute"]),
    ("facilitate", &["help", "make easier", "assist", "enable", "support", "aid", "smooth the way"]),
    ("implement", &["put into action", "carry out", "execute", "apply", "use", "deploy", "roll out"]),
    ("optimize", &["improve", "enhance", "perfect", "fine-tune", "make better", "streamline"]),
    ("utilize", &["use", "employ", "apply", "work with", "make use of"]),
    ("leverage", &["use", "draw on", "tap into", "build on", "make use of"]),
    ("enhance", &["improve", "boost", "strengthen", "lift", "sharpen"]),
    // Adjectives
    ("comprehensive", &["complete", "thorough", "extensive", "full", "detailed", "all-encompassing"]),
    ("significant", &["important", "major", "big", "notable", "considerable", "meaningful"]),
    ("substantial", &["large", "considerable", "major", "significant", "hefty", "sizable"]),
    ("efficient", &["effective", "productive", "streamlined", "smooth", "well-organized"]),
    ("robust", &["strong", "solid", "reliable", "sturdy", "durable", "stable"]),
    ("innovative", &["creative", "new", "fresh", "original", "cutting-edge", "groundbreaking"]),
    ("essential", &["key", "vital", "needed", "important", "necessary"]),
    ("numerous", &["many", "lots of", "plenty of", "countless", "a bunch of"]),
    ("additional", &["extra", "more", "further", "added"]),
    // Nouns
    ("methodology", &["method", "approach", "way", "system", "process", "technique"]),
    ("methodologies", &["methods", "approaches", "ways", "systems", "processes", "techniques"]),
    ("framework", &["structure", "system", "model", "setup", "foundation", "base"]),
    ("frameworks", &["structures", "systems", "models", "setups", "foundations"]),
    ("implementation", &["execution", "application", "use", "deployment", "rollout"]),
    ("utilization", &["use", "usage", "application", "employment"]),
    ("improvements", &["gains", "upgrades", "advances", "fixes", "changes"]),
];

const PHRASE_TABLE: &[(&str, &[&str])] = &[
    // Openers
    (
        r"\bit is important to note that\b",
        &["Keep in mind that", "Bear in mind that", "Note that", "Just so you know,", "Actually,", "Honestly,"],
    ),
    (r"\bit should be noted that\b", &["Also,", "Plus,", "By the way,", "Another thing,"]),
    (r"\bit is worth noting that\b", &["Interestingly,", "Actually,", "Funny enough,"]),
    (r"\bneedless to say,?\s*", &[]),
    (r"\bin today's (?:fast-paced|digital|modern) world,?\s*", &[""]),
    // Transitions
    (
        r"\bin conclusion\b",
        &["So basically", "Bottom line", "To wrap this up", "Long story short", "All in all", "At the end of the day"],
    ),
    (r"\bin summary\b", &["So", "Basically", "To sum it up", "In short", "All told"]),
    (r"\bfurthermore\b", &["Also", "Plus", "On top of that", "What's more", "Beyond that"]),
    (r"\bmoreover\b", &["Also", "Plus", "And", "What's more", "On top of that", "Besides"]),
    (r"\badditionally\b", &["Also", "Plus", "And", "On top of that", "What's more", "Besides that"]),
    (r"\bconsequently\b", &["So", "As a result", "Because of this", "Therefore"]),
    // Closers
    (
        r"\boverall,",
        &["All in all,", "Generally speaking,", "For the most part,", "By and large,", "On the whole,"],
    ),
    // Overconfidence
    (r"\bclearly\b", &["Obviously", "Apparently", "Evidently", "Plainly"]),
    (r"\bundoubtedly\b", &["Probably", "Most likely", "Very likely"]),
    (r"\bcertainly\b", &["Definitely", "For sure", "Absolutely", "Of course"]),
];

const NOMINAL_TABLE: &[(&str, &str)] = &[
    (r"\bthe implementation of (\w+(?:\s+\w+)?)", "applying $1"),
    (r"\bthe utilization of (\w+(?:\s+\w+)?)", "using $1"),
    (r"\bthe development of (\w+(?:\s+\w+)?)", "developing $1"),
    (r"\bthe optimization of (\w+(?:\s+\w+)?)", "optimizing $1"),
    (r"\bthe establishment of (\w+(?:\s+\w+)?)", "setting up $1"),
    (r"\bthe analysis of (\w+(?:\s+\w+)?)", "analyzing $1"),
    (r"\bthe evaluation of (\w+(?:\s+\w+)?)", "evaluating $1"),
];

const IMPERFECTION_TABLE: &[(&str, &str)] = &[
    (r"\bin order to\b", "to"),
    (r"\bdue to the fact that\b", "because"),
    (r"\ba large number of\b", "a lot of"),
    (r"\bat this point in time\b", "now"),
    (r"\bprior to\b", "before"),
    (r"\bin the event that\b", "if"),
    (r"\bis able to\b", "can"),
    (r"\bare able to\b", "can"),
    (r"\butilize\b", "use"),
    // Only before a following word: "how it is." must stay uncontracted
    (r"\b(it|there) is(\s+\w)", "${1}'s${2}"),
    (r"\bdo not\b", "don't"),
    (r"\bdoes not\b", "doesn't"),
    (r"\bcannot\b", "can't"),
];

const COMPOUND_WORDS: &[&str] = &[
    "decision-making",
    "well-being",
    "long-term",
    "short-term",
    "real-time",
    "up-to-date",
    "state-of-the-art",
    "high-quality",
    "cutting-edge",
    "fine-tune",
    "all-encompassing",
    "well-organized",
    "follow-up",
    "end-to-end",
    "open-source",
    "user-friendly",
];

const CONNECTORS: &[&str] = &["so", "also", "plus", "and", "but", "actually", "basically", "well", "now"];

const UNCERTAINTY_MARKERS: &[&str] = &[
    "I think",
    "I believe",
    "It seems to me",
    "In my opinion",
    "From my perspective",
    "I'd say",
    "I reckon",
    "My guess is",
    "I suspect",
    "It appears",
    "Probably",
    "Maybe",
    "Perhaps",
    "Possibly",
    "Likely",
];

fn case_insensitive(pattern: &str) -> Result<Regex, String> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| format!("{}: {}", pattern, e))
}

fn compile_phrases(table: &[(&str, &'static [&'static str])]) -> Result<Vec<PhrasePattern>, String> {
    table
        .iter()
        .map(|(pattern, replacements)| {
            case_insensitive(pattern).map(|regex| PhrasePattern {
                regex,
                replacements: *replacements,
            })
        })
        .collect()
}

fn compile_rewrites(table: &[(&str, &str)]) -> Result<Vec<RewriteRule>, String> {
    table
        .iter()
        .map(|(pattern, replacement)| {
            case_insensitive(pattern).map(|regex| RewriteRule {
                regex,
                replacement: replacement.to_string(),
            })
        })
        .collect()
}

/// "decision-making" -> `\b(decision)(?:DASH_MARK|-)(making)\b` => "$1-$2"
fn compile_compounds(words: &[&str]) -> Result<Vec<RewriteRule>, String> {
    words
        .iter()
        .map(|word| {
            let parts: Vec<&str> = word.split('-').collect();
            let pattern = format!(
                r"\b{}\b",
                parts
                    .iter()
                    .map(|p| format!("({})", regex::escape(p)))
                    .collect::<Vec<_>>()
                    .join(format!("(?:{}|-)", DASH_MARK).as_str())
            );
            let replacement = (1..=parts.len())
                .map(|i| format!("${{{}}}", i))
                .collect::<Vec<_>>()
                .join("-");
            case_insensitive(&pattern).map(|regex| RewriteRule { regex, replacement })
        })
        .collect()
}

fn compile_connectors(words: &[&str]) -> Result<Vec<RewriteRule>, String> {
    words
        .iter()
        .map(|word| {
            let escaped = regex::escape(word);
            let pattern = format!(
                r#"(\A|[.!?]["')]?\s+)({mark}?)({word}),?\s+{mark}?{word}\b"#,
                mark = SUBSTITUTION_MARK,
                word = escaped
            );
            case_insensitive(&pattern).map(|regex| RewriteRule {
                regex,
                replacement: "${1}${2}${3}".to_string(),
            })
        })
        .collect()
}

fn loaded<T: 'static>(
    slot: &'static OnceLock<Result<Vec<T>, String>>,
    init: impl FnOnce() -> Result<Vec<T>, String>,
) -> Result<&'static [T], HumanizeError> {
    slot.get_or_init(init)
        .as_deref()
        .map_err(|e| HumanizeError::Pattern(e.clone()))
}

/// English lexicon. Zero-sized; all tables live in process-wide statics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishProcessor;

impl LanguageProcessor for EnglishProcessor {
    fn language(&self) -> &'static str {
        "en"
    }

    fn synonyms(&self, word: &str) -> Option<&'static [&'static str]> {
        static INDEX: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
        INDEX
            .get_or_init(|| SYNONYM_TABLE.iter().copied().collect())
            .get(word)
            .copied()
    }

    fn phrase_patterns(&self) -> Result<&[PhrasePattern], HumanizeError> {
        static RULES: OnceLock<Result<Vec<PhrasePattern>, String>> = OnceLock::new();
        loaded(&RULES, || compile_phrases(PHRASE_TABLE))
    }

    fn nominal_rewrites(&self) -> Result<&[RewriteRule], HumanizeError> {
        static RULES: OnceLock<Result<Vec<RewriteRule>, String>> = OnceLock::new();
        loaded(&RULES, || compile_rewrites(NOMINAL_TABLE))
    }

    fn imperfection_rewrites(&self) -> Result<&[RewriteRule], HumanizeError> {
        static RULES: OnceLock<Result<Vec<RewriteRule>, String>> = OnceLock::new();
        loaded(&RULES, || compile_rewrites(IMPERFECTION_TABLE))
    }

    fn compound_rules(&self) -> Result<&[RewriteRule], HumanizeError> {
        static RULES: OnceLock<Result<Vec<RewriteRule>, String>> = OnceLock::new();
        loaded(&RULES, || compile_compounds(COMPOUND_WORDS))
    }

    fn connector_rules(&self) -> Result<&[RewriteRule], HumanizeError> {
        static RULES: OnceLock<Result<Vec<RewriteRule>, String>> = OnceLock::new();
        loaded(&RULES, || compile_connectors(CONNECTORS))
    }

    fn uncertainty_markers(&self) -> &'static [&'static str] {
        UNCERTAINTY_MARKERS
    }
}

// Humanization Module
// Rewrites AI-typical prose so it reads as human-written:
// - analyzer: register analysis that gates how hard the pipeline pushes
// - lexicon: language tables behind the LanguageProcessor trait
// - engine: the individual rewrite passes and the synonym recency buffer
// - cleanup: final punctuation, spacing and capitalization repair
// - humanizer: orchestrates analysis, passes, cleanup and metrics
// - evaluator: heuristic AI-pattern score for before/after comparison

pub mod analyzer;
pub mod cleanup;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod humanizer;
pub mod lexicon;

pub use analyzer::{classify_tone, TextAnalyzer};
pub use cleanup::intelligent_cleanup;
pub use engine::{ModificationEngine, RecencyBuffer, Transformed};
pub use error::HumanizeError;
pub use evaluator::HumanizerEvaluator;
pub use humanizer::{Humanizer, DEFAULT_INTENSITY, MIN_TEXT_CHARS};
pub use lexicon::{EnglishProcessor, LanguageProcessor, PhrasePattern, RewriteRule};

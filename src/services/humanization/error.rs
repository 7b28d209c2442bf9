// Humanization errors
// Never surfaced by Humanizer::humanize; converted into the fallback result there.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HumanizeError {
    #[error("Invalid lexicon pattern: {0}")]
    Pattern(String),
    #[error("Stage '{stage}' panicked: {message}")]
    StagePanicked { stage: &'static str, message: String },
}

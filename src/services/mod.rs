// Clearify Core Services
// Text utilities, the humanization pipeline, job processing and settings

pub mod text_processor;
pub mod config_store;
pub mod humanization;
pub mod processing;

pub use text_processor::*;
pub use config_store::*;
pub use processing::{
    process_request,
    process_request_async,
    summarize_improvements,
    validate_request,
    ProcessingError,
    ValidatedRequest,
};

// Re-export the pipeline entry points
pub use humanization::{
    intelligent_cleanup,
    EnglishProcessor,
    HumanizeError,
    Humanizer,
    HumanizerEvaluator,
    LanguageProcessor,
    ModificationEngine,
    TextAnalyzer,
};

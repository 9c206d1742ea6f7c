//! Baggage Check Common Library
//!
//! Item catalog, rule engine, classifier result handling, scan session and
//! history shared by the CLI and any other front end.

pub mod types;
pub mod catalog;
pub mod rules;
pub mod error;
pub mod parser;
pub mod ai;
pub mod prompts;
pub mod store;
pub mod history;
pub mod preferences;
pub mod session;

pub use types::{Answers, BaggageVerdict, Language, Localized, Verdict, VerdictStatus};
pub use catalog::{CategoryId, ItemCategory, Question, QuestionOption, CATEGORIES};
pub use error::{Error, Result};
pub use parser::{extract_json_object, parse_response_object};
pub use ai::{normalize, AiAnalysis, AiResolution, Confidence, DetectedProperties};
pub use prompts::build_classification_prompt;
pub use store::{KeyValueStore, MemoryStore};
pub use history::{HistoryStore, RecordSink, ScanRecord, HISTORY_KEY, MAX_HISTORY};
pub use preferences::{load_language, save_language, LANGUAGE_KEY};
pub use session::{
    AiOutcome, AttemptId, ClassificationMode, PersistOutcome, Resolution, ScanSession,
    SessionState, VerdictSource,
};

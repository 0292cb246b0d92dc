//! Core of the bilingual flashcard study tool.
//!
//! Provides:
//! - Line parser turning pasted `term | translation` text into cards
//! - Catalog flattening for `{english, chinese}` word lists
//! - Round-based study session engine with one-level undo
//! - Shared types (Card, Outcome, Progress, summaries)

pub mod catalog;
pub mod error;
pub mod parser;
pub mod session;
pub mod types;

pub use catalog::{to_input_text, CatalogEntry};
pub use error::{ParseError, Result, SessionError, SessionResult};
pub use parser::{count_entries, parse, split_line, ParsedDeck, SplitStrategy, SAMPLE_INPUT};
pub use session::{LastAction, StudySession};
pub use types::{
    Card, CardStatus, CompletionSummary, EarlyExitMode, Outcome, Phase, Progress, RoundEnd,
    RoundMode, RoundSummary,
};

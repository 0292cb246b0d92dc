//! Error types for study-core.

use crate::types::Phase;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Result type alias for session engine commands.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while turning pasted text into cards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,

    #[error("no valid cards found ({skipped} lines skipped)")]
    NoValidCards { skipped: usize },
}

/// Errors returned by the study session engine.
///
/// None of these leave the session half-modified: a command either applies
/// fully or is rejected with the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("cannot {operation} while {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: Phase,
    },

    #[error("cannot start a session without cards")]
    EmptyDeck,
}

impl SessionError {
    pub(crate) fn invalid(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidTransition { operation, phase }
    }
}

//! Core types for the study session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card mastery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Mastered,
    NotMastered,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

/// A single term/translation pair.
///
/// `id` is the card's position among the non-blank input lines and never
/// changes for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: usize,
    pub front: String,
    pub back: String,
    pub status: CardStatus,
}

impl Card {
    pub fn new(id: usize, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            status: CardStatus::New,
        }
    }
}

/// Learner's verdict on the card being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Mastered,
    NotMastered,
}

impl Outcome {
    /// Status a card takes when classified with this outcome.
    pub fn status(self) -> CardStatus {
        match self {
            Self::Mastered => CardStatus::Mastered,
            Self::NotMastered => CardStatus::NotMastered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mastered => "mastered",
            Self::NotMastered => "not_mastered",
        }
    }
}

/// Which cards make up the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    All,
    NotMasteredOnly,
}

/// Ways of leaving a round before every card has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarlyExitMode {
    RestartAll,
    StudyNotMastered,
    BackToInput,
}

/// Session state machine tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Studying,
    RoundComplete,
    SessionComplete,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Studying => "studying",
            Self::RoundComplete => "round_complete",
            Self::SessionComplete => "session_complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// Position within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub mastered_count: usize,
    pub not_mastered_count: usize,
    pub round: u32,
}

impl Progress {
    /// Share of the round already classified, 0.0 to 100.0.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Statistics shown when a round ends with cards still to practise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub total: usize,
    pub mastered_count: usize,
    pub not_mastered_count: usize,
    /// Whole percent, rounded half up.
    pub accuracy: u32,
}

/// Result of closing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RoundEnd {
    RoundComplete(RoundSummary),
    SessionComplete(CompletionSummary),
}

/// Statistics shown once every card is mastered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub final_mastered_count: usize,
    pub total_cards: usize,
    pub round: u32,
    /// Whole percent, rounded half up.
    pub efficiency: u32,
}

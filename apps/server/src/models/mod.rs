//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::services::sessions::SessionEntry;

// Re-export shared types from study-core
pub use study_core::{
    Card, CatalogEntry, CompletionSummary, EarlyExitMode, Outcome, Phase, Progress, RoundMode,
    RoundSummary,
};

// === Card input ===

/// Study material, either pasted text or a word catalog.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CardInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub catalog: Option<Vec<CatalogEntry>>,
}

impl CardInput {
    /// Raw text to feed the parser, flattening a catalog if one was sent.
    pub fn input_text(&self) -> Result<String> {
        match (&self.text, &self.catalog) {
            (Some(text), None) => Ok(text.clone()),
            (None, Some(entries)) => Ok(study_core::to_input_text(entries)),
            (Some(_), Some(_)) => Err(ApiError::BadRequest(
                "Send either text or catalog, not both".to_string(),
            )),
            (None, None) => Err(ApiError::BadRequest(
                "Either text or catalog is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    pub cards: Vec<Card>,
    pub skipped: usize,
    pub entry_count: usize,
    pub shuffle_available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SampleResponse {
    pub text: String,
    pub entry_count: usize,
}

// === Session commands ===

#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionRequest {
    #[serde(flatten)]
    pub input: CardInput,
    #[serde(default)]
    pub shuffle: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub outcome: Outcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextRoundRequest {
    pub mode: RoundMode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndEarlyRequest {
    pub mode: EarlyExitMode,
}

/// Everything the study screen renders after a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub phase: Phase,
    pub round: u32,
    pub progress: Progress,
    pub progress_percent: f64,
    pub current_card: Option<Card>,
    pub round_summary: Option<RoundSummary>,
    pub completion: Option<CompletionSummary>,
    pub can_undo: bool,
    /// Whether the deck was shuffled when the session started.
    pub is_shuffled: bool,
    pub skipped_lines: usize,
    /// Text to put back in the input box once the session is idle again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
}

impl SessionSnapshot {
    pub fn capture(session_id: Uuid, entry: &SessionEntry) -> Self {
        let session = &entry.session;
        let progress = session.progress();
        let phase = session.phase();

        Self {
            session_id,
            phase,
            round: session.round(),
            progress,
            progress_percent: progress.percent(),
            current_card: session.current_card().ok().flatten().cloned(),
            round_summary: session.round_summary(),
            completion: session.completion(),
            can_undo: session.can_undo(),
            is_shuffled: session.is_shuffled(),
            skipped_lines: entry.skipped_lines,
            input_text: (phase == Phase::Idle).then(|| entry.source_text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_text_prefers_what_was_sent() {
        let input = CardInput {
            text: Some("look | 看".to_string()),
            catalog: None,
        };
        assert_eq!(input.input_text().unwrap(), "look | 看");

        let input = CardInput {
            text: None,
            catalog: Some(vec![CatalogEntry {
                english: "hello".to_string(),
                chinese: "你好".to_string(),
            }]),
        };
        assert_eq!(input.input_text().unwrap(), "hello | 你好");
    }

    #[test]
    fn input_text_requires_exactly_one_source() {
        assert!(matches!(
            CardInput::default().input_text(),
            Err(ApiError::BadRequest(_))
        ));

        let both = CardInput {
            text: Some("a | b".to_string()),
            catalog: Some(vec![]),
        };
        assert!(matches!(both.input_text(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn start_request_accepts_flat_body() {
        let request: StartSessionRequest =
            serde_json::from_str(r#"{"text": "look | 看", "shuffle": true}"#).unwrap();
        assert_eq!(request.input.text.as_deref(), Some("look | 看"));
        assert_eq!(request.shuffle, Some(true));
    }
}

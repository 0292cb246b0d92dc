//! Study session endpoints
//!
//! Every command locks the store once, applies one engine operation and
//! answers with a fresh snapshot.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use study_core::{parse, StudySession, SAMPLE_INPUT};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::sessions::SessionEntry;
use crate::AppState;

/// Parse the request body into cards, keeping the raw text for later.
fn prepare(input: &CardInput) -> Result<(String, Vec<Card>, usize)> {
    let text = input.input_text()?;
    let deck = parse(&text)?;
    let skipped = deck.skipped;
    let cards = deck.into_cards()?;
    Ok((text, cards, skipped))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>)> {
    let (text, cards, skipped) = prepare(&payload.input)?;
    let shuffle = payload.shuffle.unwrap_or(state.config.shuffle_by_default);

    let mut session = StudySession::new();
    session.start(cards, shuffle)?;

    let id = Uuid::new_v4();
    let entry = SessionEntry::new(session, text, skipped);
    let snapshot = SessionSnapshot::capture(id, &entry);
    state.sessions.insert(id, entry)?;

    tracing::info!(
        session_id = %id,
        cards = snapshot.progress.total,
        skipped,
        "Created study session"
    );

    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/sessions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    let snapshot = state
        .sessions
        .with_session(id, |entry| Ok(SessionSnapshot::capture(id, entry)))?;
    Ok(Json(snapshot))
}

/// DELETE /api/sessions/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Value>> {
    if !state.sessions.remove(id)? {
        return Err(ApiError::NotFound(format!("Session {} not found", id)));
    }

    tracing::info!(session_id = %id, "Deleted study session");
    Ok(Json(json!({ "deleted": true })))
}

/// POST /api/sessions/:id/start
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionSnapshot>> {
    let (text, cards, skipped) = prepare(&payload.input)?;
    let shuffle = payload.shuffle.unwrap_or(state.config.shuffle_by_default);

    command(&state, id, |entry| {
        entry.session.start(cards, shuffle)?;
        entry.source_text = text;
        entry.skipped_lines = skipped;
        Ok(())
    })
}

/// POST /api/sessions/:id/classify
pub async fn classify(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClassifyRequest>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| {
        Ok(entry.session.classify(payload.outcome)?)
    })
}

/// POST /api/sessions/:id/undo
pub async fn undo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| {
        entry.session.undo()?;
        Ok(())
    })
}

/// POST /api/sessions/:id/shuffle
pub async fn shuffle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| Ok(entry.session.shuffle()?))
}

/// POST /api/sessions/:id/end-round
pub async fn end_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| {
        entry.session.end_round()?;
        Ok(())
    })
}

/// POST /api/sessions/:id/next-round
pub async fn next_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NextRoundRequest>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| {
        Ok(entry.session.start_next_round(payload.mode)?)
    })
}

/// POST /api/sessions/:id/end-early
///
/// With `back_to_input` the snapshot carries the text the session was
/// started from so the input box can be refilled.
pub async fn end_early(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EndEarlyRequest>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| Ok(entry.session.end_early(payload.mode)?))
}

/// POST /api/sessions/:id/restart
///
/// Unlike `back_to_input`, the input box is refilled with the sample deck.
pub async fn restart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    command(&state, id, |entry| {
        entry.session.restart();
        entry.source_text = SAMPLE_INPUT.to_string();
        entry.skipped_lines = 0;
        Ok(())
    })
}

fn command(
    state: &AppState,
    id: Uuid,
    apply: impl FnOnce(&mut SessionEntry) -> Result<()>,
) -> Result<Json<SessionSnapshot>> {
    let snapshot = state.sessions.with_session(id, |entry| {
        apply(entry)?;
        Ok(SessionSnapshot::capture(id, entry))
    })?;

    tracing::debug!(session_id = %id, phase = snapshot.phase.as_str(), "Applied session command");
    Ok(Json(snapshot))
}

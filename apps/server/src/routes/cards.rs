//! Input screen endpoints

use axum::Json;
use study_core::{count_entries, parse, SAMPLE_INPUT};

use crate::error::Result;
use crate::models::*;

/// GET /api/cards/sample
pub async fn sample() -> Json<SampleResponse> {
    Json(SampleResponse {
        text: SAMPLE_INPUT.to_string(),
        entry_count: count_entries(SAMPLE_INPUT),
    })
}

/// POST /api/cards/parse
pub async fn preview(Json(payload): Json<CardInput>) -> Result<Json<ParseResponse>> {
    let text = payload.input_text()?;
    let entry_count = count_entries(&text);
    let deck = parse(&text)?;

    Ok(Json(ParseResponse {
        cards: deck.cards,
        skipped: deck.skipped,
        entry_count,
        shuffle_available: entry_count > 1,
    }))
}

//! Error handling for the study API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use study_core::{ParseError, SessionError};
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Parse(ParseError::EmptyInput) => (StatusCode::BAD_REQUEST, "empty_input"),
            ApiError::Parse(ParseError::NoValidCards { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "no_valid_cards")
            }
            ApiError::Session(SessionError::NothingToUndo) => {
                (StatusCode::CONFLICT, "nothing_to_undo")
            }
            ApiError::Session(SessionError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "invalid_transition")
            }
            ApiError::Session(SessionError::EmptyDeck) => (StatusCode::BAD_REQUEST, "empty_deck"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::Phase;

    #[test]
    fn test_empty_input_status() {
        let response = ApiError::from(ParseError::EmptyInput).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_valid_cards_status() {
        let error = ApiError::from(ParseError::NoValidCards { skipped: 2 });
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_nothing_to_undo_status() {
        let response = ApiError::from(SessionError::NothingToUndo).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_transition_status() {
        let error = ApiError::from(SessionError::InvalidTransition {
            operation: "classify a card",
            phase: Phase::Idle,
        });
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("session".to_string());
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal("lock poisoned".to_string());
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display_session() {
        let error = ApiError::from(SessionError::NothingToUndo);
        assert_eq!(error.to_string(), "Session error: nothing to undo");
    }

    #[test]
    fn test_error_display_parse() {
        let error = ApiError::from(ParseError::EmptyInput);
        assert_eq!(error.to_string(), "Parse error: input is empty");
    }

    #[test]
    fn test_error_display_bad_request() {
        let error = ApiError::BadRequest("missing field".to_string());
        assert_eq!(error.to_string(), "Bad request: missing field");
    }
}

//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use leadchat_types::error::ConversationError;

use crate::http::response::{ApiErrorDetail, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// No session with the requested id.
    SessionNotFound,
    /// Conversation state machine errors.
    Conversation(ConversationError),
    /// Validation error.
    Validation(String),
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        AppError::Conversation(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Conversation(e @ ConversationError::InvalidState { .. }) => {
                (StatusCode::CONFLICT, "INVALID_STATE", e.to_string())
            }
            AppError::Conversation(ConversationError::Notify(e)) => (
                StatusCode::BAD_GATEWAY,
                "LEAD_NOTIFICATION_FAILED",
                format!("Could not deliver lead details: {e}. Please try again."),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ApiResponse::failure(ApiErrorDetail { code, message });
        (status, Json(body)).into_response()
    }
}

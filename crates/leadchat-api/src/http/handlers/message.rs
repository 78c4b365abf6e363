//! Conversation HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/sessions/{id}/messages - Send a user message
//! - POST /api/v1/sessions/{id}/lead     - Submit the lead form
//!
//! Both return the turns appended by the action plus the lead-form toggle.
//! Requests on the same session are serialized by the session lock.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadchat_core::notify::notifier::LeadNotifier;
use leadchat_types::chat::Turn;
use leadchat_types::lead::LeadInfo;

use super::parse_uuid;
use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Outcome of one conversation action.
#[derive(Debug, Serialize)]
pub struct ExchangeView {
    pub session_id: Uuid,
    /// Turns appended by this action, in order.
    pub turns: Vec<Turn>,
    pub show_lead_form: bool,
}

/// POST /api/v1/sessions/{id}/messages - Send a user message.
pub async fn send_message<N: LeadNotifier + 'static>(
    State(state): State<AppState<N>>,
    Path(session_id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<ExchangeView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Message must not be empty".to_string()));
    }

    let handle = state.sessions.get(&sid).ok_or(AppError::SessionNotFound)?;
    let mut session = handle.lock().await;

    let before = session.turns().len();
    let outcome = state
        .controller
        .handle_user_message(&mut session, body.message)
        .await?;

    let view = ExchangeView {
        session_id: sid,
        turns: session.turns()[before..].to_vec(),
        show_lead_form: outcome.show_lead_form(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/lead - Submit the lead form.
///
/// A notifier failure returns 502 and leaves the form open for a retry.
pub async fn submit_lead<N: LeadNotifier + 'static>(
    State(state): State<AppState<N>>,
    Path(session_id): Path<String>,
    Json(lead): Json<LeadInfo>,
) -> Result<Json<ApiResponse<ExchangeView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid).ok_or(AppError::SessionNotFound)?;
    let mut session = handle.lock().await;

    let captured = state.controller.submit_lead_info(&mut session, lead).await?;

    let view = ExchangeView {
        session_id: sid,
        turns: captured.into_turns(),
        show_lead_form: session.awaiting_lead_info(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

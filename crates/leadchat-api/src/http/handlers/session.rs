//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions      - Start a session
//! - GET    /api/v1/sessions/{id} - Get a session
//! - DELETE /api/v1/sessions/{id} - End a session

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use leadchat_core::chat::session::SessionState;
use leadchat_core::notify::notifier::LeadNotifier;
use leadchat_types::chat::{FlowState, Turn};

use super::parse_uuid;
use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Public view of a session. Never exposes the pending reply.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub state: FlowState,
    pub turns: Vec<Turn>,
    pub user_message_count: u32,
    pub lead_captured: bool,
    pub show_lead_form: bool,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        Self {
            session_id: state.id(),
            started_at: state.started_at(),
            state: state.flow(),
            turns: state.turns().to_vec(),
            user_message_count: state.user_message_count(),
            lead_captured: state.lead_captured(),
            show_lead_form: state.awaiting_lead_info(),
        }
    }
}

/// POST /api/v1/sessions - Start a new session.
pub async fn create_session<N: LeadNotifier + 'static>(
    State(state): State<AppState<N>>,
) -> (StatusCode, Json<ApiResponse<SessionView>>) {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.controller.start_session();
    let view = SessionView::from(&session);
    let id = state.sessions.insert(session);

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(view, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("messages", &format!("/api/v1/sessions/{id}/messages"));

    (StatusCode::CREATED, Json(resp))
}

/// GET /api/v1/sessions/{id} - Get a session by ID.
pub async fn get_session<N: LeadNotifier + 'static>(
    State(state): State<AppState<N>>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let handle = state.sessions.get(&sid).ok_or(AppError::SessionNotFound)?;
    let view = SessionView::from(&*handle.lock().await);

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// DELETE /api/v1/sessions/{id} - End a session.
pub async fn delete_session<N: LeadNotifier + 'static>(
    State(state): State<AppState<N>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let sid = parse_uuid(&session_id)?;
    if !state.sessions.remove(&sid) {
        return Err(AppError::SessionNotFound);
    }
    tracing::info!(session_id = %sid, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

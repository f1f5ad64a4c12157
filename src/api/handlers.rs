//! HTTP request handlers

use super::types::{
    ActionRequest, ChatReply, ChatRequest, ErrorResponse, SessionChatRequest, SessionView,
};
use super::AppState;
use crate::llm::LlmMessage;
use crate::runtime::{LessonRuntime, SessionError};
use crate::state_machine::{Event, TransitionError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Stateless tutor relay
        .route("/api/chat", post(relay_chat))
        // Lesson sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/actions", post(session_action))
        .route("/api/sessions/:id/chat", post(session_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Tutor Relay
// ============================================================

async fn relay_chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    let history: Vec<LlmMessage> = req.history.into_iter().map(LlmMessage::from).collect();
    let context = req.context.unwrap_or_default();
    let reply = state.relay.ask(&req.message, &context, &history).await;
    Json(ChatReply { reply })
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(session.snapshot().await.into())))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(session.snapshot().await.into()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session not found: {id}")))
    }
}

async fn session_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(action): Json<ActionRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;

    let result = match &action {
        ActionRequest::StartDiagnostic => session.dispatch(Event::StartDiagnostic).await,
        ActionRequest::StartLesson => session.dispatch(Event::StartLesson).await,
        ActionRequest::StartBridge => session.dispatch(Event::StartBridge).await,
        ActionRequest::StartDefinition => session.dispatch(Event::StartDefinition).await,
        ActionRequest::StartPractice => session.dispatch(Event::StartPractice).await,
        ActionRequest::AnswerDiagnostic { option_id } => {
            session.answer_diagnostic(option_id).await
        }
        ActionRequest::AnswerPractice { option_id } => session.answer_practice(option_id).await,
    };

    // Actions that don't apply to the current step are ignored
    if let Err(e) = result {
        tracing::debug!(session_id = %id, ?action, error = %e, "Ignored session action");
    }

    Ok(Json(session.snapshot().await.into()))
}

async fn session_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SessionChatRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;
    session.submit_freeform(req.text).await?;
    Ok(Json(session.snapshot().await.into()))
}

async fn find_session(state: &AppState, id: &str) -> Result<Arc<LessonRuntime>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("limits-tutor ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unavailable(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::CapacityReached(_) => AppError::Unavailable(e.to_string()),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            e @ TransitionError::EmptyInput => AppError::BadRequest(e.to_string()),
            e @ TransitionError::RelayBusy => AppError::Conflict(e.to_string()),
            TransitionError::InvalidTransition(msg) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

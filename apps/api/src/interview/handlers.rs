//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::interview::session::SessionSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub job_title: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInterviewResponse {
    pub id: Uuid,
    pub session: SessionSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
pub async fn handle_create(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateInterviewResponse>), AppError> {
    let id = state.sessions.create().await;
    let active = state.sessions.len().await;
    info!(interview_id = %id, active, "Interview session created");
    let session = state.sessions.acquire(id).await?.snapshot();
    Ok((StatusCode::CREATED, Json(CreateInterviewResponse { id, session })))
}

/// GET /api/v1/interviews/:id
///
/// `409` while another request for the session is still running.
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.acquire(id).await?.snapshot()))
}

/// POST /api/v1/interviews/:id/start
pub async fn handle_start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<StartRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.sessions.acquire(id).await?;
    session.start(&request.job_title, state.llm.as_ref()).await?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/interviews/:id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<AnswerRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.sessions.acquire(id).await?;
    session
        .submit_answer(&request.answer, state.llm.as_ref())
        .await?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/interviews/:id/next
///
/// Moves to the next question, or finishes and summarizes after the last one.
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.sessions.acquire(id).await?;
    session.advance(state.llm.as_ref()).await?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/interviews/:id/summary
///
/// Retries the summary of a finished interview whose first attempt failed.
pub async fn handle_retry_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.sessions.acquire(id).await?;
    session.retry_summary(state.llm.as_ref()).await?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/interviews/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.sessions.acquire(id).await?;
    session.reset();
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    // Refuse while an operation is outstanding.
    drop(state.sessions.acquire(id).await?);
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Interview session endpoints — the thin HTTP surface over the core.
//!
//! This layer owns presentation concerns only: session lookup, the
//! completed-session guard, and the request/response DTOs. All conversation
//! logic lives in `interview::machine`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StartInterviewRequest {
    /// Interview language; the language-selection stage runs when absent.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct StartInterviewResponse {
    pub interview_id: Uuid,
    pub greeting: String,
}

#[derive(Deserialize)]
pub struct SubmitMessageRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct SubmitMessageResponse {
    pub reply: String,
    pub complete: bool,
}

#[derive(Serialize)]
pub struct InterviewStatusResponse {
    pub stage: &'static str,
    pub complete: bool,
}

/// POST /api/v1/interviews
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> Result<(StatusCode, Json<StartInterviewResponse>), AppError> {
    let language = req
        .language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    let (interview_id, greeting) = state.sessions.create(language).await;
    tracing::info!(%interview_id, "Interview started");
    Ok((
        StatusCode::CREATED,
        Json(StartInterviewResponse {
            interview_id,
            greeting,
        }),
    ))
}

/// POST /api/v1/interviews/:id/messages
///
/// One user turn, processed to completion while the session's own mutex is
/// held — turns within a session never overlap, independent sessions do.
pub async fn handle_submit_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitMessageRequest>,
) -> Result<Json<SubmitMessageResponse>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    let mut session = session.lock().await;

    if session.is_complete() {
        return Err(AppError::InterviewComplete(format!(
            "Interview {id} is over; no further messages are accepted"
        )));
    }

    let reply = state.interviewer.handle(&mut session, &req.message).await;

    Ok(Json(SubmitMessageResponse {
        complete: session.is_complete(),
        reply,
    }))
}

/// GET /api/v1/interviews/:id
pub async fn handle_interview_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewStatusResponse>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    let session = session.lock().await;
    Ok(Json(InterviewStatusResponse {
        stage: session.stage.name(),
        complete: session.is_complete(),
    }))
}

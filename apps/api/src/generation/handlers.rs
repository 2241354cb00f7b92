//! Axum route handlers for the generation API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::history::HistoryEntry;
use crate::generation::orchestrator::{run_generation, GenerationStatus};
use crate::models::profile::ResumeType;
use crate::profile::handlers::SessionQuery;
use crate::state::AppState;

fn default_template() -> String {
    "classic".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub resume_type: ResumeType,
    #[serde(default = "default_template")]
    pub template_id: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume: String,
}

/// POST /api/v1/resumes/generate
///
/// Single-flight per session: a second call while one is in flight gets 409.
pub async fn handle_generate(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let resume = run_generation(
        &session,
        state.generator.as_ref(),
        &state.storage,
        params.session_id,
        request.resume_type,
        &request.template_id,
    )
    .await?;
    Ok(Json(GenerateResponse { resume }))
}

/// GET /api/v1/resumes/current
pub async fn handle_current(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<GenerationStatus>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let locked = session.lock().await;
    Ok(Json(locked.generation.status()))
}

/// GET /api/v1/resumes/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let locked = session.lock().await;
    Ok(Json(locked.history.entries().cloned().collect()))
}

/// GET /api/v1/resumes/history/:index
pub async fn handle_history_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<HistoryEntry>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let locked = session.lock().await;
    Ok(Json(locked.history.get(index)?.clone()))
}

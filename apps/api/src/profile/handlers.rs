use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::orchestrator::GenerationStatus;
use crate::models::profile::ProfileData;
use crate::profile::achievements::{AchievementId, AchievementRecord};
use crate::profile::completeness::AnalysisResult;
use crate::profile::store::ProfileMutation;
use crate::session::OperationStatuses;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SessionQuery {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: ProfileData,
    pub analysis: AnalysisResult,
}

#[derive(Serialize)]
pub struct MutationResponse {
    pub profile: ProfileData,
    pub analysis: AnalysisResult,
    pub newly_unlocked: Vec<AchievementId>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub generation: GenerationStatus,
    pub operations: OperationStatuses,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let locked = session.lock().await;
    Ok(Json(ProfileResponse {
        profile: locked.profile.clone(),
        analysis: locked.analysis.clone(),
    }))
}

/// POST /api/v1/profile/mutate
///
/// Applies one mutation from the closed `ProfileMutation` union, recomputes
/// the analysis, and reports any achievements the change unlocked.
pub async fn handle_mutate(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
    Json(mutation): Json<ProfileMutation>,
) -> Result<Json<MutationResponse>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let mut locked = session.lock().await;
    let newly_unlocked = locked.apply(&mutation)?;
    Ok(Json(MutationResponse {
        profile: locked.profile.clone(),
        analysis: locked.analysis.clone(),
        newly_unlocked,
    }))
}

/// POST /api/v1/profile/example
///
/// Replaces the profile with the built-in example and unlocks `example-used`.
pub async fn handle_load_example(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<MutationResponse>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let mut locked = session.lock().await;
    let mut newly_unlocked = locked.replace_profile(ProfileData::example());
    if locked.achievements.record_action(AchievementId::ExampleUsed) {
        newly_unlocked.push(AchievementId::ExampleUsed);
    }
    Ok(Json(MutationResponse {
        profile: locked.profile.clone(),
        analysis: locked.analysis.clone(),
        newly_unlocked,
    }))
}

/// GET /api/v1/achievements
pub async fn handle_get_achievements(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Vec<AchievementRecord>>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let locked = session.lock().await;
    Ok(Json(locked.achievements.unlocked().to_vec()))
}

/// GET /api/v1/status
///
/// Generation state plus the per-operation status records.
pub async fn handle_get_status(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<StatusResponse>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;
    let locked = session.lock().await;
    Ok(Json(StatusResponse {
        generation: locked.generation.status(),
        operations: locked.operations.clone(),
    }))
}

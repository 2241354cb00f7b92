//! Settings endpoints. Preferences are persisted on their own and never feed
//! the analysis pipeline.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::settings::Settings;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<Settings>, AppError> {
    let settings = state.storage.load_settings().await?;
    Ok(Json(settings))
}

/// PUT /api/v1/settings
pub async fn handle_put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    state.storage.save_settings(&settings).await?;
    Ok(Json(settings))
}

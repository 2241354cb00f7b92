//! Axum route handlers for the independent async operations: file export,
//! ATS check, vacancy search, cloud export.
//!
//! Each operation owns its own status record in the session and never holds
//! the session lock across the collaborator await, so they run concurrently
//! with an in-flight generation and with each other. A failure lands in the
//! operation's own error slot; nothing else is touched.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::collaborators::ats::AtsReport;
use crate::collaborators::exporter::{ExportFormat, ExportOptions};
use crate::collaborators::vacancies::Vacancy;
use crate::errors::AppError;
use crate::profile::achievements::AchievementId;
use crate::profile::handlers::SessionQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub options: ExportOptions,
}

#[derive(Debug, Serialize)]
pub struct CloudExportResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct CloudExportRequest {
    pub provider: String,
    #[serde(default)]
    pub options: ExportOptions,
}

/// POST /api/v1/export
///
/// Renders the current résumé through the export collaborator and streams the
/// binary back as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;

    let resume = {
        let mut locked = session.lock().await;
        let resume = current_resume(&locked)?;
        locked.operations.download.start();
        resume
    };

    let filename = request
        .filename
        .unwrap_or_else(|| format!("resume.{}", request.format.extension()));

    let result = state
        .exporter
        .export(&resume, request.format, &filename, &request.options)
        .await;

    let mut locked = session.lock().await;
    match result {
        Ok(bytes) => {
            locked.operations.download.succeed();
            locked.achievements.record_action(AchievementId::Downloaded);

            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(request.format.content_type()),
            );
            let disposition = format!("attachment; filename=\"{filename}\"");
            headers.insert(
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .map_err(|e| AppError::Validation(format!("Invalid filename: {e}")))?,
            );
            Ok((headers, bytes).into_response())
        }
        Err(err) => {
            locked.operations.download.fail(err.to_string());
            Err(err.into())
        }
    }
}

/// POST /api/v1/ats-check
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<AtsReport>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;

    let resume = {
        let mut locked = session.lock().await;
        let resume = current_resume(&locked)?;
        locked.operations.ats_check.start();
        resume
    };

    let result = state.ats.check(&resume).await;

    let mut locked = session.lock().await;
    match result {
        Ok(report) => {
            locked.operations.ats_check.succeed();
            locked.achievements.record_action(AchievementId::AtsChecked);
            Ok(Json(report))
        }
        Err(err) => {
            locked.operations.ats_check.fail(err.to_string());
            Err(err.into())
        }
    }
}

/// GET /api/v1/vacancies
///
/// Searches by the profile's target position, in the language from settings.
pub async fn handle_search_vacancies(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Vec<Vacancy>>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;

    let position = {
        let mut locked = session.lock().await;
        let position = locked.profile.target_position.trim().to_string();
        if position.is_empty() {
            return Err(AppError::Validation(
                "Fill in the target position before searching vacancies".to_string(),
            ));
        }
        locked.operations.vacancy_search.start();
        position
    };

    let language = state
        .storage
        .load_settings()
        .await
        .map(|s| s.language)
        .unwrap_or_else(|_| "en".to_string());

    let result = state.vacancies.search(&position, &language).await;

    let mut locked = session.lock().await;
    match result {
        Ok(vacancies) => {
            locked.operations.vacancy_search.succeed();
            locked
                .achievements
                .record_action(AchievementId::VacanciesSearched);
            Ok(Json(vacancies))
        }
        Err(err) => {
            locked.operations.vacancy_search.fail(err.to_string());
            Err(err.into())
        }
    }
}

/// POST /api/v1/cloud-export
pub async fn handle_cloud_export(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
    Json(request): Json<CloudExportRequest>,
) -> Result<Json<CloudExportResponse>, AppError> {
    let session = state
        .sessions
        .get_or_create(params.session_id, &state.storage)
        .await;

    let resume = {
        let mut locked = session.lock().await;
        let resume = current_resume(&locked)?;
        locked.operations.cloud_export.start();
        resume
    };

    let result = state
        .cloud
        .export(&resume, &request.provider, &request.options)
        .await;

    let mut locked = session.lock().await;
    match result {
        Ok(()) => {
            locked.operations.cloud_export.succeed();
            locked.achievements.record_action(AchievementId::Shared);
            Ok(Json(CloudExportResponse { success: true }))
        }
        Err(err) => {
            locked.operations.cloud_export.fail(err.to_string());
            Err(err.into())
        }
    }
}

fn current_resume(session: &crate::session::Session) -> Result<String, AppError> {
    session
        .generation
        .current()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("Generate a resume first".to_string()))
}

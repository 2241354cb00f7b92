use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::collaborators::CollaboratorError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// `InvalidField` and `IndexOutOfRange` mark caller misuse of the profile
/// store; `Network` and `Application` carry collaborator failures and stay
/// scoped to the operation that triggered them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown profile field: {0}")]
    InvalidField(String),

    #[error("Index {index} out of range for {field} (len {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("A generation request is already in flight")]
    GenerationInFlight,

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Application(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CollaboratorError> for AppError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Network(msg) => AppError::Network(msg),
            CollaboratorError::Application(msg) => AppError::Application(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidField(field) => (
                StatusCode::BAD_REQUEST,
                "INVALID_FIELD",
                format!("Unknown profile field: {field}"),
            ),
            AppError::IndexOutOfRange { field, index, len } => (
                StatusCode::BAD_REQUEST,
                "INDEX_OUT_OF_RANGE",
                format!("Index {index} out of range for {field} (len {len})"),
            ),
            AppError::GenerationInFlight => (
                StatusCode::CONFLICT,
                "GENERATION_IN_FLIGHT",
                "A generation request is already in flight".to_string(),
            ),
            AppError::Network(msg) => {
                tracing::error!("Collaborator unreachable: {msg}");
                (StatusCode::BAD_GATEWAY, "NETWORK_ERROR", msg.clone())
            }
            AppError::Application(msg) => {
                tracing::error!("Collaborator reported failure: {msg}");
                (StatusCode::BAD_GATEWAY, "APPLICATION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

pub mod health;
pub mod settings;

use axum::{
    routing::{get, post},
    Router,
};

use crate::collaborators::handlers as operations;
use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route("/api/v1/profile", get(profile::handle_get_profile))
        .route("/api/v1/profile/mutate", post(profile::handle_mutate))
        .route("/api/v1/profile/example", post(profile::handle_load_example))
        .route("/api/v1/achievements", get(profile::handle_get_achievements))
        .route("/api/v1/status", get(profile::handle_get_status))
        // Generation API
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        .route("/api/v1/resumes/current", get(generation::handle_current))
        .route("/api/v1/resumes/history", get(generation::handle_history))
        .route(
            "/api/v1/resumes/history/:index",
            get(generation::handle_history_entry),
        )
        // Independent async operations
        .route("/api/v1/export", post(operations::handle_export))
        .route("/api/v1/ats-check", post(operations::handle_ats_check))
        .route("/api/v1/vacancies", get(operations::handle_search_vacancies))
        .route("/api/v1/cloud-export", post(operations::handle_cloud_export))
        // Settings
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_put_settings),
        )
        .with_state(state)
}

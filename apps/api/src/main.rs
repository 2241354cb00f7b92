mod collaborators;
mod config;
mod errors;
mod generation;
mod models;
mod profile;
mod routes;
mod session;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::collaborators::ats::HttpAtsChecker;
use crate::collaborators::cloud::HttpCloudExporter;
use crate::collaborators::exporter::HttpFileExporter;
use crate::collaborators::generator::HttpResumeGenerator;
use crate::collaborators::vacancies::HttpVacancySearch;
use crate::config::Config;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::storage::SnapshotStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumegen API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize local snapshot storage
    let storage = SnapshotStore::new(config.data_dir.clone());
    storage.ensure_dir().await?;
    info!("Snapshot storage at {}", config.data_dir.display());

    // Collaborator clients
    let generator = Arc::new(HttpResumeGenerator::new(config.generator_url.clone()));
    let exporter = Arc::new(HttpFileExporter::new(config.exporter_url.clone()));
    let ats = Arc::new(HttpAtsChecker::new(config.ats_url.clone()));
    let vacancies = Arc::new(HttpVacancySearch::new(config.vacancy_url.clone()));
    let cloud = Arc::new(HttpCloudExporter::new(config.cloud_export_url.clone()));
    info!("Collaborator clients initialized (generator: {})", config.generator_url);

    // Build app state
    let state = AppState {
        sessions: SessionStore::new(),
        storage,
        generator,
        exporter,
        ats,
        vacancies,
        cloud,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

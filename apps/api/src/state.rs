use std::sync::Arc;

use crate::collaborators::ats::AtsChecker;
use crate::collaborators::cloud::CloudExporter;
use crate::collaborators::exporter::FileExporter;
use crate::collaborators::generator::ResumeGenerator;
use crate::collaborators::vacancies::VacancySearch;
use crate::config::Config;
use crate::session::SessionStore;
use crate::storage::SnapshotStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Collaborators are trait objects so tests and alternative backends swap in
/// without touching handler code.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub storage: SnapshotStore,
    pub generator: Arc<dyn ResumeGenerator>,
    pub exporter: Arc<dyn FileExporter>,
    pub ats: Arc<dyn AtsChecker>,
    pub vacancies: Arc<dyn VacancySearch>,
    pub cloud: Arc<dyn CloudExporter>,
    pub config: Config,
}

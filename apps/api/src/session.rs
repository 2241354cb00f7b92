//! Per-session state and the recompute-on-write pipeline.
//!
//! A `Session` owns the profile snapshot and everything derived from it.
//! Every mutation goes through `Session::apply`, which swaps in the new
//! snapshot, re-runs the analyzer, and feeds the achievement tracker before
//! control returns to the caller. Independent async operations (export, ATS
//! check, vacancy search, cloud export) each own a status record here so a
//! failure in one never clears or blocks another.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::history::ResumeHistory;
use crate::generation::orchestrator::GenerationOrchestrator;
use crate::models::profile::ProfileData;
use crate::profile::achievements::{AchievementId, AchievementTracker};
use crate::profile::completeness::{analyze, AnalysisResult};
use crate::profile::store::{apply_mutation, ProfileMutation};
use crate::storage::SnapshotStore;

/// Status record for one independent async operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationStatus {
    pub in_flight: bool,
    pub error: Option<String>,
}

impl OperationStatus {
    pub fn start(&mut self) {
        self.in_flight = true;
    }

    pub fn succeed(&mut self) {
        self.in_flight = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.in_flight = false;
        self.error = Some(message);
    }
}

/// One error slot per asynchronous surface besides generation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationStatuses {
    pub download: OperationStatus,
    pub ats_check: OperationStatus,
    pub vacancy_search: OperationStatus,
    pub cloud_export: OperationStatus,
}

pub struct Session {
    pub profile: ProfileData,
    pub analysis: AnalysisResult,
    pub achievements: AchievementTracker,
    pub history: ResumeHistory,
    pub generation: GenerationOrchestrator,
    pub operations: OperationStatuses,
}

impl Session {
    pub fn new() -> Self {
        Self::from_profile(ProfileData::default())
    }

    /// Builds a session around an existing profile (e.g. a rehydrated offline
    /// snapshot) and runs one tracker pass so data predicates already
    /// satisfied by the profile unlock immediately.
    pub fn from_profile(profile: ProfileData) -> Self {
        let analysis = analyze(&profile);
        let mut session = Session {
            profile,
            analysis,
            achievements: AchievementTracker::new(),
            history: ResumeHistory::new(),
            generation: GenerationOrchestrator::new(),
            operations: OperationStatuses::default(),
        };
        session
            .achievements
            .evaluate(&session.profile, &session.analysis);
        session
    }

    /// Applies one profile mutation and synchronously recomputes everything
    /// derived from it. Returns the achievements newly unlocked by the change.
    pub fn apply(&mut self, mutation: &ProfileMutation) -> Result<Vec<AchievementId>, AppError> {
        let next = apply_mutation(&self.profile, mutation)?;
        self.profile = next;
        self.analysis = analyze(&self.profile);
        Ok(self.achievements.evaluate(&self.profile, &self.analysis))
    }

    /// Replaces the whole profile (the "load example" action) and recomputes.
    pub fn replace_profile(&mut self, profile: ProfileData) -> Vec<AchievementId> {
        self.profile = profile;
        self.analysis = analyze(&self.profile);
        self.achievements.evaluate(&self.profile, &self.analysis)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// All live sessions, keyed by the browser session id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, creating it on first use. A new session
    /// starts from the persisted offline snapshot when one exists.
    pub async fn get_or_create(&self, id: Uuid, storage: &SnapshotStore) -> Arc<Mutex<Session>> {
        if let Some(existing) = self.inner.read().await.get(&id) {
            return existing.clone();
        }

        let session = match storage.load_profile(id).await {
            Ok(Some(profile)) => {
                info!("Rehydrating session {id} from offline snapshot");
                Session::from_profile(profile)
            }
            Ok(None) => Session::new(),
            Err(e) => {
                warn!("Failed to read offline snapshot for {id}: {e}");
                Session::new()
            }
        };

        let mut sessions = self.inner.write().await;
        sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(session)))
            .clone()
    }
}

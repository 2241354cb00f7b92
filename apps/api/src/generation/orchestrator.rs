//! Generation orchestrator — single-flight coordination of the external
//! generator call.
//!
//! Flow: begin (Idle -> Requesting) -> snapshot profile -> call generator
//! with the session lock released -> re-acquire -> apply completion.
//! On success: store text as current, push a history entry, clear the error
//! slot, drop any offline profile snapshot. On failure: record the
//! user-visible message, persist the profile snapshot if the failure was a
//! network one, touch nothing else. No automatic retries; state always
//! returns to Idle.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::collaborators::generator::ResumeGenerator;
use crate::collaborators::CollaboratorError;
use crate::errors::AppError;
use crate::generation::history::HistoryEntry;
use crate::models::profile::ResumeType;
use crate::session::Session;
use crate::storage::SnapshotStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
    Idle,
    Requesting,
}

/// Per-session generation state machine: `Idle -> Requesting -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct GenerationOrchestrator {
    state: GenerationState,
    current: Option<String>,
    error: Option<String>,
}

/// Serializable view of the orchestrator for status responses.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationStatus {
    pub state: GenerationState,
    pub current_resume: Option<String>,
    pub error: Option<String>,
}

impl GenerationOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions `Idle -> Requesting`. A call while `Requesting` is rejected:
    /// letting a second request race would let interleaved completions append
    /// to history out of submission order.
    pub fn begin(&mut self) -> Result<(), AppError> {
        match self.state {
            GenerationState::Idle => {
                self.state = GenerationState::Requesting;
                Ok(())
            }
            GenerationState::Requesting => Err(AppError::GenerationInFlight),
        }
    }

    /// Applies a successful completion and returns to `Idle`.
    pub fn complete_success(&mut self, text: String) {
        self.current = Some(text);
        self.error = None;
        self.state = GenerationState::Idle;
    }

    /// Applies a failed completion and returns to `Idle`. The message stays
    /// in the generation error slot until the next successful run.
    pub fn complete_failure(&mut self, error: &CollaboratorError) {
        self.error = Some(error.to_string());
        self.state = GenerationState::Idle;
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> GenerationStatus {
        GenerationStatus {
            state: self.state,
            current_resume: self.current.clone(),
            error: self.error.clone(),
        }
    }
}

/// Drives one generation request end to end for a session.
///
/// The session lock is held only to enter/leave the state machine, never
/// across the generator await, so independent operations (export, ATS check,
/// vacancy search) keep running while a generation is in flight.
pub async fn run_generation(
    session: &Arc<Mutex<Session>>,
    generator: &dyn ResumeGenerator,
    storage: &SnapshotStore,
    session_id: Uuid,
    resume_type: ResumeType,
    template_id: &str,
) -> Result<String, AppError> {
    let snapshot = {
        let mut locked = session.lock().await;
        locked.generation.begin()?;
        locked.profile.clone()
    };

    info!(
        "Generating {} resume (template {template_id}) for session {session_id}",
        resume_type.as_str()
    );
    let outcome = generator.generate(&snapshot, resume_type, template_id).await;

    let mut locked = session.lock().await;
    match outcome {
        Ok(text) => {
            locked.generation.complete_success(text.clone());
            locked.history.push(HistoryEntry::new(
                text.clone(),
                format!("{} / {}", resume_type.as_str(), template_id),
            ));
            info!(
                "Generation succeeded for session {session_id}; history length {}",
                locked.history.len()
            );
            if let Err(e) = storage.clear_profile(session_id).await {
                warn!("Failed to clear offline snapshot for {session_id}: {e}");
            }
            Ok(text)
        }
        Err(err) => {
            locked.generation.complete_failure(&err);
            if matches!(err, CollaboratorError::Network(_)) {
                // Collaborator unreachable: keep the profile recoverable offline.
                if let Err(e) = storage.save_profile(session_id, &locked.profile).await {
                    warn!("Failed to write offline snapshot for {session_id}: {e}");
                }
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ProfileData;
    use crate::session::SessionStore;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedGenerator {
        calls: AtomicUsize,
        fail_with: Option<CollaboratorError>,
    }

    impl ScriptedGenerator {
        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(err: CollaboratorError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(err),
            }
        }
    }

    #[async_trait]
    impl ResumeGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _profile: &ProfileData,
            resume_type: ResumeType,
            _template_id: &str,
        ) -> Result<String, CollaboratorError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(format!("# Resume {n} ({})", resume_type.as_str())),
            }
        }
    }

    fn test_storage() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let storage = SnapshotStore::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_begin_rejects_second_call_while_requesting() {
        let mut orchestrator = GenerationOrchestrator::new();
        orchestrator.begin().unwrap();
        assert!(matches!(
            orchestrator.begin(),
            Err(AppError::GenerationInFlight)
        ));
    }

    #[test]
    fn test_success_clears_prior_error_and_returns_to_idle() {
        let mut orchestrator = GenerationOrchestrator::new();
        orchestrator.begin().unwrap();
        orchestrator.complete_failure(&CollaboratorError::Network("down".to_string()));
        assert_eq!(orchestrator.error(), Some("down"));

        orchestrator.begin().unwrap();
        orchestrator.complete_success("# Resume".to_string());
        assert_eq!(orchestrator.state(), GenerationState::Idle);
        assert_eq!(orchestrator.current(), Some("# Resume"));
        assert!(orchestrator.error().is_none());
    }

    #[tokio::test]
    async fn test_six_generations_keep_five_newest_history_entries() {
        let (_dir, storage) = test_storage();
        let sessions = SessionStore::new();
        let session_id = Uuid::new_v4();
        let session = sessions.get_or_create(session_id, &storage).await;
        let generator = ScriptedGenerator::succeeding();

        for _ in 0..6 {
            run_generation(
                &session,
                &generator,
                &storage,
                session_id,
                ResumeType::Standard,
                "classic",
            )
            .await
            .unwrap();
        }

        let locked = session.lock().await;
        assert_eq!(locked.history.len(), 5);
        assert_eq!(locked.history.get(0).unwrap().content, "# Resume 6 (standard)");
        // the first of the six was evicted
        assert!(locked
            .history
            .entries()
            .all(|e| e.content != "# Resume 1 (standard)"));
    }

    #[tokio::test]
    async fn test_network_failure_sets_error_and_leaves_state_untouched() {
        let (_dir, storage) = test_storage();
        let sessions = SessionStore::new();
        let session_id = Uuid::new_v4();
        let session = sessions.get_or_create(session_id, &storage).await;
        {
            let mut locked = session.lock().await;
            locked.profile.name = "Alex".to_string();
        }
        let generator =
            ScriptedGenerator::failing(CollaboratorError::Network("no route".to_string()));

        let err = run_generation(
            &session,
            &generator,
            &storage,
            session_id,
            ResumeType::Standard,
            "classic",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));

        let locked = session.lock().await;
        assert_eq!(locked.generation.state(), GenerationState::Idle);
        assert_eq!(locked.generation.error(), Some("no route"));
        assert!(locked.history.is_empty());
        assert_eq!(locked.profile.name, "Alex");
    }

    #[tokio::test]
    async fn test_network_failure_persists_offline_snapshot() {
        let (_dir, storage) = test_storage();
        let sessions = SessionStore::new();
        let session_id = Uuid::new_v4();
        let session = sessions.get_or_create(session_id, &storage).await;
        {
            let mut locked = session.lock().await;
            locked.profile.name = "Alex".to_string();
        }
        let generator =
            ScriptedGenerator::failing(CollaboratorError::Network("no route".to_string()));

        let _ = run_generation(
            &session,
            &generator,
            &storage,
            session_id,
            ResumeType::Standard,
            "classic",
        )
        .await;

        let saved = storage.load_profile(session_id).await.unwrap().unwrap();
        assert_eq!(saved.name, "Alex");

        // next successful run clears the snapshot
        let generator = ScriptedGenerator::succeeding();
        run_generation(
            &session,
            &generator,
            &storage,
            session_id,
            ResumeType::Standard,
            "classic",
        )
        .await
        .unwrap();
        assert!(storage.load_profile(session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_application_failure_does_not_persist_snapshot() {
        let (_dir, storage) = test_storage();
        let sessions = SessionStore::new();
        let session_id = Uuid::new_v4();
        let session = sessions.get_or_create(session_id, &storage).await;
        let generator = ScriptedGenerator::failing(CollaboratorError::Application(
            "model overloaded".to_string(),
        ));

        let err = run_generation(
            &session,
            &generator,
            &storage,
            session_id,
            ResumeType::It,
            "classic",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Application(_)));
        assert!(storage.load_profile(session_id).await.unwrap().is_none());

        let locked = session.lock().await;
        assert_eq!(locked.generation.error(), Some("model overloaded"));
    }

    #[tokio::test]
    async fn test_in_flight_generation_rejects_concurrent_call() {
        let (_dir, storage) = test_storage();
        let sessions = SessionStore::new();
        let session_id = Uuid::new_v4();
        let session = sessions.get_or_create(session_id, &storage).await;

        // Hold the state machine in Requesting, as an in-flight call would.
        session.lock().await.generation.begin().unwrap();

        let generator = ScriptedGenerator::succeeding();
        let err = run_generation(
            &session,
            &generator,
            &storage,
            session_id,
            ResumeType::Standard,
            "classic",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::GenerationInFlight));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}

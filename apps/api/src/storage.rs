//! Local JSON persistence: the offline profile snapshot and UI settings.
//!
//! The profile snapshot is written only when the generation backend is
//! unreachable and removed once a generation succeeds again; settings live in
//! their own file and never interact with the analysis logic.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::models::profile::ProfileData;
use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", self.dir.display()))
    }

    fn profile_path(&self, session_id: Uuid) -> PathBuf {
        self.dir.join(format!("profile-{session_id}.json"))
    }

    pub async fn save_profile(&self, session_id: Uuid, profile: &ProfileData) -> Result<()> {
        let path = self.profile_path(session_id);
        let content = serde_json::to_string_pretty(profile)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write profile snapshot {}", path.display()))?;
        debug!("Wrote offline profile snapshot {}", path.display());
        Ok(())
    }

    pub async fn load_profile(&self, session_id: Uuid) -> Result<Option<ProfileData>> {
        let path = self.profile_path(session_id);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content).with_context(|| {
                format!("Corrupt profile snapshot {}", path.display())
            })?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read profile snapshot {}", path.display())),
        }
    }

    pub async fn clear_profile(&self, session_id: Uuid) -> Result<()> {
        let path = self.profile_path(session_id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed offline profile snapshot {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove profile snapshot {}", path.display())),
        }
    }

    pub async fn load_settings(&self) -> Result<Settings> {
        let path = self.dir.join(SETTINGS_FILE);
        match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Corrupt settings file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read settings {}", path.display()))
            }
        }
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        let path = self.dir.join(SETTINGS_FILE);
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write settings {}", path.display()))
    }
}

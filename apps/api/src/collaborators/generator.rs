//! Resume generator client — the single point of entry for generation calls.
//!
//! Wire contract of the external backend:
//! POST `{base}/api/generate-resume` with `{user_data, resume_type, template_id}`,
//! reply `{success, resume?, message?}`. A transport failure maps to
//! `CollaboratorError::Network`; `success: false` (or an HTTP error status
//! carrying the same reply shape) maps to `CollaboratorError::Application`
//! with the backend's own message.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::CollaboratorError;
use crate::models::profile::{ProfileData, ResumeType};

const GENERATE_PATH: &str = "/api/generate-resume";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// The external résumé generator.
///
/// Carried in `AppState` as `Arc<dyn ResumeGenerator>` so tests and future
/// backends can swap the implementation without touching the orchestrator.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(
        &self,
        profile: &ProfileData,
        resume_type: ResumeType,
        template_id: &str,
    ) -> Result<String, CollaboratorError>;
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    user_data: &'a ProfileData,
    resume_type: ResumeType,
    template_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    success: bool,
    #[serde(default)]
    resume: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP implementation talking to the generation backend.
pub struct HttpResumeGenerator {
    client: Client,
    base_url: String,
}

impl HttpResumeGenerator {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl ResumeGenerator for HttpResumeGenerator {
    async fn generate(
        &self,
        profile: &ProfileData,
        resume_type: ResumeType,
        template_id: &str,
    ) -> Result<String, CollaboratorError> {
        let body = GenerateBody {
            user_data: profile,
            resume_type,
            template_id,
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, GENERATE_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| CollaboratorError::network("generator", &e))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| CollaboratorError::network("generator", &e))?;

        // Failure replies carry the same {success, message} shape on error
        // statuses; anything unparsable still maps to an application failure
        // since the service did answer.
        let reply: GenerateReply = match serde_json::from_str(&body_text) {
            Ok(reply) => reply,
            Err(_) => {
                return Err(CollaboratorError::Application(format!(
                    "Resume generation failed (status {status})"
                )))
            }
        };

        debug!(
            "Generator replied: status={status}, success={}, type={}",
            reply.success,
            resume_type.as_str()
        );

        if reply.success {
            reply.resume.ok_or_else(|| {
                CollaboratorError::Application("Generator returned an empty resume".to_string())
            })
        } else {
            Err(CollaboratorError::Application(
                reply
                    .message
                    .unwrap_or_else(|| format!("Resume generation failed (status {status})")),
            ))
        }
    }
}

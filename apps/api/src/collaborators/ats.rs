//! ATS checker client — keyword/compatibility scoring of a generated résumé.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::collaborators::CollaboratorError;

const CHECK_PATH: &str = "/api/ats-check";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Result of an ATS compatibility check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0-100 compatibility score.
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

#[async_trait]
pub trait AtsChecker: Send + Sync {
    async fn check(&self, resume_text: &str) -> Result<AtsReport, CollaboratorError>;
}

#[derive(Debug, Serialize)]
struct CheckBody<'a> {
    resume_text: &'a str,
}

pub struct HttpAtsChecker {
    client: Client,
    base_url: String,
}

impl HttpAtsChecker {
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
impl AtsChecker for HttpAtsChecker {
    async fn check(&self, resume_text: &str) -> Result<AtsReport, CollaboratorError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHECK_PATH))
            .json(&CheckBody { resume_text })
            .send()
            .await
            .map_err(|e| CollaboratorError::network("ATS", &e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Application(if message.is_empty() {
                format!("ATS check failed (status {status})")
            } else {
                message
            }));
        }

        response
            .json::<AtsReport>()
            .await
            .map_err(|e| CollaboratorError::network("ATS", &e))
    }
}

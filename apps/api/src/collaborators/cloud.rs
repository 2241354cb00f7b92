//! Cloud export client — pushes a generated résumé to an external provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::collaborators::exporter::ExportOptions;
use crate::collaborators::CollaboratorError;

const EXPORT_PATH: &str = "/api/cloud-export";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[async_trait]
pub trait CloudExporter: Send + Sync {
    async fn export(
        &self,
        resume_text: &str,
        provider: &str,
        options: &ExportOptions,
    ) -> Result<(), CollaboratorError>;
}

#[derive(Debug, Serialize)]
struct CloudExportBody<'a> {
    resume_text: &'a str,
    provider: &'a str,
    options: &'a ExportOptions,
}

#[derive(Debug, Deserialize)]
struct CloudExportReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpCloudExporter {
    client: Client,
    base_url: String,
}

impl HttpCloudExporter {
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
impl CloudExporter for HttpCloudExporter {
    async fn export(
        &self,
        resume_text: &str,
        provider: &str,
        options: &ExportOptions,
    ) -> Result<(), CollaboratorError> {
        let body = CloudExportBody {
            resume_text,
            provider,
            options,
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, EXPORT_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| CollaboratorError::network("cloud export", &e))?;

        let status = response.status();
        let reply: CloudExportReply = response
            .json()
            .await
            .map_err(|e| CollaboratorError::network("cloud export", &e))?;

        if reply.success {
            Ok(())
        } else {
            Err(CollaboratorError::Application(
                reply
                    .message
                    .unwrap_or_else(|| format!("Cloud export failed (status {status})")),
            ))
        }
    }
}

//! File exporter client — renders a generated résumé to PDF or DOCX.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::collaborators::CollaboratorError;

const EXPORT_PATH: &str = "/api/export";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

/// Which résumé sections the exported document includes. All on by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionToggles {
    #[serde(default = "default_true")]
    pub education: bool,
    #[serde(default = "default_true")]
    pub experience: bool,
    #[serde(default = "default_true")]
    pub skills: bool,
    #[serde(default = "default_true")]
    pub achievements: bool,
    #[serde(default = "default_true")]
    pub additional_info: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SectionToggles {
    fn default() -> Self {
        SectionToggles {
            education: true,
            experience: true,
            skills: true,
            achievements: true,
            additional_info: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    #[serde(default)]
    pub include_photo: bool,
    #[serde(default)]
    pub sections: SectionToggles,
}

/// The external file-export collaborator.
#[async_trait]
pub trait FileExporter: Send + Sync {
    async fn export(
        &self,
        resume_text: &str,
        format: ExportFormat,
        filename: &str,
        options: &ExportOptions,
    ) -> Result<Bytes, CollaboratorError>;
}

#[derive(Debug, Serialize)]
struct ExportBody<'a> {
    resume_text: &'a str,
    format: ExportFormat,
    filename: &'a str,
    options: &'a ExportOptions,
}

pub struct HttpFileExporter {
    client: Client,
    base_url: String,
}

impl HttpFileExporter {
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
impl FileExporter for HttpFileExporter {
    async fn export(
        &self,
        resume_text: &str,
        format: ExportFormat,
        filename: &str,
        options: &ExportOptions,
    ) -> Result<Bytes, CollaboratorError> {
        let body = ExportBody {
            resume_text,
            format,
            filename,
            options,
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, EXPORT_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| CollaboratorError::network("export", &e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Application(if message.is_empty() {
                format!("Export failed (status {status})")
            } else {
                message
            }));
        }

        response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::network("export", &e))
    }
}

//! Vacancy search client — finds open positions matching the target role.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::collaborators::CollaboratorError;

const SEARCH_PATH: &str = "/api/vacancies";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub salary: Option<String>,
    pub link: String,
}

#[async_trait]
pub trait VacancySearch: Send + Sync {
    async fn search(
        &self,
        position: &str,
        language: &str,
    ) -> Result<Vec<Vacancy>, CollaboratorError>;
}

pub struct HttpVacancySearch {
    client: Client,
    base_url: String,
}

impl HttpVacancySearch {
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
impl VacancySearch for HttpVacancySearch {
    async fn search(
        &self,
        position: &str,
        language: &str,
    ) -> Result<Vec<Vacancy>, CollaboratorError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, SEARCH_PATH))
            .query(&[("position", position), ("language", language)])
            .send()
            .await
            .map_err(|e| CollaboratorError::network("vacancy search", &e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Application(if message.is_empty() {
                format!("Vacancy search failed (status {status})")
            } else {
                message
            }));
        }

        response
            .json::<Vec<Vacancy>>()
            .await
            .map_err(|e| CollaboratorError::network("vacancy search", &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacancy_deserializes_without_salary() {
        let vacancy: Vacancy = serde_json::from_str(
            r#"{"id": "v-17", "title": "Backend Engineer", "company": "FinCore", "link": "https://jobs.example.com/v-17"}"#,
        )
        .unwrap();
        assert_eq!(vacancy.company, "FinCore");
        assert!(vacancy.salary.is_none());
    }

    #[test]
    fn test_vacancy_list_deserializes() {
        let list: Vec<Vacancy> = serde_json::from_str(
            r#"[{"id": "1", "title": "Engineer", "company": "A", "salary": "90k", "link": "l"}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].salary.as_deref(), Some("90k"));
    }
}

//! External collaborator clients.
//!
//! ARCHITECTURAL RULE: every outbound HTTP call goes through one of these
//! clients. Each collaborator is a trait so handlers and the orchestrator
//! depend on `Arc<dyn …>` seams, never on a concrete HTTP client.
//!
//! None of these clients retry. A failed call surfaces as a user-visible,
//! operation-scoped message and the user re-triggers the action.

use thiserror::Error;

pub mod ats;
pub mod cloud;
pub mod exporter;
pub mod generator;
pub mod handlers;
pub mod vacancies;

/// Failure of an external collaborator call.
///
/// `Network` means the collaborator was unreachable; `Application` means it
/// answered but reported a failure with its own message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CollaboratorError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Application(String),
}

impl CollaboratorError {
    /// Wraps a transport-level reqwest failure for the named service.
    pub fn network(service: &str, err: &reqwest::Error) -> Self {
        tracing::warn!("{service} request failed: {err}");
        CollaboratorError::Network(format!("Failed to reach the {service} service"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message_names_the_service() {
        let err = CollaboratorError::Network("Failed to reach the generator service".to_string());
        assert!(err.to_string().contains("generator"));
    }

    #[test]
    fn test_application_error_passes_message_through() {
        let err = CollaboratorError::Application("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The structured résumé input collected from the user.
///
/// Scalar fields hold free text; array fields hold ordered lists of free-text
/// items (insertion order significant, duplicates permitted). A session starts
/// with an empty profile and mutates it only through `ProfileMutation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_position: String,
    #[serde(default)]
    pub contacts: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub additional_info: String,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl ProfileData {
    /// A filled-in sample profile backing the "load example" action.
    pub fn example() -> Self {
        ProfileData {
            name: "Alex Morgan".to_string(),
            target_position: "Backend Engineer".to_string(),
            contacts: "alex.morgan@example.com | +1 555 0134 | linkedin.com/in/alexmorgan".to_string(),
            about: "Backend engineer with 6 years of experience building payment and logistics platforms."
                .to_string(),
            additional_info: "English (fluent), German (B1). AWS Certified Developer.".to_string(),
            education: vec![
                "BSc Computer Science, State Technical University, 2014-2018".to_string(),
            ],
            experience: vec![
                "Senior Backend Engineer, FinCore, 2021-present: payments platform, 4-person team"
                    .to_string(),
                "Backend Engineer, ShipFast, 2018-2021: logistics APIs and integrations".to_string(),
            ],
            skills: vec![
                "Rust".to_string(),
                "PostgreSQL".to_string(),
                "Kubernetes".to_string(),
                "gRPC".to_string(),
                "CI/CD".to_string(),
            ],
            achievements: vec![
                "Cut p99 checkout latency by 45% by reworking the payment pipeline".to_string(),
                "Led migration of 12 services to Kubernetes with zero downtime".to_string(),
            ],
        }
    }
}

/// The five scalar profile fields. Unknown names are rejected at the boundary
/// with `AppError::InvalidField` rather than falling through to a dynamic map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Name,
    TargetPosition,
    Contacts,
    About,
    AdditionalInfo,
}

impl ScalarField {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarField::Name => "name",
            ScalarField::TargetPosition => "target_position",
            ScalarField::Contacts => "contacts",
            ScalarField::About => "about",
            ScalarField::AdditionalInfo => "additional_info",
        }
    }

    pub fn parse(name: &str) -> Result<Self, AppError> {
        match name {
            "name" => Ok(ScalarField::Name),
            "target_position" => Ok(ScalarField::TargetPosition),
            "contacts" => Ok(ScalarField::Contacts),
            "about" => Ok(ScalarField::About),
            "additional_info" => Ok(ScalarField::AdditionalInfo),
            other => Err(AppError::InvalidField(other.to_string())),
        }
    }
}

/// The four array-valued profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayField {
    Education,
    Experience,
    Skills,
    Achievements,
}

impl ArrayField {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrayField::Education => "education",
            ArrayField::Experience => "experience",
            ArrayField::Skills => "skills",
            ArrayField::Achievements => "achievements",
        }
    }

    pub fn parse(name: &str) -> Result<Self, AppError> {
        match name {
            "education" => Ok(ArrayField::Education),
            "experience" => Ok(ArrayField::Experience),
            "skills" => Ok(ArrayField::Skills),
            "achievements" => Ok(ArrayField::Achievements),
            other => Err(AppError::InvalidField(other.to_string())),
        }
    }
}

/// Résumé layout family requested from the external generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeType {
    #[default]
    Standard,
    Chronological,
    Functional,
    Targeted,
    Creative,
    Academic,
    It,
    Business,
}

impl ResumeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeType::Standard => "standard",
            ResumeType::Chronological => "chronological",
            ResumeType::Functional => "functional",
            ResumeType::Targeted => "targeted",
            ResumeType::Creative => "creative",
            ResumeType::Academic => "academic",
            ResumeType::It => "it",
            ResumeType::Business => "business",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_field_parse_roundtrip() {
        for field in [
            ScalarField::Name,
            ScalarField::TargetPosition,
            ScalarField::Contacts,
            ScalarField::About,
            ScalarField::AdditionalInfo,
        ] {
            assert_eq!(ScalarField::parse(field.as_str()).unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_scalar_field_rejected() {
        let err = ScalarField::parse("photo").unwrap_err();
        assert!(matches!(err, AppError::InvalidField(ref f) if f == "photo"));
    }

    #[test]
    fn test_array_field_rejects_scalar_name() {
        assert!(ArrayField::parse("about").is_err());
    }

    #[test]
    fn test_resume_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&ResumeType::It).unwrap();
        assert_eq!(json, "\"it\"");
        let back: ResumeType = serde_json::from_str("\"chronological\"").unwrap();
        assert_eq!(back, ResumeType::Chronological);
    }

    #[test]
    fn test_default_profile_is_empty() {
        let p = ProfileData::default();
        assert!(p.name.is_empty());
        assert!(p.education.is_empty());
        assert!(p.skills.is_empty());
    }

    #[test]
    fn test_example_profile_is_substantial() {
        let p = ProfileData::example();
        assert!(!p.name.is_empty());
        assert!(p.skills.len() >= 5);
        assert!(p.experience.len() >= 2);
    }
}

//! Profile store — pure snapshot-to-snapshot mutations over `ProfileData`.
//!
//! Mutations never alias: `apply_mutation` clones the current snapshot,
//! edits the clone, and returns it. The session layer swaps the new snapshot
//! in and synchronously re-runs the analyzer and achievement tracker, so a
//! failed mutation leaves every derived value untouched.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{ArrayField, ProfileData, ScalarField};

/// The closed set of profile mutations. Field names outside the two enums are
/// rejected during deserialization; programmatic callers go through
/// `ScalarField::parse` / `ArrayField::parse` and get `InvalidField`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProfileMutation {
    SetField {
        field: ScalarField,
        value: String,
    },
    /// Appends an empty item the user then edits in place.
    AppendItem {
        field: ArrayField,
    },
    UpdateItem {
        field: ArrayField,
        index: usize,
        value: String,
    },
    RemoveItem {
        field: ArrayField,
        index: usize,
    },
}

/// Applies one mutation to a profile snapshot, returning the next snapshot.
///
/// Out-of-bounds indices fail with `IndexOutOfRange`; relative order of
/// untouched array elements is always preserved.
pub fn apply_mutation(
    profile: &ProfileData,
    mutation: &ProfileMutation,
) -> Result<ProfileData, AppError> {
    let mut next = profile.clone();
    match mutation {
        ProfileMutation::SetField { field, value } => {
            *scalar_mut(&mut next, *field) = value.clone();
        }
        ProfileMutation::AppendItem { field } => {
            array_mut(&mut next, *field).push(String::new());
        }
        ProfileMutation::UpdateItem {
            field,
            index,
            value,
        } => {
            let items = array_mut(&mut next, *field);
            let len = items.len();
            let slot = items.get_mut(*index).ok_or_else(|| AppError::IndexOutOfRange {
                field: field.as_str().to_string(),
                index: *index,
                len,
            })?;
            *slot = value.clone();
        }
        ProfileMutation::RemoveItem { field, index } => {
            let items = array_mut(&mut next, *field);
            if *index >= items.len() {
                return Err(AppError::IndexOutOfRange {
                    field: field.as_str().to_string(),
                    index: *index,
                    len: items.len(),
                });
            }
            items.remove(*index);
        }
    }
    Ok(next)
}

fn scalar_mut(profile: &mut ProfileData, field: ScalarField) -> &mut String {
    match field {
        ScalarField::Name => &mut profile.name,
        ScalarField::TargetPosition => &mut profile.target_position,
        ScalarField::Contacts => &mut profile.contacts,
        ScalarField::About => &mut profile.about,
        ScalarField::AdditionalInfo => &mut profile.additional_info,
    }
}

fn array_mut(profile: &mut ProfileData, field: ArrayField) -> &mut Vec<String> {
    match field {
        ArrayField::Education => &mut profile.education,
        ArrayField::Experience => &mut profile.experience,
        ArrayField::Skills => &mut profile.skills,
        ArrayField::Achievements => &mut profile.achievements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_skills(skills: &[&str]) -> ProfileData {
        ProfileData {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..ProfileData::default()
        }
    }

    #[test]
    fn test_set_field_replaces_scalar() {
        let base = ProfileData::default();
        let next = apply_mutation(
            &base,
            &ProfileMutation::SetField {
                field: ScalarField::Name,
                value: "Alex Morgan".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.name, "Alex Morgan");
        // original snapshot is untouched
        assert!(base.name.is_empty());
    }

    #[test]
    fn test_append_item_adds_empty_string() {
        let base = profile_with_skills(&["Rust"]);
        let next = apply_mutation(
            &base,
            &ProfileMutation::AppendItem {
                field: ArrayField::Skills,
            },
        )
        .unwrap();
        assert_eq!(next.skills, vec!["Rust".to_string(), String::new()]);
        assert_eq!(base.skills.len(), 1);
    }

    #[test]
    fn test_update_item_replaces_element() {
        let base = profile_with_skills(&["Rust", ""]);
        let next = apply_mutation(
            &base,
            &ProfileMutation::UpdateItem {
                field: ArrayField::Skills,
                index: 1,
                value: "PostgreSQL".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.skills, vec!["Rust", "PostgreSQL"]);
    }

    #[test]
    fn test_update_item_out_of_range() {
        let base = profile_with_skills(&["Rust"]);
        let err = apply_mutation(
            &base,
            &ProfileMutation::UpdateItem {
                field: ArrayField::Skills,
                index: 3,
                value: "Go".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::IndexOutOfRange { index: 3, len: 1, .. }
        ));
    }

    #[test]
    fn test_remove_item_shifts_later_elements_down() {
        let base = profile_with_skills(&["a", "b", "c", "d"]);
        let next = apply_mutation(
            &base,
            &ProfileMutation::RemoveItem {
                field: ArrayField::Skills,
                index: 1,
            },
        )
        .unwrap();
        assert_eq!(next.skills, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_remove_item_out_of_range_leaves_profile_untouched() {
        let base = profile_with_skills(&["a"]);
        let err = apply_mutation(
            &base,
            &ProfileMutation::RemoveItem {
                field: ArrayField::Skills,
                index: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::IndexOutOfRange { .. }));
        assert_eq!(base.skills, vec!["a"]);
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let base = profile_with_skills(&["Rust"]);
        let appended = apply_mutation(
            &base,
            &ProfileMutation::AppendItem {
                field: ArrayField::Skills,
            },
        )
        .unwrap();
        let next = apply_mutation(
            &appended,
            &ProfileMutation::UpdateItem {
                field: ArrayField::Skills,
                index: 1,
                value: "Rust".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.skills, vec!["Rust", "Rust"]);
    }

    #[test]
    fn test_mutation_deserializes_from_tagged_json() {
        let m: ProfileMutation = serde_json::from_str(
            r#"{"op": "update_item", "field": "experience", "index": 0, "value": "Senior Engineer"}"#,
        )
        .unwrap();
        assert!(matches!(
            m,
            ProfileMutation::UpdateItem {
                field: ArrayField::Experience,
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_mutation_rejects_unknown_field_name() {
        let result: Result<ProfileMutation, _> =
            serde_json::from_str(r#"{"op": "set_field", "field": "photo", "value": "x"}"#);
        assert!(result.is_err());
    }
}

//! Profile completeness — pure derivation of a fill score and ordered
//! suggestions from a profile snapshot.
//!
//! Ten tracked indicators: the five scalar fields (non-blank after trim),
//! the four array fields (non-empty, counted once regardless of item count),
//! and a skills-breadth indicator (at least `MIN_SKILLS` skills). Suggestion
//! rules run in a fixed order and are independent of each other.

use serde::{Deserialize, Serialize};

use crate::models::profile::ProfileData;

/// Number of tracked indicators. Fixed regardless of how many array items exist.
pub const TOTAL_FIELDS: usize = 10;

/// Minimum skill count for the breadth indicator and suggestion rule 3.
pub const MIN_SKILLS: usize = 3;

const ACHIEVEMENTS_SUGGESTION: &str =
    "Add 2-3 achievements with concrete numbers or percentages";
const ABOUT_SUGGESTION: &str = "Fill in the about section with a short professional summary";
const SKILLS_SUGGESTION: &str = "List at least 3 professional skills";

/// Derived completeness of a profile snapshot. Always recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filled_count: usize,
    pub total_fields: usize,
    /// 0-100, `round(filled_count / total_fields * 100)`.
    pub score: u8,
    pub suggestions: Vec<String>,
}

/// Computes the fill score and suggestions for a profile snapshot.
/// Deterministic and side-effect free.
pub fn analyze(profile: &ProfileData) -> AnalysisResult {
    let scalars = [
        &profile.name,
        &profile.target_position,
        &profile.contacts,
        &profile.about,
        &profile.additional_info,
    ];
    let arrays = [
        &profile.education,
        &profile.experience,
        &profile.skills,
        &profile.achievements,
    ];

    let mut filled_count = scalars.iter().filter(|s| scalar_filled(s)).count();
    filled_count += arrays.iter().filter(|a| !a.is_empty()).count();
    if profile.skills.len() >= MIN_SKILLS {
        filled_count += 1;
    }

    let score = ((filled_count as f64 / TOTAL_FIELDS as f64) * 100.0).round() as u8;

    // Rule order is fixed; each rule appends at most one suggestion.
    let mut suggestions = Vec::new();
    if profile.achievements.is_empty() {
        suggestions.push(ACHIEVEMENTS_SUGGESTION.to_string());
    }
    if !scalar_filled(&profile.about) {
        suggestions.push(ABOUT_SUGGESTION.to_string());
    }
    if profile.skills.len() < MIN_SKILLS {
        suggestions.push(SKILLS_SUGGESTION.to_string());
    }

    AnalysisResult {
        filled_count,
        total_fields: TOTAL_FIELDS,
        score,
        suggestions,
    }
}

fn scalar_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

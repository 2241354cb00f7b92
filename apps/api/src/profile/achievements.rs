//! Achievement tracker — one-shot gamification badges.
//!
//! Three ids unlock from data predicates re-checked after every analyzer run;
//! the rest unlock when the corresponding user action completes. Every unlock
//! goes through the same set-membership-guarded insert, so re-evaluating with
//! a predicate still true never produces a duplicate record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::ProfileData;
use crate::profile::completeness::AnalysisResult;

/// Skills count at which `skills-master` unlocks.
pub const SKILLS_MASTER_THRESHOLD: usize = 5;
/// Experience entries at which `experienced` unlocks.
pub const EXPERIENCED_THRESHOLD: usize = 2;
/// `complete-profile` unlocks at `total_fields - COMPLETE_PROFILE_SLACK` filled.
pub const COMPLETE_PROFILE_SLACK: usize = 2;

/// The closed set of achievement ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    SkillsMaster,
    Experienced,
    CompleteProfile,
    ExampleUsed,
    Downloaded,
    Shared,
    AtsChecked,
    VacanciesSearched,
}

impl AchievementId {
    pub fn title(self) -> &'static str {
        match self {
            AchievementId::SkillsMaster => "Skills Master",
            AchievementId::Experienced => "Experienced",
            AchievementId::CompleteProfile => "Complete Profile",
            AchievementId::ExampleUsed => "Quick Start",
            AchievementId::Downloaded => "First Download",
            AchievementId::Shared => "Out There",
            AchievementId::AtsChecked => "Robot Approved",
            AchievementId::VacanciesSearched => "Job Hunter",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AchievementId::SkillsMaster => "🧰",
            AchievementId::Experienced => "💼",
            AchievementId::CompleteProfile => "🏆",
            AchievementId::ExampleUsed => "⚡",
            AchievementId::Downloaded => "📄",
            AchievementId::Shared => "🔗",
            AchievementId::AtsChecked => "🤖",
            AchievementId::VacanciesSearched => "🔍",
        }
    }
}

/// An unlocked achievement. Created once; never removed within a session.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementRecord {
    pub id: AchievementId,
    pub title: &'static str,
    pub icon: &'static str,
    pub unlocked_at: DateTime<Utc>,
}

/// Tracks unlocked achievements in unlock order.
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    unlocked: Vec<AchievementRecord>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-checks the data predicates against a fresh analyzer run.
    /// Returns the ids newly unlocked by this pass.
    pub fn evaluate(
        &mut self,
        profile: &ProfileData,
        analysis: &AnalysisResult,
    ) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        if profile.skills.len() >= SKILLS_MASTER_THRESHOLD
            && self.unlock(AchievementId::SkillsMaster)
        {
            newly.push(AchievementId::SkillsMaster);
        }
        if profile.experience.len() >= EXPERIENCED_THRESHOLD
            && self.unlock(AchievementId::Experienced)
        {
            newly.push(AchievementId::Experienced);
        }
        if analysis.filled_count + COMPLETE_PROFILE_SLACK >= analysis.total_fields
            && self.unlock(AchievementId::CompleteProfile)
        {
            newly.push(AchievementId::CompleteProfile);
        }
        newly
    }

    /// Unlocks an action-triggered achievement. Returns true on first unlock.
    pub fn record_action(&mut self, id: AchievementId) -> bool {
        self.unlock(id)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.iter().any(|r| r.id == id)
    }

    pub fn unlocked(&self) -> &[AchievementRecord] {
        &self.unlocked
    }

    // Membership check guards the insert: locked -> unlocked happens at most
    // once per id, no matter how often a predicate re-fires.
    fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.push(AchievementRecord {
            id,
            title: id.title(),
            icon: id.icon(),
            unlocked_at: Utc::now(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::completeness::analyze;

    fn profile_with_skill_count(n: usize) -> ProfileData {
        ProfileData {
            skills: (0..n).map(|i| format!("skill-{i}")).collect(),
            ..ProfileData::default()
        }
    }

    fn run(tracker: &mut AchievementTracker, profile: &ProfileData) -> Vec<AchievementId> {
        let analysis = analyze(profile);
        tracker.evaluate(profile, &analysis)
    }

    #[test]
    fn test_fifth_skill_unlocks_skills_master() {
        let mut tracker = AchievementTracker::new();
        assert!(run(&mut tracker, &profile_with_skill_count(4)).is_empty());

        let newly = run(&mut tracker, &profile_with_skill_count(5));
        assert_eq!(newly, vec![AchievementId::SkillsMaster]);
    }

    #[test]
    fn test_sixth_skill_does_not_duplicate_skills_master() {
        let mut tracker = AchievementTracker::new();
        run(&mut tracker, &profile_with_skill_count(5));
        let newly = run(&mut tracker, &profile_with_skill_count(6));
        assert!(newly.is_empty());
        assert_eq!(
            tracker
                .unlocked()
                .iter()
                .filter(|r| r.id == AchievementId::SkillsMaster)
                .count(),
            1
        );
    }

    #[test]
    fn test_two_experience_entries_unlock_experienced() {
        let mut tracker = AchievementTracker::new();
        let profile = ProfileData {
            experience: vec!["FinCore".to_string(), "ShipFast".to_string()],
            ..ProfileData::default()
        };
        assert_eq!(run(&mut tracker, &profile), vec![AchievementId::Experienced]);
    }

    #[test]
    fn test_complete_profile_unlocks_at_two_missing() {
        let mut tracker = AchievementTracker::new();
        // 8 of 10 indicators: all but target_position and additional_info
        let profile = ProfileData {
            name: "Alex".to_string(),
            contacts: "a@example.com".to_string(),
            about: "Engineer".to_string(),
            education: vec!["BSc".to_string()],
            experience: vec!["FinCore".to_string()],
            skills: vec!["Rust".to_string(), "SQL".to_string(), "K8s".to_string()],
            achievements: vec!["won".to_string()],
            ..ProfileData::default()
        };
        let newly = run(&mut tracker, &profile);
        assert!(newly.contains(&AchievementId::CompleteProfile));
    }

    #[test]
    fn test_repeated_evaluation_unlocks_each_id_once() {
        let mut tracker = AchievementTracker::new();
        let profile = profile_with_skill_count(6);
        for _ in 0..50 {
            run(&mut tracker, &profile);
        }
        assert_eq!(tracker.unlocked().len(), 1);
    }

    #[test]
    fn test_record_action_is_idempotent() {
        let mut tracker = AchievementTracker::new();
        assert!(tracker.record_action(AchievementId::Downloaded));
        assert!(!tracker.record_action(AchievementId::Downloaded));
        assert!(tracker.is_unlocked(AchievementId::Downloaded));
        assert_eq!(tracker.unlocked().len(), 1);
    }

    #[test]
    fn test_unlock_order_is_preserved() {
        let mut tracker = AchievementTracker::new();
        tracker.record_action(AchievementId::ExampleUsed);
        run(&mut tracker, &profile_with_skill_count(5));
        let ids: Vec<AchievementId> = tracker.unlocked().iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![AchievementId::ExampleUsed, AchievementId::SkillsMaster]
        );
    }

    #[test]
    fn test_id_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&AchievementId::SkillsMaster).unwrap(),
            "\"skills-master\""
        );
        assert_eq!(
            serde_json::to_string(&AchievementId::AtsChecked).unwrap(),
            "\"ats-checked\""
        );
    }
}

//! Rule-based badge awards over aggregate progression state.
//!
//! Rules are plain data, so a rule set can be shipped, extended, or loaded
//! from a document without touching the evaluator. A rule fires at most once
//! per badge title: titles already on the badge list never fire again.

use crate::streaks::{ProgressSettings, StreakKind};
use crate::world::{Artifact, Badge, Challenge, Mission, Quest, ReflectionLog, Skill};
use serde::{Deserialize, Serialize};

/// Read-only view of everything a rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub missions: &'a [Mission],
    pub skills: &'a [Skill],
    pub artifacts: &'a [Artifact],
    pub reflections: &'a ReflectionLog,
    pub challenges: &'a [Challenge],
    pub quests: &'a [Quest],
    pub mission_streak: u32,
    pub reflection_streak: u32,
}

impl<'a> StateView<'a> {
    pub fn new(
        missions: &'a [Mission],
        skills: &'a [Skill],
        artifacts: &'a [Artifact],
        reflections: &'a ReflectionLog,
        challenges: &'a [Challenge],
        quests: &'a [Quest],
        settings: &ProgressSettings,
    ) -> Self {
        Self {
            missions,
            skills,
            artifacts,
            reflections,
            challenges,
            quests,
            mission_streak: settings.streak(StreakKind::Mission),
            reflection_streak: settings.streak(StreakKind::Reflection),
        }
    }
}

/// Declarative predicate over the aggregate state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    MissionsCompleted(u32),
    ArtifactsCollected(u32),
    SkillLevelReached(u32),
    ReflectionsWritten(u32),
    ChallengesFinished(u32),
    QuestsCompleted(u32),
    MissionStreak(u32),
    ReflectionStreak(u32),
}

impl RuleCondition {
    fn holds(&self, state: &StateView<'_>) -> bool {
        match *self {
            RuleCondition::MissionsCompleted(n) => {
                state.missions.iter().filter(|m| m.completed).count() as u32 >= n
            }
            RuleCondition::ArtifactsCollected(n) => {
                state.artifacts.iter().filter(|a| a.collected).count() as u32 >= n
            }
            RuleCondition::SkillLevelReached(n) => state.skills.iter().any(|s| s.level >= n),
            RuleCondition::ReflectionsWritten(n) => state.reflections.len() as u32 >= n,
            RuleCondition::ChallengesFinished(n) => {
                state.challenges.iter().filter(|c| c.is_done()).count() as u32 >= n
            }
            RuleCondition::QuestsCompleted(n) => {
                state.quests.iter().filter(|q| q.completed).count() as u32 >= n
            }
            RuleCondition::MissionStreak(n) => state.mission_streak >= n,
            RuleCondition::ReflectionStreak(n) => state.reflection_streak >= n,
        }
    }
}

/// One badge-awarding rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRule {
    pub title: String,
    pub description: String,
    pub condition: RuleCondition,
}

impl AchievementRule {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        condition: RuleCondition,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            condition,
        }
    }
}

/// Evaluate `rules` against `state`, returning only badges not yet earned.
pub fn evaluate(
    rules: &[AchievementRule],
    state: &StateView<'_>,
    existing: &[Badge],
) -> Vec<Badge> {
    let mut earned: Vec<Badge> = Vec::new();
    for rule in rules {
        let already = existing.iter().any(|b| b.title == rule.title)
            || earned.iter().any(|b| b.title == rule.title);
        if already || !rule.condition.holds(state) {
            continue;
        }
        earned.push(Badge {
            title: rule.title.clone(),
            description: rule.description.clone(),
        });
    }
    earned
}

/// The minimal shipped rule set.
pub fn default_rules() -> Vec<AchievementRule> {
    vec![
        AchievementRule::new(
            "First Light",
            "Complete your first mission.",
            RuleCondition::MissionsCompleted(1),
        ),
        AchievementRule::new(
            "Relic Hunter",
            "Collect three artifacts.",
            RuleCondition::ArtifactsCollected(3),
        ),
        AchievementRule::new(
            "Seven Dawns",
            "Keep a seven-day reflection streak.",
            RuleCondition::ReflectionStreak(7),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{sample_artifacts, sample_missions, sample_quests, sample_skills};

    fn state<'a>(
        missions: &'a [Mission],
        artifacts: &'a [Artifact],
        skills: &'a [Skill],
        reflections: &'a ReflectionLog,
        quests: &'a [Quest],
        settings: &ProgressSettings,
    ) -> StateView<'a> {
        StateView::new(missions, skills, artifacts, reflections, &[], quests, settings)
    }

    #[test]
    fn test_rule_fires_when_condition_holds() {
        let mut missions = sample_missions();
        missions[0].completed = true;
        let reflections = ReflectionLog::new();
        let state = state(
            &missions,
            &[],
            &[],
            &reflections,
            &[],
            &ProgressSettings::default(),
        );

        let earned = evaluate(&default_rules(), &state, &[]);
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].title, "First Light");
    }

    #[test]
    fn test_rule_is_idempotent_across_evaluations() {
        let mut missions = sample_missions();
        missions[0].completed = true;
        let reflections = ReflectionLog::new();
        let state = state(
            &missions,
            &[],
            &[],
            &reflections,
            &[],
            &ProgressSettings::default(),
        );

        let first = evaluate(&default_rules(), &state, &[]);
        let second = evaluate(&default_rules(), &state, &first);
        assert!(second.is_empty());
    }

    #[test]
    fn test_duplicate_rule_titles_award_once() {
        let rules = vec![
            AchievementRule::new("Twin", "a", RuleCondition::MissionsCompleted(0)),
            AchievementRule::new("Twin", "b", RuleCondition::MissionsCompleted(0)),
        ];
        let reflections = ReflectionLog::new();
        let state = state(
            &[],
            &[],
            &[],
            &reflections,
            &[],
            &ProgressSettings::default(),
        );
        assert_eq!(evaluate(&rules, &state, &[]).len(), 1);
    }

    #[test]
    fn test_streak_conditions_read_settings() {
        let mut settings = ProgressSettings::default();
        settings.reflection_streak = 7;
        let reflections = ReflectionLog::new();
        let state = state(&[], &[], &[], &reflections, &[], &settings);

        let earned = evaluate(&default_rules(), &state, &[]);
        assert!(earned.iter().any(|b| b.title == "Seven Dawns"));
    }

    #[test]
    fn test_skill_and_quest_conditions() {
        let skills = sample_skills();
        let mut quests = sample_quests();
        quests[0].completed = true;
        let rules = vec![
            AchievementRule::new("Adept", "", RuleCondition::SkillLevelReached(2)),
            AchievementRule::new("Pilgrim", "", RuleCondition::QuestsCompleted(1)),
            AchievementRule::new("Master", "", RuleCondition::SkillLevelReached(10)),
        ];
        let reflections = ReflectionLog::new();
        let state = state(
            &[],
            &[],
            &skills,
            &reflections,
            &quests,
            &ProgressSettings::default(),
        );

        let titles: Vec<_> = evaluate(&rules, &state, &[])
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Adept", "Pilgrim"]);
    }

    #[test]
    fn test_artifact_rule_counts_only_collected() {
        let artifacts = sample_artifacts();
        let reflections = ReflectionLog::new();
        let state = state(
            &[],
            &artifacts,
            &[],
            &reflections,
            &[],
            &ProgressSettings::default(),
        );
        // Only one sample artifact starts collected.
        assert!(evaluate(&default_rules(), &state, &[]).is_empty());
    }

    #[test]
    fn test_rules_serialize_as_data() {
        let rules = default_rules();
        let json = serde_json::to_string_pretty(&rules).unwrap();
        let back: Vec<AchievementRule> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rules);
    }
}

//! ProgressionEngine - the mutation API the presentation layer drives.
//!
//! Every operation mutates a caller-held collection in memory, persists it
//! through the [`TempleStore`] before returning, and reports a
//! human-readable [`Outcome`]. Index-addressed operations treat an
//! out-of-range index as a silent no-op (the presentation layer only offers
//! as many hotkeys as there are entities), and no-ops never write.

use crate::achievements::{self, AchievementRule, StateView};
use crate::oracle;
use crate::sandbox;
use crate::snapshot;
use crate::store::{StoreError, TempleStore};
use crate::streaks::{ProgressSettings, StreakKind};
use crate::world::{
    sample_artifacts, sample_challenges, sample_missions, sample_quests, sample_skills, Artifact,
    Badge, Challenge, Mission, OracleTips, Profile, Quest, ReflectionLog, Skill, AVATAR_COLORS,
    DEFAULT_LORE, DEFAULT_ORACLE_TIPS, PROFILE_TITLES,
};
use chrono::{Local, NaiveDate};
use std::path::Path;

/// Default progress awarded by one skill practice session.
pub const SKILL_PROGRESS_STEP: u32 = 25;

/// Default advance for one challenge step.
pub const CHALLENGE_STEP: u32 = 1;

/// What a single engine operation did, for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub changed: bool,
}

impl Outcome {
    pub(crate) fn changed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: true,
        }
    }

    pub(crate) fn unchanged(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: false,
        }
    }
}

/// The single mutating entry point over all entity collections.
pub struct ProgressionEngine {
    store: TempleStore,
}

impl ProgressionEngine {
    pub fn new(store: TempleStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TempleStore {
        &self.store
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // ------------------------------------------------------------------
    // Collection access with seed-on-empty
    // ------------------------------------------------------------------

    pub fn missions(&self) -> Result<Vec<Mission>, StoreError> {
        let mut missions = self.store.load_missions()?;
        if missions.is_empty() {
            missions = sample_missions();
            self.store.save_missions(&missions)?;
            tracing::info!("seeded default missions");
        }
        Ok(missions)
    }

    pub fn skills(&self) -> Result<Vec<Skill>, StoreError> {
        let mut skills = self.store.load_skills()?;
        if skills.is_empty() {
            skills = sample_skills();
            self.store.save_skills(&skills)?;
            tracing::info!("seeded default skills");
        }
        Ok(skills)
    }

    pub fn artifacts(&self) -> Result<Vec<Artifact>, StoreError> {
        let mut artifacts = self.store.load_artifacts()?;
        if artifacts.is_empty() {
            artifacts = sample_artifacts();
            self.store.save_artifacts(&artifacts)?;
            tracing::info!("seeded default artifacts");
        }
        Ok(artifacts)
    }

    pub fn challenges(&self) -> Result<Vec<Challenge>, StoreError> {
        let mut challenges = self.store.load_challenges()?;
        if challenges.is_empty() {
            challenges = sample_challenges();
            self.store.save_challenges(&challenges)?;
            tracing::info!("seeded default challenges");
        }
        Ok(challenges)
    }

    pub fn quests(&self) -> Result<Vec<Quest>, StoreError> {
        let mut quests = self.store.load_quests()?;
        if quests.is_empty() {
            quests = sample_quests();
            self.store.save_quests(&quests)?;
            tracing::info!("seeded default quests");
        }
        Ok(quests)
    }

    pub fn reflections(&self) -> Result<ReflectionLog, StoreError> {
        self.store.load_reflections()
    }

    pub fn badges(&self) -> Result<Vec<Badge>, StoreError> {
        self.store.load_badges()
    }

    pub fn settings(&self) -> Result<ProgressSettings, StoreError> {
        self.store.load_settings()
    }

    pub fn lore_pool(&self) -> Result<Vec<String>, StoreError> {
        let mut lore = self.store.load_lore()?;
        if lore.is_empty() {
            lore = DEFAULT_LORE.clone();
            self.store.save_lore(&lore)?;
        }
        Ok(lore)
    }

    pub fn oracle_tips(&self) -> Result<OracleTips, StoreError> {
        let mut tips = self.store.load_oracle_tips()?;
        if tips.is_empty() {
            tips = DEFAULT_ORACLE_TIPS.clone();
            self.store.save_oracle_tips(&tips)?;
        }
        Ok(tips)
    }

    pub fn profile(&self) -> Result<Profile, StoreError> {
        match self.store.load_profile()? {
            Some(profile) => Ok(profile),
            None => {
                let profile = Profile::new("Wanderer");
                self.store.save_profile(&profile)?;
                tracing::info!("seeded default profile");
                Ok(profile)
            }
        }
    }

    // ------------------------------------------------------------------
    // Missions
    // ------------------------------------------------------------------

    /// Flip a mission's completion. Newly completed missions feed the
    /// mission streak, at most once per calendar day.
    pub fn toggle_mission(
        &self,
        missions: &mut [Mission],
        index: usize,
    ) -> Result<Outcome, StoreError> {
        let Some(mission) = missions.get_mut(index) else {
            return Ok(Outcome::unchanged("No such mission."));
        };
        mission.completed = !mission.completed;
        let completed = mission.completed;
        let message = if completed {
            format!("Mission '{}' completed!", mission.title)
        } else {
            format!("Mission '{}' is now pending.", mission.title)
        };

        self.store.save_missions(missions)?;
        if completed {
            let mut settings = self.store.load_settings()?;
            let streak = settings.record_activity(StreakKind::Mission, Self::today());
            self.store.save_settings(&settings)?;
            tracing::debug!(streak, "mission streak updated");
        }
        Ok(Outcome::changed(message))
    }

    // ------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------

    /// Practice a skill for the default 25 progress points.
    pub fn advance_skill(&self, skills: &mut [Skill], index: usize) -> Result<Outcome, StoreError> {
        self.advance_skill_by(skills, index, SKILL_PROGRESS_STEP)
    }

    /// Add `increment` progress to a skill. Crossing 100 raises the level by
    /// one and resets progress to exactly zero; the excess is discarded.
    pub fn advance_skill_by(
        &self,
        skills: &mut [Skill],
        index: usize,
        increment: u32,
    ) -> Result<Outcome, StoreError> {
        let Some(skill) = skills.get_mut(index) else {
            return Ok(Outcome::unchanged("No such skill."));
        };
        skill.progress += increment;
        let message = if skill.progress >= 100 {
            skill.level += 1;
            skill.progress = 0;
            format!("Skill '{}' leveled up to {}!", skill.name, skill.level)
        } else {
            format!("Skill '{}' progress +{}%.", skill.name, increment)
        };

        self.store.save_skills(skills)?;
        Ok(Outcome::changed(message))
    }

    // ------------------------------------------------------------------
    // Artifacts
    // ------------------------------------------------------------------

    pub fn toggle_artifact(
        &self,
        artifacts: &mut [Artifact],
        index: usize,
    ) -> Result<Outcome, StoreError> {
        let Some(artifact) = artifacts.get_mut(index) else {
            return Ok(Outcome::unchanged("No such artifact."));
        };
        artifact.collected = !artifact.collected;
        let message = if artifact.collected {
            format!("Artifact '{}' is now collected!", artifact.name)
        } else {
            format!("Artifact '{}' is now uncollected.", artifact.name)
        };

        self.store.save_artifacts(artifacts)?;
        Ok(Outcome::changed(message))
    }

    /// Rename an artifact; its collected state is untouched.
    pub fn rename_artifact(
        &self,
        artifacts: &mut [Artifact],
        index: usize,
        new_name: impl Into<String>,
    ) -> Result<Outcome, StoreError> {
        let Some(artifact) = artifacts.get_mut(index) else {
            return Ok(Outcome::unchanged("No such artifact."));
        };
        artifact.name = new_name.into();
        let message = format!("Artifact renamed to '{}'.", artifact.name);

        self.store.save_artifacts(artifacts)?;
        Ok(Outcome::changed(message))
    }

    // ------------------------------------------------------------------
    // Challenges
    // ------------------------------------------------------------------

    /// Advance a challenge by the default single step.
    pub fn advance_challenge(
        &self,
        challenges: &mut [Challenge],
        index: usize,
    ) -> Result<Outcome, StoreError> {
        self.advance_challenge_by(challenges, index, CHALLENGE_STEP)
    }

    pub fn advance_challenge_by(
        &self,
        challenges: &mut [Challenge],
        index: usize,
        increment: u32,
    ) -> Result<Outcome, StoreError> {
        let Some(challenge) = challenges.get_mut(index) else {
            return Ok(Outcome::unchanged("No such challenge."));
        };
        challenge.progress += increment;
        let message = if challenge.is_done() {
            format!("Challenge '{}' complete!", challenge.title)
        } else {
            format!(
                "Challenge '{}' at {}/{}.",
                challenge.title, challenge.progress, challenge.goal
            )
        };

        self.store.save_challenges(challenges)?;
        Ok(Outcome::changed(message))
    }

    pub fn create_challenge(
        &self,
        challenges: &mut Vec<Challenge>,
        title: impl Into<String>,
        deadline: impl Into<String>,
        goal: u32,
    ) -> Result<Outcome, StoreError> {
        let challenge = Challenge::new(title, deadline, goal);
        let message = format!("Challenge '{}' created.", challenge.title);
        challenges.push(challenge);

        self.store.save_challenges(challenges)?;
        Ok(Outcome::changed(message))
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    /// Mark a whole quest complete in one step. Task lists are display-only;
    /// there is no per-task progress.
    pub fn advance_quest(&self, quests: &mut [Quest], index: usize) -> Result<Outcome, StoreError> {
        let Some(quest) = quests.get_mut(index) else {
            return Ok(Outcome::unchanged("No such quest."));
        };
        quest.completed = true;
        let message = format!("Quest '{}' completed!", quest.name);

        self.store.save_quests(quests)?;
        Ok(Outcome::changed(message))
    }

    // ------------------------------------------------------------------
    // Reflections
    // ------------------------------------------------------------------

    /// Record the reflection for a date, overwriting any prior entry.
    /// Blank content (after trimming) is rejected without a write.
    pub fn record_reflection(
        &self,
        reflections: &mut ReflectionLog,
        date: impl Into<String>,
        content: &str,
    ) -> Result<Outcome, StoreError> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(Outcome::unchanged("Nothing to save."));
        }
        let date = date.into();
        reflections.insert(date.clone(), content.to_string());

        self.store.save_reflections(reflections)?;
        let mut settings = self.store.load_settings()?;
        let streak = settings.record_activity(StreakKind::Reflection, Self::today());
        self.store.save_settings(&settings)?;
        tracing::debug!(streak, "reflection streak updated");
        Ok(Outcome::changed(format!("Reflection for {date} saved.")))
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    pub fn save_profile(&self, profile: &Profile) -> Result<Outcome, StoreError> {
        self.store.save_profile(profile)?;
        Ok(Outcome::changed("Profile saved."))
    }

    pub fn set_profile_name(
        &self,
        profile: &mut Profile,
        name: impl Into<String>,
    ) -> Result<Outcome, StoreError> {
        profile.name = name.into();
        self.store.save_profile(profile)?;
        Ok(Outcome::changed(format!("You are known as {}.", profile.name)))
    }

    pub fn cycle_profile_title(&self, profile: &mut Profile) -> Result<Outcome, StoreError> {
        profile.title = next_in_set(&PROFILE_TITLES, &profile.title);
        self.store.save_profile(profile)?;
        Ok(Outcome::changed(format!("Title is now '{}'.", profile.title)))
    }

    pub fn cycle_avatar_color(&self, profile: &mut Profile) -> Result<Outcome, StoreError> {
        profile.avatar_color = next_in_set(&AVATAR_COLORS, &profile.avatar_color);
        self.store.save_profile(profile)?;
        Ok(Outcome::changed(format!(
            "Avatar color is now {}.",
            profile.avatar_color
        )))
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn cycle_theme(&self) -> Result<Outcome, StoreError> {
        let mut settings = self.store.load_settings()?;
        let next = settings.cycle_theme().to_string();
        self.store.save_settings(&settings)?;
        Ok(Outcome::changed(format!("Theme set to '{next}'.")))
    }

    // ------------------------------------------------------------------
    // Lore and oracle
    // ------------------------------------------------------------------

    /// The once-per-day lore line; `None` when today's was already shown.
    pub fn daily_lore(&self) -> Result<Option<String>, StoreError> {
        let pool = self.lore_pool()?;
        let mut settings = self.store.load_settings()?;
        let mut rng = rand::thread_rng();
        let line = oracle::daily_lore(&mut settings, &pool, &mut rng, Self::today());
        if line.is_some() {
            self.store.save_settings(&settings)?;
        }
        Ok(line)
    }

    pub fn oracle_tip(&self, category: &str) -> Result<Outcome, StoreError> {
        let tips = self.oracle_tips()?;
        let mut rng = rand::thread_rng();
        match oracle::pick_oracle_tip(&tips, category, &mut rng) {
            Some(tip) => Ok(Outcome::unchanged(tip)),
            None => Ok(Outcome::unchanged(format!(
                "No tips available for '{category}'."
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Achievements
    // ------------------------------------------------------------------

    /// Evaluate `rules` over current state, append newly earned badges to
    /// the badge list, and return them.
    pub fn evaluate_achievements(
        &self,
        rules: &[AchievementRule],
    ) -> Result<Vec<Badge>, StoreError> {
        let missions = self.store.load_missions()?;
        let skills = self.store.load_skills()?;
        let artifacts = self.store.load_artifacts()?;
        let reflections = self.store.load_reflections()?;
        let challenges = self.store.load_challenges()?;
        let quests = self.store.load_quests()?;
        let settings = self.store.load_settings()?;
        let mut badges = self.store.load_badges()?;

        let state = StateView::new(
            &missions,
            &skills,
            &artifacts,
            &reflections,
            &challenges,
            &quests,
            &settings,
        );
        let earned = achievements::evaluate(rules, &state, &badges);
        if !earned.is_empty() {
            badges.extend(earned.iter().cloned());
            self.store.save_badges(&badges)?;
            tracing::info!(count = earned.len(), "badges earned");
        }
        Ok(earned)
    }

    // ------------------------------------------------------------------
    // Sandbox
    // ------------------------------------------------------------------

    pub fn sandbox_lines(&self) -> Result<Vec<String>, StoreError> {
        self.store.load_sandbox_lines()
    }

    pub fn add_sandbox_line(&self, line: &str) -> Result<Outcome, StoreError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::unchanged("Nothing to save."));
        }
        let mut lines = self.store.load_sandbox_lines()?;
        lines.push(line.to_string());
        self.store.save_sandbox_lines(&lines)?;
        Ok(Outcome::changed("Line added to the sandbox."))
    }

    pub fn generate_sandbox_line(&self) -> Result<Option<String>, StoreError> {
        let lines = self.store.load_sandbox_lines()?;
        Ok(sandbox::generate_line(&lines, &mut rand::thread_rng()))
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    pub fn export_all(&self, path: impl AsRef<Path>) -> Result<Outcome, StoreError> {
        snapshot::export_all(&self.store, &path)?;
        Ok(Outcome::changed(format!(
            "Exported snapshot to {}.",
            path.as_ref().display()
        )))
    }

    pub fn import_all(&self, path: impl AsRef<Path>) -> Result<Outcome, StoreError> {
        snapshot::import_all(&self.store, path)
    }
}

/// Next entry after `current` in a fixed set, wrapping around. Unknown
/// values restart at the first entry.
fn next_in_set(set: &[&str], current: &str) -> String {
    set.iter()
        .position(|v| *v == current)
        .map(|i| set[(i + 1) % set.len()])
        .unwrap_or(set[0])
        .to_string()
}

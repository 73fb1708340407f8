//! Progression state engine for the Cosmic Temple tracker.
//!
//! This crate provides:
//! - Typed JSON document persistence for every entity collection
//! - The mutation API a presentation layer drives (missions, skills,
//!   artifacts, challenges, quests, reflections, profile)
//! - Day-based streak tracking and rule-based badge awards
//! - Daily lore and oracle tip selection
//! - Consolidated snapshot export/import
//!
//! # Quick Start
//!
//! ```no_run
//! use temple_core::{ProgressionEngine, TempleStore};
//!
//! fn main() -> Result<(), temple_core::StoreError> {
//!     let engine = ProgressionEngine::new(TempleStore::new("./data"));
//!
//!     let mut missions = engine.missions()?;
//!     let outcome = engine.toggle_mission(&mut missions, 0)?;
//!     println!("{}", outcome.message);
//!     Ok(())
//! }
//! ```

pub mod achievements;
pub mod engine;
pub mod oracle;
pub mod sandbox;
pub mod snapshot;
pub mod store;
pub mod streaks;
pub mod world;

// Primary public API
pub use achievements::{default_rules, AchievementRule, RuleCondition, StateView};
pub use engine::{Outcome, ProgressionEngine, CHALLENGE_STEP, SKILL_PROGRESS_STEP};
pub use snapshot::Snapshot;
pub use store::{StoreError, TempleStore};
pub use streaks::{ProgressSettings, StreakKind};
pub use world::{
    Artifact, Badge, Challenge, Mission, OracleTips, Profile, Quest, ReflectionLog, Skill,
    AVATAR_COLORS, PROFILE_TITLES, THEME_NAMES,
};

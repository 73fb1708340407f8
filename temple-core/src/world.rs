//! Entity records for the Cosmic Temple, plus the canonical seed data
//! persisted on first access.
//!
//! Every record is a plain serde struct mirroring its backing document
//! one-to-one. Entities carry no identity field; they are addressed by
//! position within their collection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Daily reflections keyed by ISO date (`YYYY-MM-DD`), at most one per day.
pub type ReflectionLog = BTreeMap<String, String>;

/// Oracle tip pools keyed by category name.
pub type OracleTips = BTreeMap<String, Vec<String>>;

// ============================================================================
// Enumerated sets
// ============================================================================

/// Profile titles, cycled with wraparound.
pub const PROFILE_TITLES: [&str; 5] = [
    "Stargazer",
    "Comet Rider",
    "Nebula Sage",
    "Void Walker",
    "Temple Keeper",
];

/// Avatar colors, restricted to the 16-color terminal palette.
pub const AVATAR_COLORS: [&str; 7] = [
    "white", "red", "green", "yellow", "blue", "magenta", "cyan",
];

/// Available presentation themes. The engine only stores the active name.
pub const THEME_NAMES: [&str; 4] = ["default", "stardust", "nebula", "aurora"];

// ============================================================================
// Entities
// ============================================================================

/// A small real-world task the user can complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Mission {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// A practiced skill with a level and a 0-99 progress meter.
///
/// Crossing 100 progress raises the level by one and resets progress to
/// exactly zero; the excess is discarded, not carried forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default = "default_skill_level")]
    pub level: u32,
    #[serde(default)]
    pub progress: u32,
}

fn default_skill_level() -> u32 {
    1
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            progress: 0,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_progress(mut self, progress: u32) -> Self {
        self.progress = progress;
        self
    }
}

/// A collectible cosmic artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    #[serde(default)]
    pub collected: bool,
}

impl Artifact {
    pub fn new(name: impl Into<String>, collected: bool) -> Self {
        Self {
            name: name.into(),
            collected,
        }
    }
}

/// A time-boxed challenge. Completion is derived from `progress >= goal`
/// and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub deadline: String,
    #[serde(default)]
    pub progress: u32,
    pub goal: u32,
}

impl Challenge {
    pub fn new(title: impl Into<String>, deadline: impl Into<String>, goal: u32) -> Self {
        Self {
            title: title.into(),
            deadline: deadline.into(),
            progress: 0,
            goal,
        }
    }

    pub fn is_done(&self) -> bool {
        self.progress >= self.goal
    }
}

/// The user's singleton profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default = "default_profile_title")]
    pub title: String,
    #[serde(default = "default_avatar_color")]
    pub avatar_color: String,
}

fn default_profile_title() -> String {
    PROFILE_TITLES[0].to_string()
}

fn default_avatar_color() -> String {
    AVATAR_COLORS[0].to_string()
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: default_profile_title(),
            avatar_color: default_avatar_color(),
        }
    }
}

/// An earned achievement. The badge list is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub title: String,
    pub description: String,
}

/// A multi-step quest. The task list is fixed at creation; completion is a
/// single flag over the whole quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub tasks: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Quest {
    pub fn new(name: impl Into<String>, tasks: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tasks,
            completed: false,
        }
    }
}

// ============================================================================
// Canonical seeds
// ============================================================================

/// Sample missions persisted when the collection first loads empty.
pub fn sample_missions() -> Vec<Mission> {
    vec![
        Mission::new("Stardust Fitness", "Run for 30 minutes"),
        Mission::new("Galaxy Brain Coding", "Complete a coding tutorial"),
        Mission::new(
            "Astral Reading",
            "Read 20 pages of a science/philosophy book",
        ),
    ]
}

/// Sample skills persisted when the collection first loads empty.
pub fn sample_skills() -> Vec<Skill> {
    vec![
        Skill::new("Fitness").with_progress(20),
        Skill::new("Coding").with_level(2).with_progress(50),
        Skill::new("Writing").with_progress(10),
    ]
}

/// Sample artifacts persisted when the collection first loads empty.
pub fn sample_artifacts() -> Vec<Artifact> {
    vec![
        Artifact::new("Nebula Shard", false),
        Artifact::new("Meteor Fragment", true),
        Artifact::new("Star Cluster", false),
    ]
}

/// Sample challenge persisted when the collection first loads empty.
pub fn sample_challenges() -> Vec<Challenge> {
    vec![Challenge::new("Comet Sprint", "2099-12-31", 7)]
}

/// Sample quest persisted when the collection first loads empty.
pub fn sample_quests() -> Vec<Quest> {
    vec![Quest::new(
        "Ascend the Temple Steps",
        vec![
            "Light the votive lamp".to_string(),
            "Cross the meteor bridge".to_string(),
            "Ring the gate bell".to_string(),
        ],
    )]
}

lazy_static::lazy_static! {
    /// Default lore pool for the once-per-day cosmic event line.
    pub static ref DEFAULT_LORE: Vec<String> = vec![
        "A solar flare ignites your determination.".to_string(),
        "Cosmic winds blow fresh ideas your way.".to_string(),
        "A meteor shower of creativity streaks across your mind.".to_string(),
        "The alignment of distant stars fuels your ambition.".to_string(),
    ];

    /// Default oracle tip table, keyed by category.
    pub static ref DEFAULT_ORACLE_TIPS: OracleTips = {
        let mut tips = OracleTips::new();
        tips.insert(
            "missions".to_string(),
            vec![
                "Small missions finished daily outshine grand plans.".to_string(),
                "Toggle the easiest mission first to build momentum.".to_string(),
            ],
        );
        tips.insert(
            "skills".to_string(),
            vec![
                "Twenty-five points of practice a day levels any skill.".to_string(),
                "Rotate skills so none of them gathers stardust.".to_string(),
            ],
        );
        tips.insert(
            "reflection".to_string(),
            vec![
                "One honest sentence is a complete reflection.".to_string(),
                "Write before the comet of the day fades from memory.".to_string(),
            ],
        );
        tips
    };
}

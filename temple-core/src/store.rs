//! Flat-file JSON persistence for every entity collection.
//!
//! One document per entity kind, human-readable indentation. A missing
//! document is an empty collection, never an error; a document that exists
//! but fails to parse is surfaced as [`StoreError::Corrupt`] so data loss is
//! never masked by silently falling back to defaults.
//!
//! Saves replace the whole document through a sibling temporary file plus an
//! atomic rename, so a crash mid-write leaves either the old or the new
//! content on disk, never a truncated document.

use crate::streaks::ProgressSettings;
use crate::world::{
    Artifact, Badge, Challenge, Mission, OracleTips, Profile, Quest, ReflectionLog, Skill,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MISSIONS_FILE: &str = "missions.json";
pub const SKILLS_FILE: &str = "skills.json";
pub const ARTIFACTS_FILE: &str = "artifacts.json";
pub const REFLECTIONS_FILE: &str = "reflections.json";
pub const CHALLENGES_FILE: &str = "challenges.json";
pub const PROFILE_FILE: &str = "profile.json";
pub const BADGES_FILE: &str = "badges.json";
pub const QUESTS_FILE: &str = "quests.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LORE_FILE: &str = "lore.json";
pub const ORACLE_FILE: &str = "oracle.json";
pub const SANDBOX_FILE: &str = "sandbox_lines.json";

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt document {file}: {source}")]
    Corrupt {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Write `content` to `path` through a sibling temp file and atomic rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

/// Typed load/save for every entity document, rooted at one data directory.
///
/// The store exclusively owns file I/O for its documents; callers hand it
/// whole collections and get whole collections back.
pub struct TempleStore {
    data_dir: PathBuf,
}

impl TempleStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Read a document, distinguishing "absent" from "unparseable".
    fn read_doc<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(source) => Err(StoreError::Corrupt {
                file: file.to_string(),
                source,
            }),
        }
    }

    /// Serialize a full collection and atomically replace its document.
    fn write_doc<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let content = serde_json::to_string_pretty(value)?;
        write_atomic(&self.path(file), &content)?;
        tracing::debug!(file, "document saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Missions
    // ------------------------------------------------------------------

    pub fn load_missions(&self) -> Result<Vec<Mission>, StoreError> {
        Ok(self.read_doc(MISSIONS_FILE)?.unwrap_or_default())
    }

    pub fn save_missions(&self, missions: &[Mission]) -> Result<(), StoreError> {
        self.write_doc(MISSIONS_FILE, missions)
    }

    // ------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------

    pub fn load_skills(&self) -> Result<Vec<Skill>, StoreError> {
        Ok(self.read_doc(SKILLS_FILE)?.unwrap_or_default())
    }

    pub fn save_skills(&self, skills: &[Skill]) -> Result<(), StoreError> {
        self.write_doc(SKILLS_FILE, skills)
    }

    // ------------------------------------------------------------------
    // Artifacts
    // ------------------------------------------------------------------

    pub fn load_artifacts(&self) -> Result<Vec<Artifact>, StoreError> {
        Ok(self.read_doc(ARTIFACTS_FILE)?.unwrap_or_default())
    }

    pub fn save_artifacts(&self, artifacts: &[Artifact]) -> Result<(), StoreError> {
        self.write_doc(ARTIFACTS_FILE, artifacts)
    }

    // ------------------------------------------------------------------
    // Reflections
    // ------------------------------------------------------------------

    pub fn load_reflections(&self) -> Result<ReflectionLog, StoreError> {
        Ok(self.read_doc(REFLECTIONS_FILE)?.unwrap_or_default())
    }

    pub fn save_reflections(&self, reflections: &ReflectionLog) -> Result<(), StoreError> {
        self.write_doc(REFLECTIONS_FILE, reflections)
    }

    // ------------------------------------------------------------------
    // Challenges
    // ------------------------------------------------------------------

    pub fn load_challenges(&self) -> Result<Vec<Challenge>, StoreError> {
        Ok(self.read_doc(CHALLENGES_FILE)?.unwrap_or_default())
    }

    pub fn save_challenges(&self, challenges: &[Challenge]) -> Result<(), StoreError> {
        self.write_doc(CHALLENGES_FILE, challenges)
    }

    // ------------------------------------------------------------------
    // Profile (singleton)
    // ------------------------------------------------------------------

    pub fn load_profile(&self) -> Result<Option<Profile>, StoreError> {
        self.read_doc(PROFILE_FILE)
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.write_doc(PROFILE_FILE, profile)
    }

    // ------------------------------------------------------------------
    // Badges
    // ------------------------------------------------------------------

    pub fn load_badges(&self) -> Result<Vec<Badge>, StoreError> {
        Ok(self.read_doc(BADGES_FILE)?.unwrap_or_default())
    }

    pub fn save_badges(&self, badges: &[Badge]) -> Result<(), StoreError> {
        self.write_doc(BADGES_FILE, badges)
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    pub fn load_quests(&self) -> Result<Vec<Quest>, StoreError> {
        Ok(self.read_doc(QUESTS_FILE)?.unwrap_or_default())
    }

    pub fn save_quests(&self, quests: &[Quest]) -> Result<(), StoreError> {
        self.write_doc(QUESTS_FILE, quests)
    }

    // ------------------------------------------------------------------
    // Settings (singleton)
    // ------------------------------------------------------------------

    pub fn load_settings(&self) -> Result<ProgressSettings, StoreError> {
        Ok(self.read_doc(SETTINGS_FILE)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &ProgressSettings) -> Result<(), StoreError> {
        self.write_doc(SETTINGS_FILE, settings)
    }

    // ------------------------------------------------------------------
    // Lore pool and oracle tips
    // ------------------------------------------------------------------

    pub fn load_lore(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_doc(LORE_FILE)?.unwrap_or_default())
    }

    pub fn save_lore(&self, lore: &[String]) -> Result<(), StoreError> {
        self.write_doc(LORE_FILE, lore)
    }

    pub fn load_oracle_tips(&self) -> Result<OracleTips, StoreError> {
        Ok(self.read_doc(ORACLE_FILE)?.unwrap_or_default())
    }

    pub fn save_oracle_tips(&self, tips: &OracleTips) -> Result<(), StoreError> {
        self.write_doc(ORACLE_FILE, tips)
    }

    // ------------------------------------------------------------------
    // Sandbox lines
    // ------------------------------------------------------------------

    pub fn load_sandbox_lines(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_doc(SANDBOX_FILE)?.unwrap_or_default())
    }

    pub fn save_sandbox_lines(&self, lines: &[String]) -> Result<(), StoreError> {
        self.write_doc(SANDBOX_FILE, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample_missions;
    use tempfile::TempDir;

    fn store() -> (TempDir, TempleStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = TempleStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_documents_load_empty() {
        let (_dir, store) = store();
        assert!(store.load_missions().unwrap().is_empty());
        assert!(store.load_reflections().unwrap().is_empty());
        assert!(store.load_profile().unwrap().is_none());
        assert_eq!(store.load_settings().unwrap(), ProgressSettings::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = store();
        let missions = sample_missions();
        store.save_missions(&missions).unwrap();
        assert_eq!(store.load_missions().unwrap(), missions);

        let profile = Profile::new("Lyra");
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap(), Some(profile));
    }

    #[test]
    fn test_save_of_loaded_collection_is_noop_on_disk() {
        let (dir, store) = store();
        store.save_missions(&sample_missions()).unwrap();
        let before = std::fs::read_to_string(dir.path().join(MISSIONS_FILE)).unwrap();

        let loaded = store.load_missions().unwrap();
        store.save_missions(&loaded).unwrap();
        let after = std::fs::read_to_string(dir.path().join(MISSIONS_FILE)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_corrupt_document_surfaces_error() {
        let (dir, store) = store();
        std::fs::write(dir.path().join(MISSIONS_FILE), "{ not json").unwrap();
        match store.load_missions() {
            Err(StoreError::Corrupt { file, .. }) => assert_eq!(file, MISSIONS_FILE),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_corruption_not_default() {
        let (dir, store) = store();
        // A JSON object where an array is expected must not load as empty.
        std::fs::write(dir.path().join(SKILLS_FILE), "{}").unwrap();
        assert!(matches!(
            store.load_skills(),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let (dir, store) = store();
        store.save_missions(&sample_missions()).unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|x| x == "tmp").unwrap_or(false))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_documents_are_pretty_printed() {
        let (dir, store) = store();
        store.save_missions(&sample_missions()).unwrap();
        let content = std::fs::read_to_string(dir.path().join(MISSIONS_FILE)).unwrap();
        assert!(content.contains('\n'));
    }
}

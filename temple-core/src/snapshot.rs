//! Consolidated export/import of every entity collection.
//!
//! A snapshot is one JSON object with a named section per entity kind, each
//! in that kind's native document shape. Sections absent from a snapshot are
//! left untouched on import, so partial snapshots restore cleanly.

use crate::engine::Outcome;
use crate::store::{write_atomic, StoreError, TempleStore};
use crate::streaks::ProgressSettings;
use crate::world::{
    Artifact, Badge, Challenge, Mission, OracleTips, Profile, Quest, ReflectionLog, Skill,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// One portable document bundling every collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missions: Option<Vec<Mission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflections: Option<ReflectionLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<Challenge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<Badge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quests: Option<Vec<Quest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle: Option<OracleTips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProgressSettings>,
}

/// Read every collection and write one consolidated snapshot to `path`.
pub fn export_all(store: &TempleStore, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let snapshot = Snapshot {
        missions: Some(store.load_missions()?),
        skills: Some(store.load_skills()?),
        artifacts: Some(store.load_artifacts()?),
        reflections: Some(store.load_reflections()?),
        challenges: Some(store.load_challenges()?),
        profile: store.load_profile()?,
        badges: Some(store.load_badges()?),
        quests: Some(store.load_quests()?),
        lore: Some(store.load_lore()?),
        oracle: Some(store.load_oracle_tips()?),
        sandbox_lines: Some(store.load_sandbox_lines()?),
        settings: Some(store.load_settings()?),
    };

    let content = serde_json::to_string_pretty(&snapshot)?;
    write_atomic(path.as_ref(), &content)?;
    tracing::info!(path = %path.as_ref().display(), "snapshot exported");
    Ok(())
}

/// Restore collections from a snapshot; absent sections stay untouched.
///
/// A missing snapshot file is a reported no-op, not an error.
pub fn import_all(store: &TempleStore, path: impl AsRef<Path>) -> Result<Outcome, StoreError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(Outcome::unchanged(format!(
                "No snapshot found at {}.",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };
    let snapshot: Snapshot = serde_json::from_str(&content).map_err(|source| {
        StoreError::Corrupt {
            file: path.display().to_string(),
            source,
        }
    })?;

    let mut restored = 0usize;
    if let Some(missions) = &snapshot.missions {
        store.save_missions(missions)?;
        restored += 1;
    }
    if let Some(skills) = &snapshot.skills {
        store.save_skills(skills)?;
        restored += 1;
    }
    if let Some(artifacts) = &snapshot.artifacts {
        store.save_artifacts(artifacts)?;
        restored += 1;
    }
    if let Some(reflections) = &snapshot.reflections {
        store.save_reflections(reflections)?;
        restored += 1;
    }
    if let Some(challenges) = &snapshot.challenges {
        store.save_challenges(challenges)?;
        restored += 1;
    }
    if let Some(profile) = &snapshot.profile {
        store.save_profile(profile)?;
        restored += 1;
    }
    if let Some(badges) = &snapshot.badges {
        store.save_badges(badges)?;
        restored += 1;
    }
    if let Some(quests) = &snapshot.quests {
        store.save_quests(quests)?;
        restored += 1;
    }
    if let Some(lore) = &snapshot.lore {
        store.save_lore(lore)?;
        restored += 1;
    }
    if let Some(oracle) = &snapshot.oracle {
        store.save_oracle_tips(oracle)?;
        restored += 1;
    }
    if let Some(lines) = &snapshot.sandbox_lines {
        store.save_sandbox_lines(lines)?;
        restored += 1;
    }
    if let Some(settings) = &snapshot.settings {
        store.save_settings(settings)?;
        restored += 1;
    }

    if restored == 0 {
        return Ok(Outcome::unchanged("Snapshot contained no sections."));
    }
    tracing::info!(restored, "snapshot imported");
    Ok(Outcome::changed(format!(
        "Imported {restored} sections from {}.",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{sample_artifacts, sample_missions, sample_skills};
    use tempfile::TempDir;

    fn populated_store(dir: &TempDir) -> TempleStore {
        let store = TempleStore::new(dir.path());
        store.save_missions(&sample_missions()).unwrap();
        store.save_skills(&sample_skills()).unwrap();
        store.save_artifacts(&sample_artifacts()).unwrap();
        store.save_profile(&Profile::new("Lyra")).unwrap();

        let mut reflections = ReflectionLog::new();
        reflections.insert("2024-05-01".to_string(), "Saw a comet".to_string());
        store.save_reflections(&reflections).unwrap();
        store
    }

    #[test]
    fn test_export_import_round_trip() {
        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();
        let src = populated_store(&src_dir);
        let dst = TempleStore::new(dst_dir.path());

        let snapshot_path = src_dir.path().join("snapshot.json");
        export_all(&src, &snapshot_path).unwrap();
        let outcome = import_all(&dst, &snapshot_path).unwrap();
        assert!(outcome.changed);

        assert_eq!(dst.load_missions().unwrap(), src.load_missions().unwrap());
        assert_eq!(dst.load_skills().unwrap(), src.load_skills().unwrap());
        assert_eq!(dst.load_artifacts().unwrap(), src.load_artifacts().unwrap());
        assert_eq!(
            dst.load_reflections().unwrap(),
            src.load_reflections().unwrap()
        );
        assert_eq!(dst.load_profile().unwrap(), src.load_profile().unwrap());
        assert_eq!(dst.load_settings().unwrap(), src.load_settings().unwrap());
    }

    #[test]
    fn test_import_missing_snapshot_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = TempleStore::new(dir.path());
        let outcome = import_all(&store, dir.path().join("absent.json")).unwrap();
        assert!(!outcome.changed);
        assert!(store.load_missions().unwrap().is_empty());
    }

    #[test]
    fn test_partial_import_leaves_other_collections() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);
        let before_skills = store.load_skills().unwrap();

        let partial = Snapshot {
            missions: Some(Vec::new()),
            ..Default::default()
        };
        let path = dir.path().join("partial.json");
        fs::write(&path, serde_json::to_string_pretty(&partial).unwrap()).unwrap();

        let outcome = import_all(&store, &path).unwrap();
        assert!(outcome.changed);
        assert!(store.load_missions().unwrap().is_empty());
        assert_eq!(store.load_skills().unwrap(), before_skills);
    }

    #[test]
    fn test_corrupt_snapshot_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let store = TempleStore::new(dir.path());
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            import_all(&store, &path),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_empty_store_exports_without_profile_section() {
        let dir = TempDir::new().unwrap();
        let store = TempleStore::new(dir.path());
        let path = dir.path().join("snapshot.json");
        export_all(&store, &path).unwrap();

        let snapshot: Snapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(snapshot.profile.is_none());
        assert_eq!(snapshot.missions, Some(Vec::new()));
    }
}

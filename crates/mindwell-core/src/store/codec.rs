//! JSON document persistence.
//!
//! Two documents live under the data directory: `activity.json` (the
//! activity store) and `achievements.json` (the unlock map). Load never
//! propagates a parse failure: a corrupt document is logged and treated as
//! absent, so the process always starts with a usable store. Save clears
//! the dirty flag only on success, so a failed flush retries later.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ActivityStore;
use crate::achievements::AchievementState;
use crate::error::{Result, StorageError};

const ACTIVITY_FILE: &str = "activity.json";
const ACHIEVEMENTS_FILE: &str = "achievements.json";
const EXPORT_VERSION: &str = "2.0";

/// Returns `~/.config/mindwell[-dev]/` based on MINDWELL_ENV.
///
/// Set MINDWELL_ENV=dev to use the development data directory, or
/// MINDWELL_DATA_DIR to override the location wholesale.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MINDWELL_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDWELL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mindwell-dev")
    } else {
        base_dir.join("mindwell")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Superset document produced by export: the flattened store plus the
/// achievement map and export metadata. Re-importable without loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(flatten)]
    pub store: ActivityStore,
    pub export_date: DateTime<Utc>,
    pub version: String,
    pub achievements: AchievementState,
}

/// Load/save boundary for the two persisted documents.
#[derive(Debug, Clone)]
pub struct PersistenceCodec {
    dir: PathBuf,
}

impl PersistenceCodec {
    /// Codec rooted at the default data directory.
    pub fn new() -> Result<Self> {
        Ok(Self { dir: data_dir()? })
    }

    /// Codec rooted at an explicit directory (tests).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn activity_path(&self) -> PathBuf {
        self.dir.join(ACTIVITY_FILE)
    }

    fn achievements_path(&self) -> PathBuf {
        self.dir.join(ACHIEVEMENTS_FILE)
    }

    /// Load the activity store, falling back to the default empty store if
    /// the document is absent or unparseable. A fallback store starts
    /// dirty: it does not exist on disk yet.
    pub fn load_store(&self, today: NaiveDate) -> ActivityStore {
        match Self::load_document(&self.activity_path()) {
            Some(store) => store,
            None => {
                let mut store = ActivityStore::new(today);
                store.mark_dirty();
                store
            }
        }
    }

    /// Persist the activity store. The dirty flag is cleared only on
    /// success; a failure keeps the in-memory store intact and dirty so a
    /// later flush retries.
    pub fn save_store(&self, store: &mut ActivityStore) -> Result<()> {
        Self::save_document(&self.activity_path(), store)?;
        store.mark_clean();
        Ok(())
    }

    /// Load the achievement unlock map, falling back to all-locked.
    pub fn load_achievements(&self) -> AchievementState {
        Self::load_document(&self.achievements_path()).unwrap_or_default()
    }

    pub fn save_achievements(&self, state: &AchievementState) -> Result<()> {
        Self::save_document(&self.achievements_path(), state)
    }

    /// Produce the export superset document.
    pub fn export(
        &self,
        store: &ActivityStore,
        achievements: &AchievementState,
        now: DateTime<Utc>,
    ) -> ExportDocument {
        ExportDocument {
            store: store.clone(),
            export_date: now,
            version: EXPORT_VERSION.into(),
            achievements: achievements.clone(),
        }
    }

    /// Split an export document back into its two live objects and persist
    /// both.
    pub fn import(&self, doc: ExportDocument) -> Result<(ActivityStore, AchievementState)> {
        let mut store = doc.store;
        let achievements = doc.achievements;
        self.save_store(&mut store)?;
        self.save_achievements(&achievements)?;
        Ok((store, achievements))
    }

    /// Read an export document from an arbitrary path. Unlike [`load_store`],
    /// a malformed export file is an error: the user asked for this exact
    /// file, so silently substituting a default would lose their intent.
    ///
    /// [`load_store`]: Self::load_store
    pub fn read_export(path: &Path) -> Result<ExportDocument> {
        let content = std::fs::read_to_string(path).map_err(|source| StorageError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = serde_json::from_str(&content).map_err(|err| StorageError::ParseFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(doc)
    }

    /// Write an export document to an arbitrary path.
    pub fn write_export(path: &Path, doc: &ExportDocument) -> Result<()> {
        Self::save_document(path, doc)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read document, using default");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt document, using default");
                None
            }
        }
    }

    fn save_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let content =
            serde_json::to_string_pretty(value).map_err(|err| StorageError::SerializeFailed {
                document: path.display().to_string(),
                message: err.to_string(),
            })?;
        std::fs::write(path, content).map_err(|source| StorageError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ActivityRecord, MoodEntry};
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn load_absent_returns_default_store() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PersistenceCodec::with_dir(dir.path());
        let store = codec.load_store(today());
        assert!(store.moods.is_empty());
        assert_eq!(store.streak, 1);
        assert_eq!(store.last_visit, today());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PersistenceCodec::with_dir(dir.path());
        let mut store = ActivityStore::new(today());
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        store.append(ActivityRecord::Mood(
            MoodEntry::wheel(at, "Joy", "#FFD93D", 7, vec!["sun".into()], None).unwrap(),
        ));
        store.append(ActivityRecord::Mood(
            MoodEntry::scale(at, 4, vec![], Some("ok".into())).unwrap(),
        ));

        codec.save_store(&mut store).unwrap();
        assert!(!store.is_dirty());

        let loaded = codec.load_store(today());
        assert_eq!(loaded, store);
        assert_eq!(loaded.used_emotions.len(), 1);
        assert_eq!(loaded.used_mood_values.len(), 1);
    }

    #[test]
    fn corrupt_document_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ACTIVITY_FILE), "{not json!").unwrap();
        let codec = PersistenceCodec::with_dir(dir.path());
        let store = codec.load_store(today());
        assert!(store.moods.is_empty());
        assert_eq!(store.streak, 1);
    }

    #[test]
    fn dedup_sets_persist_as_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PersistenceCodec::with_dir(dir.path());
        let mut store = ActivityStore::new(today());
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        for value in [5u8, 2, 5] {
            store.append(ActivityRecord::Mood(
                MoodEntry::scale(at, value, vec![], None).unwrap(),
            ));
        }
        codec.save_store(&mut store).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(ACTIVITY_FILE)).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["usedMoodValues"], serde_json::json!([2, 5]));
    }
}

//! Flat-document journal store.
//!
//! The whole journal is one JSON file, read and replaced wholesale. A
//! missing, empty, or unparseable file is silently reinitialized to a
//! fresh default document and persisted immediately; after that, a fresh
//! install and a recovered corruption are indistinguishable by design.
//! Writes go through a temp file plus rename so a crash mid-write cannot
//! truncate the journal.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;

use super::migrations;
use crate::document::Document;
use crate::error::{Result, StorageError};

/// Handle to the journal file.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Open the store at the configured location.
    ///
    /// Resolution order: `DAYKEEPER_JOURNAL` env var, then the config
    /// file's `storage.journal_path`, then `journal.json` in the config
    /// directory.
    pub fn open() -> Result<Self> {
        if let Ok(path) = std::env::var("DAYKEEPER_JOURNAL") {
            return Ok(Self::at(path));
        }
        let config = super::Config::load()?;
        Ok(Self::at(config.journal_path()?))
    }

    /// Open a store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the journal, reinitializing it when absent or unreadable.
    ///
    /// `today` seeds `last_task_date` in a freshly created document.
    pub fn load(&self, today: NaiveDate) -> Result<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return self.initialize(today);
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };

        if raw.trim().is_empty() {
            return self.initialize(today);
        }

        let mut value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "journal is not valid JSON; reinitializing"
                );
                return self.initialize(today);
            }
        };

        let applied = migrations::migrate(&mut value)?;

        match serde_json::from_value::<Document>(value) {
            Ok(doc) => {
                if applied > 0 {
                    self.save(&doc)?;
                }
                Ok(doc)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "journal has an unreadable shape; reinitializing"
                );
                self.initialize(today)
            }
        }
    }

    /// Whole-document overwrite.
    pub fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(doc).map_err(StorageError::Encode)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    fn initialize(&self, today: NaiveDate) -> Result<Document> {
        let doc = Document::fresh(today);
        self.save(&doc)?;
        tracing::info!(path = %self.path.display(), "initialized fresh journal");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Plan, PlanTask};
    use crate::error::CoreError;
    use chrono::{TimeZone, Utc};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn temp_store(dir: &tempfile::TempDir) -> DocumentStore {
        DocumentStore::at(dir.path().join("journal.json"))
    }

    #[test]
    fn missing_journal_is_initialized_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let doc = store.load(date("2025-01-01")).unwrap();
        assert_eq!(doc.analytics.last_task_date, Some(date("2025-01-01")));
        assert!(store.path().exists());

        // Second load returns the persisted default, not a new one.
        let again = store.load(date("2025-06-01")).unwrap();
        assert_eq!(again.analytics.last_task_date, Some(date("2025-01-01")));
    }

    #[test]
    fn corrupt_journal_is_reinitialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let doc = store.load(date("2025-01-05")).unwrap();
        assert!(doc.plan.is_empty());
        assert_eq!(doc.analytics.dedication_percentage, 0.7);

        // The recovered default was written back.
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
    }

    #[test]
    fn empty_journal_is_reinitialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        fs::write(store.path(), "  \n").unwrap();

        let doc = store.load(date("2025-01-05")).unwrap();
        assert_eq!(doc.analytics.last_task_date, Some(date("2025-01-05")));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        let mut doc = Document::fresh(date("2025-01-01"));
        doc.plan.insert(
            date("2025-01-02"),
            Plan {
                tasks: vec![PlanTask::new("Read chapter 4", 1.5)],
                context: "steady".to_string(),
                energy_level: "high".to_string(),
                total_time: 1.5,
                created_at: Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
            },
        );
        doc.long_term_tasks = serde_json::json!({"thesis": {"status": "drafting"}});
        store.save(&doc).unwrap();

        let loaded = store.load(date("2025-01-02")).unwrap();
        assert_eq!(doc, loaded);
    }

    #[test]
    fn legacy_journal_is_migrated_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        fs::write(
            store.path(),
            r#"{"plan": {}, "reports": {}, "long_term_tasks": {},
                "analytics": {"semester_phase": "N/A", "summary": "old"}}"#,
        )
        .unwrap();

        let doc = store.load(date("2025-01-05")).unwrap();
        assert_eq!(doc.analytics.semester_phase, None);
        assert_eq!(doc.version, crate::document::DOCUMENT_VERSION);

        // The upgraded form was persisted.
        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], crate::document::DOCUMENT_VERSION);
    }

    #[test]
    fn future_journal_surfaces_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        fs::write(store.path(), r#"{"version": 99}"#).unwrap();

        let err = store.load(date("2025-01-05")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::FutureVersion { .. })
        ));
    }
}

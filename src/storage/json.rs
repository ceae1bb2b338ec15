//! JSON file-based storage backend.
//!
//! This module provides a human-readable storage implementation using JSON
//! serialization. Writes go to a temporary file that is then renamed over the
//! store, so a crash never leaves a half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 2,
//!   "next_id": 3,
//!   "words": {
//!     "1": {
//!       "id": 1,
//!       "primary_word": "Book",
//!       "word_meaning": "A written work",
//!       "secondary_word": "Kitab",
//!       "secondary_word_pronunciation": "Ki-taab",
//!       "is_favorite": false
//!     }
//!   }
//! }
//! ```
//!
//! # Migrations
//!
//! Version 1 files predate the favorite flag and the persisted identifier
//! allocator. They load with every word un-starred and `next_id` derived from
//! the highest stored id, and are rewritten as version 2 immediately.

use crate::domain::error::{Result, WordBridgeError};
use crate::domain::WordId;
use crate::storage::backend::Storage;
use crate::storage::models::{WordRecord, WordTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
pub const CURRENT_VERSION: u32 = 2;

/// JSON storage container format, as read from disk.
///
/// Mirrors [`WordTable`] field by field; the table itself stays free of
/// format concerns such as the version tag.
#[derive(Debug, Clone, Deserialize)]
struct StorageData {
    /// Version of the storage format. Missing in version 1 files.
    #[serde(default = "legacy_version")]
    version: u32,

    /// Next identifier to assign. Missing in version 1 files.
    #[serde(default)]
    next_id: i64,

    /// Stored words indexed by id.
    #[serde(default)]
    words: BTreeMap<i64, WordRecord>,
}

const fn legacy_version() -> u32 {
    1
}

/// Borrowed form of [`StorageData`] used when writing.
#[derive(Serialize)]
struct StorageSnapshot<'a> {
    version: u32,
    next_id: i64,
    words: &'a BTreeMap<i64, WordRecord>,
}

impl StorageData {
    fn into_parts(self) -> (u32, WordTable) {
        let table = WordTable {
            next_id: self.next_id,
            words: self.words,
        };
        (self.version, table)
    }
}

/// JSON file storage backend.
///
/// The whole table is kept in memory and persisted after every modification.
/// A modification is staged on a copy of the table and only replaces the
/// in-memory copy once the file write succeeded, so memory never holds a row
/// the file does not.
///
/// This type is `Send` but not `Sync`; it is owned by a single storage worker.
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Format version of the loaded file.
    version: u32,

    /// In-memory copy of the stored words, identical to the file contents.
    table: WordTable,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// Parent directories are created automatically. Older file versions are
    /// migrated and saved before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - A migrated file cannot be written back
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let exists = file_path.exists();
        let (version, table) = if exists {
            Self::load_from_file(&file_path)?.into_parts()
        } else {
            tracing::debug!("initializing new empty storage");
            (CURRENT_VERSION, WordTable::default())
        };

        let mut storage = Self {
            file_path,
            version,
            table,
        };
        storage.migrate(!exists)?;

        tracing::debug!(
            word_count = storage.table.words.len(),
            next_id = storage.table.next_id,
            "storage initialized"
        );

        Ok(storage)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| WordBridgeError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            words = data.words.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Brings older file versions up to [`CURRENT_VERSION`] and writes the file
    /// if anything changed (or `force` is set).
    fn migrate(&mut self, force: bool) -> Result<()> {
        let mut changed = force;

        if self.version > CURRENT_VERSION {
            return Err(WordBridgeError::Storage(format!(
                "unsupported store version {} (newest known is {CURRENT_VERSION})",
                self.version
            )));
        }

        if self.version < CURRENT_VERSION {
            tracing::info!(
                from = self.version,
                to = CURRENT_VERSION,
                "migrating word store"
            );
            self.version = CURRENT_VERSION;
            changed = true;
        }

        changed |= self.table.normalize();

        if changed {
            self.save_to_file(&self.table)?;
        } else {
            tracing::trace!("skipping save, no changes");
        }
        Ok(())
    }

    /// Writes `table` to disk using an atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename fails.
    fn save_to_file(&self, table: &WordTable) -> Result<()> {
        let json = serde_json::to_string_pretty(&StorageSnapshot {
            version: self.version,
            next_id: table.next_id,
            words: &table.words,
        })?;
        let tmp_path = self.file_path.with_extension("tmp");

        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                tracing::warn!(error = %cleanup, "failed to remove temporary store file");
            }
            return Err(e.into());
        }

        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }

    /// Applies `change` to a copy of the table and keeps it only if it was saved.
    fn commit<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut WordTable) -> Result<T>,
    {
        let mut staged = self.table.clone();
        let value = change(&mut staged)?;
        self.save_to_file(&staged)?;
        self.table = staged;
        Ok(value)
    }
}

impl Storage for JsonStorage {
    fn upsert_word(&mut self, record: WordRecord) -> Result<WordRecord> {
        let _span = tracing::debug_span!("json_upsert_word",
            word_id = record.id,
            primary_word = %record.primary_word
        ).entered();

        let stored = self.commit(|table| table.upsert(record))?;

        tracing::debug!(word_id = stored.id, "word stored");
        Ok(stored)
    }

    fn delete_word(&mut self, id: WordId) -> Result<WordRecord> {
        let _span = tracing::debug_span!("json_delete_word", word_id = %id).entered();

        let removed = self.commit(|table| table.remove(id))?;

        tracing::debug!("word deleted");
        Ok(removed)
    }

    fn get_all_words(&self) -> Result<Vec<WordRecord>> {
        let words: Vec<WordRecord> = self.table.records().cloned().collect();
        tracing::trace!(count = words.len(), "retrieved words");
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Word;

    fn book() -> WordRecord {
        WordRecord::from(Word::new("Book", "A written work", "Kitab", "Ki-taab"))
    }

    fn record(primary: &str) -> WordRecord {
        WordRecord::from(Word::new(primary, "", "x", ""))
    }

    fn find(storage: &JsonStorage, id: i64) -> Option<WordRecord> {
        storage.get_all_words().unwrap().into_iter().find(|r| r.id == id)
    }

    fn primaries(storage: &JsonStorage) -> Vec<String> {
        storage
            .get_all_words()
            .unwrap()
            .into_iter()
            .map(|r| r.primary_word)
            .collect()
    }

    #[test]
    fn words_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("words.json");

        let id = {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.upsert_word(book()).unwrap().id
        };

        let storage = JsonStorage::new(path).unwrap();
        let stored = find(&storage, id).unwrap();
        assert_eq!(stored.secondary_word, "Kitab");
        assert_eq!(storage.get_all_words().unwrap().len(), 1);
    }

    #[test]
    fn delete_missing_word_fails_and_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let mut storage = JsonStorage::new(path).unwrap();
        storage.upsert_word(book()).unwrap();

        assert!(matches!(
            storage.delete_word(WordId::new(99)),
            Err(WordBridgeError::NotFound(_))
        ));
        assert_eq!(storage.get_all_words().unwrap().len(), 1);
    }

    #[test]
    fn failed_write_leaves_table_and_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let blocker = dir.path().join("words.tmp");
        let mut storage = JsonStorage::new(path.clone()).unwrap();
        let book = storage.upsert_word(book()).unwrap();

        std::fs::create_dir(&blocker).unwrap();
        assert!(matches!(
            storage.upsert_word(record("Ghost")),
            Err(WordBridgeError::Io(_))
        ));
        assert!(matches!(
            storage.delete_word(WordId::new(book.id)),
            Err(WordBridgeError::Io(_))
        ));
        assert_eq!(primaries(&storage), ["Book"]);
        std::fs::remove_dir(&blocker).unwrap();

        let water = storage.upsert_word(record("Water")).unwrap();
        assert_eq!(water.id, book.id + 1);
        assert_eq!(primaries(&storage), ["Book", "Water"]);

        drop(storage);
        let reopened = JsonStorage::new(path).unwrap();
        assert_eq!(primaries(&reopened), ["Book", "Water"]);
    }

    #[test]
    fn version_one_file_is_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(
            &path,
            r#"{
                "words": {
                    "4": {"id": 4, "primary_word": "Book", "word_meaning": "", "secondary_word": "Kitab", "secondary_word_pronunciation": ""}
                }
            }"#,
        )
        .unwrap();

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        let word = find(&storage, 4).unwrap();
        assert!(!word.is_favorite);

        let next = storage.upsert_word(book()).unwrap();
        assert_eq!(next.id, 5);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 2);
        assert_eq!(raw["words"]["4"]["is_favorite"], false);
    }

    #[test]
    fn newer_versions_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"{"version": 9, "next_id": 1, "words": {}}"#).unwrap();
        assert!(JsonStorage::new(path).is_err());
    }
}

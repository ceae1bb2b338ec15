//! Process-local storage backend.
//!
//! Keeps the word table in memory only. Used for ephemeral sessions
//! (`storage = "memory"`) and in tests that do not care about the file format.

use crate::domain::error::Result;
use crate::domain::WordId;
use crate::storage::backend::Storage;
use crate::storage::models::{WordRecord, WordTable};

/// In-memory storage backend. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    table: WordTable,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`, assigning ids where needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a record carries an invalid identifier.
    pub fn with_records(records: impl IntoIterator<Item = WordRecord>) -> Result<Self> {
        let mut storage = Self::new();
        for record in records {
            storage.table.upsert(record)?;
        }
        Ok(storage)
    }
}

impl Storage for MemoryStorage {
    fn upsert_word(&mut self, record: WordRecord) -> Result<WordRecord> {
        self.table.upsert(record)
    }

    fn delete_word(&mut self, id: WordId) -> Result<WordRecord> {
        self.table.remove(id)
    }

    fn get_all_words(&self) -> Result<Vec<WordRecord>> {
        Ok(self.table.records().cloned().collect())
    }
}

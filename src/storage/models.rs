//! Storage record models for the persistence layer.
//!
//! [`WordRecord`] is the on-disk shape of a word and [`WordTable`] the in-memory
//! table every backend keeps. Records stay separate from the domain [`Word`] so
//! the file format can evolve (see the favorite flag added in version 2) without
//! touching business logic.

use crate::domain::error::{Result, WordBridgeError};
use crate::domain::{Word, WordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a word row in storage.
///
/// Rows written before the favorite flag existed deserialize with
/// `is_favorite == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Store-assigned identifier, `0` before insertion.
    pub id: i64,

    /// Primary-language text.
    pub primary_word: String,

    /// Meaning, empty when not provided.
    #[serde(default)]
    pub word_meaning: String,

    /// Secondary-language text.
    pub secondary_word: String,

    /// Pronunciation hint, empty when not provided.
    #[serde(default)]
    pub secondary_word_pronunciation: String,

    /// Favorite flag; absent in version 1 files.
    #[serde(default)]
    pub is_favorite: bool,
}

impl From<Word> for WordRecord {
    fn from(word: Word) -> Self {
        Self {
            id: word.id.get(),
            primary_word: word.primary_word,
            word_meaning: word.word_meaning,
            secondary_word: word.secondary_word,
            secondary_word_pronunciation: word.secondary_word_pronunciation,
            is_favorite: word.is_favorite,
        }
    }
}

impl From<WordRecord> for Word {
    fn from(record: WordRecord) -> Self {
        Self {
            id: WordId::new(record.id),
            primary_word: record.primary_word,
            word_meaning: record.word_meaning,
            secondary_word: record.secondary_word,
            secondary_word_pronunciation: record.secondary_word_pronunciation,
            is_favorite: record.is_favorite,
        }
    }
}

/// Rows keyed by identifier plus the identifier allocator.
///
/// Identifiers are handed out monotonically and never reused, even after the
/// highest row is deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTable {
    /// Next identifier to assign; always greater than every stored id.
    pub next_id: i64,

    /// Stored rows indexed by id.
    pub words: BTreeMap<i64, WordRecord>,
}

impl WordTable {
    /// Repairs `next_id` so it is positive and above every stored identifier.
    ///
    /// A row at `i64::MAX` pins the allocator there; [`upsert`](Self::upsert)
    /// then refuses to hand out identifiers.
    ///
    /// Returns `true` if the allocator had to move.
    pub fn normalize(&mut self) -> bool {
        let floor = self
            .words
            .keys()
            .next_back()
            .map_or(1, |max| max.checked_add(1).unwrap_or(i64::MAX))
            .max(1);
        if self.next_id < floor {
            self.next_id = floor;
            true
        } else {
            false
        }
    }

    /// Inserts or replaces a row, assigning an identifier to unsaved records.
    ///
    /// # Errors
    ///
    /// Returns [`WordBridgeError::Validation`] for negative identifiers and
    /// [`WordBridgeError::Storage`] once every identifier has been handed out.
    pub fn upsert(&mut self, mut record: WordRecord) -> Result<WordRecord> {
        if record.id < 0 {
            return Err(WordBridgeError::Validation(format!(
                "invalid word identifier: {}",
                record.id
            )));
        }

        self.normalize();

        if record.id == 0 {
            if self.words.contains_key(&self.next_id) {
                return Err(WordBridgeError::Storage("identifier space exhausted".to_string()));
            }
            record.id = self.next_id;
        }
        if let Some(next) = record.id.checked_add(1) {
            self.next_id = self.next_id.max(next);
        }
        self.words.insert(record.id, record.clone());

        Ok(record)
    }

    /// Removes and returns the row with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WordBridgeError::NotFound`] when no such row exists.
    pub fn remove(&mut self, id: WordId) -> Result<WordRecord> {
        self.words
            .remove(&id.get())
            .ok_or(WordBridgeError::NotFound(id))
    }

    /// All rows in identifier order.
    pub fn records(&self) -> impl Iterator<Item = &WordRecord> {
        self.words.values()
    }
}

//! Word domain model.
//!
//! A [`Word`] is one vocabulary entry pairing a primary-language text with its
//! secondary-language translation, an optional meaning and an optional
//! pronunciation hint. Identifiers are assigned by the store; [`WordId::UNSAVED`]
//! marks a word that has not been persisted yet.

use crate::domain::error::{Result, WordBridgeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a word.
///
/// Zero is reserved as the "not yet persisted" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(i64);

impl WordId {
    /// Identifier of a word that has not been stored yet.
    pub const UNSAVED: Self = Self(0);

    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` for the [`WordId::UNSAVED`] sentinel.
    #[must_use]
    pub const fn is_unsaved(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// One vocabulary entry.
///
/// # Fields
///
/// - `id`: store identifier, [`WordId::UNSAVED`] until inserted
/// - `primary_word`: text in the learner's primary language (required)
/// - `word_meaning`: free-form explanation (optional, may be empty)
/// - `secondary_word`: translation in the secondary language (required)
/// - `secondary_word_pronunciation`: pronunciation hint (optional, may be empty)
/// - `is_favorite`: starred by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub primary_word: String,
    pub word_meaning: String,
    pub secondary_word: String,
    pub secondary_word_pronunciation: String,
    pub is_favorite: bool,
}

impl Word {
    /// Creates an unsaved, non-favorite word.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbridge::domain::Word;
    ///
    /// let word = Word::new("Book", "A written work", "Kitab", "Ki-taab");
    /// assert!(word.id.is_unsaved());
    /// assert!(!word.is_favorite);
    /// ```
    pub fn new(
        primary_word: impl Into<String>,
        word_meaning: impl Into<String>,
        secondary_word: impl Into<String>,
        secondary_word_pronunciation: impl Into<String>,
    ) -> Self {
        Self {
            id: WordId::UNSAVED,
            primary_word: primary_word.into(),
            word_meaning: word_meaning.into(),
            secondary_word: secondary_word.into(),
            secondary_word_pronunciation: secondary_word_pronunciation.into(),
            is_favorite: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: WordId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Checks the invariants a word must satisfy before it can be saved.
    ///
    /// Primary and secondary text must contain something other than whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`WordBridgeError::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.primary_word.trim().is_empty() {
            return Err(WordBridgeError::Validation("primary word is required".to_string()));
        }
        if self.secondary_word.trim().is_empty() {
            return Err(WordBridgeError::Validation("secondary word is required".to_string()));
        }
        Ok(())
    }

    /// Sort key used by listing screens: lowercased primary text.
    #[must_use]
    pub fn sort_key(&self) -> String {
        self.primary_word.to_lowercase()
    }

    /// Case-insensitive substring match against primary, secondary and meaning text.
    ///
    /// `needle` must already be lowercased. An empty needle matches every word.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.primary_word.to_lowercase().contains(needle)
            || self.secondary_word.to_lowercase().contains(needle)
            || self.word_meaning.to_lowercase().contains(needle)
    }
}

//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over persistence
//! backends. The trait is synchronous and deliberately small: the storage worker
//! owns exactly one backend and serializes every call, so implementations need
//! no internal locking.

use crate::domain::error::Result;
use crate::domain::WordId;
use crate::storage::models::WordRecord;

/// Abstraction over persistent word storage.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local, nothing persisted
///
/// # Examples
///
/// ```no_run
/// use wordbridge::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/words.json"))?;
/// let words = storage.get_all_words()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Inserts a record or replaces the record with the same identifier.
    ///
    /// Records with id `0` receive a fresh identifier. Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is invalid or the write fails.
    fn upsert_word(&mut self, record: WordRecord) -> Result<WordRecord>;

    /// Removes the record with `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](crate::domain::WordBridgeError::NotFound) if no
    /// record has that identifier, or an error if the write fails.
    fn delete_word(&mut self, id: WordId) -> Result<WordRecord>;

    /// Retrieves all records in identifier order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_all_words(&self) -> Result<Vec<WordRecord>>;
}

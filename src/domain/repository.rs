//! Repository abstraction consumed by screen sessions.
//!
//! Sessions never talk to storage directly. They hold an `Arc<dyn WordRepository>`
//! and issue asynchronous writes whose results come back as
//! [`OperationOutcome`]s, while reads are continuous [`WordFeed`]s.

use crate::domain::feed::WordFeed;
use crate::domain::outcome::OperationOutcome;
use crate::domain::word::{Word, WordId};
use futures_util::future::BoxFuture;

/// Asynchronous access to the persisted word list.
///
/// Write futures are `'static` so a session can move them onto spawned tasks.
/// Implementations must never fail past this boundary: every error becomes an
/// [`OperationOutcome::Failed`].
///
/// # Implementations
///
/// - [`StoreRepository`](crate::worker::StoreRepository): worker task over a
///   [`Storage`](crate::storage::Storage) backend
pub trait WordRepository: Send + Sync {
    /// Inserts `word`, or replaces the stored word with the same identifier.
    ///
    /// A word with [`WordId::UNSAVED`] receives a fresh identifier; the returned
    /// outcome carries the word as stored.
    fn insert(&self, word: Word) -> BoxFuture<'static, OperationOutcome>;

    /// Removes the stored word with `word.id`.
    ///
    /// Fails when no stored word has that identifier.
    fn delete(&self, word: Word) -> BoxFuture<'static, OperationOutcome>;

    /// Every stored word, unordered, re-emitted after each change.
    fn observe_all(&self) -> WordFeed<Vec<Word>>;

    /// Stored favorites, re-emitted after each change.
    fn observe_favorites(&self) -> WordFeed<Vec<Word>>;

    /// A single stored word; `None` while it does not exist.
    fn observe_by_id(&self, id: WordId) -> WordFeed<Option<Word>>;
}

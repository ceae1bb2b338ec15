//! Continuously-updated projections of the stored word list.
//!
//! The storage worker publishes the full word list on a `tokio::sync::watch`
//! channel after every successful write. A [`WordFeed`] wraps one receiver of that
//! channel together with a projection (all words, favorites only, one word by id),
//! so every subscriber re-evaluates its own view on each change.

use crate::domain::word::{Word, WordId};
use futures_util::stream::{self, BoxStream, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

type Projection<T> = Arc<dyn Fn(&[Word]) -> T + Send + Sync>;

/// A continuous stream of `T` derived from the current word list.
///
/// Feeds can be polled synchronously with [`WordFeed::current`], awaited with
/// [`WordFeed::changed`], or converted into a `futures_util` stream that yields
/// the current value first and then one value per store change.
pub struct WordFeed<T> {
    rx: watch::Receiver<Vec<Word>>,
    project: Projection<T>,
}

impl<T> Clone for WordFeed<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            project: Arc::clone(&self.project),
        }
    }
}

impl<T> fmt::Debug for WordFeed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordFeed")
            .field("words", &self.rx.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> WordFeed<T> {
    pub fn new<F>(rx: watch::Receiver<Vec<Word>>, project: F) -> Self
    where
        F: Fn(&[Word]) -> T + Send + Sync + 'static,
    {
        Self {
            rx,
            project: Arc::new(project),
        }
    }

    /// Evaluates the projection against the latest published list.
    #[must_use]
    pub fn current(&self) -> T {
        let words = self.rx.borrow();
        (self.project)(&words)
    }

    /// Returns `true` if the store published a list this feed has not consumed yet.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Evaluates the projection and marks the latest list as consumed.
    pub fn latest(&mut self) -> T {
        let words = self.rx.borrow_and_update();
        (self.project)(&words)
    }

    /// Waits for the next published list and returns its projection.
    ///
    /// Returns `None` once the store has shut down.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.latest())
    }

    /// Converts the feed into a stream: current value first, then one per change.
    pub fn into_stream(self) -> BoxStream<'static, T> {
        stream::unfold((self, true), |(mut feed, first)| async move {
            let value = if first {
                feed.latest()
            } else {
                feed.changed().await?
            };
            Some((value, (feed, false)))
        })
        .boxed()
    }
}

impl WordFeed<Vec<Word>> {
    /// Every stored word.
    #[must_use]
    pub fn all(rx: watch::Receiver<Vec<Word>>) -> Self {
        Self::new(rx, <[Word]>::to_vec)
    }

    /// Stored words with `is_favorite == true`.
    #[must_use]
    pub fn favorites(rx: watch::Receiver<Vec<Word>>) -> Self {
        Self::new(rx, |words| {
            words.iter().filter(|w| w.is_favorite).cloned().collect()
        })
    }
}

impl WordFeed<Option<Word>> {
    /// The word with identifier `id`, or `None` while it does not exist.
    #[must_use]
    pub fn by_id(rx: watch::Receiver<Vec<Word>>, id: WordId) -> Self {
        Self::new(rx, move |words| words.iter().find(|w| w.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Word> {
        vec![
            Word::new("Book", "", "Kitab", "").with_id(WordId::new(1)),
            Word::new("Water", "", "Pani", "")
                .with_id(WordId::new(2))
                .with_favorite(true),
        ]
    }

    #[test]
    fn projections_filter_the_published_list() {
        let (_tx, rx) = watch::channel(sample());

        assert_eq!(WordFeed::all(rx.clone()).current().len(), 2);

        let favorites = WordFeed::favorites(rx.clone()).current();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].primary_word, "Water");

        let one = WordFeed::by_id(rx.clone(), WordId::new(1)).current();
        assert_eq!(one.map(|w| w.primary_word), Some("Book".to_string()));
        assert!(WordFeed::by_id(rx, WordId::new(9)).current().is_none());
    }

    #[tokio::test]
    async fn changed_yields_new_projection_and_ends_with_sender() {
        let (tx, rx) = watch::channel(sample());
        let mut feed = WordFeed::favorites(rx);

        tx.send_modify(|words| words[0].is_favorite = true);
        assert!(feed.has_changed());
        assert_eq!(feed.changed().await.map(|w| w.len()), Some(2));
        assert!(!feed.has_changed());

        drop(tx);
        assert!(feed.changed().await.is_none());
    }

    #[tokio::test]
    async fn stream_starts_with_current_value() {
        let (tx, rx) = watch::channel(sample());
        let mut stream = WordFeed::all(rx).into_stream();

        assert_eq!(stream.next().await.map(|w| w.len()), Some(2));
        tx.send_modify(Vec::clear);
        assert_eq!(stream.next().await.map(|w| w.len()), Some(0));
        drop(tx);
        assert!(stream.next().await.is_none());
    }
}

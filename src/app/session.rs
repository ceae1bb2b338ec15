//! Screen session runtime.
//!
//! A [`Session`] is the single owner of one listing screen's [`ScreenState`].
//! It feeds actions through [`handle_action`], runs the resulting store writes
//! on tasks bound to its own lifetime, and keeps the state in step with the
//! store's word feed.
//!
//! # Lifecycle
//!
//! 1. Created from a shared [`WordRepository`]; takes the current snapshot
//! 2. `dispatch` returns immediately; each write yields a [`PendingOutcome`]
//! 3. `sync` or `next_update` applies new snapshots and finished outcomes
//! 4. Dropping the session aborts writes that have not completed
//!
//! Writes already accepted by the store are not rolled back when their task is
//! aborted.

use crate::app::actions::Action;
use crate::app::effects::{Dispatch, Effect};
use crate::app::handler::handle_action;
use crate::app::modes::ListView;
use crate::app::navigation::Route;
use crate::app::state::ScreenState;
use crate::domain::error::{Result, WordBridgeError};
use crate::domain::{OperationOutcome, Word, WordFeed, WordId, WordRepository};
use crate::ui::UIViewModel;
use futures_util::future::{BoxFuture, FutureExt};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::Instrument;

/// Continuation of a dispatched store write.
///
/// Await it to get the write's [`OperationOutcome`]. If the session is dropped
/// before the write completes, it resolves to a failed outcome.
#[derive(Debug)]
pub struct PendingOutcome {
    receiver: oneshot::Receiver<OperationOutcome>,
    cancelled: OperationOutcome,
}

impl PendingOutcome {
    fn ready(outcome: OperationOutcome) -> Self {
        let (reply, receiver) = oneshot::channel();
        let cancelled = outcome.clone();
        let _ = reply.send(outcome);
        Self { receiver, cancelled }
    }
}

impl IntoFuture for PendingOutcome {
    type Output = OperationOutcome;
    type IntoFuture = BoxFuture<'static, OperationOutcome>;

    fn into_future(self) -> Self::IntoFuture {
        async move { self.receiver.await.unwrap_or(self.cancelled) }.boxed()
    }
}

/// What `dispatch` did.
#[derive(Debug, Default)]
pub struct Dispatched {
    /// Whether visible state changed synchronously.
    pub rerender: bool,

    /// One continuation per store write or reported outcome, in issue order.
    pub pending: Vec<PendingOutcome>,
}

/// Change observed by [`Session::next_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The store published a new list; `changed` tells if anything visible moved.
    Words { changed: bool },

    /// A write finished.
    Outcome(OperationOutcome),
}

/// Owner of one listing screen's state.
pub struct Session {
    repository: Arc<dyn WordRepository>,
    state: ScreenState,
    feed: WordFeed<Vec<Word>>,
    tasks: JoinSet<()>,
    outcomes_tx: mpsc::UnboundedSender<OperationOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<OperationOutcome>,
    last_outcome: Option<OperationOutcome>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("in_flight", &self.tasks.len())
            .field("last_outcome", &self.last_outcome)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Opens a session over the full word list.
    #[must_use]
    pub fn new(repository: Arc<dyn WordRepository>) -> Self {
        Self::with_view(repository, ListView::All)
    }

    /// Opens a session showing `view`.
    #[must_use]
    pub fn with_view(repository: Arc<dyn WordRepository>, view: ListView) -> Self {
        let mut feed = repository.observe_all();
        let state = ScreenState::with_view(feed.latest(), view);
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        tracing::debug!(word_count = state.words.len(), list_view = ?view, "session opened");

        Self {
            repository,
            state,
            feed,
            tasks: JoinSet::new(),
            outcomes_tx,
            outcomes_rx,
            last_outcome: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Shared repository this session writes to.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn WordRepository> {
        &self.repository
    }

    /// Handles `action` and starts any store writes it requires.
    ///
    /// Never waits for the store. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is malformed or no runtime is available to
    /// run store writes. State changes made before the error are kept.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<Dispatched> {
        let action = action.into();
        let synced = self.sync();

        let Dispatch { rerender, effects } = handle_action(&mut self.state, &action)?;

        let mut pending = Vec::with_capacity(effects.len());
        for effect in effects {
            pending.push(self.execute(effect)?);
        }

        Ok(Dispatched {
            rerender: rerender || synced,
            pending,
        })
    }

    fn execute(&mut self, effect: Effect) -> Result<PendingOutcome> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| WordBridgeError::Worker(format!("no async runtime: {e}")))?;

        let (attempted, write, operation) = match effect {
            Effect::Upsert(word) => (word.clone(), self.repository.insert(word), "upsert"),
            Effect::Delete(word) => (word.clone(), self.repository.delete(word), "delete"),
            Effect::Report(outcome) => {
                let _ = self.outcomes_tx.send(outcome.clone());
                return Ok(PendingOutcome::ready(outcome));
            }
        };

        self.last_outcome = Some(OperationOutcome::ongoing());

        let (reply, receiver) = oneshot::channel();
        let outcomes = self.outcomes_tx.clone();
        let span = tracing::debug_span!("session_write", operation = operation, id = %attempted.id);

        self.tasks.spawn_on(
            async move {
                let outcome = write.await;
                tracing::debug!(success = outcome.is_success(), "store write finished");
                let _ = outcomes.send(outcome.clone());
                let _ = reply.send(outcome);
            }
            .instrument(span),
            &runtime,
        );

        Ok(PendingOutcome {
            receiver,
            cancelled: OperationOutcome::failed(attempted, "Error: session closed"),
        })
    }

    /// Applies a newer snapshot and finished outcomes without waiting.
    ///
    /// Returns `true` if anything visible changed.
    pub fn sync(&mut self) -> bool {
        let mut rerender = false;

        if self.feed.has_changed() {
            let words = self.feed.latest();
            rerender |= self.state.set_words(words);
        }

        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.record(outcome);
            rerender = true;
        }

        self.reap();
        rerender
    }

    /// Waits for the next snapshot or finished outcome and applies it.
    ///
    /// Returns `None` once the store has shut down.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        enum Next {
            Words(Option<Vec<Word>>),
            Outcome(OperationOutcome),
        }

        let next = tokio::select! {
            words = self.feed.changed() => Next::Words(words),
            Some(outcome) = self.outcomes_rx.recv() => Next::Outcome(outcome),
        };

        self.reap();
        match next {
            Next::Words(words) => {
                let changed = self.state.set_words(words?);
                Some(SessionUpdate::Words { changed })
            }
            Next::Outcome(outcome) => {
                self.record(outcome.clone());
                Some(SessionUpdate::Outcome(outcome))
            }
        }
    }

    /// Waits until every write started by this session has finished, then syncs.
    pub async fn settle(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            Self::log_join_error(result);
        }
        self.sync();
    }

    fn record(&mut self, outcome: OperationOutcome) {
        match &outcome {
            OperationOutcome::Failed { message, .. } => tracing::warn!(message = %message, "operation failed"),
            other => tracing::debug!(message = ?other.message(), "operation finished"),
        }
        self.last_outcome = Some(outcome);
    }

    fn reap(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            Self::log_join_error(result);
        }
    }

    fn log_join_error(result: std::result::Result<(), tokio::task::JoinError>) {
        if let Err(e) = result {
            if e.is_panic() {
                tracing::error!(error = %e, "store write task panicked");
            }
        }
    }

    /// Latest outcome, consumed once by the presentation layer.
    ///
    /// [`OperationOutcome::Ongoing`] while a write is in flight.
    pub fn take_outcome(&mut self) -> Option<OperationOutcome> {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.record(outcome);
        }
        self.last_outcome.take()
    }

    /// Pending navigation route, consumed once.
    pub fn take_route(&mut self) -> Option<Route> {
        self.state.navigation.take()
    }

    #[must_use]
    pub fn viewmodel(&self) -> UIViewModel {
        self.state.compute_viewmodel()
    }

    #[must_use]
    pub fn is_selection_active(&self) -> bool {
        self.state.is_selection_active()
    }

    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    pub fn select_all(&mut self, words: &[Word]) {
        self.state.select_all(words);
    }

    pub fn toggle_expand_collapse(&mut self, id: WordId) {
        self.state.toggle_expand_collapse(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DomainAction, UiAction};
    use crate::storage::MemoryStorage;
    use crate::worker::StoreRepository;

    fn session() -> Session {
        let repository = StoreRepository::spawn(Box::new(MemoryStorage::new())).unwrap();
        Session::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn insert_outcome_arrives_after_snapshot() {
        let mut session = session();
        let dispatched = session
            .dispatch(DomainAction::InsertWord(Word::new("Book", "", "Kitab", "")))
            .unwrap();
        assert_eq!(session.last_outcome, Some(OperationOutcome::ongoing()));

        let [pending] = <[PendingOutcome; 1]>::try_from(dispatched.pending).unwrap();
        let outcome = pending.await;
        assert!(outcome.is_success());

        assert!(session.sync());
        assert_eq!(session.state().words.len(), 1);
        assert_eq!(session.take_outcome(), Some(outcome));
        assert_eq!(session.take_outcome(), None);
    }

    #[tokio::test]
    async fn reported_outcome_resolves_immediately() {
        let mut session = session();
        let dispatched = session
            .dispatch(DomainAction::ToggleFavouriteWord {
                id: WordId::new(7),
                is_favorite: true,
            })
            .unwrap();

        let outcome = dispatched.pending.into_iter().next().unwrap().await;
        assert!(outcome.is_failed());
        assert!(matches!(session.next_update().await, Some(SessionUpdate::Outcome(_))));
    }

    #[tokio::test]
    async fn navigation_is_consumed_once() {
        let mut session = session();
        let word = Word::new("Book", "", "Kitab", "").with_id(WordId::new(3));
        session
            .dispatch(UiAction::NavigateToScreen {
                route: None,
                word: Some(word),
            })
            .unwrap();

        assert_eq!(session.take_route(), Some(Route::WordUpdate(WordId::new(3))));
        assert_eq!(session.take_route(), None);
    }

    #[test]
    fn write_without_runtime_is_an_error() {
        let repository = StoreRepository::spawn(Box::new(MemoryStorage::new())).unwrap();
        let mut session = Session::new(Arc::new(repository));
        let result = session.dispatch(DomainAction::InsertWord(Word::new("a", "", "b", "")));
        assert!(matches!(result, Err(WordBridgeError::Worker(_))));
    }
}

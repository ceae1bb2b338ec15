//! Storage worker owning the backend and publishing the word list.
//!
//! The worker runs on its own named thread. It processes one request at a time,
//! so writes are applied in the order they were issued, and after every write it
//! publishes the complete word list on a `watch` channel that all feeds read.

use crate::domain::error::{Result, WordBridgeError};
use crate::domain::Word;
use crate::storage::backend::Storage;
use crate::storage::models::WordRecord;
use crate::worker::{WorkerMessage, WorkerRequest, WorkerResponse};
use tokio::sync::{mpsc, watch};

/// Name of the worker thread, visible in debuggers and panic messages.
pub const WORKER_THREAD_NAME: &str = "wordbridge-store";

/// Worker state for handling storage operations.
pub struct WordWorker {
    storage: Box<dyn Storage>,
    publisher: watch::Sender<Vec<Word>>,
}

impl std::fmt::Debug for WordWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordWorker")
            .field("published", &self.publisher.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WordWorker {
    /// Creates a worker and the receiver its word list is published on.
    ///
    /// The current contents of `storage` are published immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial read from storage fails.
    pub fn new(storage: Box<dyn Storage>) -> Result<(Self, watch::Receiver<Vec<Word>>)> {
        let words = Self::read_words(storage.as_ref())?;
        tracing::debug!(word_count = words.len(), "storage worker created");
        let (publisher, receiver) = watch::channel(words);
        Ok((Self { storage, publisher }, receiver))
    }

    fn read_words(storage: &dyn Storage) -> Result<Vec<Word>> {
        Ok(storage
            .get_all_words()?
            .into_iter()
            .map(Word::from)
            .collect())
    }

    /// Re-reads storage and replaces the published list.
    ///
    /// Runs after a write that already persisted, so a failed read is logged
    /// and the previous list stays published.
    fn publish(&self) {
        match Self::read_words(self.storage.as_ref()) {
            Ok(words) => {
                let count = words.len();
                self.publisher.send_replace(words);
                tracing::trace!(word_count = count, "word list published");
            }
            Err(e) => tracing::error!(error = %e, "failed to publish word list after write"),
        }
    }

    /// Standardizes failure reporting across operations.
    ///
    /// Rejections (validation, missing rows) read `"{rejected}: {reason}"`;
    /// everything else reads `"Error: {cause}"`.
    fn handle_db_result<T, F>(operation: &str, rejected: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                let message = match e {
                    WordBridgeError::Validation(reason) => format!("{rejected}: {reason}"),
                    WordBridgeError::NotFound(id) => format!("{rejected}: no word with id {id}"),
                    other => format!("Error: {other}"),
                };
                WorkerResponse::Error { message }
            }
        }
    }

    fn handle_upsert(&mut self, word: Word) -> WorkerResponse {
        let result = word
            .validate()
            .and_then(|()| self.storage.upsert_word(WordRecord::from(word)));
        if result.is_ok() {
            self.publish();
        }

        Self::handle_db_result("upsert word", "Insertion failed", result, |stored| {
            WorkerResponse::Upserted {
                word: Word::from(stored),
            }
        })
    }

    fn handle_delete(&mut self, word: &Word) -> WorkerResponse {
        let result = self.storage.delete_word(word.id);
        if result.is_ok() {
            self.publish();
        }

        Self::handle_db_result("delete word", "Deletion failed", result, |removed| {
            WorkerResponse::Deleted {
                word: Word::from(removed),
            }
        })
    }

    /// Attaches the caller's trace context to the worker thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::Upsert { word, .. } => self.handle_upsert(word),
            WorkerMessage::Delete { word, .. } => self.handle_delete(&word),
        }
    }

    /// Serves requests until every sender is dropped.
    ///
    /// Must run outside the async runtime; it blocks on the request channel.
    pub fn run(mut self, mut requests: mpsc::UnboundedReceiver<WorkerRequest>) {
        tracing::debug!("storage worker started");
        while let Some(WorkerRequest { message, reply }) = requests.blocking_recv() {
            let response = self.handle_message(message);
            if reply.send(response).is_err() {
                tracing::debug!("caller went away before the response was delivered");
            }
        }
        tracing::debug!("storage worker stopped");
    }
}

//! [`WordRepository`] implementation backed by the storage worker.

use crate::domain::error::{Result, WordBridgeError};
use crate::domain::{OperationOutcome, Word, WordFeed, WordId, WordRepository};
use crate::storage::{JsonStorage, MemoryStorage, Storage};
use crate::worker::handler::{WordWorker, WORKER_THREAD_NAME};
use crate::worker::{WorkerMessage, WorkerRequest, WorkerResponse};
use crate::{Config, StorageKind};
use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::{mpsc, oneshot, watch};

/// Handle to a running storage worker.
///
/// Cloning is cheap; all clones talk to the same worker. The worker thread exits
/// once the last handle is dropped.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    requests: mpsc::UnboundedSender<WorkerRequest>,
    words: watch::Receiver<Vec<Word>>,
}

impl StoreRepository {
    /// Starts a worker thread that owns `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial read fails or the thread cannot be spawned.
    pub fn spawn(storage: Box<dyn Storage>) -> Result<Self> {
        let (worker, words) = WordWorker::new(storage)?;
        let (requests, receiver) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker.run(receiver))?;

        Ok(Self { requests, words })
    }

    /// Opens the backend selected by `config` and starts a worker over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be created, read or migrated.
    pub fn open(config: &Config) -> Result<Self> {
        let storage: Box<dyn Storage> = match config.storage {
            StorageKind::Json => {
                let path = config.store_path();
                tracing::info!(path = %path.display(), "opening json word store");
                Box::new(JsonStorage::new(path)?)
            }
            StorageKind::Memory => {
                tracing::info!("opening in-memory word store");
                Box::new(MemoryStorage::new())
            }
        };
        Self::spawn(storage)
    }

    fn send(
        requests: &mpsc::UnboundedSender<WorkerRequest>,
        message: WorkerMessage,
    ) -> Result<oneshot::Receiver<WorkerResponse>> {
        let (reply, response) = oneshot::channel();
        requests
            .send(WorkerRequest { message, reply })
            .map_err(|_| WordBridgeError::Worker("worker stopped".to_string()))?;
        Ok(response)
    }

    /// Queues `message` now and returns a future resolving to the outcome.
    ///
    /// Queuing happens before the future is polled, so writes reach the worker in
    /// the order they were issued.
    fn submit<F>(&self, attempted: Word, message: WorkerMessage, describe: F) -> BoxFuture<'static, OperationOutcome>
    where
        F: FnOnce(&Word) -> String + Send + 'static,
    {
        let queued = Self::send(&self.requests, message);
        async move {
            let response = match queued {
                Ok(response) => response
                    .await
                    .map_err(|_| WordBridgeError::Worker("worker stopped".to_string())),
                Err(e) => Err(e),
            };

            match response {
                Ok(WorkerResponse::Upserted { word } | WorkerResponse::Deleted { word }) => {
                    let message = describe(&word);
                    OperationOutcome::Success {
                        word,
                        message: Some(message),
                    }
                }
                Ok(WorkerResponse::Error { message }) => OperationOutcome::failed(attempted, message),
                Err(e) => OperationOutcome::failed(attempted, format!("Error: {e}")),
            }
        }
        .boxed()
    }
}

impl WordRepository for StoreRepository {
    fn insert(&self, word: Word) -> BoxFuture<'static, OperationOutcome> {
        tracing::debug!(id = %word.id, primary = %word.primary_word, "queueing upsert");
        let message = WorkerMessage::upsert(word.clone());
        self.submit(word, message, |stored| {
            format!("\"{}\" word inserted successfully", stored.primary_word)
        })
    }

    fn delete(&self, word: Word) -> BoxFuture<'static, OperationOutcome> {
        tracing::debug!(id = %word.id, primary = %word.primary_word, "queueing delete");
        let message = WorkerMessage::delete(word.clone());
        self.submit(word, message, |removed| {
            format!("\"{}\" word deleted successfully", removed.primary_word)
        })
    }

    fn observe_all(&self) -> WordFeed<Vec<Word>> {
        WordFeed::all(self.words.clone())
    }

    fn observe_favorites(&self) -> WordFeed<Vec<Word>> {
        WordFeed::favorites(self.words.clone())
    }

    fn observe_by_id(&self, id: WordId) -> WordFeed<Option<Word>> {
        WordFeed::by_id(self.words.clone(), id)
    }
}

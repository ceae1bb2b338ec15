//! Error types for WordBridge.
//!
//! This module defines the centralized error type [`WordBridgeError`] and a type alias
//! [`Result`] used by the storage, worker and application layers. Errors never cross
//! the repository boundary: the worker turns them into failed
//! [`OperationOutcome`](crate::domain::OperationOutcome)s before they reach a session.

use crate::domain::word::WordId;
use thiserror::Error;

/// The main error type for WordBridge operations.
///
/// Most variants carry a human-readable description. I/O and JSON errors are
/// wrapped with `#[from]` so storage code can use `?` directly.
///
/// # Examples
///
/// ```
/// use wordbridge::domain::{WordBridgeError, WordId};
///
/// let err = WordBridgeError::NotFound(WordId::new(7));
/// assert_eq!(err.to_string(), "Word not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum WordBridgeError {
    /// Storage operation failed.
    ///
    /// Occurs when the backend cannot read, write or interpret its data.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A word violates the save invariants (missing primary or secondary text).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The targeted word does not exist in the store.
    #[error("Word not found: {0}")]
    NotFound(WordId),

    /// Communication with the storage worker failed.
    ///
    /// Occurs when the worker task has stopped or dropped a reply channel.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for WordBridge operations.
pub type Result<T> = std::result::Result<T, WordBridgeError>;

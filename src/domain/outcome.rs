//! Results of mutating store operations.

use crate::domain::word::Word;
use serde::{Deserialize, Serialize};

/// Default message carried by [`OperationOutcome::Ongoing`].
pub const ONGOING_MESSAGE: &str = "Processing...";

/// Tagged result of an insert, update or delete.
///
/// Outcomes drive transient user-facing notifications and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationOutcome {
    /// The store accepted the write.
    Success {
        /// The affected word, with its store-assigned identifier.
        word: Word,
        /// Optional confirmation text.
        message: Option<String>,
    },

    /// The write was rejected or could not be performed.
    Failed {
        /// The word the caller attempted to write.
        word: Word,
        /// Human-readable reason.
        message: String,
    },

    /// The write has been handed off and has not completed yet.
    Ongoing {
        /// Progress text.
        message: String,
    },
}

impl OperationOutcome {
    #[must_use]
    pub fn ongoing() -> Self {
        Self::Ongoing {
            message: ONGOING_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn failed(word: Word, message: impl Into<String>) -> Self {
        Self::Failed {
            word,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Word payload, absent for [`OperationOutcome::Ongoing`].
    #[must_use]
    pub fn word(&self) -> Option<&Word> {
        match self {
            Self::Success { word, .. } | Self::Failed { word, .. } => Some(word),
            Self::Ongoing { .. } => None,
        }
    }

    /// Text to show in a transient notification, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failed { message, .. } | Self::Ongoing { message } => Some(message),
        }
    }
}

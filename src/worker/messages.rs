//! Request and response protocol of the storage worker.
//!
//! Sessions talk to the worker thread through [`WorkerMessage`]s and receive one
//! [`WorkerResponse`] per message. Every message carries the caller's trace
//! context so spans recorded on the worker thread join the caller's trace.

use crate::domain::Word;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is always the
    /// case when no OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    upsert(Upsert { word: Word }),
    delete(Delete { word: Word }),
}

/// Messages sent from sessions to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Insert the word, or replace the stored word with the same id.
    Upsert {
        word: Word,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove the stored word with `word.id`.
    Delete {
        word: Word,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Upsert { trace_context, .. } | Self::Delete { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The word was stored; carries the stored form with its identifier.
    Upserted { word: Word },

    /// The word was removed; carries the removed row.
    Deleted { word: Word },

    /// The operation failed.
    Error {
        /// Human-readable reason, ready for display.
        message: String,
    },
}

/// A message paired with the channel its response goes to.
#[derive(Debug)]
pub struct WorkerRequest {
    pub message: WorkerMessage,
    pub reply: oneshot::Sender<WorkerResponse>,
}

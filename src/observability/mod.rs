//! OpenTelemetry-based observability with file-based trace export.
//!
//! Every layer logs through `tracing` macros. When [`init_tracing`] has been
//! called, spans flow into OpenTelemetry and are appended as OTLP JSON to a
//! rotating file in the data directory:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans recorded on the storage worker thread join the caller's trace through
//! the context carried by each worker message.
//!
//! # Modules
//!
//! - `init`: Subscriber setup driven by [`Config`](crate::Config)
//! - [`exporter`]: OTLP JSON span exporter and tracer provider
//! - [`rotating`]: Size-based rotating line writer

pub mod exporter;
mod init;
pub mod rotating;

pub use exporter::{create_tracer_provider, FileSpanExporter};
pub use init::init_tracing;
pub use rotating::RotatingFileWriter;

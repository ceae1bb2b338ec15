//! Tracing initialization and subscriber setup.

use super::exporter::{create_tracer_provider, SCOPE_NAME};
use super::rotating::RotatingFileWriter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber with rotating OTLP file export.
///
/// The filter comes from `config.trace_level` only; `RUST_LOG` is not read.
/// Directives that fail to parse fall back to `info`. Spans are written to
/// `config.trace_path()`.
///
/// Returns `false` when nothing was installed: the trace directory could not be
/// created, or a global subscriber already exists. Observability is optional, so
/// neither case is an error, and calling this more than once is harmless.
///
/// # Example
///
/// ```rust
/// use wordbridge::observability::init_tracing;
/// use wordbridge::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     trace_level: "debug".to_string(),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let trace_path = config.trace_path();
    if let Some(parent) = trace_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SCOPE_NAME)]);
    let writer = RotatingFileWriter::new(trace_path, config.trace_max_bytes, config.trace_backups);
    let provider = create_tracer_provider(writer, resource);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(level = %config.trace_level, "tracing initialized");
    }
    installed
}

//! WordBridge: the core of a personal bilingual vocabulary list.
//!
//! WordBridge keeps words with their meanings, translations and pronunciations,
//! and drives the screens that list them:
//! - Persistent word store with schema migration and atomic writes
//! - Asynchronous writes and continuously-updated list feeds
//! - Selection & dispatch state machine for listing screens
//! - Search, favorites view and render-ready view models
//! - Add/update form validation and single-slot navigation

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host UI (out of scope)                             │  ← Renders view models
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Action handling                                  │
//! │  - Session runtime                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Storage Layer │
//! │ (ui/)         │   │ (worker/)     │   │ (storage/)    │
//! │ - View models │   │ - Store thread│   │ - JSON I/O    │
//! │               │   │ - Repository  │   │ - Migrations  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Word model, outcomes, feeds, errors (domain/)    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, rotating OTLP file export │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Actions, screen state, dispatch handler, form and session
//! - [`domain`]: Core domain types (Word, outcomes, feeds, errors)
//! - [`infrastructure`]: Data directory resolution
//! - [`storage`]: JSON and in-memory persistence
//! - [`worker`]: Storage worker thread and repository handle
//! - [`ui`]: Render-ready view models
//! - [`observability`]: Tracing setup and file export
//!
//! # Configuration
//!
//! ```toml
//! # wordbridge.toml
//! data_dir = "~/.local/share/wordbridge"
//! storage = "json"
//! store_file = "words.json"
//! trace_level = "debug"
//! trace_max_bytes = 1048576
//! trace_backups = 3
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wordbridge::app::{DomainAction, Session, UiAction};
//! use wordbridge::domain::Word;
//! use wordbridge::{initialize, Config, StorageKind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> wordbridge::Result<()> {
//! let dir = tempfile::tempdir().unwrap();
//! let config = Config {
//!     data_dir: dir.path().to_path_buf(),
//!     storage: StorageKind::Memory,
//!     ..Config::default()
//! };
//! let repository = initialize(&config)?;
//! let mut session = Session::new(Arc::new(repository));
//!
//! for pending in session.dispatch(DomainAction::InsertWord(Word::new("Book", "", "Kitab", "Ki-taab")))?.pending {
//!     println!("{:?}", pending.await.message());
//! }
//! session.sync();
//!
//! let book = session.state().words[0].clone();
//! session.dispatch(UiAction::LongPress(book))?;
//! assert!(session.is_selection_active());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_action, Action, DomainAction, ListView, Route, ScreenState, Session, UiAction};
pub use domain::{OperationOutcome, Result, Word, WordBridgeError, WordId, WordRepository};
pub use worker::StoreRepository;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// JSON file in the data directory.
    #[default]
    Json,

    /// Process-local; nothing is persisted.
    Memory,
}

impl FromStr for StorageKind {
    type Err = WordBridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            other => Err(WordBridgeError::Config(format!("unknown storage backend: {other}"))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Runtime configuration.
///
/// Built from defaults, a TOML file ([`Config::from_file`]) or a string map
/// ([`Config::from_map`]). Invalid values fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the store and trace files.
    ///
    /// Default: `$WORDBRIDGE_DATA_DIR`, else `$HOME/.local/share/wordbridge`.
    pub data_dir: PathBuf,

    /// Storage backend. Default: `json`
    pub storage: StorageKind,

    /// Store file name, relative to `data_dir`. Default: `"words.json"`
    pub store_file: String,

    /// Tracing filter directives. Default: `"info"`
    pub trace_level: String,

    /// Trace file name, relative to `data_dir`. Default: `"wordbridge-otlp.json"`
    pub trace_file: String,

    /// Trace file size that triggers rotation. Default: 10 MiB
    pub trace_max_bytes: u64,

    /// Rotated trace files to keep. Default: 3
    pub trace_backups: usize,
}

const DEFAULT_STORE_FILE: &str = "words.json";
const DEFAULT_TRACE_LEVEL: &str = "info";
const DEFAULT_TRACE_FILE: &str = "wordbridge-otlp.json";

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::get_data_dir(),
            storage: StorageKind::default(),
            store_file: DEFAULT_STORE_FILE.to_string(),
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
            trace_file: DEFAULT_TRACE_FILE.to_string(),
            trace_max_bytes: observability::rotating::DEFAULT_MAX_BYTES,
            trace_backups: observability::rotating::DEFAULT_BACKUPS,
        }
    }
}

impl Config {
    /// Parses configuration from a string key map.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: leading `~` expands to `$HOME`
    /// - `storage`: `json` or `memory`
    /// - `store_file`, `trace_file`, `trace_level`: non-empty strings
    /// - `trace_max_bytes`, `trace_backups`: unsigned integers
    ///
    /// Missing or invalid values keep their defaults. Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use wordbridge::{Config, StorageKind};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("storage".to_string(), "memory".to_string());
    /// map.insert("trace_backups".to_string(), "five".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.storage, StorageKind::Memory);
    /// assert_eq!(config.trace_backups, 3);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();

        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        if let Some(dir) = text("data_dir") {
            config.data_dir = infrastructure::expand_tilde(&dir, std::env::var("HOME").ok().as_deref());
        }
        if let Some(storage) = text("storage") {
            match storage.parse() {
                Ok(kind) => config.storage = kind,
                Err(e) => tracing::debug!(error = %e, "invalid storage value, using default"),
            }
        }
        if let Some(file) = text("store_file") {
            config.store_file = file;
        }
        if let Some(level) = text("trace_level") {
            config.trace_level = level;
        }
        if let Some(file) = text("trace_file") {
            config.trace_file = file;
        }
        if let Some(bytes) = text("trace_max_bytes").and_then(|v| v.parse::<u64>().ok()) {
            config.trace_max_bytes = bytes;
        }
        if let Some(backups) = text("trace_backups").and_then(|v| v.parse::<usize>().ok()) {
            config.trace_backups = backups;
        }

        config
    }

    /// Loads configuration from a TOML file of top-level keys.
    ///
    /// Values follow the rules of [`Config::from_map`]; integers and booleans are
    /// accepted in their TOML form.
    ///
    /// # Errors
    ///
    /// Returns [`WordBridgeError::Config`] if the file cannot be read or is not
    /// valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WordBridgeError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WordBridgeError::Config`] if `contents` is not valid TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| WordBridgeError::Config(e.to_string()))?;

        let map: BTreeMap<String, String> = table
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Ok(Self::from_map(&map))
    }

    /// Full path of the JSON store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    /// Full path of the trace file.
    #[must_use]
    pub fn trace_path(&self) -> PathBuf {
        self.data_dir.join(&self.trace_file)
    }
}

/// Initializes tracing and opens the configured word store.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or its worker cannot start.
///
/// # Example
///
/// ```rust
/// use wordbridge::{initialize, Config};
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     ..Config::default()
/// };
///
/// let repository = initialize(&config)?;
/// assert!(config.store_path().exists());
/// # Ok::<(), wordbridge::WordBridgeError>(())
/// ```
pub fn initialize(config: &Config) -> Result<StoreRepository> {
    observability::init_tracing(config);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        storage = %config.storage,
        "initializing wordbridge"
    );
    StoreRepository::open(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_values_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            data_dir = "/var/lib/wordbridge"
            storage = "memory"
            trace_max_bytes = 2048
            trace_backups = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/wordbridge"));
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.trace_max_bytes, 2048);
        assert_eq!(config.trace_backups, 1);
        assert_eq!(config.store_path(), PathBuf::from("/var/lib/wordbridge/words.json"));
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_toml_str(
            r#"
            storage = "sqlite"
            trace_max_bytes = -5
            store_file = ""
            "#,
        )
        .unwrap();

        assert_eq!(config.storage, StorageKind::Json);
        assert_eq!(config.trace_max_bytes, observability::rotating::DEFAULT_MAX_BYTES);
        assert_eq!(config.store_file, "words.json");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml_str("storage = ").unwrap_err();
        assert!(matches!(err, WordBridgeError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, WordBridgeError::Config(_)));
    }
}

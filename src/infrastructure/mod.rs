//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where WordBridge keeps its files. Nothing here touches
//! the store format; it only decides locations.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_data_dir, DATA_DIR_ENV};

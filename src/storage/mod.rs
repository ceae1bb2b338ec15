//! Storage layer for persistent word data.
//!
//! This module provides the synchronous storage abstraction used by the storage
//! worker, a JSON file backend with schema migration and an in-memory backend.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: Process-local storage implementation
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use models::{WordRecord, WordTable};

//! Domain layer for WordBridge.
//!
//! This module contains the core vocabulary types, independent of storage format,
//! async runtime wiring or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`word`]: Word model, identifiers and save invariants
//! - [`outcome`]: Tagged results of mutating store operations
//! - [`feed`]: Continuous projections of the stored word list
//! - [`repository`]: Asynchronous repository trait consumed by sessions
//!
//! # Examples
//!
//! ```
//! use wordbridge::domain::{Result, Word};
//!
//! fn draft() -> Result<Word> {
//!     let word = Word::new("Book", "", "Kitab", "Ki-taab");
//!     word.validate()?;
//!     Ok(word)
//! }
//! # assert!(draft().is_ok());
//! ```

pub mod error;
pub mod feed;
pub mod outcome;
pub mod repository;
pub mod word;

pub use error::{Result, WordBridgeError};
pub use feed::WordFeed;
pub use outcome::OperationOutcome;
pub use repository::WordRepository;
pub use word::{Word, WordId};

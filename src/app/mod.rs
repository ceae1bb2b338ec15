//! Application layer coordinating screen state, actions, and store writes.
//!
//! This module sits between the presentation layer and the domain/worker layers.
//! It implements the selection & dispatch state machine of the listing screens.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Gesture → Action → handle_action → State Mutations → Effects → Session tasks
//!                         ↑                                            ↓
//!                         └────────────── Word feed snapshots ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: UI gestures and domain actions
//! - [`effects`]: Side effect commands emitted by the handler
//! - [`handler`]: Pure action processing
//! - [`modes`]: List view selection
//! - [`navigation`]: Routes and the pending-route slot
//! - [`state`]: Screen state container and view model computation
//! - [`form`]: Add/update word form
//! - [`session`]: Runtime owning a screen state and executing effects
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wordbridge::app::{DomainAction, Session};
//! use wordbridge::domain::Word;
//! use wordbridge::storage::MemoryStorage;
//! use wordbridge::worker::StoreRepository;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> wordbridge::Result<()> {
//! let repository = StoreRepository::spawn(Box::new(MemoryStorage::new()))?;
//! let mut session = Session::new(Arc::new(repository));
//!
//! let dispatched = session.dispatch(DomainAction::InsertWord(Word::new("Book", "", "Kitab", "")))?;
//! for pending in dispatched.pending {
//!     assert!(pending.await.is_success());
//! }
//! session.sync();
//! assert_eq!(session.state().words.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod effects;
pub mod form;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod session;
pub mod state;

pub use actions::{Action, DomainAction, UiAction};
pub use effects::{Dispatch, Effect};
pub use form::{ValidationMessage, WordForm};
pub use handler::handle_action;
pub use modes::ListView;
pub use navigation::{NavigationSlot, Route};
pub use session::{Dispatched, PendingOutcome, Session, SessionUpdate};
pub use state::ScreenState;

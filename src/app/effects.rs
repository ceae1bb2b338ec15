//! Side effects produced by the action handler.
//!
//! [`handle_action`](crate::app::handle_action) never touches the repository
//! itself. It returns [`Effect`]s and the [`Session`](crate::app::Session)
//! executes them on spawned tasks, which keeps the handler synchronous and easy
//! to test.

use crate::domain::{OperationOutcome, Word};

/// Commands executed by the session after an action was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Insert or replace the word in the store.
    Upsert(Word),

    /// Remove the word from the store.
    Delete(Word),

    /// Deliver an outcome that was decided without touching the store.
    Report(OperationOutcome),
}

/// Result of handling one action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Whether visible screen state changed.
    pub rerender: bool,

    /// Effects to execute, in order.
    pub effects: Vec<Effect>,
}

impl Dispatch {
    /// Nothing changed and nothing to do.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Local state changed; no effects.
    #[must_use]
    pub fn render() -> Self {
        Self {
            rerender: true,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn effects(effects: Vec<Effect>) -> Self {
        Self {
            rerender: false,
            effects,
        }
    }

    #[must_use]
    pub fn with_rerender(mut self, rerender: bool) -> Self {
        self.rerender |= rerender;
        self
    }
}

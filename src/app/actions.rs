//! Actions dispatched to a screen session.
//!
//! Two disjoint families live behind [`Action`]:
//!
//! - [`UiAction`]: gestures on list rows and screen chrome
//! - [`DomainAction`]: requests to change the stored word list
//!
//! Both convert into [`Action`] with `From`, so [`Session::dispatch`](crate::app::Session::dispatch)
//! accepts either family directly.
//!
//! # Example
//!
//! ```rust
//! use wordbridge::app::{Action, DomainAction, UiAction};
//! use wordbridge::domain::{Word, WordId};
//!
//! let word = Word::new("Book", "", "Kitab", "").with_id(WordId::new(1));
//! let actions: Vec<Action> = vec![
//!     UiAction::LongPress(word.clone()).into(),
//!     DomainAction::DeleteWord(word).into(),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::app::modes::ListView;
use crate::app::navigation::Route;
use crate::domain::{Word, WordId};

/// Gestures and screen commands coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Tap on a row.
    ///
    /// Toggles selection while selection mode is active, otherwise toggles the
    /// row's expanded state.
    Click(Word),

    /// Double tap on a row; flips the word's favorite flag.
    DoubleClick(Word),

    /// Long press on a row; adds it to the selection.
    LongPress(Word),

    /// Swipe gestures are reserved and currently have no effect.
    SwipeLeft(Word),
    SwipeRight(Word),

    /// Toggles the expanded state of a row regardless of selection mode.
    ToggleExpandCollapse(WordId),

    /// Requests navigation.
    ///
    /// A word payload opens the update screen for that word and wins over `route`.
    NavigateToScreen {
        route: Option<Route>,
        word: Option<Word>,
    },

    /// Leaves selection mode.
    ClearSelection,

    /// Selects every visible row.
    SelectAll,

    /// Replaces the search query.
    Search(String),

    /// Switches between the full list and favorites.
    ShowView(ListView),
}

/// Requests that modify the stored word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainAction {
    InsertWord(Word),
    DeleteWord(Word),
    UpdateWord(Word),

    /// Sets the favorite flag of the word with `id` in the current snapshot.
    ToggleFavouriteWord {
        id: WordId,
        is_favorite: bool,
    },

    /// Deletes every selected word, then clears the selection.
    DeleteSelected,

    /// Sets the favorite flag on every selected word, then clears the selection.
    SetFavoriteSelected(bool),
}

/// Any action a session can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Ui(UiAction),
    Domain(DomainAction),
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Self::Ui(action)
    }
}

impl From<DomainAction> for Action {
    fn from(action: DomainAction) -> Self {
        Self::Domain(action)
    }
}

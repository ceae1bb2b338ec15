//! View mode of a listing screen.
//!
//! A single screen state serves both the word list and the favorites screen;
//! [`ListView`] decides which base set is shown before search filtering.

use serde::{Deserialize, Serialize};

/// Which words a listing screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListView {
    /// Every stored word. Header displays "Words".
    #[default]
    All,

    /// Only words marked as favorite. Header displays "Favorites".
    Favorites,
}

impl ListView {
    /// Header title of the view.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "Words",
            Self::Favorites => "Favorites",
        }
    }
}

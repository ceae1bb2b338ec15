//! View model types representing renderable listing state.
//!
//! View models are immutable snapshots computed from
//! [`ScreenState::compute_viewmodel`](crate::app::ScreenState::compute_viewmodel).
//! They contain no business logic, only display-ready data, so any presentation
//! layer can draw them without knowing about selection rules or stores.
//!
//! # Example
//!
//! ```rust
//! use wordbridge::app::ScreenState;
//! use wordbridge::domain::{Word, WordId};
//! use wordbridge::ui::HeaderInfo;
//!
//! let state = ScreenState::new(vec![Word::new("Book", "", "Kitab", "").with_id(WordId::new(1))]);
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.rows.len(), 1);
//! assert!(matches!(vm.header, HeaderInfo::Default { count: 1, .. }));
//! ```

use crate::domain::WordId;

/// Complete view model of a listing screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Visible rows, sorted alphabetically by primary text.
    pub rows: Vec<WordRow>,

    /// Header chrome; switches to selection chrome while words are selected.
    pub header: HeaderInfo,

    /// Message shown instead of rows when nothing is visible.
    pub empty_state: Option<EmptyState>,

    pub search_bar: SearchBarInfo,

    /// Swipe gestures are suppressed during selection mode.
    pub swipe_enabled: bool,
}

/// Display information for a single word row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRow {
    pub id: WordId,
    pub primary_word: String,
    pub secondary_word: String,

    /// Meaning, shown when the row is expanded.
    pub word_meaning: String,

    /// Pronunciation hint, shown when the row is expanded.
    pub secondary_word_pronunciation: String,

    pub is_favorite: bool,
    pub is_expanded: bool,
    pub is_selected: bool,

    /// Character ranges of `primary_word` matched by the search query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices, end exclusive.
    pub primary_highlights: Vec<(usize, usize)>,

    /// Character ranges of `secondary_word` matched by the search query.
    pub secondary_highlights: Vec<(usize, usize)>,
}

/// Header chrome of a listing screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInfo {
    /// Regular header: view title and number of visible words.
    Default { title: String, count: usize },

    /// Selection mode: number of selected words and bulk actions.
    Selection { title: String, selected: usize },
}

impl HeaderInfo {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Default { title, .. } | Self::Selection { title, .. } => title,
        }
    }
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No words yet").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    pub placeholder: String,
}

//! Screen state management and view model computation.
//!
//! This module defines [`ScreenState`], the state owned by one listing screen
//! session: the latest word snapshot, the selection and expand/collapse sets, the
//! search query and view, and the pending navigation route. It is the single
//! source of truth for everything the listing screen shows.
//!
//! # State Components
//!
//! - **Words**: Latest snapshot published by the store, sorted alphabetically
//! - **Filtered Words**: Subset after applying the list view and search query
//! - **Selection**: Words marked for bulk actions; non-empty means selection mode
//! - **Expanded**: Rows showing their details, independent of selection
//! - **Navigation**: Single pending route for the presentation layer
//!
//! Identifiers that disappear from a new snapshot are purged from both the
//! selection and the expanded set, so neither ever refers to a missing word.
//!
//! # Example
//!
//! ```rust
//! use wordbridge::app::ScreenState;
//! use wordbridge::domain::{Word, WordId};
//!
//! let mut state = ScreenState::new(vec![
//!     Word::new("Book", "", "Kitab", "").with_id(WordId::new(1)),
//! ]);
//! state.select(WordId::new(1));
//! assert!(state.is_selection_active());
//!
//! state.set_words(vec![]);
//! assert!(!state.is_selection_active());
//! ```

use super::modes::ListView;
use super::navigation::NavigationSlot;
use crate::domain::{Word, WordId};
use crate::ui::viewmodel::{EmptyState, HeaderInfo, SearchBarInfo, UIViewModel, WordRow};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeSet;

/// State of one listing screen session.
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    /// Latest snapshot from the store, sorted by lowercased primary text then id.
    pub words: Vec<Word>,

    /// Words matching the current view and search query.
    ///
    /// Recomputed by `apply_search_filter()` after state changes.
    pub filtered_words: Vec<Word>,

    /// Selected identifiers. Non-empty means selection mode.
    pub selection: BTreeSet<WordId>,

    /// Identifiers of expanded rows.
    pub expanded: BTreeSet<WordId>,

    /// Pending navigation request.
    pub navigation: NavigationSlot,

    /// Current search query string.
    pub search_query: String,

    /// Base set of words shown before search filtering.
    pub list_view: ListView,
}

impl ScreenState {
    /// Creates a state for the full word list with an initial snapshot.
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        let mut state = Self::default();
        state.set_words(words);
        state
    }

    /// Creates a state showing `view`.
    #[must_use]
    pub fn with_view(words: Vec<Word>, view: ListView) -> Self {
        let mut state = Self {
            list_view: view,
            ..Self::default()
        };
        state.set_words(words);
        state
    }

    /// Replaces the snapshot, purging selection and expanded ids no longer present.
    ///
    /// Returns `true` if the visible list or either id set changed.
    pub fn set_words(&mut self, mut words: Vec<Word>) -> bool {
        words.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then(a.id.cmp(&b.id)));

        let old_filtered = std::mem::take(&mut self.filtered_words);
        self.words = words;

        let present: BTreeSet<WordId> = self.words.iter().map(|w| w.id).collect();
        let selected_before = self.selection.len();
        let expanded_before = self.expanded.len();
        self.selection.retain(|id| present.contains(id));
        self.expanded.retain(|id| present.contains(id));

        let purged = (selected_before - self.selection.len()) + (expanded_before - self.expanded.len());
        if purged > 0 {
            tracing::debug!(purged = purged, "purged stale identifiers after snapshot update");
        }

        self.apply_search_filter();
        purged > 0 || self.filtered_words != old_filtered
    }

    /// Applies the list view and search query to the snapshot.
    ///
    /// The query matches case-insensitively against primary, secondary and
    /// meaning text. An empty query matches every word.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!("apply_search_filter",
            total_words = self.words.len(),
            query_len = self.search_query.len(),
            list_view = ?self.list_view
        ).entered();

        let needle = self.search_query.trim().to_lowercase();
        let favorites_only = self.list_view == ListView::Favorites;

        self.filtered_words = self
            .words
            .iter()
            .filter(|word| !favorites_only || word.is_favorite)
            .filter(|word| word.matches(&needle))
            .cloned()
            .collect();

        tracing::debug!(
            filtered_count = self.filtered_words.len(),
            "search filter applied"
        );
    }

    /// Looks up a word in the current snapshot.
    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    /// Selected words present in the snapshot, in display order.
    #[must_use]
    pub fn selected_words(&self) -> Vec<Word> {
        self.words
            .iter()
            .filter(|w| self.selection.contains(&w.id))
            .cloned()
            .collect()
    }

    /// True iff at least one word is selected.
    #[must_use]
    pub fn is_selection_active(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Swipe gestures are only available outside selection mode.
    #[must_use]
    pub fn swipe_enabled(&self) -> bool {
        !self.is_selection_active()
    }

    /// Adds `id` to the selection. Never deselects.
    pub fn select(&mut self, id: WordId) {
        self.selection.insert(id);
    }

    /// Flips `id`'s selection membership.
    pub fn toggle_selection(&mut self, id: WordId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Empties the selection. Idempotent.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replaces the selection with the ids of `words`.
    pub fn select_all(&mut self, words: &[Word]) {
        self.selection = words.iter().map(|w| w.id).collect();
    }

    /// Flips `id`'s expanded state.
    pub fn toggle_expand_collapse(&mut self, id: WordId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    /// Computes a renderable view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let query = self.search_query.trim();
        let matcher = if query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default().ignore_case())
        };

        let rows = self
            .filtered_words
            .iter()
            .map(|word| self.compute_row(word, query, matcher.as_ref()))
            .collect();

        UIViewModel {
            rows,
            header: self.compute_header(),
            empty_state: self.compute_empty_state(),
            search_bar: SearchBarInfo {
                query: self.search_query.clone(),
                placeholder: "Search words".to_string(),
            },
            swipe_enabled: self.swipe_enabled(),
        }
    }

    fn compute_row(&self, word: &Word, query: &str, matcher: Option<&SkimMatcherV2>) -> WordRow {
        let (primary_highlights, secondary_highlights) = matcher.map_or_else(
            || (vec![], vec![]),
            |m| {
                (
                    compute_highlight_ranges(&word.primary_word, query, m),
                    compute_highlight_ranges(&word.secondary_word, query, m),
                )
            },
        );

        WordRow {
            id: word.id,
            primary_word: word.primary_word.clone(),
            secondary_word: word.secondary_word.clone(),
            word_meaning: word.word_meaning.clone(),
            secondary_word_pronunciation: word.secondary_word_pronunciation.clone(),
            is_favorite: word.is_favorite,
            is_expanded: self.expanded.contains(&word.id),
            is_selected: self.selection.contains(&word.id),
            primary_highlights,
            secondary_highlights,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        if self.is_selection_active() {
            let selected = self.selection.len();
            HeaderInfo::Selection {
                title: format!("{selected} selected"),
                selected,
            }
        } else {
            let count = self.filtered_words.len();
            HeaderInfo::Default {
                title: format!("{} ({count})", self.list_view.title()),
                count,
            }
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_words.is_empty() {
            return None;
        }

        let (message, subtitle) = if !self.search_query.trim().is_empty() {
            ("No matching words", "Try a different search")
        } else {
            match self.list_view {
                ListView::All => ("No words yet", "Add a word to get started"),
                ListView::Favorites => ("No favorites yet", "Double-tap a word to add it to favorites"),
            }
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

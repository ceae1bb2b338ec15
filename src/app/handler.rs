//! Action handling and state transition logic.
//!
//! [`handle_action`] is the selection & dispatch state machine of a listing
//! screen. It mutates [`ScreenState`] for gestures and turns domain actions into
//! [`Effect`]s. It never performs I/O, so every rule below is testable without a
//! store.
//!
//! # Gesture Rules
//!
//! - **Click**: toggles selection in selection mode, otherwise toggles expansion
//! - **`DoubleClick`**: flips the favorite flag, selection untouched
//! - **`LongPress`**: adds to the selection, never removes
//! - **`ToggleExpandCollapse`**: toggles expansion regardless of selection
//! - **`NavigateToScreen`**: sets the pending route
//! - **Swipes**: reserved, no effect
//!
//! # Example
//!
//! ```rust
//! use wordbridge::app::{handle_action, ScreenState, UiAction};
//! use wordbridge::domain::{Word, WordId};
//!
//! let book = Word::new("Book", "", "Kitab", "").with_id(WordId::new(1));
//! let mut state = ScreenState::new(vec![book.clone()]);
//!
//! let dispatch = handle_action(&mut state, &UiAction::Click(book).into())?;
//! assert!(dispatch.rerender);
//! assert!(state.expanded.contains(&WordId::new(1)));
//! # Ok::<(), wordbridge::WordBridgeError>(())
//! ```

use crate::app::actions::{Action, DomainAction, UiAction};
use crate::app::effects::{Dispatch, Effect};
use crate::app::navigation::Route;
use crate::app::state::ScreenState;
use crate::domain::error::{Result, WordBridgeError};
use crate::domain::{OperationOutcome, Word};

/// Processes an action, mutates screen state, and returns effects to execute.
///
/// # Errors
///
/// Returns [`WordBridgeError::Validation`] for a navigation request that carries
/// neither a route nor a word.
pub fn handle_action(state: &mut ScreenState, action: &Action) -> Result<Dispatch> {
    let _span = tracing::debug_span!("handle_action", action_type = ?action).entered();

    match action {
        Action::Ui(ui) => handle_ui_action(state, ui),
        Action::Domain(domain) => Ok(handle_domain_action(state, domain)),
    }
}

fn handle_ui_action(state: &mut ScreenState, action: &UiAction) -> Result<Dispatch> {
    match action {
        UiAction::Click(word) => {
            if state.is_selection_active() {
                state.toggle_selection(word.id);
            } else {
                state.toggle_expand_collapse(word.id);
            }
            Ok(Dispatch::render())
        }
        UiAction::DoubleClick(word) => Ok(handle_domain_action(
            state,
            &DomainAction::ToggleFavouriteWord {
                id: word.id,
                is_favorite: !word.is_favorite,
            },
        )),
        UiAction::LongPress(word) => {
            let newly_selected = state.selection.insert(word.id);
            Ok(Dispatch::none().with_rerender(newly_selected))
        }
        UiAction::SwipeLeft(word) | UiAction::SwipeRight(word) => {
            tracing::debug!(id = %word.id, "swipe gestures have no effect");
            Ok(Dispatch::none())
        }
        UiAction::ToggleExpandCollapse(id) => {
            state.toggle_expand_collapse(*id);
            Ok(Dispatch::render())
        }
        UiAction::NavigateToScreen { route, word } => {
            let target = match (word, route) {
                (Some(word), _) => Route::WordUpdate(word.id),
                (None, Some(route)) => *route,
                (None, None) => {
                    return Err(WordBridgeError::Validation(
                        "navigation requires a route or a word".to_string(),
                    ))
                }
            };
            tracing::debug!(route = %target, "navigation requested");
            state.navigation.set(target);
            Ok(Dispatch::none())
        }
        UiAction::ClearSelection => {
            let was_active = state.is_selection_active();
            state.clear_selection();
            Ok(Dispatch::none().with_rerender(was_active))
        }
        UiAction::SelectAll => {
            let visible = state.filtered_words.clone();
            state.select_all(&visible);
            Ok(Dispatch::render())
        }
        UiAction::Search(query) => {
            if &state.search_query == query {
                return Ok(Dispatch::none());
            }
            state.search_query.clone_from(query);
            tracing::trace!(query = %state.search_query, "search query updated");
            state.apply_search_filter();
            Ok(Dispatch::render())
        }
        UiAction::ShowView(view) => {
            if state.list_view == *view {
                return Ok(Dispatch::none());
            }
            state.list_view = *view;
            state.apply_search_filter();
            Ok(Dispatch::render())
        }
    }
}

fn handle_domain_action(state: &mut ScreenState, action: &DomainAction) -> Dispatch {
    match action {
        DomainAction::InsertWord(word) | DomainAction::UpdateWord(word) => {
            Dispatch::effects(vec![Effect::Upsert(word.clone())])
        }
        DomainAction::DeleteWord(word) => Dispatch::effects(vec![Effect::Delete(word.clone())]),
        DomainAction::ToggleFavouriteWord { id, is_favorite } => {
            let Some(word) = state.word(*id) else {
                tracing::warn!(id = %id, "favorite toggle for a word missing from the snapshot");
                let attempted = Word::new("", "", "", "").with_id(*id);
                return Dispatch::effects(vec![Effect::Report(OperationOutcome::failed(
                    attempted,
                    WordBridgeError::NotFound(*id).to_string(),
                ))]);
            };
            Dispatch::effects(vec![Effect::Upsert(word.clone().with_favorite(*is_favorite))])
        }
        DomainAction::DeleteSelected => {
            let effects: Vec<Effect> = state.selected_words().into_iter().map(Effect::Delete).collect();
            tracing::debug!(count = effects.len(), "deleting selected words");
            let was_active = state.is_selection_active();
            state.clear_selection();
            Dispatch::effects(effects).with_rerender(was_active)
        }
        DomainAction::SetFavoriteSelected(is_favorite) => {
            let effects: Vec<Effect> = state
                .selected_words()
                .into_iter()
                .filter(|w| w.is_favorite != *is_favorite)
                .map(|w| Effect::Upsert(w.with_favorite(*is_favorite)))
                .collect();
            tracing::debug!(count = effects.len(), is_favorite = is_favorite, "updating favorites of selected words");
            let was_active = state.is_selection_active();
            state.clear_selection();
            Dispatch::effects(effects).with_rerender(was_active)
        }
    }
}

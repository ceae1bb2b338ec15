use std::collections::BTreeSet;
use std::sync::Arc;

use wordbridge::app::{DomainAction, ListView, Route, Session, UiAction, WordForm};
use wordbridge::domain::{Word, WordId};
use wordbridge::storage::{MemoryStorage, WordRecord};
use wordbridge::ui::HeaderInfo;
use wordbridge::StoreRepository;

fn seeded_session() -> Session {
    let records = [
        Word::new("Book", "A written work", "Kitab", "Ki-taab"),
        Word::new("Water", "", "Pani", ""),
        Word::new("Apple", "", "Seb", "").with_favorite(true),
    ]
    .into_iter()
    .map(WordRecord::from);

    let storage = MemoryStorage::with_records(records).unwrap();
    let repository = StoreRepository::spawn(Box::new(storage)).unwrap();
    Session::new(Arc::new(repository))
}

fn word(session: &Session, primary: &str) -> Word {
    session
        .state()
        .words
        .iter()
        .find(|w| w.primary_word == primary)
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn click_expands_outside_selection_mode() {
    let mut session = seeded_session();
    let book = word(&session, "Book");

    session.dispatch(UiAction::Click(book.clone())).unwrap();

    assert!(session.state().expanded.contains(&book.id));
    assert!(!session.is_selection_active());
    let row = session.viewmodel().rows.into_iter().find(|r| r.id == book.id).unwrap();
    assert!(row.is_expanded && !row.is_selected);
}

#[tokio::test]
async fn click_toggles_selection_in_selection_mode() {
    let mut session = seeded_session();
    let book = word(&session, "Book");
    let water = word(&session, "Water");

    session.dispatch(UiAction::LongPress(book.clone())).unwrap();
    session.dispatch(UiAction::Click(water.clone())).unwrap();
    assert_eq!(session.state().selection, BTreeSet::from([book.id, water.id]));

    session.dispatch(UiAction::Click(book.clone())).unwrap();
    assert_eq!(session.state().selection, BTreeSet::from([water.id]));
    assert!(session.state().expanded.is_empty());
}

#[tokio::test]
async fn long_press_always_leaves_word_selected() {
    let mut session = seeded_session();
    let apple = word(&session, "Apple");

    for _ in 0..3 {
        session.dispatch(UiAction::LongPress(apple.clone())).unwrap();
        assert!(session.state().selection.contains(&apple.id));
    }

    session.dispatch(UiAction::Click(apple.clone())).unwrap();
    session.dispatch(UiAction::LongPress(apple.clone())).unwrap();
    assert!(session.state().selection.contains(&apple.id));
}

#[tokio::test]
async fn select_all_and_clear_drive_selection_chrome() {
    let mut session = seeded_session();
    let words = session.state().words.clone();

    session.select_all(&words);
    assert!(session.is_selection_active());
    assert!(!session.viewmodel().swipe_enabled);
    assert_eq!(
        session.viewmodel().header,
        HeaderInfo::Selection {
            title: "3 selected".to_string(),
            selected: 3
        }
    );

    session.clear_selection();
    session.clear_selection();
    assert!(!session.is_selection_active());
    assert!(session.viewmodel().swipe_enabled);
    assert_eq!(session.viewmodel().header.title(), "Words (3)");
}

#[tokio::test]
async fn deleting_selected_word_purges_it_from_selection() {
    let mut session = seeded_session();
    let book = word(&session, "Book");
    let water = word(&session, "Water");

    session.dispatch(UiAction::LongPress(book.clone())).unwrap();
    session.dispatch(UiAction::LongPress(water.clone())).unwrap();
    session.toggle_expand_collapse(book.id);

    for pending in session.dispatch(DomainAction::DeleteWord(book.clone())).unwrap().pending {
        assert!(pending.await.is_success());
    }
    session.sync();

    assert_eq!(session.state().selection, BTreeSet::from([water.id]));
    assert!(session.state().expanded.is_empty());
}

#[tokio::test]
async fn bulk_delete_clears_selection_and_store() {
    let mut session = seeded_session();
    let book = word(&session, "Book");
    let apple = word(&session, "Apple");

    session.dispatch(UiAction::LongPress(book)).unwrap();
    session.dispatch(UiAction::LongPress(apple)).unwrap();

    let dispatched = session.dispatch(DomainAction::DeleteSelected).unwrap();
    assert_eq!(dispatched.pending.len(), 2);
    assert!(!session.is_selection_active());

    for pending in dispatched.pending {
        assert!(pending.await.is_success());
    }
    session.sync();

    let remaining: Vec<_> = session.state().words.iter().map(|w| w.primary_word.clone()).collect();
    assert_eq!(remaining, ["Water"]);
}

#[tokio::test]
async fn favorites_view_follows_store_changes() {
    let records = [Word::new("Apple", "", "Seb", "").with_favorite(true)].map(WordRecord::from);
    let storage = MemoryStorage::with_records(records).unwrap();
    let repository = Arc::new(StoreRepository::spawn(Box::new(storage)).unwrap());
    let mut session = Session::with_view(repository, ListView::Favorites);

    let apple = session.state().filtered_words[0].clone();
    for pending in session.dispatch(UiAction::DoubleClick(apple)).unwrap().pending {
        pending.await;
    }
    session.sync();

    let vm = session.viewmodel();
    assert!(vm.rows.is_empty());
    assert_eq!(vm.empty_state.unwrap().message, "No favorites yet");
}

#[tokio::test]
async fn search_filters_rows_and_highlights_matches() {
    let mut session = seeded_session();
    session.dispatch(UiAction::Search("pan".to_string())).unwrap();

    let vm = session.viewmodel();
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(vm.rows[0].primary_word, "Water");
    assert_eq!(vm.rows[0].secondary_highlights, vec![(0, 3)]);
    assert_eq!(vm.search_bar.query, "pan");
}

#[tokio::test]
async fn update_flow_navigates_and_saves_through_form() {
    let mut session = seeded_session();
    let water = word(&session, "Water");

    session
        .dispatch(UiAction::NavigateToScreen {
            route: None,
            word: Some(water.clone()),
        })
        .unwrap();
    let Some(Route::WordUpdate(id)) = session.take_route() else {
        panic!("expected update route");
    };
    assert_eq!(id, water.id);

    let mut form = WordForm::for_update(session.state().word(id).unwrap());
    form.set_word_meaning("Clear liquid");
    let action = form.submit().unwrap();

    for pending in session.dispatch(action).unwrap().pending {
        assert!(pending.await.is_success());
    }
    session.sync();

    assert_eq!(session.state().word(id).unwrap().word_meaning, "Clear liquid");
    assert_eq!(session.state().words.len(), 3);
    assert_ne!(id, WordId::UNSAVED);
}

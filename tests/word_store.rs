use std::sync::Arc;

use futures_util::StreamExt;
use wordbridge::app::{DomainAction, Session, SessionUpdate, UiAction};
use wordbridge::domain::{OperationOutcome, Word, WordId, WordRepository};
use wordbridge::storage::MemoryStorage;
use wordbridge::{Config, StorageKind, StoreRepository};

fn memory_repository() -> Arc<StoreRepository> {
    Arc::new(StoreRepository::spawn(Box::new(MemoryStorage::new())).unwrap())
}

async fn insert(session: &mut Session, word: Word) -> Word {
    let dispatched = session.dispatch(DomainAction::InsertWord(word)).unwrap();
    let mut stored = None;
    for pending in dispatched.pending {
        let outcome = pending.await;
        assert!(outcome.is_success(), "insert failed: {outcome:?}");
        stored = outcome.word().cloned();
    }
    session.sync();
    stored.unwrap()
}

async fn run(session: &mut Session, action: impl Into<wordbridge::Action>) -> Vec<OperationOutcome> {
    let dispatched = session.dispatch(action).unwrap();
    let mut outcomes = Vec::new();
    for pending in dispatched.pending {
        outcomes.push(pending.await);
    }
    session.sync();
    outcomes
}

#[tokio::test]
async fn book_kitab_scenario() {
    let repository = memory_repository();
    let mut session = Session::new(repository.clone());
    let favorites = repository.observe_favorites();

    let book = Word::new("Book", "A written work", "Kitab", "Ki-taab");
    let dispatched = session.dispatch(DomainAction::InsertWord(book.clone())).unwrap();
    let outcome = dispatched.pending.into_iter().next().unwrap().await;

    let OperationOutcome::Success { word: stored, message } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(message.as_deref(), Some("\"Book\" word inserted successfully"));
    assert_eq!(stored.clone().with_id(WordId::UNSAVED), book);
    let id = stored.id;

    session.sync();
    assert!(session.state().words.iter().any(|w| w.id == id));

    let outcomes = run(&mut session, DomainAction::ToggleFavouriteWord { id, is_favorite: true }).await;
    assert!(outcomes[0].is_success());
    assert!(favorites.current().iter().any(|w| w.id == id));

    let outcomes = run(&mut session, DomainAction::DeleteWord(stored)).await;
    assert_eq!(outcomes[0].message(), Some("\"Book\" word deleted successfully"));
    assert!(repository.observe_all().current().iter().all(|w| w.id != id));
    assert!(session.state().words.is_empty());
}

#[tokio::test]
async fn inserted_word_is_observed_with_assigned_id() {
    let repository = memory_repository();
    let mut session = Session::new(repository.clone());

    for (primary, secondary) in [("Water", "Pani"), ("Sun", "Suraj"), ("Moon", "Chand")] {
        let word = Word::new(primary, "", secondary, "");
        let stored = insert(&mut session, word.clone()).await;

        assert!(!stored.id.is_unsaved());
        let all = repository.observe_all().current();
        assert!(all.iter().any(|w| w.id == stored.id && w.clone().with_id(WordId::UNSAVED) == word));
    }

    let ids: Vec<i64> = repository.observe_all().current().iter().map(|w| w.id.get()).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn double_favorite_toggle_restores_flag() {
    let repository = memory_repository();
    let mut session = Session::new(repository.clone());
    let stored = insert(&mut session, Word::new("Tree", "", "Ped", "")).await;

    let mut favorites = repository.observe_favorites().into_stream();
    assert!(favorites.next().await.unwrap().is_empty());

    let current = session.state().word(stored.id).cloned().unwrap();
    run(&mut session, UiAction::DoubleClick(current)).await;
    let after_first = favorites.next().await.unwrap();
    assert_eq!(after_first.iter().map(|w| w.id).collect::<Vec<_>>(), [stored.id]);

    let current = session.state().word(stored.id).cloned().unwrap();
    assert!(current.is_favorite);
    run(&mut session, UiAction::DoubleClick(current)).await;
    assert!(favorites.next().await.unwrap().is_empty());

    assert!(!session.state().word(stored.id).unwrap().is_favorite);
}

#[tokio::test]
async fn delete_removes_word_from_every_feed() {
    let repository = memory_repository();
    let mut session = Session::new(repository.clone());
    let stored = insert(&mut session, Word::new("Rain", "", "Barish", "").with_favorite(true)).await;

    let all = repository.observe_all();
    let favorites = repository.observe_favorites();
    let single = repository.observe_by_id(stored.id);
    assert_eq!(favorites.current().len(), 1);
    assert_eq!(single.current().as_ref(), Some(&stored));

    let outcomes = run(&mut session, DomainAction::DeleteWord(stored.clone())).await;
    assert!(outcomes[0].is_success());

    assert!(all.current().is_empty());
    assert!(favorites.current().is_empty());
    assert!(single.current().is_none());
}

#[tokio::test]
async fn failures_surface_verbatim_and_leave_sets_alone() {
    let repository = memory_repository();
    let mut session = Session::new(repository.clone());
    let stored = insert(&mut session, Word::new("Fire", "", "Aag", "")).await;

    run(&mut session, UiAction::LongPress(stored.clone())).await;
    run(&mut session, UiAction::ToggleExpandCollapse(stored.id)).await;

    let ghost = Word::new("Ghost", "", "Bhoot", "").with_id(WordId::new(99));
    let outcomes = run(&mut session, DomainAction::DeleteWord(ghost.clone())).await;

    assert_eq!(
        outcomes,
        vec![OperationOutcome::failed(ghost, "Deletion failed: no word with id 99")]
    );
    assert!(session.state().selection.contains(&stored.id));
    assert!(session.state().expanded.contains(&stored.id));
    assert!(session.take_outcome().unwrap().is_failed());
}

#[tokio::test]
async fn next_update_reports_writes_from_other_sessions() {
    let repository = memory_repository();
    let mut observer = Session::new(repository.clone());
    let mut writer = Session::new(repository.clone());

    writer
        .dispatch(DomainAction::InsertWord(Word::new("Sky", "", "Aasman", "")))
        .unwrap();

    assert_eq!(observer.next_update().await, Some(SessionUpdate::Words { changed: true }));
    assert_eq!(observer.state().words.len(), 1);
    writer.settle().await;
}

#[tokio::test]
async fn json_store_persists_across_repositories() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        storage: StorageKind::Json,
        ..Config::default()
    };

    {
        let repository = Arc::new(StoreRepository::open(&config).unwrap());
        let mut session = Session::new(repository);
        let stored = insert(&mut session, Word::new("Book", "", "Kitab", "Ki-taab")).await;
        run(&mut session, DomainAction::ToggleFavouriteWord { id: stored.id, is_favorite: true }).await;
    }

    let reopened = StoreRepository::open(&config).unwrap();
    let favorites = reopened.observe_favorites().current();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].secondary_word_pronunciation, "Ki-taab");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(config.store_path()).unwrap()).unwrap();
    assert_eq!(raw["version"], 2);
}

#[tokio::test]
async fn storage_write_failure_is_reported_and_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        storage: StorageKind::Json,
        ..Config::default()
    };
    let repository = Arc::new(StoreRepository::open(&config).unwrap());
    let mut session = Session::new(repository.clone());
    let book = insert(&mut session, Word::new("Book", "", "Kitab", "")).await;
    run(&mut session, UiAction::LongPress(book.clone())).await;
    run(&mut session, UiAction::ToggleExpandCollapse(book.id)).await;
    let on_disk = std::fs::read_to_string(config.store_path()).unwrap();

    let blocker = config.store_path().with_extension("tmp");
    std::fs::create_dir(&blocker).unwrap();

    let ghost = Word::new("Ghost", "", "Bhoot", "");
    let outcomes = run(&mut session, DomainAction::InsertWord(ghost.clone())).await;
    assert!(outcomes[0].is_failed());
    assert_eq!(outcomes[0].word(), Some(&ghost));
    assert!(outcomes[0].message().unwrap().starts_with("Error: IO error"));

    let outcomes = run(&mut session, DomainAction::DeleteWord(book.clone())).await;
    assert!(outcomes[0].message().unwrap().starts_with("Error: IO error"));

    assert_eq!(repository.observe_all().current(), vec![book.clone()]);
    assert_eq!(session.state().words, vec![book.clone()]);
    assert!(session.state().selection.contains(&book.id));
    assert!(session.state().expanded.contains(&book.id));
    assert_eq!(std::fs::read_to_string(config.store_path()).unwrap(), on_disk);

    std::fs::remove_dir(&blocker).unwrap();
    insert(&mut session, Word::new("Water", "", "Pani", "")).await;

    let reopened = StoreRepository::open(&config).unwrap();
    let primaries: Vec<_> = reopened
        .observe_all()
        .current()
        .into_iter()
        .map(|w| w.primary_word)
        .collect();
    assert_eq!(primaries, ["Book", "Water"]);
}

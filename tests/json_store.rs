use std::fs;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use voctrain::diag::NullSink;
use voctrain::gateway::{PersistenceGateway, SessionStateSaver};
use voctrain::store::json_store::JsonStore;
use voctrain::store::schema::{LibraryData, StoredEntry, StoredList};
use voctrain::trainer::Trainer;
use voctrain::vocab::{EntryId, ListId, QuestionMode, SessionSettings, VocableEntry};

fn stored_entry(id: i64, a: &str, b: &str) -> StoredEntry {
    StoredEntry {
        id: EntryId(id),
        word_a: a.to_string(),
        word_b: b.to_string(),
        tip: None,
    }
}

fn library() -> LibraryData {
    LibraryData {
        lists: vec![StoredList {
            id: ListId(1),
            name_a: "Spanish".to_string(),
            name_b: "English".to_string(),
            entries: vec![
                stored_entry(1, "casa", "house"),
                stored_entry(2, "perro", "dog"),
            ],
        }],
        ..LibraryData::default()
    }
}

fn store_with_library(dir: &TempDir) -> JsonStore {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    store.save_library(&library()).unwrap();
    store
}

fn settings() -> SessionSettings {
    SessionSettings::new(2, QuestionMode::AskA, true, false)
}

#[test]
fn load_session_data_refreshes_list_counts() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with_library(&dir);

    let mut lists = store.lists();
    assert_eq!(lists.len(), 1);
    let pool = store.load_session_data(&mut lists, &settings()).unwrap();

    assert_eq!(pool, vec![ListId(1)]);
    assert_eq!(lists[0].total, 2);
    assert_eq!(lists[0].unsolved, 2);
}

#[test]
fn entry_progress_survives_a_store_reopen() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with_library(&dir);

    let mut solved = VocableEntry::new(EntryId(1), ListId(1), "casa", "house");
    solved.points = 2;
    store.update_entry_progress(&solved).unwrap();

    let mut reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut lists = reopened.lists();
    let pool = reopened.load_session_data(&mut lists, &settings()).unwrap();
    assert_eq!(pool, vec![ListId(1)]);
    assert_eq!(lists[0].total, 2);
    assert_eq!(lists[0].unsolved, 1);
}

#[test]
fn wipe_resets_progress_and_delete_removes_the_session() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with_library(&dir);

    let mut solved = VocableEntry::new(EntryId(1), ListId(1), "casa", "house");
    solved.points = 2;
    store.update_entry_progress(&solved).unwrap();

    store.wipe_session_progress().unwrap();
    let mut lists = store.lists();
    store.load_session_data(&mut lists, &settings()).unwrap();
    assert_eq!(lists[0].unsolved, 2);

    store.delete_session().unwrap();
    assert!(!dir.path().join("session.json").exists());
    // Deleting a session that is already gone is fine.
    store.delete_session().unwrap();
}

#[test]
fn random_entry_respects_threshold_and_exclusion() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with_library(&dir);

    let mut solved = VocableEntry::new(EntryId(1), ListId(1), "casa", "house");
    solved.points = 2;
    store.update_entry_progress(&solved).unwrap();

    // Entry 1 is solved, so entry 2 is the only candidate.
    for _ in 0..10 {
        let picked = store
            .random_entry(ListId(1), None, &settings(), false)
            .unwrap()
            .expect("candidate available");
        assert_eq!(picked.id, EntryId(2));
    }

    // Excluding it without permission to repeat leaves nothing.
    let none = store
        .random_entry(ListId(1), Some(EntryId(2)), &settings(), false)
        .unwrap();
    assert!(none.is_none());

    // With repetition allowed the exclusion is ignored.
    let repeated = store
        .random_entry(ListId(1), Some(EntryId(2)), &settings(), true)
        .unwrap();
    assert_eq!(repeated.unwrap().id, EntryId(2));
}

#[test]
fn last_active_entry_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with_library(&dir);

    let mut active = VocableEntry::new(EntryId(2), ListId(1), "perro", "dog");
    active.points = 1;
    store.save_last_active_entry(Some(&active)).unwrap();

    let pending = store.pending_entry().expect("saved entry");
    assert_eq!(pending.id, EntryId(2));
    assert_eq!(pending.points, 1);

    store.save_last_active_entry(None).unwrap();
    assert!(store.pending_entry().is_none());
}

#[test]
fn corrupt_session_file_degrades_to_a_fresh_session() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with_library(&dir);

    fs::write(dir.path().join("session.json"), "{not json").unwrap();

    assert!(store.pending_entry().is_none());
    let mut lists = store.lists();
    store.load_session_data(&mut lists, &settings()).unwrap();
    assert_eq!(lists[0].unsolved, 2);
}

#[test]
fn full_session_runs_over_the_json_store() {
    let dir = TempDir::new().unwrap();
    let gateway = store_with_library(&dir);
    let saver = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

    let lists = gateway.lists();
    let mut t = Trainer::with_parts(
        lists,
        settings(),
        gateway,
        saver,
        true,
        SmallRng::seed_from_u64(4),
        Box::new(NullSink),
    )
    .unwrap();

    let mut guard = 0;
    while !t.is_finished() {
        let word = t.current_entry().unwrap().word_a.clone();
        assert!(t.check_solution(&word));
        guard += 1;
        assert!(guard <= 4, "session did not converge in 4 correct answers");
    }

    assert_eq!(t.solved(), 2);
    assert_eq!(t.remaining(), 0);
    // The finished session record was dropped, so nothing is pending.
    assert!(t.gateway().pending_entry().is_none());
}

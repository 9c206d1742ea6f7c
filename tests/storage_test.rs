//! File store tests
//!
//! Key-value persistence on disk, and history/language on top of it

use baggage_check::storage::FileStore;
use baggage_check_common::{
    load_language, save_language, Error, HistoryStore, KeyValueStore, Language, ScanRecord,
    VerdictStatus, HISTORY_KEY, MAX_HISTORY,
};
use std::sync::Arc;
use tempfile::tempdir;

fn record(id: &str) -> ScanRecord {
    ScanRecord {
        id: id.to_string(),
        category_id: "lighter".to_string(),
        category_name: "Lighter".to_string(),
        answers: Default::default(),
        hand_baggage_status: VerdictStatus::NotAllowed,
        checked_baggage_status: VerdictStatus::NotAllowed,
        hand_baggage_text: "no".to_string(),
        checked_baggage_text: "no".to_string(),
        hand_baggage_tip: None,
        checked_baggage_tip: None,
        photo_uri: None,
        timestamp: 1,
    }
}

/// Missing file reads as empty
#[test]
fn test_missing_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path());
    assert_eq!(store.get("anything").unwrap(), None);
    assert!(!store.path().exists());
}

/// Values survive reopening
#[test]
fn test_set_and_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    {
        let store = FileStore::open(dir.path());
        store.set("zrh_language", "en").unwrap();
        store.set("other", "x").unwrap();
    }

    let store = FileStore::open(dir.path());
    assert_eq!(store.get("zrh_language").unwrap().as_deref(), Some("en"));
    assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.path().extension().map(|x| x == "tmp").unwrap_or(false))
        .collect();
    assert!(leftovers.is_empty());
}

/// Data directory is created on first write
#[test]
fn test_creates_nested_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("a").join("b");
    let store = FileStore::open(&nested);
    store.set("k", "v").unwrap();
    assert!(nested.join("store.json").exists());
}

#[test]
fn test_remove_key() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path());
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    store.remove("k").unwrap();
}

/// A damaged file is reported, not overwritten
#[test]
fn test_corrupt_file_is_unavailable() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path());
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(matches!(store.get("k"), Err(Error::StorageUnavailable(_))));
    assert!(matches!(store.set("k", "v"), Err(Error::StorageUnavailable(_))));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
}

#[test]
fn test_history_on_file_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = Arc::new(FileStore::open(dir.path()));
    let history = HistoryStore::new(Arc::clone(&store));

    for i in 0..MAX_HISTORY + 3 {
        history.append(record(&format!("r{}", i))).unwrap();
    }

    let reopened = HistoryStore::new(FileStore::open(dir.path()));
    let list = reopened.list();
    assert_eq!(list.len(), MAX_HISTORY);
    assert_eq!(list[0].id, format!("r{}", MAX_HISTORY + 2));

    history.clear().unwrap();
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

/// History unreadable: list is empty, find and append fail without writing
#[test]
fn test_history_with_corrupt_store_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path());
    std::fs::write(store.path(), "garbage").unwrap();
    let history = HistoryStore::new(store);

    assert!(history.list().is_empty());
    assert!(matches!(history.append(record("a")), Err(Error::StorageUnavailable(_))));
    assert!(matches!(history.find("a"), Err(Error::StorageUnavailable(_))));
}

#[test]
fn test_language_on_file_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path());
    assert_eq!(load_language(&store), Language::De);
    save_language(&store, Language::En).unwrap();
    assert_eq!(load_language(&FileStore::open(dir.path())), Language::En);
}

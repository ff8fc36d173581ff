//! File-backed storage tests

use regapp_core::{FileStore, KeyValueStore, TOKEN_KEY};
use tempfile::TempDir;

#[test]
fn test_token_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    FileStore::new(&path).set(TOKEN_KEY, "abc123").unwrap();

    // A fresh handle stands in for a restarted process
    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
}

#[test]
fn test_set_overwrites_and_keeps_other_keys() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));

    store.set("theme", "dark").unwrap();
    store.set(TOKEN_KEY, "first").unwrap();
    store.set(TOKEN_KEY, "second").unwrap();

    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("second"));
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_file_contents_are_a_json_object() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));
    store.set(TOKEN_KEY, "abc123").unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, serde_json::json!({"token": "abc123"}));
    assert!(!dir.path().join("storage.json.tmp").exists());
}

#[test]
fn test_remove_and_clear() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));

    store.set(TOKEN_KEY, "abc123").unwrap();
    store.set("other", "1").unwrap();
    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get("other").unwrap().as_deref(), Some("1"));

    store.clear().unwrap();
    assert!(!store.path().exists());
    assert_eq!(store.get("other").unwrap(), None);

    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::new(&path);
    assert!(store.get(TOKEN_KEY).is_err());
}

#[test]
fn test_empty_file_reads_as_no_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    store.set(TOKEN_KEY, "abc123").unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
}

use eyecamp_core::error::StoreError;
use eyecamp_core::keys;
use eyecamp_core::store::{FileStore, LocalStore, MemoryStore};

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("a").unwrap(), None);

    store.set("a", "1").unwrap();
    store.set("a", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

    store.remove("a").unwrap();
    store.remove("a").unwrap();
    assert_eq!(store.get("a").unwrap(), None);
}

#[test]
fn memory_store_quota_rejects_oversized_writes() {
    let store = MemoryStore::with_quota(16);
    store.set("k", "0123456789").unwrap();

    let err = store.set("other", "0123456789").unwrap_err();
    assert!(matches!(err, StoreError::QuotaExceeded { .. }));

    // Overwriting the same key only counts the new value.
    store.set("k", "abcdefghijklmn").unwrap();
    assert_eq!(store.keys(), vec!["k".to_string()]);
}

#[test]
fn file_store_persists_nested_keys() {
    let dir = tempfile::tempdir().unwrap();
    let key = keys::draft("camp-1", None);

    let store = FileStore::new(dir.path());
    store.set(&key, r#"{"x":1}"#).unwrap();

    let reopened = FileStore::new(dir.path());
    assert_eq!(reopened.get(&key).unwrap().as_deref(), Some(r#"{"x":1}"#));
    assert!(dir.path().join("drafts/camp-1/new.json").exists());
    assert!(!dir.path().join("drafts/camp-1/new.json.tmp").exists());

    reopened.remove(&key).unwrap();
    assert_eq!(reopened.get(&key).unwrap(), None);
    reopened.remove(&key).unwrap();
}

#[test]
fn file_store_rejects_escaping_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    for key in ["", "../outside", "/etc/passwd", "a/../../b"] {
        assert!(
            matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))),
            "{key:?} should be rejected"
        );
    }
}

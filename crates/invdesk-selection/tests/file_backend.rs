use std::fs;

use invdesk_model::{FilterSnapshot, ListViewKey, RecordId};
use invdesk_selection::{
    JsonFileBackend, PersistenceScope, SelectionBackend, SelectionError, SelectionStore,
};
use tempfile::tempdir;

fn scope() -> PersistenceScope {
    PersistenceScope::new(ListViewKey::new("saida_nf").unwrap())
}

#[test]
fn missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let mut backend = JsonFileBackend::open(dir.path().join("absent.json")).unwrap();
    let store =
        SelectionStore::restore(&scope(), &FilterSnapshot::default(), &mut backend).unwrap();
    assert!(store.is_empty());
    assert!(!backend.path().exists());
}

#[test]
fn selection_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("selection.json");
    let filter = FilterSnapshot::new("parafuso");

    let mut store = SelectionStore::new(filter.clone());
    store.select_all_on_current_page([RecordId::new("5").unwrap(), RecordId::new("9").unwrap()]);
    {
        let mut backend = JsonFileBackend::open(&path).unwrap();
        store.save(&scope(), &mut backend).unwrap();
    }
    assert!(!path.with_extension("json.tmp").exists());

    let mut backend = JsonFileBackend::open(&path).unwrap();
    let restored = SelectionStore::restore(&scope(), &filter, &mut backend).unwrap();
    assert_eq!(restored, store);
}

#[test]
fn discarded_state_is_removed_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("selection.json");

    let mut store = SelectionStore::new(FilterSnapshot::new("abc"));
    store.select_all_matching(FilterSnapshot::new("abc"));
    let mut backend = JsonFileBackend::open(&path).unwrap();
    store.save(&scope(), &mut backend).unwrap();

    let mut backend = JsonFileBackend::open(&path).unwrap();
    let restored =
        SelectionStore::restore(&scope(), &FilterSnapshot::new("xyz"), &mut backend).unwrap();
    assert!(restored.is_empty());

    let on_disk = fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk.trim(), "{}");
}

#[test]
fn other_views_are_left_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("selection.json");
    let mut backend = JsonFileBackend::open(&path).unwrap();
    backend
        .set("invdesk.fornecedores.selected_ids", r#"["1"]"#.to_string())
        .unwrap();

    let mut store = SelectionStore::default();
    store.toggle(RecordId::new("7").unwrap());
    store.save(&scope(), &mut backend).unwrap();

    let reopened = JsonFileBackend::open(&path).unwrap();
    assert_eq!(
        reopened.get("invdesk.fornecedores.selected_ids").unwrap(),
        Some(r#"["1"]"#.to_string())
    );
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("selection.json");
    fs::write(&path, "[1, 2").unwrap();
    let err = JsonFileBackend::open(&path).unwrap_err();
    assert!(matches!(err, SelectionError::Deserialization { .. }));
    assert!(!err.is_retryable());
}

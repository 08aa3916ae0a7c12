use super::*;
use crate::shape::{Rect, RectProps, Shape, ShapeKind};

fn record() -> ShapeRecord {
    let props = RectProps::default();
    Shape::new(props.shape.clone(), ShapeKind::Rect(Rect::new(&props))).raw_data()
}

#[test]
fn empty_store_loads_nothing() {
    let store = MemoryStore::new();
    assert!(store.load().unwrap().is_empty());
    assert_eq!(store.raw(), None);
}

#[test]
fn save_then_load_returns_records() {
    let mut store = MemoryStore::new();
    let saved = vec![record(), record()];
    store.save(&saved).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0]["type"], "rect");
    assert_eq!(loaded[1]["id"], saved[1].id().to_string());
}

#[test]
fn clear_empties_store() {
    let mut store = MemoryStore::new();
    store.save(&[record()]).unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn corrupt_json_is_decode_error() {
    let store = MemoryStore::with_json("[{");
    assert!(matches!(store.load(), Err(StorageError::Decode(_))));
}

#[test]
fn non_array_is_decode_error() {
    let store = MemoryStore::with_json(r#"{"type":"rect"}"#);
    assert!(matches!(store.load(), Err(StorageError::Decode(_))));
}

#[test]
fn records_are_kept_untyped() {
    let store = MemoryStore::with_json(r#"[{"type":"rect"},{"type":"blob"}]"#);
    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1]["type"], "blob");
}

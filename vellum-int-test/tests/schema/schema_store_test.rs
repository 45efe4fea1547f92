use std::sync::Arc;
use std::thread;

use vellum::errors::{ErrorCode, ErrorKind};
use vellum::schema::{only_create, CreateOptions, SchemaStore};
use vellum_int_test::test_util::UPDATE_BASE_SCHEMA;

fn schema_with_fields(extra: &[&str]) -> String {
    let mut properties = vec![
        r#""int_field": {"type": "integer"}"#.to_string(),
        r#""string_field": {"type": "string"}"#.to_string(),
    ];
    for name in extra {
        properties.push(format!(r#""{}": {{"type": "string"}}"#, name));
    }
    format!(
        r#"{{"title": "t1", "properties": {{{}}}, "primary_key": ["int_field"]}}"#,
        properties.join(", ")
    )
}

#[test]
fn test_create_collection_only_create() {
    let store = SchemaStore::default();
    store
        .create_or_update("t1", UPDATE_BASE_SCHEMA.as_bytes(), &only_create())
        .unwrap();

    let err = store
        .create_or_update("t1", UPDATE_BASE_SCHEMA.as_bytes(), &only_create())
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CollectionAlreadyExists);
    assert_eq!(err.code(), ErrorCode::AlreadyExists);
    assert_eq!(err.message(), "collection already exist");
}

#[test]
fn test_update_collection_versions() {
    let store = SchemaStore::default();
    let options = CreateOptions::default();
    store
        .create_or_update("t1", UPDATE_BASE_SCHEMA.as_bytes(), &options)
        .unwrap();

    let err = store
        .create_or_update(
            "t1",
            br#"{"title": "t1", "properties": {"int_field": {"type": "integer"}}, "primary_key": ["int_field"]}"#,
            &options,
        )
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::SchemaCompatibilityError);
    assert_eq!(store.latest("t1").unwrap().version(), 1);

    let v2 = store
        .create_or_update("t1", schema_with_fields(&["extra_field"]).as_bytes(), &options)
        .unwrap();
    assert_eq!(v2.version(), 2);

    let v1 = store.get_version("t1", 1).unwrap();
    assert!(v1.field("extra_field").is_none());
    assert!(store.get_version("t1", 3).is_none());
    assert!(Arc::ptr_eq(&store.latest("t1").unwrap(), &v2));
}

#[test]
fn test_collections_are_independent() {
    let store = SchemaStore::default();
    let options = CreateOptions::default();
    store
        .create_or_update("t1", UPDATE_BASE_SCHEMA.as_bytes(), &options)
        .unwrap();
    store
        .create_or_update(
            "t2",
            br#"{"title": "t2", "properties": {"id": {"type": "string", "format": "uuid"}}, "primary_key": ["id"]}"#,
            &options,
        )
        .unwrap();

    assert_eq!(store.collections(), vec!["t1".to_string(), "t2".to_string()]);
    assert!(store.versions("t3").is_empty());
    assert!(store.latest("t3").is_none());
}

#[test]
fn test_concurrent_additive_updates() {
    let store = SchemaStore::default();
    store
        .create_or_update("t1", UPDATE_BASE_SCHEMA.as_bytes(), &CreateOptions::default())
        .unwrap();

    // every writer submits the same growing prefix, so each update is additive
    let handles: Vec<_> = (1..=6)
        .map(|n| {
            let store = store.clone();
            thread::spawn(move || {
                let names: Vec<String> = (0..n).map(|i| format!("f{}", i)).collect();
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                store.create_or_update("t1", schema_with_fields(&names).as_bytes(), &CreateOptions::default())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let versions: Vec<u32> = store.versions("t1").iter().map(|s| s.version()).collect();
    let expected: Vec<u32> = (1..=versions.len() as u32).collect();
    assert_eq!(versions, expected);

    // a longer prefix always succeeds over a shorter one; a shorter one after a
    // longer one removes fields and is rejected
    for result in &results {
        if let Err(err) = result {
            assert_eq!(err.kind(), &ErrorKind::SchemaCompatibilityError);
        }
    }
    let published = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(versions.len(), published + 1);
}

#[test]
fn test_readers_see_whole_versions() {
    let store = SchemaStore::default();
    store
        .create_or_update("t1", UPDATE_BASE_SCHEMA.as_bytes(), &CreateOptions::default())
        .unwrap();

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for n in 1..=20 {
                let names: Vec<String> = (0..n).map(|i| format!("f{}", i)).collect();
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                store
                    .create_or_update("t1", schema_with_fields(&names).as_bytes(), &CreateOptions::default())
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let latest = store.latest("t1").unwrap();
                    // version n carries exactly n - 1 extra fields
                    assert_eq!(latest.fields().len(), 2 + latest.version() as usize - 1);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.latest("t1").unwrap().version(), 21);
}

use vellum::config::CoreConfig;
use vellum::errors::{ErrorCode, ErrorKind};
use vellum::schema::{build, check_compatibility, FieldKind, FieldType, SchemaBuilder};
use vellum_int_test::test_util::{build_schema, UPDATE_BASE_SCHEMA, VALIDATION_SCHEMA};

#[test]
fn test_build_resolves_types() {
    let schema = build_schema(VALIDATION_SCHEMA).unwrap();
    assert_eq!(schema.name(), "t1");
    assert_eq!(schema.version(), 1);
    assert_eq!(schema.primary_key(), &["id".to_string()]);

    let expected = [
        ("id", FieldType::Int64),
        ("id_32", FieldType::Int32),
        ("id_64", FieldType::Int64),
        ("random", FieldType::Bytes),
        ("random_binary", FieldType::String),
        ("product", FieldType::String),
        ("id_uuid", FieldType::Uuid),
        ("ts", FieldType::DateTime),
        ("price", FieldType::Double),
        ("simple_items", FieldType::Array),
        ("simple_object", FieldType::Object),
        ("product_items", FieldType::Array),
    ];
    let actual: Vec<(&str, FieldType)> = schema
        .fields()
        .iter()
        .map(|f| (f.name(), f.field_type()))
        .collect();
    assert_eq!(actual, expected.to_vec());

    let items = schema.field("product_items").unwrap();
    match items.kind() {
        FieldKind::Array(item) => {
            assert_eq!(item.field_type(), FieldType::Object);
            assert_eq!(item.kind().nested().len(), 2);
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(schema.field("random").unwrap().max_length(), Some(1024));
}

#[test]
fn test_build_invalid_collection_names() {
    let raw = UPDATE_BASE_SCHEMA.as_bytes();
    for name in ["", "test-coll", "1test-coll", "$testcoll", "testcoll$", "test$coll", "abstract", "yield"] {
        let err = build(name, raw).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SchemaBuildError);
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(err.message(), "invalid collection name");
    }
}

#[test]
fn test_build_rejects_missing_primary_key() {
    let err = build_schema(
        r#"{"title": "t1", "properties": {"int_field": {"type": "integer"}, "string_field": {"type": "string"}}}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::SchemaBuildError);
}

#[test]
fn test_build_rejects_unknown_format() {
    let err = build_schema(
        r#"{"title": "t1", "properties": {"id": {"type": "integer", "format": "int16"}}, "primary_key": ["id"]}"#,
    )
    .unwrap_err();
    assert_eq!(err.message(), "unsupported format 'int16' for type 'integer' of field 'id'");
}

#[test]
fn test_schema_update_scenarios() {
    let builder = SchemaBuilder::new(CoreConfig::default());
    let existing = builder.build("t1", UPDATE_BASE_SCHEMA.as_bytes()).unwrap();

    let rejected = [
        // primary key missing
        r#"{"title": "t1", "properties": {"int_field": {"type": "integer"}, "string_field": {"type": "string"}}}"#,
        // type change on the primary key field
        r#"{"title": "t1", "properties": {"int_field": {"type": "string"}, "string_field": {"type": "string"}}, "primary_key": ["int_field"]}"#,
        // field removed
        r#"{"title": "t1", "properties": {"int_field": {"type": "integer"}}, "primary_key": ["int_field"]}"#,
        // existing fields reordered
        r#"{"title": "t1", "properties": {"string_field": {"type": "string"}, "int_field": {"type": "integer"}}, "primary_key": ["int_field"]}"#,
    ];
    for raw in rejected {
        let err = builder.build_update(&existing, raw.as_bytes()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument, "schema {}", raw);
    }

    let accepted = builder
        .build_update(
            &existing,
            br#"{"title": "t1", "properties": {"int_field": {"type": "integer"}, "string_field": {"type": "string"}, "extra_field": {"type": "string"}}, "primary_key": ["int_field"]}"#,
        )
        .unwrap();
    assert_eq!(accepted.version(), 2);
    assert!(accepted.field("extra_field").is_some());
    assert!(check_compatibility(&existing, &accepted).is_ok());
}

#[test]
fn test_compatibility_error_messages() {
    let existing = build_schema(UPDATE_BASE_SCHEMA).unwrap();
    let retyped = build_schema(
        r#"{"title": "t1", "properties": {"int_field": {"type": "string"}, "string_field": {"type": "string"}}, "primary_key": ["int_field"]}"#,
    )
    .unwrap();
    let err = check_compatibility(&existing, &retyped).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::SchemaCompatibilityError);
    assert_eq!(err.message(), "data type mismatch for field 'int_field'");
}

#[test]
fn test_reordered_fields_are_incompatible() {
    let existing = build_schema(
        r#"{"title": "t1", "properties": {"id": {"type": "integer"}, "s": {"type": "string"}, "n": {"type": "number"}}, "primary_key": ["id"]}"#,
    )
    .unwrap();
    let reordered = build_schema(
        r#"{"title": "t1", "properties": {"n": {"type": "number"}, "s": {"type": "string"}, "id": {"type": "integer"}}, "primary_key": ["id"]}"#,
    )
    .unwrap();
    let err = check_compatibility(&existing, &reordered).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::SchemaCompatibilityError);
    assert_eq!(err.message(), "position of field 's' changed");

    let interleaved = build_schema(
        r#"{"title": "t1", "properties": {"id": {"type": "integer"}, "added": {"type": "boolean"}, "s": {"type": "string"}, "n": {"type": "number"}}, "primary_key": ["id"]}"#,
    )
    .unwrap();
    assert!(check_compatibility(&existing, &interleaved).is_ok());
}

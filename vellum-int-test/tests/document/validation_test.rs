use vellum::errors::{ErrorCode, ErrorKind};
use vellum::validation::Violation;
use vellum_int_test::test_util::{
    build_schema, decode, validation_message, ADDITIONAL_PROPERTIES_SCHEMA,
    GENERIC_OBJECT_SCHEMA, VALIDATION_SCHEMA,
};

#[test]
fn test_document_validation_cases() {
    let schema = build_schema(VALIDATION_SCHEMA).unwrap();
    let uuid = uuid::Uuid::new_v4().to_string();
    let uuid_document = format!(r#"{{"id": 1, "id_uuid": "{}"}}"#, uuid);
    let now_document = format!(r#"{{"id": 1, "ts": "{}"}}"#, chrono::Utc::now().to_rfc3339());

    // (document, expected error fragment; empty means valid)
    let cases: Vec<(&str, &str)> = vec![
        (r#"{"id": 1, "product": "hello", "price": 1.01}"#, ""),
        (r#"{"id": 1, "product": "hello", "price": 1.01, "random": "ImJhc2U2NCBzdHJpbmci"}"#, ""),
        (r#"{"id": 1, "price": 1}"#, ""),
        (r#"{"id": 1.01}"#, "expected integer, but got number"),
        (r#"{"id": 1, "product": 1.01}"#, "expected string, but got number"),
        (r#"{"id": 1, "random": 1}"#, "expected string, but got number"),
        (r#"{"id": 1, "simple_items": ["1"]}"#, "expected integer, but got string"),
        (r#"{"id": 1, "simple_items": [1, 1.2]}"#, "expected integer, but got number"),
        (r#"{"id": 1, "simple_items": [1, 2]}"#, ""),
        (r#"{"id": 1, "product_items": [1, 2]}"#, "expected object, but got number"),
        (r#"{"id": 1, "product_items": [{"id": 1, "item_name": 2}]}"#, "expected string, but got number"),
        (r#"{"id": 1, "product_items": [{"id": 1, "item_name": "foo"}]}"#, ""),
        (uuid_document.as_str(), ""),
        (r#"{"id": 1, "id_uuid": "hello"}"#, "field 'id_uuid' reason ''hello' is not valid 'uuid'"),
        (r#"{"id": 1, "ts": "2015-12-21T17:42:34Z"}"#, ""),
        (now_document.as_str(), ""),
        (r#"{"id": 1, "ts": "2021-09-29T16:04:33.01234567Z"}"#, ""),
        (r#"{"id": 1, "ts": "2016-02-15"}"#, "field 'ts' reason ''2016-02-15' is not valid 'date-time'"),
        (r#"{"id": 1, "random_binary": 1}"#, "expected string, but got number"),
        (r#"{"id": 1, "random_binary": "1"}"#, ""),
        (
            r#"{"id": 1, "random_binary": "1", "extra_key": "hello"}"#,
            "reason 'additionalProperties 'extra_key' not allowed",
        ),
        (r#"{"id": 123456789, "id_32": 2147483647}"#, ""),
        (r#"{"id": 123456789, "id_32": 2147483648}"#, "reason '2147483648 is not valid 'int32'"),
        (r#"{"id": 123456789, "id_32": 2147483647, "id_64": 2147483648}"#, ""),
        (
            r#"{"id": 123456789, "id_32": 2147483647, "id_64": 9223372036854775808}"#,
            "reason '9223372036854775808 is not valid 'int64'",
        ),
        (r#"{"id": 9223372036854775807}"#, ""),
    ];

    for (document, expected) in cases {
        let message = validation_message(&schema, document);
        if expected.is_empty() {
            assert_eq!(message, None, "document {}", document);
        } else {
            let message = message.unwrap_or_default();
            assert!(
                message.contains(expected),
                "document {} expected '{}' got '{}'",
                document,
                expected,
                message
            );
        }
    }
}

#[test]
fn test_top_level_failure_names_field() {
    let schema = build_schema(VALIDATION_SCHEMA).unwrap();
    assert_eq!(
        validation_message(&schema, r#"{"id": 1, "product": 1.01}"#).unwrap(),
        "json schema validation failed for field 'product' reason 'expected string, but got number'"
    );
}

#[test]
fn test_array_item_failure_path() {
    let schema = build_schema(VALIDATION_SCHEMA).unwrap();
    let err = schema
        .validate(&decode(r#"{"id": 1, "product_items": [{"id": 1}, {"id": 2, "item_name": 2}]}"#))
        .unwrap_err();
    let violation = err.violation().unwrap();
    assert_eq!(violation.path(), "product_items.1.item_name");
    assert_eq!(
        violation.violation(),
        &Violation::TypeMismatch {
            expected: "string",
            observed: "number"
        }
    );
}

#[test]
fn test_additional_properties() {
    let schema = build_schema(ADDITIONAL_PROPERTIES_SCHEMA).unwrap();
    let cases = [
        (
            r#"{"id": 1, "simple_object": {"name": "hello", "price": 1.01}}"#,
            "json schema validation failed for field 'simple_object' reason 'additionalProperties 'price' not allowed'",
        ),
        (
            r#"{"id": 1, "complex_object": {"name": "hello", "price": 1.01}}"#,
            "json schema validation failed for field 'complex_object' reason 'additionalProperties 'price' not allowed'",
        ),
        (
            r#"{"id": 1, "complex_object": {"name": "hello", "obj": {"name": "hello", "price": 1.01}}}"#,
            "json schema validation failed for field 'complex_object.obj' reason 'additionalProperties 'price' not allowed'",
        ),
    ];
    for (document, expected) in cases {
        assert_eq!(validation_message(&schema, document).unwrap(), expected);
    }
}

#[test]
fn test_generic_object_accepts_anything() {
    let schema = build_schema(GENERIC_OBJECT_SCHEMA).unwrap();
    for document in [
        r#"{"id": 1, "simple_object": {"name": "hello", "price": 1.01}}"#,
        r#"{"id": 1, "simple_object": {"name": "hello", "obj": {"name": "hello", "price": 1.01}}}"#,
        r#"{"id": 1, "simple_object": {}}"#,
    ] {
        assert_eq!(validation_message(&schema, document), None, "document {}", document);
    }

    assert_eq!(
        validation_message(&schema, r#"{"id": 1, "simple_object": [1]}"#).unwrap(),
        "json schema validation failed for field 'simple_object' reason 'expected object, but got array'"
    );
}

#[test]
fn test_validation_error_is_bad_request() {
    let schema = build_schema(VALIDATION_SCHEMA).unwrap();
    let err = schema.validate_slice(br#"{"id": "one"}"#).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ValidationError);
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn test_validated_document_keeps_declared_types() {
    let schema = build_schema(VALIDATION_SCHEMA).unwrap();
    let document = schema
        .validate_slice(br#"{"id": 9223372036854775807, "id_32": 7, "price": 2, "product": "p", "simple_items": [1]}"#)
        .unwrap();

    // re-decoding the accepted payload yields the same values
    let reencoded = serde_json::to_vec(&document).unwrap();
    let again = schema.validate_slice(&reencoded).unwrap();
    assert_eq!(document, again);
    assert_eq!(again["id"].to_string(), "9223372036854775807");
    assert!(again["simple_items"].is_array());
}

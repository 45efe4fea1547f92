use vellum::common::{to_search_date_key, CREATED_AT, INTERNAL_ID_FIELD, UPDATED_AT};
use vellum::schema::FieldType;
use vellum_int_test::test_util::{build_schema, INT64_SCHEMA, SEARCH_SCHEMA};

#[test]
fn test_flattened_search_fields() {
    let schema = build_schema(SEARCH_SCHEMA).unwrap();
    let date_key = to_search_date_key("ts");
    let expected = vec![
        "id",
        INTERNAL_ID_FIELD,
        "id_32",
        "product",
        "id_uuid",
        "ts",
        date_key.as_str(),
        "price",
        "simple_items",
        "simple_object.name",
        "simple_object.phone",
        "simple_object.address.street",
        "simple_object.details.nested_id",
        "simple_object.details.nested_obj.id",
        "simple_object.details.nested_obj.name",
        "simple_object.details.nested_array",
        "simple_object.details.nested_string",
        CREATED_AT,
        UPDATED_AT,
    ];
    let names: Vec<&str> = schema.search_fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_search_field_types() {
    let schema = build_schema(SEARCH_SCHEMA).unwrap();
    let find = |name: &str| {
        schema
            .search_fields()
            .iter()
            .find(|f| f.name() == name)
            .cloned()
            .unwrap()
    };

    let items = find("simple_items");
    assert!(items.is_array());
    assert_eq!(items.field_type(), FieldType::Int64);
    assert_eq!(items.index_type(), "int64[]");

    let date_key = find(&to_search_date_key("ts"));
    assert!(date_key.is_derived());
    assert_eq!(date_key.field_type(), FieldType::Int64);

    assert_eq!(find("id_32").index_type(), "int32");
    assert_eq!(find("price").index_type(), "float");
    assert_eq!(find(CREATED_AT).field_type(), FieldType::DateTime);
    assert!(!find("simple_object.details.nested_string").is_array());
}

#[test]
fn test_int64_paths() {
    let schema = build_schema(INT64_SCHEMA).unwrap();
    let paths = schema.int64_paths();
    assert_eq!(paths.len(), 4);
    assert!(paths.contains("id"));
    assert!(paths.contains("nested_object.obj.intField"));
    assert!(paths.contains("array_items.id"));
    assert!(paths.contains("array_simple_items"));
    assert!(!paths.contains("simple_object"));
}

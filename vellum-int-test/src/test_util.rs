use serde_json::Value;
use vellum::common::decode_value;
use vellum::errors::VellumResult;
use vellum::schema::{CollectionSchema, SchemaBuilder};

/// Schema exercising every primitive type/format pair plus arrays and
/// nested objects.
pub const VALIDATION_SCHEMA: &str = r#"{
    "title": "t1",
    "properties": {
        "id": {"type": "integer"},
        "id_32": {"type": "integer", "format": "int32"},
        "id_64": {"type": "integer", "format": "int64"},
        "random": {"type": "string", "format": "byte", "maxLength": 1024},
        "random_binary": {"type": "string", "format": ""},
        "product": {"type": "string", "maxLength": 100},
        "id_uuid": {"type": "string", "format": "uuid"},
        "ts": {"type": "string", "format": "date-time"},
        "price": {"type": "number"},
        "simple_items": {"type": "array", "items": {"type": "integer"}},
        "simple_object": {
            "type": "object",
            "properties": {"name": {"type": "string"}}
        },
        "product_items": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "item_name": {"type": "string"}
                }
            }
        }
    },
    "primary_key": ["id"]
}"#;

/// Schema whose flattened search fields cover deep nesting.
pub const SEARCH_SCHEMA: &str = r#"{
    "title": "t1",
    "properties": {
        "id": {"type": "integer"},
        "id_32": {"type": "integer", "format": "int32"},
        "product": {"type": "string", "maxLength": 100},
        "id_uuid": {"type": "string", "format": "uuid"},
        "ts": {"type": "string", "format": "date-time"},
        "price": {"type": "number"},
        "simple_items": {"type": "array", "items": {"type": "integer"}},
        "simple_object": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "phone": {"type": "string"},
                "address": {
                    "type": "object",
                    "properties": {"street": {"type": "string"}}
                },
                "details": {
                    "type": "object",
                    "properties": {
                        "nested_id": {"type": "integer"},
                        "nested_obj": {
                            "type": "object",
                            "properties": {
                                "id": {"type": "integer"},
                                "name": {"type": "string"}
                            }
                        },
                        "nested_array": {"type": "array", "items": {"type": "integer"}},
                        "nested_string": {"type": "string"}
                    }
                }
            }
        }
    },
    "primary_key": ["id"]
}"#;

pub const ADDITIONAL_PROPERTIES_SCHEMA: &str = r#"{
    "title": "t1",
    "properties": {
        "id": {"type": "integer"},
        "simple_object": {
            "type": "object",
            "properties": {"name": {"type": "string"}}
        },
        "complex_object": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "obj": {
                    "type": "object",
                    "properties": {"name": {"type": "string"}}
                }
            }
        }
    },
    "primary_key": ["id"]
}"#;

pub const GENERIC_OBJECT_SCHEMA: &str = r#"{
    "title": "t1",
    "properties": {
        "id": {"type": "integer"},
        "simple_object": {"type": "object"}
    },
    "primary_key": ["id"]
}"#;

pub const INT64_SCHEMA: &str = r#"{
    "title": "t1",
    "properties": {
        "id": {"type": "integer"},
        "simple_object": {"type": "object"},
        "nested_object": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "obj": {
                    "type": "object",
                    "properties": {"intField": {"type": "integer"}}
                }
            }
        },
        "array_items": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "item_name": {"type": "string"}
                }
            }
        },
        "array_simple_items": {"type": "array", "items": {"type": "integer"}}
    },
    "primary_key": ["id"]
}"#;

/// Two-field schema used by the schema-update scenarios.
pub const UPDATE_BASE_SCHEMA: &str = r#"{
    "title": "t1",
    "properties": {
        "int_field": {"type": "integer"},
        "string_field": {"type": "string"}
    },
    "primary_key": ["int_field"]
}"#;

/// Builds the first version of a fixture schema for collection `t1`.
pub fn build_schema(raw: &str) -> VellumResult<CollectionSchema> {
    SchemaBuilder::default().build("t1", raw.as_bytes())
}

/// Decodes a JSON fixture keeping number literals intact.
pub fn decode(document: &str) -> Value {
    match decode_value(document.as_bytes()) {
        Ok(value) => value,
        Err(err) => panic!("fixture is not valid JSON: {}", err),
    }
}

/// Validates a document and returns the error message, if any.
pub fn validation_message(schema: &CollectionSchema, document: &str) -> Option<String> {
    schema
        .validate(&decode(document))
        .err()
        .map(|err| err.message().to_string())
}

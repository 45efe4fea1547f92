use chrono::DateTime;
use serde_json::{Map, Number, Value};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::common::util::{decode_bytes, integral_value, json_type_name};
use crate::common::DEFAULT_FIELD_SEPARATOR;
use crate::errors::{VellumError, VellumResult};
use crate::schema::{CollectionSchema, Field, FieldKind, FieldType};
use crate::validation::{FieldViolation, Violation};

const HYPHENATED_UUID_LEN: usize = 36;

#[derive(Debug, Clone, Copy)]
enum Segment<'v> {
    Key(&'v str),
    Index(usize),
}

/// Walks one document and its schema tree in lock-step.
///
/// Document keys are visited in document order and the first violation
/// ends the walk. Absent fields are never an error here.
pub struct Validator<'a> {
    schema: &'a CollectionSchema,
}

impl<'a> Validator<'a> {
    pub fn new(schema: &'a CollectionSchema) -> Self {
        Validator { schema }
    }

    pub fn validate(&self, document: &Value) -> VellumResult<()> {
        let mut path: SmallVec<[Segment; 8]> = SmallVec::new();
        let result = match document {
            Value::Object(object) => check_object(self.schema.fields(), object, &mut path),
            other => Err(Violation::TypeMismatch {
                expected: "object",
                observed: json_type_name(other),
            }),
        };

        result.map_err(|violation| {
            let violation = FieldViolation::new(&render(&path), violation);
            log::debug!("Document rejected for {}: {}", self.schema.name(), violation);
            VellumError::validation(violation)
        })
    }
}

fn render(path: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push_str(DEFAULT_FIELD_SEPARATOR);
        }
        match segment {
            Segment::Key(key) => out.push_str(key),
            Segment::Index(index) => out.push_str(&index.to_string()),
        }
    }
    out
}

// On failure `path` is left pointing at the offending location.
fn check_object<'v>(
    fields: &[Field],
    object: &'v Map<String, Value>,
    path: &mut SmallVec<[Segment<'v>; 8]>,
) -> Result<(), Violation> {
    for (key, value) in object {
        let field = match fields.iter().find(|f| f.name() == key) {
            Some(field) => field,
            None => return Err(Violation::AdditionalProperty { key: key.clone() }),
        };
        path.push(Segment::Key(key));
        check_value(field, value, path)?;
        path.pop();
    }
    Ok(())
}

fn check_value<'v>(
    field: &Field,
    value: &'v Value,
    path: &mut SmallVec<[Segment<'v>; 8]>,
) -> Result<(), Violation> {
    let field_type = field.field_type();
    match (field.kind(), value) {
        (FieldKind::Int32, Value::Number(n)) => check_integer(n, i32::MIN as i128, i32::MAX as i128, "int32"),
        (FieldKind::Int64, Value::Number(n)) => check_integer(n, i64::MIN as i128, i64::MAX as i128, "int64"),
        (FieldKind::Double, Value::Number(_)) => Ok(()),
        (FieldKind::Bool, Value::Bool(_)) => Ok(()),
        (FieldKind::String, Value::String(s)) => check_length(field, s),
        (FieldKind::Bytes, Value::String(s)) => {
            check_length(field, s)?;
            match decode_bytes(s) {
                Some(_) => Ok(()),
                None => Err(invalid_format(s, field_type)),
            }
        }
        (FieldKind::Uuid, Value::String(s)) => {
            if s.len() == HYPHENATED_UUID_LEN && Uuid::try_parse(s).is_ok() {
                Ok(())
            } else {
                Err(invalid_format(s, field_type))
            }
        }
        (FieldKind::DateTime, Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(_) => Ok(()),
            Err(_) => Err(invalid_format(s, field_type)),
        },
        (FieldKind::Array(item), Value::Array(items)) => {
            for (index, element) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                check_value(item, element, path)?;
                path.pop();
            }
            Ok(())
        }
        (FieldKind::Object(nested), Value::Object(object)) => check_object(nested, object, path),
        (FieldKind::GenericObject, Value::Object(_)) => Ok(()),
        (_, other) => Err(Violation::TypeMismatch {
            expected: field_type.json_type(),
            observed: json_type_name(other),
        }),
    }
}

fn check_integer(number: &Number, min: i128, max: i128, format: &'static str) -> Result<(), Violation> {
    let literal = number.to_string();
    match integral_value(&literal) {
        None => Err(Violation::TypeMismatch {
            expected: "integer",
            observed: "number",
        }),
        Some(Some(v)) if v >= min && v <= max => Ok(()),
        Some(_) => Err(Violation::OutOfRange { literal, format }),
    }
}

fn check_length(field: &Field, value: &str) -> Result<(), Violation> {
    if let Some(limit) = field.max_length() {
        let actual = value.chars().count();
        if actual > limit {
            return Err(Violation::MaxLength { limit, actual });
        }
    }
    Ok(())
}

fn invalid_format(value: &str, field_type: FieldType) -> Violation {
    Violation::InvalidFormat {
        value: value.to_string(),
        format: field_type.format().unwrap_or_default(),
    }
}

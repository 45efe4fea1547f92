use crate::common::{to_search_date_key, CREATED_AT, INTERNAL_ID_FIELD, UPDATED_AT};
use crate::schema::{Field, FieldKind, FieldType};

/// One indexable leaf of a collection, as seen by the search indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    name: String,
    field_type: FieldType,
    is_array: bool,
    derived: bool,
}

impl SearchField {
    fn leaf(name: String, field_type: FieldType, is_array: bool) -> Self {
        SearchField {
            name,
            field_type,
            is_array,
            derived: false,
        }
    }

    fn derived(name: String, field_type: FieldType) -> Self {
        SearchField {
            name,
            field_type,
            is_array: false,
            derived: true,
        }
    }

    /// Flattened dotted path of the leaf.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the leaf sits below an array, so one document holds many values.
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Whether the field is synthesized by the server rather than declared.
    pub fn is_derived(&self) -> bool {
        self.derived
    }

    /// Column type understood by the search backend.
    pub fn index_type(&self) -> String {
        let base = match self.field_type {
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Double => "float",
            FieldType::Bool => "bool",
            FieldType::String | FieldType::Bytes | FieldType::Uuid | FieldType::DateTime => "string",
            FieldType::Array | FieldType::Object => "object",
        };
        if self.is_array {
            format!("{}[]", base)
        } else {
            base.to_string()
        }
    }
}

/// Flattens the schema tree into the ordered list of search fields.
///
/// The internal identifier follows the first primary-key field, every scalar
/// date-time field is followed by its numeric date key, and the timestamps
/// close the list.
pub(crate) fn build_search_fields(fields: &[Field], separator: &str) -> Vec<SearchField> {
    let mut out = Vec::with_capacity(fields.len() + 3);
    let mut id_emitted = false;

    for field in fields {
        flatten(field, field.name().to_string(), false, separator, &mut out);
        if field.primary_key_order() == Some(1) {
            out.push(SearchField::derived(INTERNAL_ID_FIELD.to_string(), FieldType::String));
            id_emitted = true;
        }
    }

    if !id_emitted {
        out.push(SearchField::derived(INTERNAL_ID_FIELD.to_string(), FieldType::String));
    }
    out.push(SearchField::derived(CREATED_AT.to_string(), FieldType::DateTime));
    out.push(SearchField::derived(UPDATED_AT.to_string(), FieldType::DateTime));
    out
}

fn flatten(field: &Field, path: String, in_array: bool, separator: &str, out: &mut Vec<SearchField>) {
    match field.kind() {
        FieldKind::Array(item) => flatten(item, path, true, separator, out),
        FieldKind::Object(nested) => {
            for child in nested {
                let child_path = format!("{}{}{}", path, separator, child.name());
                flatten(child, child_path, in_array, separator, out);
            }
        }
        FieldKind::GenericObject => {}
        FieldKind::DateTime => {
            let date_key = to_search_date_key(&path);
            out.push(SearchField::leaf(path, FieldType::DateTime, in_array));
            if !in_array {
                out.push(SearchField::derived(date_key, FieldType::Int64));
            }
        }
        FieldKind::Int32
        | FieldKind::Int64
        | FieldKind::String
        | FieldKind::Bool
        | FieldKind::Bytes
        | FieldKind::Uuid
        | FieldKind::Double => {
            out.push(SearchField::leaf(path, field.field_type(), in_array));
        }
    }
}

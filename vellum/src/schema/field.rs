use std::fmt::{Display, Formatter};

/// The resolved type tag of a schema field.
///
/// This is the flat view of [FieldKind]: containers report `Array` / `Object`
/// without their contents. It is what compatibility checks and search
/// indexing compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int32,
    Int64,
    String,
    Bool,
    Bytes,
    Uuid,
    DateTime,
    Double,
    Array,
    Object,
}

impl FieldType {
    /// The JSON-schema type name a document value must have.
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::Int32 | FieldType::Int64 => "integer",
            FieldType::String | FieldType::Bytes | FieldType::Uuid | FieldType::DateTime => "string",
            FieldType::Bool => "boolean",
            FieldType::Double => "number",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    /// The `format` qualifier that refines the JSON type, if any.
    pub fn format(&self) -> Option<&'static str> {
        match self {
            FieldType::Int32 => Some("int32"),
            FieldType::Int64 => Some("int64"),
            FieldType::Bytes => Some("byte"),
            FieldType::Uuid => Some("uuid"),
            FieldType::DateTime => Some("date-time"),
            _ => None,
        }
    }

    /// Types allowed to participate in a primary key.
    pub fn is_primary_key_type(&self) -> bool {
        matches!(
            self,
            FieldType::Int32
                | FieldType::Int64
                | FieldType::String
                | FieldType::Bytes
                | FieldType::Uuid
                | FieldType::DateTime
        )
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.format() {
            Some(format) => write!(f, "{}({})", self.json_type(), format),
            None => write!(f, "{}", self.json_type()),
        }
    }
}

/// The shape of a field: a primitive, an array with its item descriptor,
/// or an object with its declared properties.
///
/// Exactly one shape describes a field, so validation and flattening are a
/// single exhaustive match over this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Int32,
    Int64,
    String,
    Bool,
    Bytes,
    Uuid,
    DateTime,
    Double,
    /// Array with the descriptor every item must satisfy.
    Array(Box<Field>),
    /// Object whose keys are limited to the declared fields.
    Object(Vec<Field>),
    /// Object declared without properties; any content is accepted.
    GenericObject,
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Int32 => FieldType::Int32,
            FieldKind::Int64 => FieldType::Int64,
            FieldKind::String => FieldType::String,
            FieldKind::Bool => FieldType::Bool,
            FieldKind::Bytes => FieldType::Bytes,
            FieldKind::Uuid => FieldType::Uuid,
            FieldKind::DateTime => FieldType::DateTime,
            FieldKind::Double => FieldType::Double,
            FieldKind::Array(_) => FieldType::Array,
            FieldKind::Object(_) | FieldKind::GenericObject => FieldType::Object,
        }
    }

    /// Declared nested fields; empty for everything but typed objects.
    pub fn nested(&self) -> &[Field] {
        match self {
            FieldKind::Object(fields) => fields,
            _ => &[],
        }
    }

    /// Item descriptor; `None` for everything but arrays.
    pub fn item(&self) -> Option<&Field> {
        match self {
            FieldKind::Array(item) => Some(item),
            _ => None,
        }
    }
}

/// One node of a collection's schema tree.
///
/// Array item descriptors are fields too; their `name` is the name of the
/// array they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) max_length: Option<usize>,
    pub(crate) primary_key_order: Option<u32>,
    pub(crate) auto_generate: bool,
    pub(crate) description: Option<String>,
}

impl Field {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Field {
            name: name.to_string(),
            kind,
            max_length: None,
            primary_key_order: None,
            auto_generate: false,
            description: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// 1-based position in the primary key, if the field belongs to it.
    pub fn primary_key_order(&self) -> Option<u32> {
        self.primary_key_order
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key_order.is_some()
    }

    /// Whether the server generates the value when the client omits it.
    pub fn auto_generate(&self) -> bool {
        self.auto_generate
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Looks up a declared nested field by name.
    pub fn nested_field(&self, name: &str) -> Option<&Field> {
        self.kind.nested().iter().find(|f| f.name == name)
    }
}

use indexmap::IndexMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::common::{
    INITIAL_SCHEMA_VERSION, RESERVED_COLLECTION_NAMES, RESERVED_FIELD_NAMES, RESERVED_PREFIX,
};
use crate::config::CoreConfig;
use crate::errors::{ErrorKind, VellumError, VellumResult};
use crate::schema::evolution::check_compatibility;
use crate::schema::search::build_search_fields;
use crate::schema::{CollectionSchema, Field, FieldKind, FieldType, Int64Paths};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("name pattern is a valid regex")
});

/// Wire form of a collection schema.
#[derive(Debug, Deserialize)]
struct SchemaDefinition {
    title: Option<String>,
    description: Option<String>,
    properties: Option<IndexMap<String, FieldDefinition>>,
    primary_key: Option<Vec<String>>,
}

/// Wire form of one property.
#[derive(Debug, Deserialize)]
struct FieldDefinition {
    #[serde(rename = "type")]
    type_name: Option<String>,
    format: Option<String>,
    properties: Option<IndexMap<String, FieldDefinition>>,
    items: Option<Box<FieldDefinition>>,
    #[serde(rename = "maxLength")]
    max_length: Option<usize>,
    description: Option<String>,
    #[serde(rename = "autoGenerate", default)]
    auto_generate: bool,
}

/// Turns JSON-schema collection definitions into [CollectionSchema]s.
///
/// The builder is stateless apart from its configuration; it can be shared
/// freely between threads.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum::schema::SchemaBuilder;
///
/// let builder = SchemaBuilder::default();
/// let schema = builder.build("orders", br#"{
///     "title": "orders",
///     "properties": { "id": { "type": "integer" } },
///     "primary_key": ["id"]
/// }"#)?;
/// assert_eq!(schema.version(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: CoreConfig,
}

impl SchemaBuilder {
    pub fn new(config: CoreConfig) -> Self {
        SchemaBuilder { config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Builds the first version of a collection's schema.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::SchemaBuildError] for a malformed definition, an
    /// unknown type/format pair, an invalid name or an invalid primary key.
    pub fn build(&self, name: &str, raw: &[u8]) -> VellumResult<CollectionSchema> {
        self.build_version(name, raw, INITIAL_SCHEMA_VERSION)
    }

    /// Builds the next version of an existing schema.
    ///
    /// The candidate is checked against `existing` before it is returned, so a
    /// successful result is always safe to publish.
    ///
    /// # Errors
    ///
    /// Everything [SchemaBuilder::build] reports, plus
    /// [ErrorKind::SchemaCompatibilityError] when a field is removed or
    /// retyped or the primary key changes.
    pub fn build_update(&self, existing: &CollectionSchema, raw: &[u8]) -> VellumResult<CollectionSchema> {
        let candidate = self.build_version(existing.name(), raw, existing.version() + 1)?;
        check_compatibility(existing, &candidate)?;
        Ok(candidate)
    }

    fn build_version(&self, name: &str, raw: &[u8], version: u32) -> VellumResult<CollectionSchema> {
        validate_collection_name(name)?;

        let definition: SchemaDefinition = serde_json::from_slice(raw).map_err(|err| {
            log::error!("Malformed schema for collection {}: {}", name, err);
            VellumError::new(&format!("malformed schema: {}", err), ErrorKind::SchemaBuildError)
        })?;

        let title = definition.title.unwrap_or_else(|| name.to_string());
        if title != name {
            return Err(build_error(&format!(
                "collection name is not same as schema name '{}' '{}'",
                name, title
            )));
        }

        let properties = match definition.properties {
            Some(properties) if !properties.is_empty() => properties,
            _ => return Err(build_error("missing properties in schema")),
        };

        let separator = self.config.field_separator();
        let mut fields = Vec::with_capacity(properties.len());
        for (field_name, field_definition) in properties {
            validate_field_name(&field_name, true)?;
            let field = resolve_field(&field_name, &field_name, field_definition, separator)?;
            fields.push(field);
        }

        let primary_key = definition.primary_key.unwrap_or_default();
        assign_primary_key(&mut fields, &primary_key)?;

        let int64_paths = Int64Paths::from_fields(&fields, separator);
        let search_fields = build_search_fields(&fields, separator);

        log::debug!(
            "Built schema for collection {} version {} with {} fields",
            name,
            version,
            fields.len()
        );

        Ok(CollectionSchema {
            name: name.to_string(),
            title,
            description: definition.description,
            version,
            fields,
            primary_key,
            int64_paths,
            search_fields,
            raw: raw.to_vec(),
        })
    }
}

/// Builds the first version of a schema with the default configuration.
pub fn build(name: &str, raw: &[u8]) -> VellumResult<CollectionSchema> {
    SchemaBuilder::default().build(name, raw)
}

fn resolve_field(
    name: &str,
    path: &str,
    definition: FieldDefinition,
    separator: &str,
) -> VellumResult<Field> {
    let type_name = match definition.type_name.as_deref() {
        Some(type_name) => type_name,
        None => return Err(build_error(&format!("missing type for field '{}'", path))),
    };
    let format = definition.format.as_deref().unwrap_or("");

    let kind = match (type_name, format) {
        ("integer", "") | ("integer", "int64") => FieldKind::Int64,
        ("integer", "int32") => FieldKind::Int32,
        ("string", "") => FieldKind::String,
        ("string", "byte") => FieldKind::Bytes,
        ("string", "uuid") => FieldKind::Uuid,
        ("string", "date-time") => FieldKind::DateTime,
        ("number", "") => FieldKind::Double,
        ("boolean", "") => FieldKind::Bool,
        ("array", _) => {
            let items = match definition.items {
                Some(items) => items,
                None => {
                    return Err(build_error(&format!("missing items for array field '{}'", path)))
                }
            };
            // the item descriptor carries the array's own name
            let item = resolve_field(name, path, *items, separator)?;
            FieldKind::Array(Box::new(item))
        }
        ("object", _) => match definition.properties {
            Some(properties) if !properties.is_empty() => {
                let mut nested = Vec::with_capacity(properties.len());
                for (child_name, child_definition) in properties {
                    validate_field_name(&child_name, false)?;
                    let child_path = format!("{}{}{}", path, separator, child_name);
                    nested.push(resolve_field(&child_name, &child_path, child_definition, separator)?);
                }
                FieldKind::Object(nested)
            }
            _ => FieldKind::GenericObject,
        },
        (type_name, "") => {
            return Err(build_error(&format!(
                "unsupported type '{}' for field '{}'",
                type_name, path
            )))
        }
        (type_name, format) => {
            return Err(build_error(&format!(
                "unsupported format '{}' for type '{}' of field '{}'",
                format, type_name, path
            )))
        }
    };

    if definition.auto_generate
        && matches!(
            kind.field_type(),
            FieldType::Bool | FieldType::Double | FieldType::Array | FieldType::Object
        )
    {
        return Err(build_error(&format!(
            "autoGenerate is not supported for type '{}' of field '{}'",
            kind.field_type(),
            path
        )));
    }

    Ok(Field {
        name: name.to_string(),
        kind,
        max_length: definition.max_length,
        primary_key_order: None,
        auto_generate: definition.auto_generate,
        description: definition.description,
    })
}

fn assign_primary_key(fields: &mut [Field], primary_key: &[String]) -> VellumResult<()> {
    if primary_key.is_empty() {
        return Err(build_error("missing primary key field in schema"));
    }

    if let Some(duplicate) = primary_key.iter().duplicates().next() {
        return Err(build_error(&format!("duplicate primary key field '{}'", duplicate)));
    }

    for (position, key) in primary_key.iter().enumerate() {
        let field = match fields.iter_mut().find(|f| f.name == *key) {
            Some(field) => field,
            None => {
                return Err(build_error(&format!(
                    "missing primary key field '{}' in the properties",
                    key
                )))
            }
        };
        if !field.field_type().is_primary_key_type() {
            return Err(build_error(&format!(
                "unsupported primary key type '{}' for field '{}'",
                field.field_type(),
                key
            )));
        }
        field.primary_key_order = Some(position as u32 + 1);
    }
    Ok(())
}

fn validate_collection_name(name: &str) -> VellumResult<()> {
    if !NAME_PATTERN.is_match(name) || RESERVED_COLLECTION_NAMES.contains(&name) {
        return Err(build_error("invalid collection name"));
    }
    Ok(())
}

fn validate_field_name(name: &str, top_level: bool) -> VellumResult<()> {
    if !NAME_PATTERN.is_match(name) || name.starts_with(RESERVED_PREFIX) {
        return Err(build_error(&format!("invalid field name '{}'", name)));
    }
    if top_level && RESERVED_FIELD_NAMES.contains(&name) {
        return Err(build_error(&format!("field name '{}' is reserved", name)));
    }
    Ok(())
}

fn build_error(message: &str) -> VellumError {
    log::error!("{}", message);
    VellumError::new(message, ErrorKind::SchemaBuildError)
}

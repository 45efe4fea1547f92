use serde_json::Value;

use crate::common::util::decode_value;
use crate::errors::VellumResult;
use crate::schema::{Field, Int64Paths, SearchField};
use crate::validation::Validator;

/// An immutable, versioned schema for one collection.
///
/// Instances are produced by [crate::schema::SchemaBuilder] and never
/// mutated afterwards; a schema change yields a new instance with the next
/// version number.
#[derive(Debug, Clone)]
pub struct CollectionSchema {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) version: u32,
    pub(crate) fields: Vec<Field>,
    pub(crate) primary_key: Vec<String>,
    pub(crate) int64_paths: Int64Paths,
    pub(crate) search_fields: Vec<SearchField>,
    pub(crate) raw: Vec<u8>,
}

impl CollectionSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Top-level fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Primary key field names in key order.
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Primary key fields in key order.
    pub fn primary_key_fields(&self) -> Vec<&Field> {
        self.primary_key
            .iter()
            .filter_map(|name| self.field(name))
            .collect()
    }

    /// Dotted paths holding 64-bit integers, for consumers that must keep
    /// those values exact.
    pub fn int64_paths(&self) -> &Int64Paths {
        &self.int64_paths
    }

    pub fn search_fields(&self) -> &[SearchField] {
        &self.search_fields
    }

    /// The definition bytes exactly as submitted.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Validates a decoded document against this schema.
    pub fn validate(&self, document: &Value) -> VellumResult<()> {
        Validator::new(self).validate(document)
    }

    /// Decodes and validates a document, returning the decoded value.
    ///
    /// Numbers keep their literal text, so 64-bit bounds are checked on the
    /// digits the client sent.
    pub fn validate_slice(&self, payload: &[u8]) -> VellumResult<Value> {
        let document = decode_value(payload)?;
        self.validate(&document)?;
        Ok(document)
    }
}

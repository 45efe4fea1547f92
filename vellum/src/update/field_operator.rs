use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::value::{to_raw_value, RawValue};
use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::common::util::{decode_raw_array, decode_raw_object, encode_bytes, raw_type_name};
use crate::common::{DEFAULT_FIELD_SEPARATOR, SET_OPERATOR, UNSET_OPERATOR};
use crate::config::CoreConfig;
use crate::errors::{ErrorKind, VellumError, VellumResult};
use crate::update::FieldPath;

/// The update operators understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOperatorType {
    Set,
    Unset,
}

impl FieldOperatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOperatorType::Set => SET_OPERATOR,
            FieldOperatorType::Unset => UNSET_OPERATOR,
        }
    }

    pub fn from_name(name: &str) -> Option<FieldOperatorType> {
        match name {
            SET_OPERATOR => Some(FieldOperatorType::Set),
            UNSET_OPERATOR => Some(FieldOperatorType::Unset),
            _ => None,
        }
    }
}

impl Display for FieldOperatorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parsed `$set` / `$unset` instructions of one update request.
///
/// Built once per request and applied to one stored document with
/// [FieldOperatorSet::merge_and_get]. `$set` is applied first and `$unset`
/// last, so a key named by both ends up removed. `$set` values keep the
/// exact text of the request.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum::update::build_field_operators;
///
/// let operators = build_field_operators(br#"{"$set": {"d.f": 29}, "$unset": ["c"]}"#)?;
/// let merged = operators.merge_and_get(br#"{"c": 1, "d": {"f": 22}}"#)?;
/// assert_eq!(merged, br#"{"d":{"f":29}}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldOperatorSet {
    pub(crate) set: Vec<(FieldPath, Box<RawValue>)>,
    pub(crate) unset: Vec<FieldPath>,
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    #[serde(rename = "$set", skip_serializing_if = "IndexMap::is_empty")]
    set: IndexMap<&'a str, &'a RawValue>,
    #[serde(rename = "$unset", skip_serializing_if = "Vec::is_empty")]
    unset: Vec<&'a str>,
}

/// Parses an update request with the default field separator.
pub fn build_field_operators(request: &[u8]) -> VellumResult<FieldOperatorSet> {
    FieldOperatorSet::parse(request, DEFAULT_FIELD_SEPARATOR)
}

impl FieldOperatorSet {
    pub fn builder() -> FieldOperatorSetBuilder {
        FieldOperatorSetBuilder::default()
    }

    /// Parses an update request using the configured field separator.
    pub fn parse_with(request: &[u8], config: &CoreConfig) -> VellumResult<FieldOperatorSet> {
        FieldOperatorSet::parse(request, config.field_separator())
    }

    fn parse(request: &[u8], separator: &str) -> VellumResult<FieldOperatorSet> {
        if request.iter().all(u8::is_ascii_whitespace) {
            return Ok(FieldOperatorSet::default());
        }

        let body: Box<RawValue> = match serde_json::from_slice(request) {
            Ok(body) => body,
            Err(err) => {
                log::error!("Malformed update request: {}", err);
                return Err(VellumError::new_with_cause(
                    "malformed update request",
                    ErrorKind::UpdateParseError,
                    VellumError::from(err),
                ));
            }
        };
        if raw_type_name(&body) != "object" {
            return Err(parse_error(&format!(
                "update request must be an object, but got {}",
                raw_type_name(&body)
            )));
        }

        let mut operators = FieldOperatorSet::default();
        for (name, value) in decode_raw_object(&body)? {
            match FieldOperatorType::from_name(&name) {
                Some(FieldOperatorType::Set) => operators.set = parse_set(&value, separator)?,
                Some(FieldOperatorType::Unset) => operators.unset = parse_unset(&value, separator)?,
                None => {
                    return Err(parse_error(&format!("unsupported update operator '{}'", name)))
                }
            }
        }
        Ok(operators)
    }

    /// `$set` instructions in request order, values as sent.
    pub fn set_operations(&self) -> &[(FieldPath, Box<RawValue>)] {
        &self.set
    }

    /// `$unset` paths in request order.
    pub fn unset_operations(&self) -> &[FieldPath] {
        &self.unset
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }

    /// Operators present in this set, in application order.
    pub fn operator_types(&self) -> Vec<FieldOperatorType> {
        let mut types = Vec::with_capacity(2);
        if !self.set.is_empty() {
            types.push(FieldOperatorType::Set);
        }
        if !self.unset.is_empty() {
            types.push(FieldOperatorType::Unset);
        }
        types
    }

    /// Distinct top-level document fields this update touches.
    pub fn updated_fields(&self) -> Vec<&str> {
        self.set
            .iter()
            .map(|(path, _)| path.root())
            .chain(self.unset.iter().map(FieldPath::root))
            .unique()
            .collect()
    }

    /// Renders the canonical request body for this operator set.
    pub fn to_request(&self) -> VellumResult<Vec<u8>> {
        let request = UpdateRequest {
            set: self.set.iter().map(|(path, value)| (path.key(), value.as_ref())).collect(),
            unset: self.unset.iter().map(FieldPath::key).collect(),
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

fn parse_set(value: &RawValue, separator: &str) -> VellumResult<Vec<(FieldPath, Box<RawValue>)>> {
    if raw_type_name(value) != "object" {
        return Err(parse_error(&format!(
            "'{}' must be an object, but got {}",
            SET_OPERATOR,
            raw_type_name(value)
        )));
    }

    decode_raw_object(value)?
        .into_iter()
        .map(|(key, value)| Ok((FieldPath::parse(&key, separator)?, value)))
        .collect()
}

fn parse_unset(value: &RawValue, separator: &str) -> VellumResult<Vec<FieldPath>> {
    if raw_type_name(value) != "array" {
        return Err(parse_error(&format!(
            "'{}' must be an array, but got {}",
            UNSET_OPERATOR,
            raw_type_name(value)
        )));
    }

    decode_raw_array(value)?
        .into_iter()
        .map(|key| match raw_type_name(&key) {
            "string" => {
                let key: String = serde_json::from_str(key.get())?;
                FieldPath::parse(&key, separator)
            }
            other => Err(parse_error(&format!(
                "'{}' keys must be strings, but got {}",
                UNSET_OPERATOR, other
            ))),
        })
        .collect()
}

pub(crate) fn parse_error(message: &str) -> VellumError {
    log::error!("{}", message);
    VellumError::new(message, ErrorKind::UpdateParseError)
}

/// Programmatic construction of a [FieldOperatorSet].
///
/// Keys are validated when [FieldOperatorSetBuilder::build] is called.
#[derive(Debug, Default)]
pub struct FieldOperatorSetBuilder {
    set: Vec<(String, Value)>,
    unset: Vec<String>,
}

impl FieldOperatorSetBuilder {
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set.push((key.to_string(), value.into()));
        self
    }

    /// Sets a byte value, stored the way byte fields travel in documents.
    pub fn set_bytes(mut self, key: &str, bytes: &[u8]) -> Self {
        self.set.push((key.to_string(), encode_bytes(bytes)));
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.unset.push(key.to_string());
        self
    }

    pub fn build(self) -> VellumResult<FieldOperatorSet> {
        let mut operators = FieldOperatorSet::default();
        for (key, value) in self.set {
            let path = FieldPath::parse(&key, DEFAULT_FIELD_SEPARATOR)?;
            let value = to_raw_value(&value)?;
            // a repeated key replaces the earlier value, as in a JSON object
            match operators.set.iter_mut().find(|(p, _)| *p == path) {
                Some(existing) => existing.1 = value,
                None => operators.set.push((path, value)),
            }
        }
        for key in self.unset {
            operators.unset.push(FieldPath::parse(&key, DEFAULT_FIELD_SEPARATOR)?);
        }
        Ok(operators)
    }
}

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::common::util::{decode_raw_array, decode_raw_object, raw_type_name};
use crate::errors::{ErrorKind, VellumError, VellumResult};

/// A document whose containers are decoded and whose scalars are kept as
/// the exact text they arrived with.
///
/// Serializing writes containers compactly and every scalar verbatim, so
/// values an update never touches leave the merge byte-for-byte.
#[derive(Debug, Clone)]
pub(crate) enum RawNode {
    Scalar(Box<RawValue>),
    Array(Vec<RawNode>),
    Object(IndexMap<String, RawNode>),
}

impl RawNode {
    pub(crate) fn from_raw(raw: Box<RawValue>) -> VellumResult<RawNode> {
        match raw_type_name(&raw) {
            "object" => {
                let members = decode_raw_object(&raw)?
                    .into_iter()
                    .map(|(key, value)| Ok((key, RawNode::from_raw(value)?)))
                    .collect::<VellumResult<IndexMap<_, _>>>()?;
                Ok(RawNode::Object(members))
            }
            "array" => {
                let items = decode_raw_array(&raw)?
                    .into_iter()
                    .map(RawNode::from_raw)
                    .collect::<VellumResult<Vec<_>>>()?;
                Ok(RawNode::Array(items))
            }
            _ => Ok(RawNode::Scalar(raw)),
        }
    }
}

impl Serialize for RawNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawNode::Scalar(raw) => raw.serialize(serializer),
            RawNode::Array(items) => items.serialize(serializer),
            RawNode::Object(members) => members.serialize(serializer),
        }
    }
}

/// Decodes a stored document, which must be a JSON object.
pub(crate) fn decode_document(payload: &[u8]) -> VellumResult<IndexMap<String, RawNode>> {
    let raw: Box<RawValue> = serde_json::from_slice(payload).map_err(|err| {
        VellumError::new(&format!("malformed JSON payload: {}", err), ErrorKind::EncodingError)
    })?;
    match RawNode::from_raw(raw)? {
        RawNode::Object(members) => Ok(members),
        RawNode::Scalar(raw) => Err(not_an_object(raw_type_name(&raw))),
        RawNode::Array(_) => Err(not_an_object("array")),
    }
}

fn not_an_object(observed: &str) -> VellumError {
    VellumError::new(
        &format!("expected a JSON object, but got {}", observed),
        ErrorKind::EncodingError,
    )
}

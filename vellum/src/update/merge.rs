use indexmap::IndexMap;

use crate::errors::VellumResult;
use crate::update::field_operator::parse_error;
use crate::update::raw_document::{decode_document, RawNode};
use crate::update::{FieldOperatorSet, FieldPath};

type RawObject = IndexMap<String, RawNode>;

impl FieldOperatorSet {
    /// Applies the operators to a serialized document and returns the merged
    /// document as compact JSON.
    ///
    /// `$set` runs first and `$unset` last. Existing keys keep their
    /// position, new keys are appended in request order, and every scalar
    /// (untouched or set) keeps the exact text it was sent with.
    ///
    /// # Errors
    ///
    /// [crate::errors::ErrorKind::EncodingError] when `existing` is not a JSON
    /// object and [crate::errors::ErrorKind::UpdateParseError] when a `$set`
    /// path has to descend through a non-object value. Nothing is produced
    /// unless every operator applies.
    pub fn merge_and_get(&self, existing: &[u8]) -> VellumResult<Vec<u8>> {
        let mut document = decode_document(existing)?;
        for (path, value) in &self.set {
            let value = RawNode::from_raw(value.clone())?;
            set_path(&mut document, path, path.segments(), value)?;
        }
        for path in &self.unset {
            unset_path(&mut document, path.segments());
        }
        Ok(serde_json::to_vec(&document)?)
    }
}

fn set_path(object: &mut RawObject, path: &FieldPath, segments: &[String], value: RawNode) -> VellumResult<()> {
    let (key, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    if rest.is_empty() {
        object.insert(key.clone(), value);
        return Ok(());
    }

    let child = object
        .entry(key.clone())
        .or_insert_with(|| RawNode::Object(IndexMap::new()));
    match child {
        RawNode::Object(nested) => set_path(nested, path, rest, value),
        _ => Err(parse_error(&format!(
            "cannot set '{}': '{}' is not an object",
            path, key
        ))),
    }
}

// Missing or non-object parents make this a no-op; emptied parents stay.
fn unset_path(object: &mut RawObject, segments: &[String]) {
    match segments {
        [] => {}
        [leaf] => {
            object.shift_remove(leaf);
        }
        [key, rest @ ..] => {
            if let Some(RawNode::Object(nested)) = object.get_mut(key) {
                unset_path(nested, rest);
            }
        }
    }
}

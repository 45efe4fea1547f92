use crate::errors::{ErrorKind, VellumError, VellumResult};
use crate::schema::{CollectionSchema, Field, FieldKind};

/// Checks that `candidate` can replace `existing` without invalidating
/// stored documents.
///
/// Fields may be added anywhere in the tree. Removing a field, moving it
/// relative to the other existing fields, changing its type or changing the
/// primary key (names or order) is rejected.
pub fn check_compatibility(existing: &CollectionSchema, candidate: &CollectionSchema) -> VellumResult<()> {
    if existing.primary_key() != candidate.primary_key() {
        return Err(compatibility_error("primary key changes are not allowed"));
    }
    compare_fields(existing.fields(), candidate.fields(), None)
}

fn compare_fields(existing: &[Field], candidate: &[Field], parent: Option<&str>) -> VellumResult<()> {
    // candidate index of the previous existing field; existing fields must
    // appear in the candidate in their original order
    let mut previous: Option<usize> = None;
    for old in existing {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, old.name()),
            None => old.name().to_string(),
        };
        let (position, new) = match candidate.iter().enumerate().find(|(_, f)| f.name() == old.name()) {
            Some(found) => found,
            None => return Err(compatibility_error(&format!("field '{}' is removed", path))),
        };
        if previous.is_some_and(|previous| position < previous) {
            return Err(compatibility_error(&format!("position of field '{}' changed", path)));
        }
        previous = Some(position);
        compare_kinds(old.kind(), new.kind(), &path)?;
    }
    Ok(())
}

fn compare_kinds(existing: &FieldKind, candidate: &FieldKind, path: &str) -> VellumResult<()> {
    match (existing, candidate) {
        (FieldKind::Object(old), FieldKind::Object(new)) => compare_fields(old, new, Some(path)),
        (FieldKind::Array(old), FieldKind::Array(new)) => compare_kinds(old.kind(), new.kind(), path),
        (FieldKind::GenericObject, FieldKind::GenericObject) => Ok(()),
        // typed and generic objects report the same type tag but are not interchangeable
        (FieldKind::Object(_), FieldKind::GenericObject)
        | (FieldKind::GenericObject, FieldKind::Object(_)) => Err(type_mismatch(path)),
        (old, new) if old.field_type() == new.field_type() => Ok(()),
        _ => Err(type_mismatch(path)),
    }
}

fn type_mismatch(path: &str) -> VellumError {
    compatibility_error(&format!("data type mismatch for field '{}'", path))
}

fn compatibility_error(message: &str) -> VellumError {
    log::error!("{}", message);
    VellumError::new(message, ErrorKind::SchemaCompatibilityError)
}

use std::collections::BTreeSet;

use crate::schema::{Field, FieldKind};

/// Dotted paths whose values are 64-bit integers.
///
/// Serialization and search-indexing collaborators consult this set to keep
/// such values precise (clients without native 64-bit integers receive them
/// as strings). Paths reached through arrays use the array's path; paths
/// inside objects are joined with the field separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Int64Paths {
    paths: BTreeSet<String>,
}

impl Int64Paths {
    pub(crate) fn from_fields(fields: &[Field], separator: &str) -> Self {
        let mut paths = BTreeSet::new();
        for field in fields {
            collect(field, field.name().to_string(), separator, &mut paths);
        }
        Int64Paths { paths }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

fn collect(field: &Field, path: String, separator: &str, out: &mut BTreeSet<String>) {
    match field.kind() {
        FieldKind::Int64 => {
            out.insert(path);
        }
        FieldKind::Array(item) => collect(item, path, separator, out),
        FieldKind::Object(nested) => {
            for child in nested {
                collect(child, format!("{}{}{}", path, separator, child.name()), separator, out);
            }
        }
        FieldKind::Int32
        | FieldKind::String
        | FieldKind::Bool
        | FieldKind::Bytes
        | FieldKind::Uuid
        | FieldKind::DateTime
        | FieldKind::Double
        | FieldKind::GenericObject => {}
    }
}

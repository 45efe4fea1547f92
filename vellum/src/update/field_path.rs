use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

use crate::errors::{ErrorKind, VellumError, VellumResult};

/// A parsed update key: the full key as sent plus its path segments.
///
/// `d.f` addresses field `f` of the object stored under `d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    key: String,
    segments: SmallVec<[String; 4]>,
}

impl FieldPath {
    /// Splits `key` on `separator`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::UpdateParseError] for an empty key or an empty
    /// segment (`a..b`, `.a`, `a.`).
    pub fn parse(key: &str, separator: &str) -> VellumResult<FieldPath> {
        if key.is_empty() {
            log::error!("Update key cannot be empty");
            return Err(VellumError::new(
                "update key cannot be empty",
                ErrorKind::UpdateParseError,
            ));
        }

        let segments: SmallVec<[String; 4]> = key.split(separator).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            log::error!("Update key {} has an empty path segment", key);
            return Err(VellumError::new(
                &format!("invalid update key '{}'", key),
                ErrorKind::UpdateParseError,
            ));
        }

        Ok(FieldPath {
            key: key.to_string(),
            segments,
        })
    }

    /// The key exactly as written in the request.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The top-level document field this path lands in.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

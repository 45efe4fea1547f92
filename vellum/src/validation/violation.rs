use std::fmt::{Display, Formatter};

/// The reason a document value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The JSON type of the value differs from the declared one.
    TypeMismatch {
        expected: &'static str,
        observed: &'static str,
    },
    /// A string does not parse in the declared format.
    InvalidFormat { value: String, format: &'static str },
    /// An integer literal does not fit the declared width.
    OutOfRange { literal: String, format: &'static str },
    /// A string is longer than `maxLength` characters.
    MaxLength { limit: usize, actual: usize },
    /// An object carries a key its schema does not declare.
    AdditionalProperty { key: String },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::TypeMismatch { expected, observed } => {
                write!(f, "expected {}, but got {}", expected, observed)
            }
            Violation::InvalidFormat { value, format } => {
                write!(f, "'{}' is not valid '{}'", value, format)
            }
            Violation::OutOfRange { literal, format } => {
                write!(f, "{} is not valid '{}'", literal, format)
            }
            Violation::MaxLength { limit, actual } => {
                write!(f, "length must be <= {}, but got {}", limit, actual)
            }
            Violation::AdditionalProperty { key } => {
                write!(f, "additionalProperties '{}' not allowed", key)
            }
        }
    }
}

/// A [Violation] located at a dotted document path.
///
/// The path is empty when the document root itself is at fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    path: String,
    violation: Violation,
}

impl FieldViolation {
    pub fn new(path: &str, violation: Violation) -> Self {
        FieldViolation {
            path: path.to_string(),
            violation,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn violation(&self) -> &Violation {
        &self.violation
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "json schema validation failed reason '{}'", self.violation)
        } else {
            write!(
                f,
                "json schema validation failed for field '{}' reason '{}'",
                self.path, self.violation
            )
        }
    }
}

use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic, WriteExecutor};
use crate::validation::FieldViolation;

/// Error kinds for Vellum operations.
///
/// Each kind names one failure class of the schema layer. Callers branch on the
/// kind (or on its [ErrorCode]) to decide how the failure is surfaced; none of
/// them are retried inside the crate.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum::errors::{VellumError, ErrorKind, VellumResult};
///
/// fn example() -> VellumResult<()> {
///     Err(VellumError::new("invalid collection name", ErrorKind::SchemaBuildError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Schema Errors
    /// Malformed schema, unknown type/format pair, bad primary key
    SchemaBuildError,
    /// A schema update removes or retypes a field, or changes the primary key
    SchemaCompatibilityError,

    // Request Errors
    /// A document failed type, format, bound or additionalProperties checks
    ValidationError,
    /// Malformed `$set`/`$unset` body or a path conflicting with the document
    UpdateParseError,
    /// Malformed sort order
    SortParseError,
    /// The payload is not well-formed JSON
    EncodingError,

    // Store Errors
    /// Create-only request for a collection that already has a schema
    CollectionAlreadyExists,

    // Configuration Errors
    /// Invalid core configuration value
    ConfigError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl ErrorKind {
    /// Returns the transport-facing class of this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::SchemaBuildError
            | ErrorKind::SchemaCompatibilityError
            | ErrorKind::ValidationError
            | ErrorKind::UpdateParseError
            | ErrorKind::SortParseError
            | ErrorKind::EncodingError
            | ErrorKind::ConfigError => ErrorCode::InvalidArgument,
            ErrorKind::CollectionAlreadyExists => ErrorCode::AlreadyExists,
            ErrorKind::InternalError => ErrorCode::Internal,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::SchemaBuildError => write!(f, "Schema build error"),
            ErrorKind::SchemaCompatibilityError => write!(f, "Schema compatibility error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::UpdateParseError => write!(f, "Update parse error"),
            ErrorKind::SortParseError => write!(f, "Sort parse error"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::CollectionAlreadyExists => write!(f, "Collection already exists"),
            ErrorKind::ConfigError => write!(f, "Configuration error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Status class handed to the transport layer.
///
/// Every request-path failure is `InvalidArgument` (a bad request); only
/// bugs surface as `Internal`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorCode {
    InvalidArgument,
    AlreadyExists,
    Internal,
}

/// Custom Vellum error type.
///
/// `VellumError` carries a message, a kind, an optional cause and, for
/// validation failures, the structured [FieldViolation] that produced it.
/// The backtrace is captured unresolved and symbolized only when the error
/// is debug-printed.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum::errors::{VellumError, ErrorKind};
///
/// let cause = VellumError::new("expected value at line 1 column 1", ErrorKind::EncodingError);
/// let err = VellumError::new_with_cause("invalid update request", ErrorKind::UpdateParseError, cause);
/// ```
#[derive(Clone)]
pub struct VellumError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<VellumError>>,
    violation: Option<Box<FieldViolation>>,
    backtrace: Atomic<Backtrace>,
}

impl VellumError {
    /// Creates a new `VellumError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        VellumError {
            message: message.to_string(),
            error_kind,
            cause: None,
            violation: None,
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    /// Creates a new `VellumError` that wraps the error which caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: VellumError) -> Self {
        VellumError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            violation: None,
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    /// Creates a [ErrorKind::ValidationError] from a document violation.
    ///
    /// The message is rendered from the violation so the error text and the
    /// structured detail never disagree.
    pub fn validation(violation: FieldViolation) -> Self {
        VellumError {
            message: violation.to_string(),
            error_kind: ErrorKind::ValidationError,
            cause: None,
            violation: Some(Box::new(violation)),
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn code(&self) -> ErrorCode {
        self.error_kind.code()
    }

    pub fn cause(&self) -> Option<&VellumError> {
        self.cause.as_deref()
    }

    /// Returns the offending field and reason of a validation failure.
    pub fn violation(&self) -> Option<&FieldViolation> {
        self.violation.as_deref()
    }
}

impl Display for VellumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for VellumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                let backtrace = self.backtrace.write_with(|bt| {
                    bt.resolve();
                    format!("{:?}", bt)
                });
                write!(f, "{}\n{}", self.message, backtrace)
            }
        }
    }
}

impl Error for VellumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Vellum operations.
pub type VellumResult<T> = Result<T, VellumError>;

impl From<serde_json::Error> for VellumError {
    fn from(err: serde_json::Error) -> Self {
        VellumError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

impl From<std::fmt::Error> for VellumError {
    fn from(err: std::fmt::Error) -> Self {
        VellumError::new(&format!("Formatting error: {}", err), ErrorKind::InternalError)
    }
}

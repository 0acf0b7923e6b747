//! Domain error types
//!
//! Two failure classes exist in DayZero. Unparseable dates are recoverable and
//! never surface here: the conversion functions signal them with `None` or an
//! invalid [`RelativeDateResult`](super::RelativeDateResult). Everything that
//! must stop a write, or a command, is a [`DayZeroError`].

use thiserror::Error;

/// Main DayZero error type
#[derive(Debug, Error)]
pub enum DayZeroError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An absolute date was found where only relative values may appear
    #[error("Compliance violation: {0}")]
    Compliance(#[from] ComplianceViolation),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Source record could not be mapped into a Limited Data Set record
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Raised by the compliance guard when an absolute date is about to be persisted.
///
/// Callers may abort the write on this error. They must not swallow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Attempting to store actual date at {}: \"{value}\". Convert to relative days before storing.",
    display_path(.path)
)]
pub struct ComplianceViolation {
    /// Dotted/bracketed path to the offending field, e.g. `visits[2].scheduledDate`
    pub path: String,

    /// The offending value
    pub value: String,
}

impl ComplianceViolation {
    /// Creates a new violation for the given field path and value
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

/// Errors raised while mapping a raw source record through a `DataSyncConfig`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The source record is not a JSON object
    #[error("Source record is not an object")]
    NotAnObject,

    /// A required field is absent or blank
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The enrollment date could not be parsed, so no offsets can be derived
    #[error("Invalid enrollment date in field '{0}'")]
    InvalidEnrollmentDate(String),

    /// The subject ID field holds something other than a string or number
    #[error("Subject ID field '{0}' must be a string or number")]
    InvalidSubjectId(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for DayZeroError {
    fn from(err: std::io::Error) -> Self {
        DayZeroError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DayZeroError {
    fn from(err: serde_json::Error) -> Self {
        DayZeroError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DayZeroError {
    fn from(err: toml::de::Error) -> Self {
        DayZeroError::Configuration(format!("TOML parse error: {err}"))
    }
}

//! Error types for propbag
//!
//! This module defines the error taxonomy shared by every crate in the
//! workspace. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Serialization` | Data is present but cannot be converted to/from the requested type |
//! | `InvalidArgument` | A caller passed an invalid input (bad document, conflicting modification) |
//! | `InvalidOperation` | An internal consistency check failed (tag/typed-read mismatch) |
//! | `Limit` | A document exceeds the configured size limits |
//! | `Config` | Serializer settings could not be loaded |
//!
//! Absence of a key and a present-but-null value are *not* errors; they are
//! ordinary lookup outcomes.

use crate::limits::LimitError;
use thiserror::Error;

/// Boxed underlying cause of a conversion failure
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for propbag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for propbag
#[derive(Debug, Error)]
pub enum Error {
    /// Data present but not convertible to (or from) the requested type
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description including the key and target type when known
        message: String,
        /// The underlying conversion failure
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid or missing argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation used against inconsistent state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Document limit violation
    #[error(transparent)]
    Limit(#[from] LimitError),

    /// Settings could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a serialization error with no underlying source
    pub fn serialization(message: impl Into<String>) -> Self {
        Error::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error for a failed read of `key` as `type_name`
    pub fn conversion<E>(key: &str, type_name: &str, source: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        let source = source.into();
        Error::Serialization {
            message: format!("cannot convert property '{}' to {}: {}", key, type_name, source),
            source: Some(source),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument(reason.into())
    }

    /// Create an invalid-operation error
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        Error::InvalidOperation(reason.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization { .. })
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Check if this is an invalid-operation error
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Error::InvalidOperation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

//! Core error types for formlink.
//!
//! This module provides the [`FormlinkError`] enum covering API errors,
//! transport errors, validation errors, schema errors, and configuration
//! errors, together with the [`ValidationError`] type used throughout the
//! validation pipeline.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message with a short
/// code) or compound (containing per-field error lists).
///
/// # Examples
///
/// ```
/// use formlink_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("This field is required", "required");
///
/// // Field-level validation errors
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert(
///     "email".to_string(),
///     vec![ValidationError::new("Please enter a valid email address", "invalid")],
/// );
/// let err = ValidationError::with_field_errors(field_errors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of failure (e.g. "required", "invalid").
    pub code: String,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            field_errors,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for formlink.
///
/// Covers everything that can go wrong between building a form schema and
/// submitting a response: API rejections, transport failures, serialization
/// problems, schema integrity issues, and bad configuration.
#[derive(Error, Debug)]
pub enum FormlinkError {
    /// The backend rejected the request with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// The HTTP status code returned by the backend.
        status: u16,
        /// The error message decoded from the response body.
        message: String,
    },

    /// The HTTP request failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A submission or schema failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A form schema violated a structural invariant.
    #[error("invalid schema: {0}")]
    Schema(String),

    /// Client configuration was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// An IO operation failed (e.g. reading a settings file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormlinkError {
    /// Returns `true` if this error represents a 404 from the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns `true` if this error represents an authentication failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

/// The standard result type for formlink operations.
pub type FormlinkResult<T> = Result<T, FormlinkError>;

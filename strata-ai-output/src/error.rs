//! Error types for reading structured results.

use thiserror::Error;

/// Error when reading a value out of a structured result.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The requested field is not present.
    #[error("Missing required field: {field}")]
    MissingRequiredField {
        /// The field name.
        field: String,
    },

    /// The field exists but holds a different JSON type.
    #[error("Field '{field}' is {actual}, expected {expected}")]
    TypeMismatch {
        /// The field name.
        field: String,
        /// Expected JSON type.
        expected: &'static str,
        /// JSON type actually found.
        actual: &'static str,
    },

    /// Coercion failed, so the result carries no object.
    #[error("Result has no structured object ({diagnostics} diagnostic(s) reported)")]
    NoObject {
        /// Number of diagnostics on the result.
        diagnostics: usize,
    },

    /// Deserializing the object into a Rust type failed.
    #[error("Failed to deserialize structured object: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl OutputError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Result type for structured result access.
pub type OutputResult<T> = Result<T, OutputError>;

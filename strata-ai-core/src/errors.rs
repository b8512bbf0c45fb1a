//! Error types for strata-ai.
//!
//! Failures that can be detected without contacting a provider (a malformed
//! schema, a schema the provider cannot express) are reported as errors as
//! soon as they are found. Failures that only show up in a provider's
//! output are not errors at all; they become diagnostics on the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What is wrong with a schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaErrorKind {
    /// A field is listed as required but no property carries that name.
    UndeclaredRequiredField {
        /// The required field name.
        field: String,
    },
    /// Two siblings share the same name.
    DuplicateName {
        /// The duplicated name.
        name: String,
    },
    /// An object property has an empty name.
    EmptyName,
    /// An enum node has no allowed values.
    EmptyEnum,
    /// An enum node lists the same value twice.
    DuplicateEnumValue {
        /// The duplicated value.
        value: String,
    },
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredRequiredField { field } => {
                write!(f, "required field '{}' is not a declared property", field)
            }
            Self::DuplicateName { name } => write!(f, "duplicate property name '{}'", name),
            Self::EmptyName => write!(f, "property name must not be empty"),
            Self::EmptyEnum => write!(f, "enum must declare at least one allowed value"),
            Self::DuplicateEnumValue { value } => write!(f, "duplicate enum value '{}'", value),
        }
    }
}

/// Malformed schema definition, detected at build or validate time.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    /// Location of the offending node (`""` is the root).
    pub path: String,
    /// The violated constraint.
    pub kind: SchemaErrorKind,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "Schema error at root: {}", self.kind)
        } else {
            write!(f, "Schema error at '{}': {}", self.path, self.kind)
        }
    }
}

impl SchemaError {
    /// Create a new schema error.
    pub fn new(path: impl Into<String>, kind: SchemaErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// A required field that names no property.
    pub fn undeclared_required(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(
            path,
            SchemaErrorKind::UndeclaredRequiredField {
                field: field.into(),
            },
        )
    }

    /// Two siblings with the same name.
    pub fn duplicate_name(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(path, SchemaErrorKind::DuplicateName { name: name.into() })
    }

    /// An enum without values.
    pub fn empty_enum(path: impl Into<String>) -> Self {
        Self::new(path, SchemaErrorKind::EmptyEnum)
    }
}

/// The schema uses a construct the selected provider cannot express.
///
/// Reported by the adapter before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedSchemaFeature {
    /// Provider name.
    pub provider: String,
    /// Model name.
    pub model: String,
    /// Location of the offending node (`""` is the root).
    pub path: String,
    /// Description of the unsupported construct.
    pub feature: String,
}

impl fmt::Display for UnsupportedSchemaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} does not support {}",
            self.provider, self.model, self.feature
        )?;
        if !self.path.is_empty() {
            write!(f, " (at '{}')", self.path)?;
        }
        Ok(())
    }
}

impl UnsupportedSchemaFeature {
    /// Create a new unsupported feature error.
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            path: String::new(),
            feature: feature.into(),
        }
    }

    /// Set the schema path.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Failure reported by a transport while executing a request.
///
/// This type only carries what the transport tells us; strata-ai never
/// retries or reinterprets it.
#[derive(Error, Debug, Clone)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// HTTP status code, if the failure came from an HTTP response.
    pub status_code: Option<u16>,
    /// Whether the request timed out.
    pub is_timeout: bool,
    /// Raw response body, if any.
    pub body: Option<String>,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_timeout {
            return write!(f, "Transport timeout: {}", self.message);
        }
        match self.status_code {
            Some(status) => write!(f, "Transport error (status {}): {}", status, self.message),
            None => write!(f, "Transport error: {}", self.message),
        }
    }
}

impl TransportError {
    /// Create a new transport error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            is_timeout: false,
            body: None,
        }
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            is_timeout: true,
            ..Self::new(message)
        }
    }

    /// Set the HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

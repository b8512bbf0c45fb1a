//! Diagnostics attached to a structured result.
//!
//! Problems found in provider output are recorded here instead of being
//! raised as errors, so the caller always gets the raw text and usage back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The object is still usable.
    Warning,
    /// The object was rejected.
    Error,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The output is not valid JSON.
    MalformedJson,
    /// A required field is absent.
    MissingRequiredField,
    /// A value has the wrong JSON type.
    TypeMismatch,
    /// A string is not one of the allowed enum values.
    InvalidEnumValue,
    /// The provider returned no output.
    EmptyResponse,
    /// JSON was recovered from a code fence or surrounding prose.
    ExtractedFromText,
}

impl DiagnosticKind {
    /// Severity this kind is reported with.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::ExtractedFromText => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::MalformedJson => "malformed_json",
            DiagnosticKind::MissingRequiredField => "missing_required_field",
            DiagnosticKind::TypeMismatch => "type_mismatch",
            DiagnosticKind::InvalidEnumValue => "invalid_enum_value",
            DiagnosticKind::EmptyResponse => "empty_response",
            DiagnosticKind::ExtractedFromText => "extracted_from_text",
        };
        f.write_str(name)
    }
}

/// A single problem found while coercing provider output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// How serious it is.
    pub severity: Severity,
    /// JSON Pointer to the offending value (`""` is the root).
    pub path: String,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    pub fn new(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Output that is not valid JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::MalformedJson, "", message)
    }

    /// A required field missing at `path`.
    pub fn missing_required_field(path: impl Into<String>, field: &str) -> Self {
        Self::new(
            DiagnosticKind::MissingRequiredField,
            path,
            format!("required field '{}' is missing", field),
        )
    }

    /// A value of the wrong JSON type at `path`.
    pub fn type_mismatch(path: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(
            DiagnosticKind::TypeMismatch,
            path,
            format!("expected {}, found {}", expected, actual),
        )
    }

    /// A string outside the allowed set at `path`.
    pub fn invalid_enum_value(path: impl Into<String>, value: &str, allowed: &[String]) -> Self {
        Self::new(
            DiagnosticKind::InvalidEnumValue,
            path,
            format!("'{}' is not one of [{}]", value, allowed.join(", ")),
        )
    }

    /// No output at all.
    pub fn empty_response() -> Self {
        Self::new(DiagnosticKind::EmptyResponse, "", "provider returned no output")
    }

    /// JSON recovered from text that was not pure JSON.
    pub fn extracted_from_text(source: &str) -> Self {
        Self::new(
            DiagnosticKind::ExtractedFromText,
            "",
            format!("JSON recovered from {}", source),
        )
    }

    /// Whether this diagnostic rejects the object.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "{} at '{}': {}", self.kind, self.path, self.message)
        }
    }
}

/// Name of the JSON type of a value, as used in diagnostics.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_severity() {
        assert_eq!(DiagnosticKind::ExtractedFromText.severity(), Severity::Warning);
        assert_eq!(DiagnosticKind::MalformedJson.severity(), Severity::Error);
        assert!(Diagnostic::empty_response().is_error());
        assert!(!Diagnostic::extracted_from_text("prose").is_error());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::missing_required_field("/rating", "rating");
        assert_eq!(
            d.to_string(),
            "missing_required_field at '/rating': required field 'rating' is missing"
        );

        let d = Diagnostic::malformed_json("EOF while parsing");
        assert_eq!(d.to_string(), "malformed_json: EOF while parsing");
    }

    #[test]
    fn test_invalid_enum_message_lists_allowed() {
        let allowed = vec!["drama".to_string(), "comedy".to_string()];
        let d = Diagnostic::invalid_enum_value("/genre", "horror", &allowed);
        assert!(d.message.contains("horror"));
        assert!(d.message.contains("drama, comedy"));
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!("42")), "string");
        assert_eq!(json_type_name(&json!(42)), "number");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}

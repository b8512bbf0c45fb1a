//! The result envelope returned to callers.

use serde::Serialize;
use serde_json::Value as JsonValue;
use strata_ai_core::{FinishReason, Usage};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{OutputError, OutputResult};
use crate::mode::OutputMode;
use crate::object::StructuredObject;

/// Everything the coercer produces, before it is sealed into a result.
#[derive(Debug)]
pub(crate) struct ResultParts {
    pub object: Option<StructuredObject>,
    pub text: String,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    pub raw_response: JsonValue,
    pub diagnostics: Vec<Diagnostic>,
    pub mode: OutputMode,
}

/// Outcome of one structured generation call.
///
/// Always carries the raw text, finish reason, usage and provider body, even
/// when the output could not be coerced. In that case [`object`] is `None`
/// and [`diagnostics`] explains why.
///
/// [`object`]: StructuredResult::object
/// [`diagnostics`]: StructuredResult::diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct StructuredResult {
    object: Option<StructuredObject>,
    text: String,
    finish_reason: FinishReason,
    usage: Usage,
    raw_response: JsonValue,
    diagnostics: Vec<Diagnostic>,
    mode: OutputMode,
}

impl StructuredResult {
    pub(crate) fn new(parts: ResultParts) -> Self {
        Self {
            object: parts.object,
            text: parts.text,
            finish_reason: parts.finish_reason,
            usage: parts.usage,
            raw_response: parts.raw_response,
            diagnostics: parts.diagnostics,
            mode: parts.mode,
        }
    }

    /// The coerced object, if coercion succeeded.
    #[must_use]
    pub fn object(&self) -> Option<&StructuredObject> {
        self.object.as_ref()
    }

    /// The coerced object, or [`OutputError::NoObject`].
    pub fn require_object(&self) -> OutputResult<&StructuredObject> {
        self.object.as_ref().ok_or(OutputError::NoObject {
            diagnostics: self.diagnostics.len(),
        })
    }

    /// Consume the result and return the object.
    pub fn into_object(self) -> OutputResult<StructuredObject> {
        let diagnostics = self.diagnostics.len();
        self.object.ok_or(OutputError::NoObject { diagnostics })
    }

    /// Raw text output, exactly as the provider returned it.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Why generation stopped.
    #[must_use]
    pub fn finish_reason(&self) -> FinishReason {
        self.finish_reason
    }

    /// Token usage.
    #[must_use]
    pub fn usage(&self) -> Usage {
        self.usage
    }

    /// The raw provider body.
    #[must_use]
    pub fn raw_response(&self) -> &JsonValue {
        &self.raw_response
    }

    /// All diagnostics, in the order they were found.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The output mode the request was made with.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Whether an object is present.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.object.is_some()
    }

    /// Whether any diagnostic of `kind` was reported.
    #[must_use]
    pub fn has_diagnostic(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    /// Diagnostics that rejected the object.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Diagnostics that did not reject the object.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failed() -> StructuredResult {
        StructuredResult::new(ResultParts {
            object: None,
            text: "not json".into(),
            finish_reason: FinishReason::Stop,
            usage: Usage::new(5, 3),
            raw_response: json!({}),
            diagnostics: vec![Diagnostic::malformed_json("expected value")],
            mode: OutputMode::JsonBestEffort,
        })
    }

    #[test]
    fn test_failed_result() {
        let result = failed();
        assert!(!result.is_success());
        assert!(result.has_diagnostic(DiagnosticKind::MalformedJson));
        assert!(!result.has_diagnostic(DiagnosticKind::EmptyResponse));
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 0);
        assert_eq!(result.text(), "not json");
        assert_eq!(result.usage().total(), 8);
        assert!(matches!(
            result.require_object(),
            Err(OutputError::NoObject { diagnostics: 1 })
        ));
    }

    #[test]
    fn test_successful_result() {
        let result = StructuredResult::new(ResultParts {
            object: Some(StructuredObject::new(json!({"a": 1}))),
            text: "{\"a\": 1}".into(),
            finish_reason: FinishReason::Stop,
            usage: Usage::default(),
            raw_response: JsonValue::Null,
            diagnostics: Vec::new(),
            mode: OutputMode::Strict,
        });
        assert!(result.is_success());
        assert_eq!(result.require_object().unwrap().number_field("a").unwrap(), 1.0);
        assert_eq!(result.mode(), OutputMode::Strict);
        assert!(result.into_object().is_ok());
    }
}

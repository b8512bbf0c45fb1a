//! Turning raw provider output into a [`StructuredResult`].

use serde_json::Value as JsonValue;
use strata_ai_core::{FinishReason, Usage};
use strata_ai_schema::SchemaNode;

use crate::diagnostics::Diagnostic;
use crate::mode::OutputMode;
use crate::object::StructuredObject;
use crate::parser::extract_json_from_text;
use crate::raw::RawResponse;
use crate::result::{ResultParts, StructuredResult};
use crate::validate::validate_value;

/// Coerces raw provider output into a validated result.
///
/// Coercion never fails: anything wrong with the output is reported as a
/// [`Diagnostic`] on the result, and the raw text, usage and finish reason
/// are always kept.
///
/// # Example
///
/// ```rust
/// use strata_ai_output::{DiagnosticKind, OutputMode, RawResponse, ResponseCoercer};
/// use strata_ai_schema::{ObjectSchema, SchemaNode};
///
/// let schema = ObjectSchema::new("movie_review", "")
///     .required_property(SchemaNode::string("title", ""))
///     .required_property(SchemaNode::number("rating", ""))
///     .build();
///
/// let raw = RawResponse::from_text(r#"{"title": "Inception"}"#).with_finish_reason("stop");
/// let result = ResponseCoercer::coerce(raw, &schema, OutputMode::JsonBestEffort);
///
/// assert!(result.object().is_none());
/// assert!(result.has_diagnostic(DiagnosticKind::MissingRequiredField));
/// assert_eq!(result.text(), r#"{"title": "Inception"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseCoercer;

impl ResponseCoercer {
    /// Coerce `raw` against `schema` under `mode`.
    #[must_use]
    pub fn coerce(raw: RawResponse, schema: &SchemaNode, mode: OutputMode) -> StructuredResult {
        let RawResponse {
            text,
            structured,
            finish_reason,
            prompt_tokens,
            completion_tokens,
            body,
        } = raw;

        let text = text.unwrap_or_default();
        let mut diagnostics = Vec::new();

        let decoded = match mode {
            OutputMode::Strict => decode_strict(structured, &text, &mut diagnostics),
            OutputMode::JsonBestEffort => decode_best_effort(structured, &text, &mut diagnostics),
        };

        if let Some(value) = &decoded {
            diagnostics.extend(validate_value(value, schema));
        }

        let object = if diagnostics.iter().any(Diagnostic::is_error) {
            None
        } else {
            decoded.map(StructuredObject::new)
        };

        StructuredResult::new(ResultParts {
            object,
            text,
            finish_reason: FinishReason::from_raw_opt(finish_reason.as_deref()),
            usage: Usage::from_reported(prompt_tokens.unwrap_or(0), completion_tokens.unwrap_or(0)),
            raw_response: body,
            diagnostics,
            mode,
        })
    }
}

/// Strict mode: the provider enforced the schema, so parse as-is.
fn decode_strict(
    structured: Option<JsonValue>,
    text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<JsonValue> {
    match structured {
        // Some providers hand the structured payload back as a JSON string.
        Some(JsonValue::String(encoded)) => parse_exact(&encoded, diagnostics),
        Some(value) => Some(value),
        None => parse_exact(text, diagnostics),
    }
}

/// Best-effort mode: parse, then fall back to recovering JSON from prose.
fn decode_best_effort(
    structured: Option<JsonValue>,
    text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<JsonValue> {
    match structured {
        Some(JsonValue::String(encoded)) => parse_lenient(&encoded, diagnostics),
        Some(value) => Some(value),
        None => parse_lenient(text, diagnostics),
    }
}

fn parse_lenient(text: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<JsonValue> {
    if text.trim().is_empty() {
        diagnostics.push(Diagnostic::empty_response());
        return None;
    }

    let err = match serde_json::from_str(text.trim()) {
        Ok(value) => return Some(value),
        Err(err) => err,
    };

    match extract_json_from_text(text) {
        Some(found) => {
            tracing::debug!(source = found.source.label(), "Recovered JSON from model text");
            diagnostics.push(Diagnostic::extracted_from_text(found.source.label()));
            Some(found.value)
        }
        None => {
            diagnostics.push(Diagnostic::malformed_json(err.to_string()));
            None
        }
    }
}

fn parse_exact(text: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<JsonValue> {
    if text.trim().is_empty() {
        diagnostics.push(Diagnostic::empty_response());
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            diagnostics.push(Diagnostic::malformed_json(err.to_string()));
            None
        }
    }
}

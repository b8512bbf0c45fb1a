//! Raw provider output, as handed back by a transport.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// What a transport got back from a provider, before any interpretation.
///
/// Every field is optional because providers differ in what they report.
/// Token counts are signed since some providers have been seen to report
/// negative values; they are clamped when the result is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Text output of the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Native structured payload, for providers that return one separately
    /// from the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<JsonValue>,
    /// Provider-specific stop indicator (`"stop"`, `"end_turn"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Reported prompt token count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<i64>,
    /// Reported completion token count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<i64>,
    /// The full provider body.
    #[serde(default)]
    pub body: JsonValue,
}

impl RawResponse {
    /// Create an empty raw response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw response carrying only text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    /// Set the text output.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the native structured payload.
    #[must_use]
    pub fn with_structured(mut self, value: JsonValue) -> Self {
        self.structured = Some(value);
        self
    }

    /// Set the raw finish indicator.
    #[must_use]
    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }

    /// Set the reported token counts.
    #[must_use]
    pub fn with_usage(mut self, prompt_tokens: i64, completion_tokens: i64) -> Self {
        self.prompt_tokens = Some(prompt_tokens);
        self.completion_tokens = Some(completion_tokens);
        self
    }

    /// Set the full provider body.
    #[must_use]
    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = body;
        self
    }
}

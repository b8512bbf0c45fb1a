//! Provider wire fragments for structured output.
//!
//! Each type serializes to the request field(s) one provider family uses to
//! ask for JSON or schema-constrained output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// OpenAI-compatible `response_format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Format type (`json_object`, `json_schema`).
    #[serde(rename = "type")]
    pub format_type: String,
    /// JSON schema for structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchemaFormat>,
}

impl ResponseFormat {
    /// JSON object format.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
            json_schema: None,
        }
    }

    /// JSON schema format.
    pub fn json_schema(name: impl Into<String>, schema: JsonValue, strict: bool) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: Some(JsonSchemaFormat {
                name: name.into(),
                schema,
                strict: Some(strict),
            }),
        }
    }
}

/// JSON schema format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    /// Schema name.
    pub name: String,
    /// The JSON schema.
    pub schema: JsonValue,
    /// Whether to use strict mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Gemini `generationConfig` fields for structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Response MIME type.
    pub response_mime_type: String,
    /// Response schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<JsonValue>,
}

impl GeminiGenerationConfig {
    /// JSON MIME type.
    pub const JSON_MIME_TYPE: &'static str = "application/json";

    /// Plain JSON output.
    pub fn json() -> Self {
        Self {
            response_mime_type: Self::JSON_MIME_TYPE.to_string(),
            response_schema: None,
        }
    }

    /// Schema-constrained JSON output.
    pub fn with_schema(schema: JsonValue) -> Self {
        Self {
            response_schema: Some(schema),
            ..Self::json()
        }
    }
}

/// Ollama `format` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OllamaFormat {
    /// The literal `"json"`.
    Json(String),
    /// A JSON Schema.
    Schema(JsonValue),
}

impl OllamaFormat {
    /// Plain JSON output.
    pub fn json() -> Self {
        Self::Json("json".to_string())
    }
}

/// A structured-output request fragment for any supported wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatPayload {
    /// OpenAI-compatible `response_format`.
    ResponseFormat(ResponseFormat),
    /// Gemini `generationConfig`.
    Gemini(GeminiGenerationConfig),
    /// Ollama `format`.
    Ollama(OllamaFormat),
    /// Nothing to add to the request.
    None,
}

impl FormatPayload {
    /// Render as the top-level request fields it occupies.
    #[must_use]
    pub fn into_map(self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        match self {
            FormatPayload::ResponseFormat(format) => {
                map.insert("response_format".to_string(), to_json(&format));
            }
            FormatPayload::Gemini(config) => {
                map.insert("generationConfig".to_string(), to_json(&config));
            }
            FormatPayload::Ollama(format) => {
                map.insert("format".to_string(), to_json(&format));
            }
            FormatPayload::None => {}
        }
        map
    }
}

// These types hold only strings, bools and JSON values, which always serialize.
fn to_json<T: Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_response_format_json_schema() {
        let map = FormatPayload::ResponseFormat(ResponseFormat::json_schema(
            "movie_review",
            json!({"type": "object"}),
            true,
        ))
        .into_map();
        assert_eq!(
            JsonValue::Object(map),
            json!({
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {
                        "name": "movie_review",
                        "schema": {"type": "object"},
                        "strict": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_json_object() {
        let map = FormatPayload::ResponseFormat(ResponseFormat::json_object())
            .into_map();
        assert_eq!(JsonValue::Object(map), json!({"response_format": {"type": "json_object"}}));
    }

    #[test]
    fn test_gemini_config() {
        let map = FormatPayload::Gemini(GeminiGenerationConfig::with_schema(json!({"type": "object"})))
            .into_map();
        assert_eq!(
            JsonValue::Object(map),
            json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "object"}
                }
            })
        );
    }

    #[test]
    fn test_ollama_format() {
        let map = FormatPayload::Ollama(OllamaFormat::json()).into_map();
        assert_eq!(JsonValue::Object(map), json!({"format": "json"}));

        let map = FormatPayload::Ollama(OllamaFormat::Schema(json!({"type": "object"})))
            .into_map();
        assert_eq!(JsonValue::Object(map), json!({"format": {"type": "object"}}));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(FormatPayload::None.into_map().is_empty());
    }
}

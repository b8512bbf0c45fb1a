//! JSON Schema rewriting for provider compatibility.
//!
//! [`SchemaNode::to_json_schema`] renders a provider-neutral document. Each
//! provider accepts a slightly different dialect; the transformer rewrites
//! the rendered document into that dialect.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;
use strata_ai_schema::SchemaNode;

/// How a provider expects a nullable node to be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullableStyle {
    /// `"type": ["string", "null"]`.
    #[default]
    TypeArray,
    /// `"type": "string", "nullable": true` (OpenAPI style).
    NullableKeyword,
}

/// Rewrites a rendered schema for a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSchemaTransformer {
    /// Add `"additionalProperties": false` to every object.
    pub forbid_additional_properties: bool,
    /// How nullable nodes are written.
    pub nullable_style: NullableStyle,
    /// Keywords stripped from every schema node.
    pub remove_keywords: BTreeSet<String>,
}

impl JsonSchemaTransformer {
    /// Create a transformer that leaves the schema unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer for OpenAI-compatible strict structured output.
    #[must_use]
    pub fn openai() -> Self {
        Self {
            forbid_additional_properties: true,
            ..Self::default()
        }
    }

    /// Transformer for Gemini's OpenAPI-flavored response schema.
    #[must_use]
    pub fn gemini() -> Self {
        Self {
            nullable_style: NullableStyle::NullableKeyword,
            remove_keywords: ["additionalProperties".to_string()].into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set whether objects forbid undeclared properties.
    #[must_use]
    pub fn with_forbid_additional_properties(mut self, forbid: bool) -> Self {
        self.forbid_additional_properties = forbid;
        self
    }

    /// Set the nullable style.
    #[must_use]
    pub fn with_nullable_style(mut self, style: NullableStyle) -> Self {
        self.nullable_style = style;
        self
    }

    /// Add a keyword to remove.
    #[must_use]
    pub fn remove_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.remove_keywords.insert(keyword.into());
        self
    }

    /// Render `schema` and rewrite it for the provider.
    #[must_use]
    pub fn transform(&self, schema: &SchemaNode) -> JsonValue {
        let mut value = schema.to_json_schema();
        self.transform_value(&mut value);
        value
    }

    /// Rewrite a rendered schema node in place.
    ///
    /// Only schema positions are visited (`properties` values and `items`),
    /// so a property that happens to be named like a keyword is left alone.
    pub fn transform_value(&self, value: &mut JsonValue) {
        let JsonValue::Object(map) = value else {
            return;
        };

        for keyword in &self.remove_keywords {
            map.remove(keyword);
        }

        if self.nullable_style == NullableStyle::NullableKeyword {
            rewrite_nullable(map);
        }

        if self.forbid_additional_properties && is_object_type(map) {
            map.insert("additionalProperties".to_string(), JsonValue::Bool(false));
        }

        if let Some(JsonValue::Object(properties)) = map.get_mut("properties") {
            for property in properties.values_mut() {
                self.transform_value(property);
            }
        }
        if let Some(items) = map.get_mut("items") {
            self.transform_value(items);
        }
    }
}

fn is_object_type(map: &Map<String, JsonValue>) -> bool {
    match map.get("type") {
        Some(JsonValue::String(t)) => t == "object",
        Some(JsonValue::Array(types)) => types.iter().any(|t| t == "object"),
        _ => false,
    }
}

/// `["t", "null"]` becomes `"t"` plus `"nullable": true`; `null` is dropped
/// from enum values.
fn rewrite_nullable(map: &mut Map<String, JsonValue>) {
    let Some(JsonValue::Array(types)) = map.get("type") else {
        return;
    };
    let non_null: Vec<JsonValue> = types.iter().filter(|t| !t.is_null() && *t != "null").cloned().collect();
    if non_null.len() == types.len() {
        return;
    }

    let new_type = match non_null.len() {
        1 => non_null.into_iter().next().unwrap_or(JsonValue::Null),
        _ => JsonValue::Array(non_null),
    };
    map.insert("type".to_string(), new_type);
    map.insert("nullable".to_string(), JsonValue::Bool(true));

    if let Some(JsonValue::Array(values)) = map.get_mut("enum") {
        values.retain(|v| !v.is_null());
    }
}

//! Structured-output capabilities per provider and model.

use serde::{Deserialize, Serialize};

use crate::provider::Provider;
use crate::transformer::{JsonSchemaTransformer, NullableStyle};

/// Default instruction template for best-effort JSON output.
///
/// `{schema}` is replaced with the rendered JSON Schema.
pub const DEFAULT_BEST_EFFORT_TEMPLATE: &str = r#"Respond only with a JSON value matching this JSON Schema:
```json
{schema}
```
Do not include any text outside the JSON."#;

/// How the structured-output request is written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// `response_format` object (OpenAI and compatible APIs).
    OpenAiCompatible,
    /// `generationConfig` with `responseMimeType` / `responseSchema`.
    Gemini,
    /// Top-level `format` field.
    Ollama,
    /// No request field; the schema is only given as an instruction.
    InstructionsOnly,
}

/// What a model can do for structured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    /// Provider-enforced schema output is available.
    pub supports_strict: bool,
    /// A plain JSON mode is available.
    pub supports_json_mode: bool,
    /// Strict mode rejects optional properties.
    pub strict_requires_all_required: bool,
    /// Strict mode needs an object at the root.
    pub strict_requires_object_root: bool,
    /// Deepest schema nesting accepted in strict mode.
    pub max_depth: Option<usize>,
    /// Wire format of the structured-output request.
    pub wire_format: WireFormat,
    /// Schema rewriting for this provider.
    pub schema_transformer: JsonSchemaTransformer,
    /// Instruction template for best-effort mode.
    pub best_effort_template: String,
}

impl Default for ProviderCapabilities {
    fn default() -> Self {
        Self {
            supports_strict: false,
            supports_json_mode: false,
            strict_requires_all_required: false,
            strict_requires_object_root: false,
            max_depth: None,
            wire_format: WireFormat::InstructionsOnly,
            schema_transformer: JsonSchemaTransformer::default(),
            best_effort_template: DEFAULT_BEST_EFFORT_TEMPLATE.to_string(),
        }
    }
}

impl ProviderCapabilities {
    /// Create capabilities with nothing supported beyond instructions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the capabilities of a provider and model.
    #[must_use]
    pub fn for_model(provider: Provider, model: &str) -> Self {
        let model = model.to_ascii_lowercase();
        match provider {
            Provider::OpenAI => openai_profile(openai_supports_strict(&model)),
            Provider::XAI => xai_profile(xai_supports_strict(&model)),
            Provider::Mistral => mistral_profile(),
            Provider::Gemini => gemini_profile(gemini_supports_strict(&model)),
            Provider::Ollama => ollama_profile(),
            Provider::Groq | Provider::DeepSeek => json_mode_profile(),
            Provider::Anthropic => Self::default(),
        }
    }

    /// Set strict support.
    #[must_use]
    pub fn with_strict(mut self, supported: bool) -> Self {
        self.supports_strict = supported;
        self
    }

    /// Set JSON mode support.
    #[must_use]
    pub fn with_json_mode(mut self, supported: bool) -> Self {
        self.supports_json_mode = supported;
        self
    }

    /// Set whether strict mode rejects optional properties.
    #[must_use]
    pub fn with_strict_requires_all_required(mut self, required: bool) -> Self {
        self.strict_requires_all_required = required;
        self
    }

    /// Set whether strict mode needs an object root.
    #[must_use]
    pub fn with_strict_requires_object_root(mut self, required: bool) -> Self {
        self.strict_requires_object_root = required;
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the wire format.
    #[must_use]
    pub fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }

    /// Set the schema transformer.
    #[must_use]
    pub fn with_schema_transformer(mut self, transformer: JsonSchemaTransformer) -> Self {
        self.schema_transformer = transformer;
        self
    }

    /// Set the best-effort instruction template.
    /// Use `{schema}` as placeholder for the JSON Schema.
    #[must_use]
    pub fn with_best_effort_template(mut self, template: impl Into<String>) -> Self {
        self.best_effort_template = template.into();
        self
    }

    /// How nullable nodes are written for this provider.
    #[must_use]
    pub fn nullable_style(&self) -> NullableStyle {
        self.schema_transformer.nullable_style
    }

    /// Fill the best-effort template with a rendered schema.
    #[must_use]
    pub fn format_instructions(&self, schema: &str) -> String {
        self.best_effort_template.replace("{schema}", schema)
    }
}

/// OpenAI structured outputs: gpt-4o and later, and the o-series reasoning
/// models other than the early mini/preview releases.
fn openai_supports_strict(model: &str) -> bool {
    if model.starts_with("o1-mini") || model.starts_with("o1-preview") {
        return false;
    }
    ["gpt-4o", "chatgpt-4o", "gpt-4.1", "gpt-5", "o1", "o3", "o4"]
        .iter()
        .any(|prefix| model.starts_with(prefix))
}

fn xai_supports_strict(model: &str) -> bool {
    model.starts_with("grok-") && !model.starts_with("grok-beta") && !model.starts_with("grok-vision-beta")
}

/// Gemini 1.0 (`gemini-pro`) has JSON mode but no response schema.
fn gemini_supports_strict(model: &str) -> bool {
    !(model.starts_with("gemini-1.0") || model == "gemini-pro")
}

fn openai_profile(strict: bool) -> ProviderCapabilities {
    ProviderCapabilities {
        supports_strict: strict,
        supports_json_mode: true,
        strict_requires_all_required: true,
        strict_requires_object_root: true,
        max_depth: Some(10),
        wire_format: WireFormat::OpenAiCompatible,
        schema_transformer: JsonSchemaTransformer::openai(),
        ..ProviderCapabilities::default()
    }
}

fn xai_profile(strict: bool) -> ProviderCapabilities {
    ProviderCapabilities {
        supports_strict: strict,
        supports_json_mode: true,
        strict_requires_object_root: true,
        wire_format: WireFormat::OpenAiCompatible,
        schema_transformer: JsonSchemaTransformer::openai(),
        ..ProviderCapabilities::default()
    }
}

fn mistral_profile() -> ProviderCapabilities {
    ProviderCapabilities {
        supports_strict: true,
        supports_json_mode: true,
        strict_requires_object_root: true,
        wire_format: WireFormat::OpenAiCompatible,
        schema_transformer: JsonSchemaTransformer::openai(),
        ..ProviderCapabilities::default()
    }
}

fn gemini_profile(strict: bool) -> ProviderCapabilities {
    ProviderCapabilities {
        supports_strict: strict,
        supports_json_mode: true,
        wire_format: WireFormat::Gemini,
        schema_transformer: JsonSchemaTransformer::gemini(),
        ..ProviderCapabilities::default()
    }
}

fn ollama_profile() -> ProviderCapabilities {
    ProviderCapabilities {
        supports_strict: true,
        supports_json_mode: true,
        wire_format: WireFormat::Ollama,
        ..ProviderCapabilities::default()
    }
}

fn json_mode_profile() -> ProviderCapabilities {
    ProviderCapabilities {
        supports_json_mode: true,
        wire_format: WireFormat::OpenAiCompatible,
        ..ProviderCapabilities::default()
    }
}

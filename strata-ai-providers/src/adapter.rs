//! Adapting a schema to one provider and model.

use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use strata_ai_core::UnsupportedSchemaFeature;
use strata_ai_output::OutputMode;
use strata_ai_schema::{path, SchemaNode};

use crate::capabilities::{ProviderCapabilities, WireFormat};
use crate::error::AdaptError;
use crate::formats::{FormatPayload, GeminiGenerationConfig, OllamaFormat, ResponseFormat};
use crate::provider::{ModelSelector, Provider};

/// Schema name used when the root node has no usable name.
pub const DEFAULT_SCHEMA_NAME: &str = "output";

/// A schema adapted for one provider and model.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedSchema {
    selector: ModelSelector,
    mode: OutputMode,
    payload: Map<String, JsonValue>,
    instructions: Option<String>,
    schema: Arc<SchemaNode>,
}

impl AdaptedSchema {
    /// Provider and model the schema was adapted for.
    #[must_use]
    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// The output mode that will be requested.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Request fields to merge into the provider request body.
    #[must_use]
    pub fn payload(&self) -> &Map<String, JsonValue> {
        &self.payload
    }

    /// Instruction text for best-effort mode.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// The schema the output will be checked against.
    #[must_use]
    pub fn schema(&self) -> &Arc<SchemaNode> {
        &self.schema
    }
}

/// Turns schemas into provider-specific request fragments.
///
/// The provider and model are resolved once, when the adapter is built.
/// [`adapt`](Self::adapt) is a pure function of the adapter and the schema.
///
/// # Example
///
/// ```rust
/// use strata_ai_output::OutputMode;
/// use strata_ai_providers::{ModelSelector, ProviderAdapter};
/// use strata_ai_schema::{ObjectSchema, SchemaNode};
///
/// let schema = ObjectSchema::new("movie_review", "A structured movie review")
///     .required_property(SchemaNode::string("title", "The movie title"))
///     .required_property(SchemaNode::number("rating", "Rating out of 10"))
///     .build();
///
/// let adapter = ProviderAdapter::new(ModelSelector::parse("openai:gpt-4o").unwrap());
/// let adapted = adapter.adapt(&schema).unwrap();
///
/// assert_eq!(adapted.mode(), OutputMode::Strict);
/// assert_eq!(adapted.payload()["response_format"]["type"], "json_schema");
/// ```
#[derive(Debug, Clone)]
pub struct ProviderAdapter {
    selector: ModelSelector,
    capabilities: ProviderCapabilities,
    output_mode: Option<OutputMode>,
    schema_name: Option<String>,
}

impl ProviderAdapter {
    /// Create an adapter with the capabilities known for the model.
    #[must_use]
    pub fn new(selector: ModelSelector) -> Self {
        let capabilities = ProviderCapabilities::for_model(selector.provider(), selector.model());
        Self {
            selector,
            capabilities,
            output_mode: None,
            schema_name: None,
        }
    }

    /// Create an adapter from a provider and model name.
    #[must_use]
    pub fn for_model(provider: Provider, model: impl Into<String>) -> Self {
        Self::new(ModelSelector::new(provider, model))
    }

    /// Replace the capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Force an output mode instead of the model's default.
    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = Some(mode);
        self
    }

    /// Set the schema name sent to providers that take one.
    #[must_use]
    pub fn with_schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    /// The model selector.
    #[must_use]
    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// The provider.
    #[must_use]
    pub fn provider(&self) -> Provider {
        self.selector.provider()
    }

    /// The model name.
    #[must_use]
    pub fn model(&self) -> &str {
        self.selector.model()
    }

    /// The capabilities in use.
    #[must_use]
    pub fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    /// The output mode that `adapt` will use.
    ///
    /// An explicit override always wins. Overriding to strict on a model
    /// without strict support fails.
    pub fn resolve_mode(&self) -> Result<OutputMode, UnsupportedSchemaFeature> {
        let strict_available =
            self.capabilities.supports_strict && self.capabilities.wire_format != WireFormat::InstructionsOnly;

        match self.output_mode {
            None if strict_available => Ok(OutputMode::Strict),
            None => Ok(OutputMode::JsonBestEffort),
            Some(OutputMode::Strict) if !strict_available => {
                Err(self.unsupported("strict structured output"))
            }
            Some(OutputMode::JsonBestEffort) if strict_available => {
                tracing::warn!(
                    provider = %self.provider(),
                    model = self.model(),
                    "Output mode downgraded from strict to json_best_effort by override"
                );
                Ok(OutputMode::JsonBestEffort)
            }
            Some(mode) => Ok(mode),
        }
    }

    /// Adapt a schema, copying it into the result.
    pub fn adapt(&self, schema: &SchemaNode) -> Result<AdaptedSchema, AdaptError> {
        self.adapt_shared(Arc::new(schema.clone()))
    }

    /// Adapt a schema that is already shared.
    pub fn adapt_shared(&self, schema: Arc<SchemaNode>) -> Result<AdaptedSchema, AdaptError> {
        schema.validate()?;
        let mode = self.resolve_mode()?;

        let rendered = self.capabilities.schema_transformer.transform(&schema);
        let (format, instructions) = match mode {
            OutputMode::Strict => {
                self.check_strict_constraints(&schema)?;
                (self.strict_format(&schema, rendered), None)
            }
            OutputMode::JsonBestEffort => {
                let instructions = self.capabilities.format_instructions(&format!("{:#}", rendered));
                (self.json_mode_format(), Some(instructions))
            }
        };

        Ok(AdaptedSchema {
            selector: self.selector.clone(),
            mode,
            payload: format.into_map(),
            instructions,
            schema,
        })
    }

    fn strict_format(&self, schema: &SchemaNode, rendered: JsonValue) -> FormatPayload {
        match self.capabilities.wire_format {
            WireFormat::OpenAiCompatible => FormatPayload::ResponseFormat(ResponseFormat::json_schema(
                self.schema_name_for(schema),
                rendered,
                true,
            )),
            WireFormat::Gemini => {
                FormatPayload::Gemini(GeminiGenerationConfig::with_schema(rendered))
            }
            WireFormat::Ollama => FormatPayload::Ollama(OllamaFormat::Schema(rendered)),
            WireFormat::InstructionsOnly => FormatPayload::None,
        }
    }

    fn json_mode_format(&self) -> FormatPayload {
        if !self.capabilities.supports_json_mode {
            return FormatPayload::None;
        }
        match self.capabilities.wire_format {
            WireFormat::OpenAiCompatible => FormatPayload::ResponseFormat(ResponseFormat::json_object()),
            WireFormat::Gemini => FormatPayload::Gemini(GeminiGenerationConfig::json()),
            WireFormat::Ollama => FormatPayload::Ollama(OllamaFormat::json()),
            WireFormat::InstructionsOnly => FormatPayload::None,
        }
    }

    fn check_strict_constraints(&self, schema: &SchemaNode) -> Result<(), UnsupportedSchemaFeature> {
        let caps = &self.capabilities;

        if caps.strict_requires_object_root && !schema.is_object() {
            return Err(self.unsupported(format!(
                "a non-object root ({}) in strict mode",
                schema.type_name()
            )));
        }

        if let Some(max_depth) = caps.max_depth {
            if let Some(at) = find_too_deep(schema, "", 1, max_depth) {
                return Err(self
                    .unsupported(format!("nesting deeper than {} levels in strict mode", max_depth))
                    .at(at));
            }
        }

        if caps.strict_requires_all_required {
            if let Some((at, name)) = find_optional(schema, "") {
                return Err(self
                    .unsupported(format!("optional property '{}' in strict mode", name))
                    .at(at));
            }
        }

        Ok(())
    }

    fn schema_name_for(&self, schema: &SchemaNode) -> String {
        let name = self.schema_name.as_deref().unwrap_or(schema.name());
        sanitize_schema_name(name)
    }

    fn unsupported(&self, feature: impl Into<String>) -> UnsupportedSchemaFeature {
        UnsupportedSchemaFeature::new(self.provider().as_str(), self.model(), feature)
    }
}

/// Path of the first node nested deeper than `max`, depth first.
fn find_too_deep(node: &SchemaNode, at: &str, level: usize, max: usize) -> Option<String> {
    if level > max {
        return Some(at.to_string());
    }
    if let Some(items) = node.items() {
        return find_too_deep(items, &path::join(at, "items"), level + 1, max);
    }
    node.properties()
        .iter()
        .find_map(|p| find_too_deep(p, &path::join(at, p.name()), level + 1, max))
}

/// Path and name of the first property not marked required, depth first.
fn find_optional(node: &SchemaNode, at: &str) -> Option<(String, String)> {
    if let Some(items) = node.items() {
        return find_optional(items, &path::join(at, "items"));
    }
    node.properties().iter().find_map(|p| {
        let child = path::join(at, p.name());
        if node.is_required(p.name()) {
            find_optional(p, &child)
        } else {
            Some((child, p.name().to_string()))
        }
    })
}

/// Keep `[A-Za-z0-9_-]`, replace anything else with `_`, cap at 64 chars.
fn sanitize_schema_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .take(64)
        .collect();
    if sanitized.is_empty() {
        DEFAULT_SCHEMA_NAME.to_string()
    } else {
        sanitized
    }
}

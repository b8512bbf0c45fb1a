//! Fluent entry point for building structured generation requests.

use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use strata_ai_core::{GenerationSettings, Message};
use strata_ai_output::OutputMode;
use strata_ai_providers::{AdapterConfig, GenerationRequest, ModelSelector, Provider, ProviderAdapter};
use strata_ai_schema::SchemaNode;

use crate::error::{StrataError, StrataResult};

/// Fluent builder that adapts a schema and builds a [`GenerationRequest`]
/// in one go.
///
/// # Example
///
/// ```rust
/// use strata_ai::prelude::*;
///
/// let schema = ObjectSchema::new("movie_review", "A structured movie review")
///     .required_property(SchemaNode::string("title", "The movie title"))
///     .required_property(SchemaNode::number("rating", "Rating out of 10"))
///     .build();
///
/// let request = Structured::using(Provider::Gemini, "gemini-1.5-pro")
///     .with_schema(schema)
///     .with_system_prompt("You are a film critic.")
///     .with_prompt("Review Inception.")
///     .with_settings(GenerationSettings::new().temperature(0.2))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.mode(), OutputMode::Strict);
/// assert!(request.to_payload()["generationConfig"]["responseSchema"].is_object());
/// ```
#[derive(Debug, Clone)]
pub struct Structured {
    adapter: ProviderAdapter,
    schema: Option<Arc<SchemaNode>>,
    system_prompt: Option<String>,
    messages: Vec<Message>,
    settings: GenerationSettings,
    provider_options: Map<String, JsonValue>,
}

impl Structured {
    /// Start a request for a provider and model.
    #[must_use]
    pub fn using(provider: Provider, model: impl Into<String>) -> Self {
        Self::with_adapter(ProviderAdapter::for_model(provider, model))
    }

    /// Start a request from a `provider:model` selector.
    pub fn model(selector: &str) -> StrataResult<Self> {
        let selector = ModelSelector::parse(selector)?;
        Ok(Self::with_adapter(ProviderAdapter::new(selector)))
    }

    /// Start a request from configuration, including its provider options.
    pub fn from_config(config: AdapterConfig) -> StrataResult<Self> {
        let options = config.provider_options.clone();
        let adapter = config.into_adapter()?;
        Ok(Self::with_adapter(adapter).with_provider_options(options))
    }

    /// Start a request from a preconfigured adapter.
    #[must_use]
    pub fn with_adapter(adapter: ProviderAdapter) -> Self {
        Self {
            adapter,
            schema: None,
            system_prompt: None,
            messages: Vec::new(),
            settings: GenerationSettings::default(),
            provider_options: Map::new(),
        }
    }

    /// Set the output schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<Arc<SchemaNode>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Add a user prompt.
    #[must_use]
    pub fn with_prompt(self, prompt: impl Into<String>) -> Self {
        self.with_message(Message::user(prompt))
    }

    /// Add a message.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Merge generation settings; later values win.
    #[must_use]
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = self.settings.merge(&settings);
        self
    }

    /// Merge a provider option overlay into the request body.
    #[must_use]
    pub fn with_provider_options(mut self, options: Map<String, JsonValue>) -> Self {
        strata_ai_core::json::merge_into(&mut self.provider_options, &options);
        self
    }

    /// Override the output mode.
    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.adapter = self.adapter.with_output_mode(mode);
        self
    }

    /// Override the schema name sent to the provider.
    #[must_use]
    pub fn with_schema_name(mut self, name: impl Into<String>) -> Self {
        self.adapter = self.adapter.with_schema_name(name);
        self
    }

    /// The adapter requests will be built with.
    #[must_use]
    pub fn adapter(&self) -> &ProviderAdapter {
        &self.adapter
    }

    /// Validate and adapt the schema, then build the request.
    pub fn build(self) -> StrataResult<GenerationRequest> {
        let schema = self.schema.ok_or(StrataError::MissingSchema)?;
        let adapted = self.adapter.adapt_shared(schema)?;

        let mut builder = GenerationRequest::builder(&self.adapter)
            .messages(self.messages)
            .settings(self.settings)
            .provider_options(self.provider_options);
        if let Some(system) = self.system_prompt {
            builder = builder.system_prompt(system);
        }
        Ok(builder.build(adapted)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use strata_ai_core::Role;
    use strata_ai_providers::{AdaptError, RequestError};
    use strata_ai_schema::ObjectSchema;

    fn review_schema() -> SchemaNode {
        ObjectSchema::new("movie_review", "")
            .required_property(SchemaNode::string("title", ""))
            .required_property(SchemaNode::number("rating", ""))
            .build()
    }

    #[rstest]
    #[case(Provider::OpenAI, "gpt-4o", OutputMode::Strict)]
    #[case(Provider::Mistral, "mistral-large-latest", OutputMode::Strict)]
    #[case(Provider::Groq, "llama-3.1-70b-versatile", OutputMode::JsonBestEffort)]
    #[case(Provider::Anthropic, "claude-3-5-sonnet-latest", OutputMode::JsonBestEffort)]
    fn test_default_mode(#[case] provider: Provider, #[case] model: &str, #[case] expected: OutputMode) {
        let request = Structured::using(provider, model)
            .with_schema(review_schema())
            .with_prompt("Review Inception.")
            .build()
            .unwrap();
        assert_eq!(request.mode(), expected);
        assert_eq!(request.model(), model);
    }

    #[test]
    fn test_missing_schema() {
        let err = Structured::using(Provider::OpenAI, "gpt-4o")
            .with_prompt("hi")
            .build()
            .unwrap_err();
        assert!(matches!(err, StrataError::MissingSchema));
    }

    #[test]
    fn test_missing_messages() {
        let err = Structured::using(Provider::OpenAI, "gpt-4o")
            .with_schema(review_schema())
            .build()
            .unwrap_err();
        assert!(matches!(err, StrataError::Request(RequestError::NoMessages)));
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let schema = ObjectSchema::new("movie_review", "")
            .required_property(SchemaNode::string("title", ""))
            .require("rating")
            .build();
        let err = Structured::using(Provider::OpenAI, "gpt-4o")
            .with_schema(schema)
            .with_prompt("hi")
            .build()
            .unwrap_err();
        assert!(matches!(err, StrataError::Adapt(AdaptError::Schema(_))));
    }

    #[test]
    fn test_strict_override_on_anthropic_is_unsupported() {
        let err = Structured::using(Provider::Anthropic, "claude-3-5-sonnet-latest")
            .with_schema(review_schema())
            .with_prompt("hi")
            .with_output_mode(OutputMode::Strict)
            .build()
            .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_system_prompt_comes_first() {
        let request = Structured::using(Provider::OpenAI, "gpt-4o")
            .with_prompt("Review Inception.")
            .with_system_prompt("You are a film critic.")
            .with_schema(review_schema())
            .build()
            .unwrap();
        let roles: Vec<Role> = request.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
    }

    #[test]
    fn test_from_config_applies_provider_options() {
        let config = AdapterConfig::new("openai:gpt-4o-mini")
            .with_output_mode(OutputMode::JsonBestEffort)
            .with_schema_name("review")
            .with_provider_option("user", json!("u-42"));
        let request = Structured::from_config(config)
            .unwrap()
            .with_schema(review_schema())
            .with_prompt("hi")
            .build()
            .unwrap();

        let body = request.to_payload();
        assert_eq!(request.mode(), OutputMode::JsonBestEffort);
        assert_eq!(body["user"], "u-42");
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_model_selector() {
        let structured = Structured::model("ollama:llama3.1").unwrap();
        assert_eq!(structured.adapter().provider(), Provider::Ollama);
        assert!(matches!(
            Structured::model("bedrock:titan").unwrap_err(),
            StrataError::Config(_)
        ));
    }

    #[test]
    fn test_schema_name_reaches_payload() {
        let request = Structured::using(Provider::OpenAI, "gpt-4o")
            .with_schema(review_schema())
            .with_schema_name("film review")
            .with_prompt("hi")
            .build()
            .unwrap();
        assert_eq!(request.to_payload()["response_format"]["json_schema"]["name"], "film_review");
    }
}

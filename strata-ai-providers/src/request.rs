//! Provider-ready generation requests.

use serde_json::{json, Map, Value as JsonValue};
use std::sync::Arc;
use strata_ai_core::json::merge_into;
use strata_ai_core::{GenerationSettings, Message, RequestId};
use strata_ai_output::OutputMode;
use strata_ai_schema::SchemaNode;

use crate::adapter::{AdaptedSchema, ProviderAdapter};
use crate::error::RequestError;
use crate::provider::Provider;

/// An immutable request, ready to hand to a transport.
///
/// # Example
///
/// ```rust
/// use strata_ai_providers::{GenerationRequest, ModelSelector, ProviderAdapter};
/// use strata_ai_schema::{ObjectSchema, SchemaNode};
///
/// let schema = ObjectSchema::new("movie_review", "")
///     .required_property(SchemaNode::string("title", ""))
///     .build();
/// let adapter = ProviderAdapter::new(ModelSelector::parse("openai:gpt-4o").unwrap());
/// let adapted = adapter.adapt(&schema).unwrap();
///
/// let request = GenerationRequest::builder(&adapter)
///     .system_prompt("You are a film critic.")
///     .prompt("Review Inception.")
///     .build(adapted)
///     .unwrap();
///
/// let body = request.to_payload();
/// assert_eq!(body["model"], "gpt-4o");
/// assert_eq!(body["messages"][1]["content"], "Review Inception.");
/// assert_eq!(body["response_format"]["type"], "json_schema");
/// ```
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    id: RequestId,
    provider: Provider,
    model: String,
    messages: Vec<Message>,
    settings: GenerationSettings,
    adapted: AdaptedSchema,
    provider_options: Map<String, JsonValue>,
}

impl GenerationRequest {
    /// Start building a request for the adapter's provider and model.
    #[must_use]
    pub fn builder(adapter: &ProviderAdapter) -> RequestBuilder {
        RequestBuilder::new(adapter.provider(), adapter.model())
    }

    /// Request ID, for log correlation.
    #[must_use]
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// The provider.
    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// The model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Conversation messages, without the best-effort instructions.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Generation settings.
    #[must_use]
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// The adapted schema.
    #[must_use]
    pub fn adapted(&self) -> &AdaptedSchema {
        &self.adapted
    }

    /// The schema the response will be coerced against.
    #[must_use]
    pub fn schema(&self) -> &Arc<SchemaNode> {
        self.adapted.schema()
    }

    /// The requested output mode.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.adapted.mode()
    }

    /// Provider option overlay.
    #[must_use]
    pub fn provider_options(&self) -> &Map<String, JsonValue> {
        &self.provider_options
    }

    /// Render the request body.
    ///
    /// Best-effort instructions follow the conversation as a trailing system
    /// message. The adapted payload is merged in next, and the provider
    /// option overlay last, so overlay values win.
    #[must_use]
    pub fn to_payload(&self) -> JsonValue {
        let mut body = Map::new();
        body.insert("model".to_string(), json!(self.model));

        let mut messages: Vec<JsonValue> = self
            .messages
            .iter()
            .map(|m| json!({"role": m.role.to_string(), "content": m.content}))
            .collect();
        if let Some(instructions) = self.adapted.instructions() {
            messages.push(json!({"role": "system", "content": instructions}));
        }
        body.insert("messages".to_string(), JsonValue::Array(messages));

        let settings = &self.settings;
        if let Some(max_tokens) = settings.max_tokens {
            body.insert("max_tokens".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = settings.temperature {
            body.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(top_p) = settings.top_p {
            body.insert("top_p".to_string(), json!(top_p));
        }
        if let Some(stop) = &settings.stop {
            body.insert("stop".to_string(), json!(stop));
        }
        if let Some(seed) = settings.seed {
            body.insert("seed".to_string(), json!(seed));
        }
        if !settings.tools.is_empty() {
            let tools: Vec<JsonValue> = settings
                .tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body.insert("tools".to_string(), JsonValue::Array(tools));
        }

        merge_into(&mut body, self.adapted.payload());
        merge_into(&mut body, &self.provider_options);
        JsonValue::Object(body)
    }
}

/// Builder for [`GenerationRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    provider: Provider,
    model: String,
    system_prompt: Option<String>,
    messages: Vec<Message>,
    settings: GenerationSettings,
    provider_options: Map<String, JsonValue>,
}

impl RequestBuilder {
    fn new(provider: Provider, model: &str) -> Self {
        Self {
            provider,
            model: model.to_string(),
            system_prompt: None,
            messages: Vec::new(),
            settings: GenerationSettings::default(),
            provider_options: Map::new(),
        }
    }

    /// Set the system prompt, placed before all other messages.
    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Add a user message.
    #[must_use]
    pub fn prompt(self, prompt: impl Into<String>) -> Self {
        self.message(Message::user(prompt))
    }

    /// Add a message.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add several messages.
    #[must_use]
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Merge generation settings; later values win.
    #[must_use]
    pub fn settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = self.settings.merge(&settings);
        self
    }

    /// Merge a provider option overlay.
    #[must_use]
    pub fn provider_options(mut self, options: Map<String, JsonValue>) -> Self {
        merge_into(&mut self.provider_options, &options);
        self
    }

    /// Set one provider option.
    #[must_use]
    pub fn provider_option(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.provider_options.insert(key.into(), value);
        self
    }

    /// Finish the request.
    ///
    /// Fails if `adapted` came from an adapter for another provider or model.
    pub fn build(self, adapted: AdaptedSchema) -> Result<GenerationRequest, RequestError> {
        let target = adapted.selector();
        if target.provider() != self.provider || target.model() != self.model {
            return Err(RequestError::AdapterMismatch {
                request: format!("{}:{}", self.provider, self.model),
                adapted: target.to_string(),
            });
        }

        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if let Some(system) = self.system_prompt {
            messages.push(Message::system(system));
        }
        messages.extend(self.messages);

        if messages.is_empty() {
            return Err(RequestError::NoMessages);
        }

        Ok(GenerationRequest {
            id: RequestId::generate(),
            provider: self.provider,
            model: self.model,
            messages,
            settings: self.settings,
            adapted,
            provider_options: self.provider_options,
        })
    }
}

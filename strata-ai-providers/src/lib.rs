//! # strata-ai-providers
//!
//! Provider adapters and request building for strata-ai.
//!
//! This crate knows how each supported provider asks for structured output.
//! It does not talk to any provider; a transport outside this crate sends
//! the [`GenerationRequest`] it builds.
//!
//! ## Supported Providers
//!
//! | Provider | Strict mode | Best-effort flag |
//! |----------|-------------|------------------|
//! | OpenAI | `response_format: json_schema` (gpt-4o and later) | `json_object` |
//! | xAI | `response_format: json_schema` (grok-2 and later) | `json_object` |
//! | Mistral | `response_format: json_schema` | `json_object` |
//! | Gemini | `generationConfig.responseSchema` | `responseMimeType` |
//! | Ollama | `format: <schema>` | `format: "json"` |
//! | Groq, DeepSeek | - | `json_object` |
//! | Anthropic | - | instructions only |
//!
//! ## Example
//!
//! ```rust
//! use strata_ai_providers::{GenerationRequest, ModelSelector, ProviderAdapter};
//! use strata_ai_output::OutputMode;
//! use strata_ai_schema::{ObjectSchema, SchemaNode};
//!
//! let schema = ObjectSchema::new("movie_review", "A structured movie review")
//!     .required_property(SchemaNode::string("title", "The movie title"))
//!     .required_property(SchemaNode::number("rating", "Rating out of 10"))
//!     .build();
//!
//! let adapter = ProviderAdapter::new(ModelSelector::parse("anthropic:claude-3-5-sonnet-latest").unwrap());
//! let adapted = adapter.adapt(&schema).unwrap();
//! assert_eq!(adapted.mode(), OutputMode::JsonBestEffort);
//!
//! let request = GenerationRequest::builder(&adapter)
//!     .prompt("Review Inception.")
//!     .build(adapted)
//!     .unwrap();
//! assert!(request.to_payload()["messages"][1]["content"]
//!     .as_str()
//!     .unwrap()
//!     .contains("JSON Schema"));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod formats;
pub mod provider;
pub mod request;
pub mod transformer;

// Re-exports
pub use adapter::{AdaptedSchema, ProviderAdapter, DEFAULT_SCHEMA_NAME};
pub use capabilities::{ProviderCapabilities, WireFormat, DEFAULT_BEST_EFFORT_TEMPLATE};
pub use config::AdapterConfig;
pub use error::{AdaptError, ConfigError, RequestError};
pub use formats::{FormatPayload, GeminiGenerationConfig, JsonSchemaFormat, OllamaFormat, ResponseFormat};
pub use provider::{ModelSelector, Provider};
pub use request::{GenerationRequest, RequestBuilder};
pub use transformer::{JsonSchemaTransformer, NullableStyle};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        AdaptError, AdaptedSchema, AdapterConfig, GenerationRequest, ModelSelector, Provider,
        ProviderAdapter, ProviderCapabilities, RequestError,
    };
}

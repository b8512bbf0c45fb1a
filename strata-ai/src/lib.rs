//! # strata-ai - Schema-Typed Structured Output for LLMs
//!
//! strata-ai turns a schema description into a provider-correct request,
//! and turns whatever the provider sends back into a validated
//! [`StructuredResult`] with diagnostics, usage and finish reason.
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_ai::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let schema = ObjectSchema::new("movie_review", "A structured movie review")
//!     .required_property(SchemaNode::string("title", "The movie title"))
//!     .required_property(SchemaNode::number("rating", "Rating out of 10"))
//!     .required_property(SchemaNode::string("summary", "One-paragraph summary"))
//!     .build();
//!
//! let request = Structured::using(Provider::OpenAI, "gpt-4o")
//!     .with_schema(schema)
//!     .with_system_prompt("You are a film critic.")
//!     .with_prompt("Review Inception.")
//!     .build()
//!     .unwrap();
//!
//! // Any `Transport` works here; `StaticTransport` answers from memory.
//! let transport = StaticTransport::new(
//!     RawResponse::from_text(r#"{"title": "Inception", "rating": 9, "summary": "Dreams within dreams."}"#)
//!         .with_finish_reason("stop")
//!         .with_usage(120, 24),
//! );
//! let result = StructuredGenerator::new(transport).generate(&request).await.unwrap();
//!
//! let review = result.require_object().unwrap();
//! assert_eq!(review.str_field("title").unwrap(), "Inception");
//! assert_eq!(result.usage().total(), 144);
//! # });
//! ```
//!
//! ## Pipeline
//!
//! 1. **Schema Model** ([`strata_ai_schema`]): build and validate a [`SchemaNode`] tree
//! 2. **Provider Adapter** ([`ProviderAdapter`]): pick an [`OutputMode`] and the
//!    provider's wire representation of the schema
//! 3. **Request Builder** ([`GenerationRequest`]): combine messages, settings and
//!    the adapted schema into an immutable request
//! 4. **Transport** ([`Transport`]): executes the request; not provided here
//! 5. **Response Coercer** ([`ResponseCoercer`]): parse and validate the raw
//!    response into a [`StructuredResult`]
//!
//! [`Structured`] and [`StructuredGenerator`] wrap steps 1-3 and 4-5.
//!
//! ## Architecture
//!
//! - [`strata_ai_core`] - Messages, settings, usage and errors
//! - [`strata_ai_schema`] - Schema tree and JSON Schema rendering
//! - [`strata_ai_output`] - Output modes, coercion and the result envelope
//! - [`strata_ai_providers`] - Provider capabilities, adapters and requests

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod generator;
pub mod structured;
pub mod transport;

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Messages, settings, usage and errors.
pub use strata_ai_core as core;

/// Schema tree.
pub use strata_ai_schema as schema;

/// Output modes, coercion and results.
pub use strata_ai_output as output;

/// Provider adapters and requests.
pub use strata_ai_providers as providers;

// ============================================================================
// Type Re-exports
// ============================================================================

pub use error::{StrataError, StrataResult};
pub use generator::StructuredGenerator;
pub use structured::Structured;
pub use transport::{FunctionTransport, StaticTransport, Transport};

pub use strata_ai_core::{
    FinishReason, GenerationSettings, Message, RequestId, Role, SchemaError, SchemaErrorKind,
    ToolDefinition, TransportError, UnsupportedSchemaFeature, Usage,
};
pub use strata_ai_output::{
    Diagnostic, DiagnosticKind, OutputError, OutputMode, RawResponse, ResponseCoercer, Severity,
    StructuredObject, StructuredResult,
};
pub use strata_ai_providers::{
    AdaptError, AdaptedSchema, AdapterConfig, ConfigError, GenerationRequest, ModelSelector,
    Provider, ProviderAdapter, ProviderCapabilities, RequestError, WireFormat,
};
pub use strata_ai_schema::{ObjectSchema, SchemaKind, SchemaNode};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common usage.
///
/// ```rust
/// use strata_ai::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AdapterConfig, Diagnostic, DiagnosticKind, FinishReason, GenerationRequest,
        GenerationSettings, Message, ModelSelector, ObjectSchema, OutputMode, Provider,
        ProviderAdapter, RawResponse, SchemaNode, StaticTransport, StrataError, StrataResult,
        Structured, StructuredGenerator, StructuredObject, StructuredResult, Transport, Usage,
    };
}

//! Pipeline driver: send a request, coerce the response.

use strata_ai_output::{ResponseCoercer, StructuredResult};
use strata_ai_providers::GenerationRequest;

use crate::error::StrataResult;
use crate::transport::Transport;

/// Runs requests through a [`Transport`] and coerces the responses.
///
/// The generator holds no state besides the transport, so one instance can
/// serve any number of concurrent requests.
///
/// # Example
///
/// ```rust
/// use strata_ai::prelude::*;
///
/// # tokio_test::block_on(async {
/// let schema = ObjectSchema::new("answer", "")
///     .required_property(SchemaNode::string("text", ""))
///     .build();
/// let request = Structured::using(Provider::OpenAI, "gpt-4o")
///     .with_schema(schema)
///     .with_prompt("Say hi.")
///     .build()
///     .unwrap();
///
/// let transport = StaticTransport::new(RawResponse::from_text(r#"{"text": "hi"}"#));
/// let result = StructuredGenerator::new(transport).generate(&request).await.unwrap();
/// assert_eq!(result.require_object().unwrap().str_field("text").unwrap(), "hi");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct StructuredGenerator<T> {
    transport: T,
}

impl<T: Transport> StructuredGenerator<T> {
    /// Create a generator over a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the request and coerce the response against its schema.
    ///
    /// Transport failures are returned as [`StrataError::Transport`] exactly
    /// as the transport reported them. Anything wrong with the provider's
    /// output is reported as diagnostics on the result instead.
    ///
    /// [`StrataError::Transport`]: crate::StrataError::Transport
    pub async fn generate(&self, request: &GenerationRequest) -> StrataResult<StructuredResult> {
        tracing::debug!(
            request_id = %request.id(),
            provider = %request.provider(),
            model = request.model(),
            mode = %request.mode(),
            "sending structured generation request"
        );

        let raw = self.transport.send(request).await?;
        let result = ResponseCoercer::coerce(raw, request.schema(), request.mode());

        tracing::debug!(
            request_id = %request.id(),
            success = result.is_success(),
            diagnostics = result.diagnostics().len(),
            total_tokens = result.usage().total(),
            "coerced structured response"
        );
        Ok(result)
    }

    /// Consume the generator, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrataError;
    use crate::transport::StaticTransport;
    use pretty_assertions::assert_eq;
    use strata_ai_core::{FinishReason, TransportError};
    use strata_ai_output::{DiagnosticKind, OutputMode, RawResponse};
    use strata_ai_providers::{ModelSelector, ProviderAdapter};
    use strata_ai_schema::{ObjectSchema, SchemaNode};

    fn request(selector: &str) -> GenerationRequest {
        let schema = ObjectSchema::new("movie_review", "")
            .required_property(SchemaNode::string("title", ""))
            .required_property(SchemaNode::number("rating", ""))
            .build();
        let adapter = ProviderAdapter::new(ModelSelector::parse(selector).unwrap());
        GenerationRequest::builder(&adapter)
            .prompt("Review Inception.")
            .build(adapter.adapt(&schema).unwrap())
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_strict() {
        let raw = RawResponse::new()
            .with_structured(serde_json::json!({"title": "Inception", "rating": 9}))
            .with_finish_reason("stop")
            .with_usage(100, 20);
        let generator = StructuredGenerator::new(StaticTransport::new(raw));

        let result = generator.generate(&request("openai:gpt-4o")).await.unwrap();
        assert_eq!(result.mode(), OutputMode::Strict);
        assert!(result.is_success());
        assert_eq!(result.finish_reason(), FinishReason::Stop);
        assert_eq!(result.usage().total(), 120);
        assert_eq!(generator.transport().served(), 1);
    }

    #[tokio::test]
    async fn test_generate_best_effort_recovers_fenced_json() {
        let raw = RawResponse::from_text(
            "Here you go:\n```json\n{\"title\": \"Inception\", \"rating\": 9}\n```",
        );
        let generator = StructuredGenerator::new(StaticTransport::new(raw));

        let result = generator
            .generate(&request("anthropic:claude-3-5-sonnet-latest"))
            .await
            .unwrap();
        assert_eq!(result.mode(), OutputMode::JsonBestEffort);
        assert!(result.object().is_some());
        assert!(result.has_diagnostic(DiagnosticKind::ExtractedFromText));
    }

    #[tokio::test]
    async fn test_transport_error_is_unmodified() {
        let error = TransportError::new("upstream unavailable")
            .with_status(503)
            .with_body("{\"error\": \"overloaded\"}");
        let generator = StructuredGenerator::new(StaticTransport::failing(error));

        let err = generator.generate(&request("openai:gpt-4o")).await.unwrap_err();
        match err {
            StrataError::Transport(inner) => {
                assert_eq!(inner.message, "upstream unavailable");
                assert_eq!(inner.status_code, Some(503));
                assert_eq!(inner.body.as_deref(), Some("{\"error\": \"overloaded\"}"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}

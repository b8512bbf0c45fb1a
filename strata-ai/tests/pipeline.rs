//! End-to-end pipeline tests: schema to request to coerced result.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use strata_ai::prelude::*;
use strata_ai::{FunctionTransport, ResponseCoercer, TransportError};

fn movie_review() -> SchemaNode {
    ObjectSchema::new("movie_review", "A structured movie review")
        .required_property(SchemaNode::string("title", "The movie title"))
        .required_property(SchemaNode::number("rating", "Rating out of 10"))
        .required_property(SchemaNode::string("summary", "One-paragraph summary"))
        .build()
}

fn request(provider: Provider, model: &str) -> GenerationRequest {
    Structured::using(provider, model)
        .with_schema(movie_review())
        .with_system_prompt("You are a film critic.")
        .with_prompt("Review Inception.")
        .build()
        .unwrap()
}

#[rstest]
#[case(Provider::OpenAI, "gpt-4o")]
#[case(Provider::Gemini, "gemini-1.5-pro")]
#[case(Provider::Ollama, "llama3.1")]
#[case(Provider::XAI, "grok-2")]
#[tokio::test]
async fn test_strict_round_trip(#[case] provider: Provider, #[case] model: &str) {
    let payload = json!({
        "title": "Inception",
        "rating": 9,
        "summary": "A heist inside layered dreams."
    });
    let request = request(provider, model);
    assert_eq!(request.mode(), OutputMode::Strict);

    let transport = StaticTransport::new(RawResponse::new().with_structured(payload.clone()));
    let result = StructuredGenerator::new(transport).generate(&request).await.unwrap();

    assert!(result.diagnostics().is_empty());
    assert_eq!(result.require_object().unwrap().as_value(), &payload);
}

#[tokio::test]
async fn test_malformed_json_best_effort() {
    let text = "I think it's great, {title: Inception";
    let request = request(Provider::Anthropic, "claude-3-5-sonnet-latest");
    let transport = StaticTransport::new(RawResponse::from_text(text).with_finish_reason("end_turn"));

    let result = StructuredGenerator::new(transport).generate(&request).await.unwrap();

    assert!(result.object().is_none());
    assert_eq!(result.text(), text);
    assert!(result.has_diagnostic(DiagnosticKind::MalformedJson));
    assert_eq!(result.finish_reason(), FinishReason::Stop);
}

#[tokio::test]
async fn test_missing_required_field() {
    let text = r#"{"title": "Inception"}"#;
    let request = request(Provider::Groq, "llama-3.1-70b-versatile");
    let transport = StaticTransport::new(RawResponse::from_text(text));

    let result = StructuredGenerator::new(transport).generate(&request).await.unwrap();

    assert!(result.object().is_none());
    assert_eq!(result.text(), text);
    let missing: Vec<&str> = result
        .errors()
        .filter(|d| d.kind == DiagnosticKind::MissingRequiredField)
        .map(|d| d.path.as_str())
        .collect();
    assert_eq!(missing, vec!["/rating", "/summary"]);
}

#[tokio::test]
async fn test_negative_usage_is_clamped() {
    let raw = RawResponse::from_text(r#"{"title": "Inception", "rating": 9, "summary": "ok"}"#)
        .with_usage(-5, 12);
    let request = request(Provider::OpenAI, "gpt-4o");

    let result = StructuredGenerator::new(StaticTransport::new(raw))
        .generate(&request)
        .await
        .unwrap();

    assert_eq!(result.usage(), Usage::new(0, 12));
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let transport = StaticTransport::failing(TransportError::timeout("no response within 30s"));
    let generator = StructuredGenerator::new(transport);

    let err = generator
        .generate(&request(Provider::Mistral, "mistral-large-latest"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.to_string(), TransportError::timeout("no response within 30s").to_string());
    assert_eq!(generator.transport().served(), 1);
}

#[tokio::test]
async fn test_transport_receives_payload() {
    let transport = FunctionTransport::new(|request| {
        let body = request.to_payload();
        let name = body["response_format"]["json_schema"]["name"].clone();
        Ok(RawResponse::new().with_structured(json!({
            "title": name,
            "rating": 1,
            "summary": body["messages"][0]["content"],
        })))
    });
    let request = request(Provider::OpenAI, "gpt-4o");

    let result = StructuredGenerator::new(transport).generate(&request).await.unwrap();
    let object = result.require_object().unwrap();
    assert_eq!(object.str_field("title").unwrap(), "movie_review");
    assert_eq!(object.str_field("summary").unwrap(), "You are a film critic.");
}

#[test]
fn test_adapt_is_idempotent() {
    let adapter = ProviderAdapter::new(ModelSelector::parse("openai:gpt-4o").unwrap());
    let schema = movie_review();

    let first = adapter.adapt(&schema).unwrap();
    let second = adapter.adapt(&schema).unwrap();

    assert_eq!(first.mode(), second.mode());
    assert_eq!(
        serde_json::to_string(first.payload()).unwrap(),
        serde_json::to_string(second.payload()).unwrap()
    );
}

fn adapt_and_coerce(selector: &str, schema: &Arc<SchemaNode>, text: &str) -> (String, JsonValue) {
    let adapter = ProviderAdapter::new(ModelSelector::parse(selector).unwrap());
    let adapted = adapter.adapt_shared(Arc::clone(schema)).unwrap();
    let payload = serde_json::to_string(adapted.payload()).unwrap();
    let result = ResponseCoercer::coerce(RawResponse::from_text(text), schema, adapted.mode());
    (payload, serde_json::to_value(&result).unwrap())
}

#[test]
fn test_concurrent_matches_sequential() {
    let schema = Arc::new(movie_review());
    let cases: Vec<(&str, &str)> = vec![
        ("openai:gpt-4o", r#"{"title": "Inception", "rating": 9, "summary": "ok"}"#),
        ("anthropic:claude-3-5-sonnet-latest", "```json\n{\"title\": \"Heat\", \"rating\": 8, \"summary\": \"ok\"}\n```"),
        ("gemini:gemini-1.5-pro", r#"{"title": "Alien"}"#),
        ("groq:llama-3.1-70b-versatile", "not json"),
        ("ollama:llama3.1", ""),
        ("mistral:mistral-large-latest", r#"{"title": 7, "rating": "high", "summary": null}"#),
    ];

    let sequential: Vec<_> = cases
        .iter()
        .map(|(selector, text)| adapt_and_coerce(selector, &schema, text))
        .collect();

    let concurrent: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = cases
            .iter()
            .map(|(selector, text)| {
                let schema = &schema;
                scope.spawn(move || adapt_and_coerce(selector, schema, text))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(concurrent, sequential);
}

#[tokio::test]
async fn test_concurrent_generation_shares_transport() {
    let transport = StaticTransport::new(RawResponse::from_text(
        r#"{"title": "Inception", "rating": 9, "summary": "ok"}"#,
    ));
    let generator = Arc::new(StructuredGenerator::new(transport));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let generator = Arc::clone(&generator);
        handles.push(tokio::spawn(async move {
            let request = request(Provider::OpenAI, "gpt-4o");
            generator.generate(&request).await.unwrap().is_success()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(generator.transport().served(), 8);
}

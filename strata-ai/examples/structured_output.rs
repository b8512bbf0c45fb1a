//! Structured output example.
//!
//! Builds a movie review request for several providers, prints each request
//! body, then coerces canned responses the way a real transport's output
//! would be handled.
//!
//! Run with:
//! ```bash
//! RUST_LOG=strata_ai=debug cargo run --example structured_output
//! ```

use serde::Deserialize;
use strata_ai::prelude::*;
use tracing_subscriber::EnvFilter;

/// A structured movie review.
#[derive(Debug, Deserialize)]
struct MovieReview {
    title: String,
    rating: f64,
    summary: String,
    genres: Vec<String>,
}

fn movie_review_schema() -> SchemaNode {
    ObjectSchema::new("movie_review", "A structured movie review")
        .required_property(SchemaNode::string("title", "The movie title"))
        .required_property(SchemaNode::number("rating", "Rating out of 10"))
        .required_property(SchemaNode::string("summary", "One-paragraph summary"))
        .required_property(SchemaNode::array(
            "genres",
            "Genres the movie belongs to",
            SchemaNode::enumeration("genre", "", ["action", "drama", "sci-fi", "thriller"]),
        ))
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let schema = std::sync::Arc::new(movie_review_schema());

    for selector in ["openai:gpt-4o", "gemini:gemini-1.5-pro", "ollama:llama3.1", "anthropic:claude-3-5-sonnet-latest"] {
        let request = Structured::model(selector)?
            .with_schema(schema.clone())
            .with_system_prompt("You are a film critic.")
            .with_prompt("Review Inception.")
            .with_settings(GenerationSettings::new().temperature(0.2).max_tokens(400))
            .build()?;

        println!("=== {} ({}) ===", selector, request.mode());
        println!("{}", serde_json::to_string_pretty(&request.to_payload())?);
    }

    // A best-effort provider that wrapped its JSON in prose.
    let request = Structured::using(Provider::Anthropic, "claude-3-5-sonnet-latest")
        .with_schema(schema.clone())
        .with_prompt("Review Inception.")
        .build()?;
    let transport = StaticTransport::new(
        RawResponse::from_text(
            "Here is the review:\n```json\n{\"title\": \"Inception\", \"rating\": 9, \
             \"summary\": \"A heist inside layered dreams.\", \"genres\": [\"sci-fi\", \"thriller\"]}\n```",
        )
        .with_finish_reason("end_turn")
        .with_usage(182, 46),
    );
    let result = StructuredGenerator::new(transport).generate(&request).await?;

    let review: MovieReview = result.require_object()?.deserialize()?;
    println!("\n{} rated {}/10: {}", review.title, review.rating, review.summary);
    println!("Genres: {}", review.genres.join(", "));
    println!("Usage: {:?}", result.usage());
    for diagnostic in result.diagnostics() {
        println!("Diagnostic: {}", diagnostic);
    }

    // A response missing a required field.
    let transport = StaticTransport::new(RawResponse::from_text(r#"{"title": "Inception"}"#));
    let result = StructuredGenerator::new(transport).generate(&request).await?;
    println!("\nSuccess: {}", result.is_success());
    for diagnostic in result.errors() {
        println!("Error: {}", diagnostic);
    }

    Ok(())
}

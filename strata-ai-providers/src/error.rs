//! Error types for adapters, request building and configuration.

use strata_ai_core::{SchemaError, UnsupportedSchemaFeature};
use thiserror::Error;

/// Error while adapting a schema to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaptError {
    /// The schema itself is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The provider cannot express the schema in the requested mode.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedSchemaFeature),
}

impl AdaptError {
    /// Whether this is a provider limitation rather than a schema bug.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

/// Error while building a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No messages were supplied.
    #[error("Request has no messages; add a prompt or message before building")]
    NoMessages,

    /// The adapted schema was produced for another provider or model.
    #[error("Schema was adapted for '{adapted}' but the request targets '{request}'")]
    AdapterMismatch {
        /// Selector of the request builder.
        request: String,
        /// Selector the schema was adapted for.
        adapted: String,
    },
}

/// Error in adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Provider name not recognized.
    #[error("Unknown provider: {name}. Supported: openai, anthropic, gemini, mistral, groq, ollama, deepseek, xai")]
    UnknownProvider {
        /// The name given.
        name: String,
    },

    /// Model selector could not be parsed.
    #[error("Invalid model selector '{selector}': expected 'provider:model' or 'model'")]
    InvalidModelSelector {
        /// The selector given.
        selector: String,
    },

    /// Output mode not recognized.
    #[error("Invalid output mode '{value}': expected 'strict' or 'json_best_effort'")]
    InvalidOutputMode {
        /// The value given.
        value: String,
    },
}

impl ConfigError {
    /// Create an unknown provider error.
    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider { name: name.into() }
    }

    /// Create an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        Self::InvalidModelSelector {
            selector: selector.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_error_from() {
        let err: AdaptError = SchemaError::empty_enum("/genre").into();
        assert!(!err.is_unsupported());
        assert!(err.to_string().contains("/genre"));

        let err: AdaptError = UnsupportedSchemaFeature::new("anthropic", "claude-3", "strict").into();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_config_error_messages() {
        assert!(ConfigError::unknown_provider("foo").to_string().contains("foo"));
        assert!(ConfigError::invalid_selector(":gpt").to_string().contains(":gpt"));
    }
}

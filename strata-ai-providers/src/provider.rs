//! Supported providers and model selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A supported model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI.
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic.
    Anthropic,
    /// Google Gemini.
    Gemini,
    /// Mistral AI.
    Mistral,
    /// Groq.
    Groq,
    /// Ollama (local models).
    Ollama,
    /// DeepSeek.
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// xAI.
    #[serde(rename = "xai")]
    XAI,
}

impl Provider {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
            Provider::Mistral => "mistral",
            Provider::Groq => "groq",
            Provider::Ollama => "ollama",
            Provider::DeepSeek => "deepseek",
            Provider::XAI => "xai",
        }
    }

    /// Get all providers.
    #[must_use]
    pub fn all() -> &'static [Provider] {
        &[
            Provider::OpenAI,
            Provider::Anthropic,
            Provider::Gemini,
            Provider::Mistral,
            Provider::Groq,
            Provider::Ollama,
            Provider::DeepSeek,
            Provider::XAI,
        ]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Provider::OpenAI),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "gemini" | "google" | "google-gla" | "google-vertex" => Ok(Provider::Gemini),
            "mistral" => Ok(Provider::Mistral),
            "groq" => Ok(Provider::Groq),
            "ollama" => Ok(Provider::Ollama),
            "deepseek" => Ok(Provider::DeepSeek),
            "xai" | "x-ai" | "grok" => Ok(Provider::XAI),
            _ => Err(ConfigError::unknown_provider(s)),
        }
    }
}

/// A provider and model, resolved once from a selector string.
///
/// The format is `provider:model`; a bare model name defaults to OpenAI.
///
/// ```rust
/// use strata_ai_providers::{ModelSelector, Provider};
///
/// let selector = ModelSelector::parse("claude:claude-3-5-sonnet-latest").unwrap();
/// assert_eq!(selector.provider(), Provider::Anthropic);
/// assert_eq!(selector.model(), "claude-3-5-sonnet-latest");
/// assert_eq!(selector.to_string(), "anthropic:claude-3-5-sonnet-latest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelSelector {
    provider: Provider,
    model: String,
}

impl ModelSelector {
    /// Create a selector from its parts.
    #[must_use]
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Parse a `provider:model` string.
    pub fn parse(selector: &str) -> Result<Self, ConfigError> {
        let selector = selector.trim();
        let (provider, model) = match selector.split_once(':') {
            Some((provider, model)) => (provider.parse()?, model.trim()),
            None => (Provider::OpenAI, selector),
        };

        if model.is_empty() {
            return Err(ConfigError::invalid_selector(selector));
        }
        Ok(Self::new(provider, model))
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
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

impl FromStr for ModelSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("openai", Provider::OpenAI)]
    #[case("gpt", Provider::OpenAI)]
    #[case("Claude", Provider::Anthropic)]
    #[case("google", Provider::Gemini)]
    #[case("google-vertex", Provider::Gemini)]
    #[case("mistral", Provider::Mistral)]
    #[case("groq", Provider::Groq)]
    #[case("ollama", Provider::Ollama)]
    #[case("deepseek", Provider::DeepSeek)]
    #[case("grok", Provider::XAI)]
    #[case("x-ai", Provider::XAI)]
    fn test_provider_aliases(#[case] name: &str, #[case] expected: Provider) {
        assert_eq!(name.parse::<Provider>().unwrap(), expected);
    }

    #[test]
    fn test_provider_roundtrip() {
        for provider in Provider::all() {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), *provider);
            let json = serde_json::to_string(provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider.as_str()));
        }
    }

    #[test]
    fn test_unknown_provider() {
        let err = "bedrock".parse::<Provider>().unwrap_err();
        assert_eq!(err, ConfigError::unknown_provider("bedrock"));
    }

    #[test]
    fn test_selector_parse() {
        let selector = ModelSelector::parse("openai:gpt-4o").unwrap();
        assert_eq!(selector.provider(), Provider::OpenAI);
        assert_eq!(selector.model(), "gpt-4o");

        let selector = ModelSelector::parse("gpt-4o-mini").unwrap();
        assert_eq!(selector.provider(), Provider::OpenAI);
        assert_eq!(selector.model(), "gpt-4o-mini");

        // Only the first colon separates provider from model.
        let selector = ModelSelector::parse("ollama:llama3.1:8b").unwrap();
        assert_eq!(selector.provider(), Provider::Ollama);
        assert_eq!(selector.model(), "llama3.1:8b");
    }

    #[test]
    fn test_selector_errors() {
        assert!(matches!(
            ModelSelector::parse("openai:"),
            Err(ConfigError::InvalidModelSelector { .. })
        ));
        assert!(matches!(
            ModelSelector::parse(""),
            Err(ConfigError::InvalidModelSelector { .. })
        ));
        assert!(matches!(
            ModelSelector::parse("nope:model"),
            Err(ConfigError::UnknownProvider { .. })
        ));
    }
}

//! Generation settings.
//!
//! This module provides the `GenerationSettings` type for configuring
//! sampling parameters, token limits and tool definitions for a request.

use serde::{Deserialize, Serialize};

/// A tool the model may call during generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// What the tool does.
    pub description: String,
    /// JSON schema of the tool's parameters.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a tool definition with an empty object parameter schema.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    /// Set the parameter schema.
    #[must_use]
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Settings for model generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    /// Sampling temperature (0.0 to 2.0 typically).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Top-p (nucleus) sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Tools the model may call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

impl GenerationSettings {
    /// Create new empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max tokens.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Set temperature.
    #[must_use]
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set top-p.
    #[must_use]
    pub fn top_p(mut self, p: f64) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Set stop sequences.
    #[must_use]
    pub fn stop(mut self, sequences: Vec<String>) -> Self {
        self.stop = Some(sequences);
        self
    }

    /// Add a stop sequence.
    #[must_use]
    pub fn add_stop(mut self, sequence: impl Into<String>) -> Self {
        self.stop.get_or_insert_with(Vec::new).push(sequence.into());
        self
    }

    /// Set seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add a tool.
    #[must_use]
    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    /// Merge with another settings, preferring values from `other`.
    ///
    /// Tools are concatenated, `self` first.
    #[must_use]
    pub fn merge(&self, other: &GenerationSettings) -> GenerationSettings {
        GenerationSettings {
            max_tokens: other.max_tokens.or(self.max_tokens),
            temperature: other.temperature.or(self.temperature),
            top_p: other.top_p.or(self.top_p),
            stop: other.stop.clone().or_else(|| self.stop.clone()),
            seed: other.seed.or(self.seed),
            tools: self.tools.iter().chain(&other.tools).cloned().collect(),
        }
    }

    /// Check if all settings are unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none()
            && self.temperature.is_none()
            && self.top_p.is_none()
            && self.stop.is_none()
            && self.seed.is_none()
            && self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_new() {
        let settings = GenerationSettings::new();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_settings_builder() {
        let settings = GenerationSettings::new()
            .max_tokens(1000)
            .temperature(0.7)
            .top_p(0.9)
            .seed(42);

        assert_eq!(settings.max_tokens, Some(1000));
        assert_eq!(settings.temperature, Some(0.7));
        assert_eq!(settings.top_p, Some(0.9));
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_settings_stop() {
        let settings = GenerationSettings::new().add_stop("\n\n").add_stop("END");

        assert_eq!(
            settings.stop,
            Some(vec!["\n\n".to_string(), "END".to_string()])
        );
    }

    #[test]
    fn test_settings_merge() {
        let base = GenerationSettings::new()
            .max_tokens(1000)
            .temperature(0.5)
            .tool(ToolDefinition::new("search", "Search the web"));

        let override_settings = GenerationSettings::new()
            .temperature(0.8)
            .top_p(0.9)
            .tool(ToolDefinition::new("lookup", "Look up a movie"));

        let merged = base.merge(&override_settings);

        assert_eq!(merged.max_tokens, Some(1000));
        assert_eq!(merged.temperature, Some(0.8));
        assert_eq!(merged.top_p, Some(0.9));
        assert_eq!(merged.tools.len(), 2);
        assert_eq!(merged.tools[0].name, "search");
    }

    #[test]
    fn test_serde_skips_unset() {
        let settings = GenerationSettings::new().max_tokens(256);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json, serde_json::json!({"max_tokens": 256}));

        let parsed: GenerationSettings = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, settings);
    }
}

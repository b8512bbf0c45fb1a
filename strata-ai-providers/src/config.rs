//! Adapter configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use strata_ai_output::OutputMode;

use crate::adapter::ProviderAdapter;
use crate::error::ConfigError;
use crate::provider::ModelSelector;

/// Environment variable holding the model selector.
pub const ENV_MODEL: &str = "STRATA_MODEL";
/// Environment variable holding the output mode override.
pub const ENV_OUTPUT_MODE: &str = "STRATA_OUTPUT_MODE";
/// Environment variable holding the schema name.
pub const ENV_SCHEMA_NAME: &str = "STRATA_SCHEMA_NAME";

/// Serializable description of an adapter.
///
/// ```rust
/// use strata_ai_providers::{AdapterConfig, Provider};
///
/// let config: AdapterConfig = serde_json::from_str(
///     r#"{"model": "gemini:gemini-1.5-pro", "output_mode": "json_best_effort"}"#,
/// ).unwrap();
/// let adapter = config.into_adapter().unwrap();
/// assert_eq!(adapter.provider(), Provider::Gemini);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Model selector, `provider:model`.
    pub model: String,
    /// Output mode override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<OutputMode>,
    /// Schema name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    /// Provider option overlay merged into every request body.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub provider_options: Map<String, JsonValue>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            output_mode: None,
            schema_name: None,
            provider_options: Map::new(),
        }
    }
}

impl AdapterConfig {
    /// Model used when none is configured.
    pub const DEFAULT_MODEL: &'static str = "openai:gpt-4o";

    /// Create a config for a model selector.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Read `STRATA_MODEL`, `STRATA_OUTPUT_MODE` and `STRATA_SCHEMA_NAME`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(mode) = lookup(ENV_OUTPUT_MODE).filter(|v| !v.trim().is_empty()) {
            let parsed = mode
                .parse::<OutputMode>()
                .map_err(|_| ConfigError::InvalidOutputMode { value: mode.clone() })?;
            config.output_mode = Some(parsed);
        }
        if let Some(name) = lookup(ENV_SCHEMA_NAME).filter(|v| !v.trim().is_empty()) {
            config.schema_name = Some(name);
        }

        Ok(config)
    }

    /// Set the output mode override.
    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = Some(mode);
        self
    }

    /// Set the schema name.
    #[must_use]
    pub fn with_schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    /// Set one provider option.
    #[must_use]
    pub fn with_provider_option(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.provider_options.insert(key.into(), value);
        self
    }

    /// Parse the model selector.
    pub fn selector(&self) -> Result<ModelSelector, ConfigError> {
        ModelSelector::parse(&self.model)
    }

    /// Build the adapter, resolving the provider once.
    pub fn into_adapter(self) -> Result<ProviderAdapter, ConfigError> {
        let mut adapter = ProviderAdapter::new(self.selector()?);
        if let Some(mode) = self.output_mode {
            adapter = adapter.with_output_mode(mode);
        }
        if let Some(name) = self.schema_name {
            adapter = adapter.with_schema_name(name);
        }
        Ok(adapter)
    }
}

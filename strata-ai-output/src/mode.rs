//! Output mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a provider is asked to produce structured output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// The provider enforces the schema while generating.
    ///
    /// Output is parsed as-is; no recovery is attempted on text that is
    /// not valid JSON.
    Strict,

    /// The provider is asked for JSON, with the schema given as an
    /// instruction.
    ///
    /// The shape is not enforced by the provider, so output is validated
    /// after the fact and JSON embedded in prose or code fences is
    /// recovered.
    #[default]
    JsonBestEffort,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Strict => write!(f, "strict"),
            OutputMode::JsonBestEffort => write!(f, "json_best_effort"),
        }
    }
}

impl OutputMode {
    /// Whether the provider enforces the schema.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        matches!(self, OutputMode::Strict)
    }

    /// Get all output modes.
    #[must_use]
    pub fn all() -> &'static [OutputMode] {
        &[OutputMode::Strict, OutputMode::JsonBestEffort]
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" | "native" | "json_schema" => Ok(OutputMode::Strict),
            "json_best_effort" | "best_effort" | "json" | "prompted" => {
                Ok(OutputMode::JsonBestEffort)
            }
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_mode() {
        assert_eq!(OutputMode::default(), OutputMode::JsonBestEffort);
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputMode::Strict.to_string(), "strict");
        assert_eq!(OutputMode::JsonBestEffort.to_string(), "json_best_effort");
    }

    #[rstest]
    #[case("strict", OutputMode::Strict)]
    #[case("Native", OutputMode::Strict)]
    #[case("json_schema", OutputMode::Strict)]
    #[case("json_best_effort", OutputMode::JsonBestEffort)]
    #[case("json", OutputMode::JsonBestEffort)]
    #[case(" prompted ", OutputMode::JsonBestEffort)]
    fn test_from_str(#[case] input: &str, #[case] expected: OutputMode) {
        assert_eq!(input.parse::<OutputMode>().unwrap(), expected);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "tool".parse::<OutputMode>().unwrap_err();
        assert!(err.contains("tool"));
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&OutputMode::JsonBestEffort).unwrap();
        assert_eq!(json, "\"json_best_effort\"");

        let parsed: OutputMode = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(parsed, OutputMode::Strict);
    }
}

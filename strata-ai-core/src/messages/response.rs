//! Response-side types shared by every provider.

use serde::{Deserialize, Serialize};

/// Reason why the model stopped generating.
///
/// Every provider spells its stop indicator differently; they are all
/// folded into this fixed set. Anything unrecognized becomes
/// [`FinishReason::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of response.
    Stop,
    /// Maximum tokens reached.
    Length,
    /// Model wants to call tools.
    ToolCall,
    /// Content was filtered.
    ContentFilter,
    /// An error occurred.
    Error,
    /// The provider did not report a reason, or reported one we don't know.
    #[default]
    Unknown,
}

impl FinishReason {
    /// Map a raw provider stop indicator.
    ///
    /// Matching is case-insensitive and covers the spellings used by
    /// OpenAI, Anthropic, Gemini, Mistral, Groq, Ollama, DeepSeek and xAI.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stop" | "end_turn" | "stop_sequence" | "eos" | "eos_token" | "complete"
            | "completed" | "finished" => Self::Stop,
            "length" | "max_tokens" | "model_length" | "token_limit" => Self::Length,
            "tool_calls" | "tool_call" | "tool_use" | "function_call" | "tools" => Self::ToolCall,
            "content_filter" | "safety" | "recitation" | "blocklist" | "prohibited_content"
            | "spii" | "refusal" => Self::ContentFilter,
            "error" | "malformed_function_call" | "insufficient_system_resource" => Self::Error,
            other => {
                tracing::debug!(raw = other, "Unrecognized finish reason");
                Self::Unknown
            }
        }
    }

    /// Map an optional raw stop indicator; absence maps to `Unknown`.
    #[must_use]
    pub fn from_raw_opt(raw: Option<&str>) -> Self {
        raw.map(Self::from_raw).unwrap_or_default()
    }

    /// Check if this indicates the response is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Check if this indicates truncation.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Length)
    }

    /// Check if this indicates tool use.
    #[must_use]
    pub fn is_tool_call(&self) -> bool {
        matches!(self, Self::ToolCall)
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => write!(f, "stop"),
            Self::Length => write!(f, "length"),
            Self::ToolCall => write!(f, "tool_call"),
            Self::ContentFilter => write!(f, "content_filter"),
            Self::Error => write!(f, "error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

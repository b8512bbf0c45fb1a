//! Token usage reported by a provider for a single request.

use serde::{Deserialize, Serialize};

/// Token usage for a single request.
///
/// Counts are never negative. Providers occasionally report nonsense such as
/// `-1` for an unknown count; [`Usage::from_reported`] clamps those to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u64,
    /// Number of tokens in the completion.
    pub completion_tokens: u64,
}

impl Usage {
    /// Create a usage record from known-good counts.
    #[must_use]
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Create a usage record from provider-reported counts.
    ///
    /// Negative counts are clamped to zero and logged as an anomaly.
    #[must_use]
    pub fn from_reported(prompt_tokens: i64, completion_tokens: i64) -> Self {
        Self {
            prompt_tokens: clamp_count("prompt_tokens", prompt_tokens),
            completion_tokens: clamp_count("completion_tokens", completion_tokens),
        }
    }

    /// Total tokens (prompt + completion).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }

    /// Check if no tokens were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompt_tokens == 0 && self.completion_tokens == 0
    }
}

fn clamp_count(field: &'static str, reported: i64) -> u64 {
    u64::try_from(reported).unwrap_or_else(|_| {
        tracing::warn!(field, reported, "Provider reported a negative token count, clamping to 0");
        0
    })
}

impl std::ops::Add for Usage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            prompt_tokens: self.prompt_tokens.saturating_add(rhs.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(rhs.completion_tokens),
        }
    }
}

impl std::ops::AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Usage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, u| acc + u)
    }
}

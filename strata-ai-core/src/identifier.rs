//! ID generation utilities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier attached to every generation request.
///
/// Used to correlate a request with its result in logs; never sent to a
/// provider as part of the request body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh request ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_request_id())
    }

    /// Wrap an existing ID.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a unique request ID.
///
/// Returns a UUID v4 string prefixed with "req_".
///
/// # Example
///
/// ```rust
/// use strata_ai_core::identifier::generate_request_id;
///
/// let id = generate_request_id();
/// assert!(id.starts_with("req_"));
/// assert_eq!(id.len(), 36); // "req_" + 32 hex chars
/// ```
#[must_use]
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

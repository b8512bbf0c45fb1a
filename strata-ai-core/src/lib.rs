//! # strata-ai-core
//!
//! Core types, messages, and error handling for the strata-ai framework.
//!
//! This crate provides the foundational types used throughout the strata-ai workspace:
//!
//! - **Messages**: Conversation turns and the normalized finish reason
//! - **Errors**: Schema, adapter and transport error types
//! - **Usage**: Token usage reported by a provider
//! - **Settings**: Generation parameters and tool definitions
//! - **Identifiers**: Request IDs for log correlation
//!
//! ## Example
//!
//! ```rust
//! use strata_ai_core::{FinishReason, GenerationSettings, Message, Usage};
//!
//! let messages = vec![
//!     Message::system("You are a film critic."),
//!     Message::user("Review Inception."),
//! ];
//!
//! let settings = GenerationSettings::new()
//!     .max_tokens(1000)
//!     .temperature(0.7);
//!
//! // Providers sometimes report garbage counts; they are clamped.
//! let usage = Usage::from_reported(120, -1);
//! assert_eq!(usage.completion_tokens, 0);
//!
//! assert_eq!(FinishReason::from_raw("end_turn"), FinishReason::Stop);
//! # let _ = (messages, settings);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod errors;
pub mod identifier;
pub mod json;
pub mod messages;
pub mod settings;
pub mod usage;

// Re-exports for convenience
pub use errors::{SchemaError, SchemaErrorKind, TransportError, UnsupportedSchemaFeature};
pub use identifier::RequestId;
pub use messages::{FinishReason, Message, Role};
pub use settings::{GenerationSettings, ToolDefinition};
pub use usage::Usage;

/// Prelude module for common imports.
///
/// ```rust
/// use strata_ai_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::errors::{SchemaError, SchemaErrorKind, TransportError, UnsupportedSchemaFeature};
    pub use crate::identifier::RequestId;
    pub use crate::messages::{FinishReason, Message, Role};
    pub use crate::settings::{GenerationSettings, ToolDefinition};
    pub use crate::usage::Usage;
}

//! # strata-ai-output
//!
//! Response coercion and the structured result envelope.
//!
//! Once a transport has executed a request, its [`RawResponse`] is handed to
//! the [`ResponseCoercer`], which parses and validates the output against
//! the schema and seals everything into a [`StructuredResult`].
//!
//! ## Output Modes
//!
//! - **Strict**: the provider enforced the schema; output is parsed as-is
//! - **JsonBestEffort**: the provider was only asked for JSON; JSON wrapped in
//!   code fences or prose is recovered, with a warning diagnostic
//!
//! ## Diagnostics, not errors
//!
//! Problems in provider output never surface as `Err`. They are recorded as
//! [`Diagnostic`]s on the result, and any error-severity diagnostic leaves
//! the result without an object. The raw text, finish reason and usage are
//! always available.
//!
//! ## Example
//!
//! ```rust
//! use strata_ai_output::{OutputMode, RawResponse, ResponseCoercer};
//! use strata_ai_schema::{ObjectSchema, SchemaNode};
//!
//! let schema = ObjectSchema::new("movie_review", "A structured movie review")
//!     .required_property(SchemaNode::string("title", "The movie title"))
//!     .required_property(SchemaNode::number("rating", "Rating out of 10"))
//!     .build();
//!
//! let raw = RawResponse::new()
//!     .with_structured(serde_json::json!({"title": "Inception", "rating": 9}))
//!     .with_finish_reason("stop")
//!     .with_usage(120, 18);
//!
//! let result = ResponseCoercer::coerce(raw, &schema, OutputMode::Strict);
//! let review = result.require_object().unwrap();
//! assert_eq!(review.str_field("title").unwrap(), "Inception");
//! assert_eq!(result.usage().total(), 138);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod coercer;
pub mod diagnostics;
pub mod error;
pub mod mode;
pub mod object;
pub mod parser;
pub mod raw;
pub mod result;
pub mod validate;

// Re-exports
pub use coercer::ResponseCoercer;
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{OutputError, OutputResult};
pub use mode::OutputMode;
pub use object::StructuredObject;
pub use parser::{extract_json_from_text, ExtractedJson, JsonSource};
pub use raw::RawResponse;
pub use result::StructuredResult;
pub use validate::validate_value;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        Diagnostic, DiagnosticKind, OutputError, OutputMode, RawResponse, ResponseCoercer,
        Severity, StructuredObject, StructuredResult,
    };
}

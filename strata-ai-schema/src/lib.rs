//! # strata-ai-schema
//!
//! The schema model: a tree describing the shape of the output a caller
//! wants back from a model.
//!
//! A schema is built once, validated, and then shared read-only (usually
//! behind an `Arc`) by the adapter that turns it into a provider payload and
//! by the coercer that checks provider output against it.
//!
//! ## Example
//!
//! ```rust
//! use strata_ai_schema::{ObjectSchema, SchemaNode};
//!
//! let review = ObjectSchema::new("movie_review", "A structured movie review")
//!     .required_property(SchemaNode::string("title", "The movie title"))
//!     .required_property(SchemaNode::number("rating", "Rating out of 10"))
//!     .optional_property(SchemaNode::array(
//!         "cast",
//!         "Main cast members",
//!         SchemaNode::string("actor", ""),
//!     ))
//!     .build();
//!
//! review.validate().unwrap();
//!
//! let json_schema = review.to_json_schema();
//! assert_eq!(json_schema["required"], serde_json::json!(["title", "rating"]));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod node;
pub mod path;
mod render;
mod validate;

pub use node::{ObjectSchema, SchemaKind, SchemaNode};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::node::{ObjectSchema, SchemaKind, SchemaNode};
}

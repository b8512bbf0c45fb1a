//! Message types for model interactions.
//!
//! - [`Message`]: a single conversation turn sent to the model
//! - [`FinishReason`]: why the model stopped generating

mod message;
mod response;

pub use message::{Message, Role};
pub use response::FinishReason;

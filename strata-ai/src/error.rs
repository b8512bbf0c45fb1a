//! Error type for the strata-ai pipeline.

use strata_ai_core::{SchemaError, TransportError};
use strata_ai_output::OutputError;
use strata_ai_providers::{AdaptError, ConfigError, RequestError};
use thiserror::Error;

/// Any error the pipeline can return before or while talking to a provider.
///
/// Problems with the provider's *output* are not errors; they are
/// diagnostics on the [`StructuredResult`](strata_ai_output::StructuredResult).
#[derive(Debug, Error)]
pub enum StrataError {
    /// The schema tree is inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The schema could not be adapted for the selected provider.
    #[error(transparent)]
    Adapt(#[from] AdaptError),

    /// The request could not be built.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport failed. Passed through as the transport reported it.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Typed access on a result failed.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// `build()` was called without a schema.
    #[error("No output schema set; call with_schema() before build()")]
    MissingSchema,
}

impl StrataError {
    /// Whether the error came from the transport.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, StrataError::Transport(_))
    }

    /// Whether the provider cannot honor the schema or mode.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StrataError::Adapt(e) if e.is_unsupported())
    }
}

/// Result alias for pipeline operations.
pub type StrataResult<T> = Result<T, StrataError>;

//! The transport seam.
//!
//! A [`Transport`] executes a [`GenerationRequest`] against a provider and
//! hands back the [`RawResponse`]. HTTP, retries, timeouts and cancellation
//! all live behind this trait.
//!
//! Two transports ship for testing:
//!
//! - [`StaticTransport`]: returns the same canned response for every request
//! - [`FunctionTransport`]: computes the response from the request

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strata_ai_core::TransportError;
use strata_ai_output::RawResponse;
use strata_ai_providers::GenerationRequest;

/// Executes requests against a provider.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the provider's raw response.
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

// ============================================================================
// StaticTransport
// ============================================================================

/// A transport that answers every request with the same canned outcome.
///
/// Clones share the served counter.
///
/// # Example
///
/// ```rust
/// use strata_ai::{RawResponse, StaticTransport};
///
/// let transport = StaticTransport::new(RawResponse::from_text(r#"{"title": "Inception"}"#));
/// assert_eq!(transport.served(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct StaticTransport {
    outcome: Result<RawResponse, TransportError>,
    served: Arc<AtomicUsize>,
}

impl StaticTransport {
    /// Answer every request with `response`.
    #[must_use]
    pub fn new(response: RawResponse) -> Self {
        Self {
            outcome: Ok(response),
            served: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            served: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests sent so far, failed ones included.
    #[must_use]
    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, TransportError> {
        let count = self.served.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(request_id = %request.id(), served = count, "static transport answering");
        self.outcome.clone()
    }
}

// ============================================================================
// FunctionTransport
// ============================================================================

type ResponseFn = dyn Fn(&GenerationRequest) -> Result<RawResponse, TransportError> + Send + Sync;

/// A transport driven by a closure over the request.
///
/// ```rust
/// use strata_ai::{FunctionTransport, RawResponse};
///
/// let transport = FunctionTransport::new(|request| {
///     Ok(RawResponse::from_text(format!(r#"{{"model": "{}"}}"#, request.model())))
/// });
/// ```
#[derive(Clone)]
pub struct FunctionTransport {
    func: Arc<ResponseFn>,
}

impl FunctionTransport {
    /// Wrap a closure.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&GenerationRequest) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }
}

impl fmt::Debug for FunctionTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for FunctionTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, TransportError> {
        (self.func)(request)
    }
}

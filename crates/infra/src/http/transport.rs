//! Transport seam between the API operations and the HTTP stack
//!
//! Operations only need "execute this request, give me status and body".
//! Cancellation is not the transport's concern: the caller races the
//! returned future against its [`RequestContext`](crate::RequestContext)
//! and drops it when the context ends.

use async_trait::async_trait;
use reqwest::{Request, StatusCode};
use thiserror::Error;

/// Failure below the HTTP layer
#[derive(Debug, Error)]
pub enum TransportError {
    /// The client-level timeout elapsed.
    #[error("HTTP request timed out")]
    Timeout,

    /// Connection could not be established.
    #[error("HTTP connection failure: {0}")]
    Connect(String),

    /// Response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Client or request could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// Any other request failure.
    #[error("HTTP request failed: {0}")]
    Request(String),
}

/// Status and fully buffered body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body, read to the end.
    pub body: Vec<u8>,
}

/// Executes fully formed requests.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` once and buffer the whole response.
    ///
    /// # Errors
    ///
    /// [`TransportError`] when no complete response was received. A
    /// non-success status is not an error at this level.
    async fn execute(&self, request: Request) -> Result<TransportResponse, TransportError>;
}

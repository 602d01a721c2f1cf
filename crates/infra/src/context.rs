//! Per-call cancellation context
//!
//! A [`RequestContext`] pairs a [`CancellationToken`] with an optional
//! deadline. Every API operation takes one and stops waiting as soon as the
//! token is cancelled or the deadline passes, whatever the transport is
//! doing at that moment.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ApiError;

/// Cancellation and deadline bound to one or more requests
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context that never ends on its own.
    pub fn background() -> Self {
        Self::default()
    }

    /// Context whose deadline is `timeout` from now. A timeout too large to
    /// represent as an [`Instant`] leaves the context without a deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { token: CancellationToken::new(), deadline: Instant::now().checked_add(timeout) }
    }

    /// Context that ends at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self { token: CancellationToken::new(), deadline: Some(deadline) }
    }

    /// Context that ends when `token` is cancelled.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self { token, deadline: None }
    }

    /// Same context with a deadline `timeout` from now. An earlier existing
    /// deadline is kept.
    pub fn timeout(self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(existing), Some(candidate)) => Some(existing.min(candidate)),
            (existing, None) => existing,
            (None, candidate) => candidate,
        };
        Self { deadline, ..self }
    }

    /// Child context: cancelled with its parent, cancellable on its own.
    pub fn child(&self) -> Self {
        Self { token: self.token.child_token(), deadline: self.deadline }
    }

    /// Cancel this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// `true` once [`RequestContext::cancel`] was called here or on a parent.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Point in time at which the context ends, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context has already ended.
    ///
    /// # Errors
    ///
    /// [`ApiError::Cancelled`] or [`ApiError::DeadlineExceeded`].
    pub fn check(&self, operation: &'static str) -> Result<(), ApiError> {
        if self.token.is_cancelled() {
            return Err(ApiError::Cancelled { operation });
        }

        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(ApiError::DeadlineExceeded { operation });
        }

        Ok(())
    }

    /// Drive `future` until it completes or the context ends, whichever
    /// happens first. The future is dropped when the context wins.
    ///
    /// # Errors
    ///
    /// The future's own error, or [`ApiError::Cancelled`] /
    /// [`ApiError::DeadlineExceeded`].
    pub async fn run<T, F>(&self, operation: &'static str, future: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.check(operation)?;

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!(operation, "context cancelled before completion");
                Err(ApiError::Cancelled { operation })
            }
            _ = expired => {
                debug!(operation, "context deadline exceeded before completion");
                Err(ApiError::DeadlineExceeded { operation })
            }
            result = future => result,
        }
    }
}

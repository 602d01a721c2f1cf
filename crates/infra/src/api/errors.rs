//! API-specific error types
//!
//! Every variant carries the name of the operation that failed so callers
//! can tell a failed credential exchange from a failed long-poll without
//! extra bookkeeping.

use irkit_domain::MessageError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::http::TransportError;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Caller passed an unusable argument or message - fix the call
    Caller,
    /// Server answered with a non-200 status
    Remote,
    /// Server answered 200 with a body of the wrong shape
    Decode,
    /// Connection or I/O failure below HTTP
    Network,
    /// Caller's context was cancelled or its deadline passed
    Cancellation,
    /// Client could not be constructed
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Empty required argument, or an unusable method or path.
    #[error("{operation}: invalid argument: {reason}")]
    InvalidArgument {
        /// Operation that rejected the call.
        operation: &'static str,
        /// What was wrong with the argument.
        reason: String,
    },

    /// Message rejected before anything was sent.
    #[error("{operation}: invalid message: {source}")]
    Validation {
        /// Operation that rejected the message.
        operation: &'static str,
        /// Rule the message violates.
        #[source]
        source: MessageError,
    },

    /// Server answered with a status other than 200.
    #[error("{operation}: remote returned status {status} {status_text}")]
    Remote {
        /// Operation whose request was refused.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for `status`.
        status_text: String,
    },

    /// Server answered 200 with a body of the wrong shape.
    #[error("{operation}: failed to decode response: {source}")]
    Decode {
        /// Operation whose response failed to parse.
        operation: &'static str,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Connection or I/O failure below HTTP.
    #[error("{operation}: transport failure: {source}")]
    Transport {
        /// Operation whose request failed.
        operation: &'static str,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// Caller's context was cancelled first.
    #[error("{operation}: operation cancelled")]
    Cancelled {
        /// Operation that was abandoned.
        operation: &'static str,
    },

    /// Caller's context deadline passed first.
    #[error("{operation}: deadline exceeded")]
    DeadlineExceeded {
        /// Operation that was abandoned.
        operation: &'static str,
    },

    /// Client could not be constructed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { operation, reason: reason.into() }
    }

    pub(crate) fn remote(operation: &'static str, status: StatusCode) -> Self {
        Self::Remote {
            operation,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("unknown status").to_string(),
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::Validation { .. } => ApiErrorCategory::Caller,
            Self::Remote { .. } => ApiErrorCategory::Remote,
            Self::Decode { .. } => ApiErrorCategory::Decode,
            Self::Transport { .. } => ApiErrorCategory::Network,
            Self::Cancelled { .. } | Self::DeadlineExceeded { .. } => {
                ApiErrorCategory::Cancellation
            }
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// `true` for [`ApiError::Cancelled`] and [`ApiError::DeadlineExceeded`].
    pub fn is_cancellation(&self) -> bool {
        self.category() == ApiErrorCategory::Cancellation
    }

    /// HTTP status of a [`ApiError::Remote`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Name of the operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { operation, .. }
            | Self::Validation { operation, .. }
            | Self::Remote { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Cancelled { operation }
            | Self::DeadlineExceeded { operation } => Some(*operation),
            Self::Config(_) => None,
        }
    }
}

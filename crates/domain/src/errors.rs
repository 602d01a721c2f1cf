//! Error types used throughout the domain

use thiserror::Error;

/// Rule violated by a [`Message`](crate::Message) that cannot be submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// `format` is not `"raw"`.
    #[error("format must be \"raw\", got {0:?}")]
    UnsupportedFormat(String),

    /// `freq` is not 38 or 40.
    #[error("freq must be 38 or 40 kHz, got {0}")]
    UnsupportedFrequency(u32),

    /// `data` has no intervals.
    #[error("data must contain at least one interval")]
    EmptyData,
}

/// Main error type for the IRKit domain
#[derive(Error, Debug)]
pub enum IrkitError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Message failed validation.
    #[error("Invalid message: {0}")]
    Validation(#[from] MessageError),
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, IrkitError>;

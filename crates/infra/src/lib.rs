//! # IRKit Infrastructure
//!
//! HTTP client for the IRKit Internet API.
//!
//! This crate contains:
//! - Request construction and the relay API operations
//! - The reqwest-backed transport
//! - Per-call cancellation contexts
//! - Configuration loading
//!
//! ## Architecture
//! - Depends on `irkit-domain` for signal types and validation
//! - Contains all "impure" code (network I/O, environment, files)
//! - Emits `tracing` events; installing a subscriber is left to the binary

pub mod api;
pub mod config;
pub mod context;
mod errors;
pub mod http;

// Re-export commonly used items
pub use api::*;
pub use context::RequestContext;
pub use http::{HttpClient, Transport, TransportError, TransportResponse};

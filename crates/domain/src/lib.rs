//! # IRKit Domain
//!
//! Domain types for the IRKit Internet HTTP API.
//!
//! This crate contains:
//! - Signal types ([`Message`], [`SignalInfo`]) and message validation
//! - Domain error types and Result definitions
//! - Client configuration structure
//! - Protocol constants
//!
//! ## Architecture
//! - No dependencies on other IRKit crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

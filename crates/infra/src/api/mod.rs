//! IRKit Internet API
//!
//! Request construction, the four relay operations and their error
//! taxonomy.
//!
//! # Architecture
//!
//! - [`RequestOption`] + [`build_request`]: pure request construction
//! - [`InternetClient`]: operations over a [`Transport`](crate::http::Transport)
//! - [`ApiError`]: one variant per failure class, each tagged with the
//!   operation name
//!
//! No retries, no background tasks. Long-poll responsiveness is the
//! caller's concern: run [`InternetClient::get_messages`] on its own task.

pub mod client;
pub mod errors;
pub mod models;
pub mod request;

pub use client::{InternetClient, InternetClientBuilder, PATH_DEVICES, PATH_KEYS, PATH_MESSAGES};
pub use errors::{ApiError, ApiErrorCategory};
pub use models::{ClientKeys, DeviceKeys};
pub use request::{build_request, PreparedRequest, RequestOption};

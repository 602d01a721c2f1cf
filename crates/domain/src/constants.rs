//! Protocol constants
//!
//! Values fixed by the IRKit Internet HTTP API.

/// Vendor-hosted relay endpoint used when no base URL is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.getirkit.com";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("irkit-rs/", env!("CARGO_PKG_VERSION"));

// Signal encoding
/// The only `format` the device accepts.
pub const MESSAGE_FORMAT_RAW: &str = "raw";
/// Sub-carrier frequencies the device can emit, in kHz.
pub const SUPPORTED_FREQUENCIES_KHZ: [u32; 2] = [38, 40];

// HTTP transport defaults
/// Whole-request timeout. Longer than the server's long-poll window.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Connection establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

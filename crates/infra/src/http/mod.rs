//! HTTP transport

mod client;
mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::{Transport, TransportError, TransportResponse};

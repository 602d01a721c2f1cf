#![allow(dead_code)]

use std::sync::Once;

use irkit_domain::ClientConfig;
use irkit_infra::InternetClient;
use wiremock::{MockServer, Request};

static TRACING: Once = Once::new();

/// Install a test subscriber once so `RUST_LOG` works under `cargo test`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Client pointed at a running mock server.
pub fn client_for(server: &MockServer) -> InternetClient {
    init_tracing();
    InternetClient::new(&ClientConfig::with_base_url(server.uri())).expect("client should build")
}

/// Decoded `application/x-www-form-urlencoded` body of a captured request.
pub fn form_fields(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body).into_owned().collect()
}

/// Value of one form field, if present.
pub fn form_value(request: &Request, key: &str) -> Option<String> {
    form_fields(request).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

//! Request construction
//!
//! Turns an operation's method, relative path and parameters into a
//! [`reqwest::Request`] bound to the caller's [`RequestContext`]. Nothing
//! here touches the network.

use irkit_domain::constants::USER_AGENT;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Method, Request, Url};

use super::errors::ApiError;
use crate::context::RequestContext;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const OPERATION: &str = "new_request";

/// Query parameters and form fields for a single request.
///
/// Pairs keep insertion order, so the encoded body is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOption {
    params: Vec<(String, String)>,
    body: Vec<(String, String)>,
}

impl RequestOption {
    /// Empty option: no query parameters, no body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a URL query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append a form body field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.push((key.into(), value.into()));
        self
    }

    /// Query parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Form fields in insertion order.
    pub fn body(&self) -> &[(String, String)] {
        &self.body
    }

    /// Body fields as `key=value` pairs joined by `&`, percent-encoded.
    pub fn encoded_body(&self) -> String {
        self.body
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Outbound request together with the context that bounds it
#[derive(Debug)]
pub struct PreparedRequest {
    /// Request ready for a [`Transport`](crate::http::Transport).
    pub request: Request,
    /// Context bounding the request.
    pub context: RequestContext,
}

/// Build a request for `spath` relative to `base_url`.
///
/// # Errors
///
/// [`ApiError::InvalidArgument`] when `method` or `spath` is empty, or
/// `method` is not a valid HTTP method token.
pub fn build_request(
    base_url: &Url,
    ctx: &RequestContext,
    method: &str,
    spath: &str,
    opt: &RequestOption,
) -> Result<PreparedRequest, ApiError> {
    if method.is_empty() {
        return Err(ApiError::invalid_argument(OPERATION, "missing method"));
    }

    if spath.is_empty() {
        return Err(ApiError::invalid_argument(OPERATION, "missing spath"));
    }

    let method = Method::from_bytes(method.as_bytes()).map_err(|_| {
        ApiError::invalid_argument(OPERATION, format!("invalid method {method:?}"))
    })?;

    let mut url = join_path(base_url, spath);
    if !opt.params.is_empty() {
        url.query_pairs_mut().extend_pairs(opt.params.iter());
    }

    let mut request = Request::new(method, url);
    request.headers_mut().insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));

    if !opt.body.is_empty() {
        request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        *request.body_mut() = Some(opt.encoded_body().into());
    }

    Ok(PreparedRequest { request, context: ctx.clone() })
}

/// Append `spath` to the base URL's path, keeping any prefix the base
/// carries.
fn join_path(base_url: &Url, spath: &str) -> Url {
    let prefix = base_url.path().trim_end_matches('/');
    let suffix = spath.trim_start_matches('/');

    let mut url = base_url.clone();
    url.set_path(&format!("{prefix}/{suffix}"));
    url
}

//! IRKit Internet HTTP API client
//!
//! Four operations layered on [`build_request`]: credential exchange,
//! device-key exchange, signal submission and the signal long-poll. Each
//! call is bounded by the [`RequestContext`] it is given and is attempted
//! exactly once.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use irkit_domain::{ClientConfig, Message, SignalInfo};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use super::errors::ApiError;
use super::models::{ClientKeys, DeviceKeys};
use super::request::{build_request, PreparedRequest, RequestOption};
use crate::context::RequestContext;
use crate::http::{HttpClient, Transport, TransportResponse};

/// Client-key exchange endpoint.
pub const PATH_KEYS: &str = "/1/keys";
/// Device-key exchange endpoint.
pub const PATH_DEVICES: &str = "/1/devices";
/// Signal submission and retrieval endpoint.
pub const PATH_MESSAGES: &str = "/1/messages";

/// Client for the internet-hosted IRKit relay API
///
/// Cheap to clone; clones share the underlying transport. The base URL is
/// fixed at construction.
#[derive(Clone)]
pub struct InternetClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for InternetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternetClient").field("base_url", &self.base_url.as_str()).finish()
    }
}

impl Default for InternetClient {
    /// Client for the vendor endpoint.
    ///
    /// # Panics
    ///
    /// If the built-in endpoint or the HTTP stack cannot be initialised,
    /// which is a build-time defect rather than a runtime condition.
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self::new(&ClientConfig::default()).expect("default IRKit endpoint must yield a client")
    }
}

impl InternetClient {
    /// Create a client backed by [`HttpClient`].
    ///
    /// # Errors
    ///
    /// [`ApiError::Config`] if the base URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Self::with_transport(&config.base_url, Arc::new(http_client))
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// [`ApiError::Config`] if `base_url` is empty or does not parse.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        if base_url.is_empty() {
            return Err(ApiError::Config("missing url".to_string()));
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("Failed to parse URL {base_url:?}: {e}")))?;

        Ok(Self { base_url, transport })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> InternetClientBuilder {
        InternetClientBuilder::default()
    }

    /// Base URL every endpoint path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request against this client's base URL without sending it.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidArgument`] for an empty method or path.
    pub fn new_request(
        &self,
        ctx: &RequestContext,
        method: &str,
        spath: &str,
        opt: &RequestOption,
    ) -> Result<PreparedRequest, ApiError> {
        build_request(&self.base_url, ctx, method, spath, opt)
    }

    /// Exchange a pairing token for a client key.
    ///
    /// `POST /1/keys` with `clienttoken`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty token, `Remote` for a non-200 status,
    /// `Decode` for a malformed body, `Transport` for I/O failures and
    /// `Cancelled`/`DeadlineExceeded` when `ctx` ends first.
    #[instrument(skip(self, ctx, token))]
    pub async fn get_keys(&self, ctx: &RequestContext, token: &str) -> Result<ClientKeys, ApiError> {
        const OPERATION: &str = "get_keys";
        require(OPERATION, "token", token)?;

        let opt = RequestOption::new().field("clienttoken", token);
        let prepared = self.new_request(ctx, Method::POST.as_str(), PATH_KEYS, &opt)?;
        let response = self.execute(OPERATION, prepared).await?;

        let keys: ClientKeys = decode(OPERATION, &response)?;
        info!(device_id = %keys.device_id, "client key issued");
        Ok(keys)
    }

    /// Exchange a client key for a device key.
    ///
    /// `POST /1/devices` with `clientkey`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`InternetClient::get_keys`].
    #[instrument(skip(self, ctx, client_key))]
    pub async fn get_devices(
        &self,
        ctx: &RequestContext,
        client_key: &str,
    ) -> Result<DeviceKeys, ApiError> {
        const OPERATION: &str = "get_devices";
        require(OPERATION, "clientkey", client_key)?;

        let opt = RequestOption::new().field("clientkey", client_key);
        let prepared = self.new_request(ctx, Method::POST.as_str(), PATH_DEVICES, &opt)?;
        let response = self.execute(OPERATION, prepared).await?;

        let keys: DeviceKeys = decode(OPERATION, &response)?;
        info!(device_id = %keys.device_id, "device key issued");
        Ok(keys)
    }

    /// Ask the device to transmit `message`.
    ///
    /// The message is validated before anything is sent; an invalid message
    /// never reaches the network. The response body is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key or device id, `Validation` for a
    /// rejected message, `Remote` for a non-200 status, `Transport` and
    /// `Cancelled`/`DeadlineExceeded` as for the other operations.
    #[instrument(skip(self, ctx, client_key, message), fields(freq = message.freq, intervals = message.data.len()))]
    pub async fn send_messages(
        &self,
        ctx: &RequestContext,
        client_key: &str,
        device_id: &str,
        message: &Message,
    ) -> Result<(), ApiError> {
        const OPERATION: &str = "send_messages";
        require(OPERATION, "clientkey", client_key)?;
        require(OPERATION, "deviceid", device_id)?;

        message.validate().map_err(|source| ApiError::Validation { operation: OPERATION, source })?;

        let encoded = serde_json::to_string(message).map_err(|e| {
            ApiError::invalid_argument(OPERATION, format!("failed to encode message: {e}"))
        })?;

        let opt = RequestOption::new()
            .field("clientkey", client_key)
            .field("deviceid", device_id)
            .field("message", encoded);
        let prepared = self.new_request(ctx, Method::POST.as_str(), PATH_MESSAGES, &opt)?;
        self.execute(OPERATION, prepared).await?;

        info!("signal submitted");
        Ok(())
    }

    /// Long-poll for the latest signal the device received.
    ///
    /// The server holds the request open until a signal arrives or its own
    /// timeout elapses; in the latter case an empty [`SignalInfo`] is
    /// returned (see [`SignalInfo::is_empty`]), whether the server sent
    /// `{}` or no body at all. With `clear` set the server drains the
    /// device's buffer as part of the same call.
    ///
    /// The call returns as soon as `ctx` is cancelled or its deadline
    /// passes. Whether a `clear` request that was already sent still drained
    /// the buffer is then unknown: the vendor API does not say, so callers
    /// must tolerate both a lost and a repeated signal.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key, `Remote` for a non-200 status,
    /// `Decode` for a malformed body, `Transport` for I/O failures and
    /// `Cancelled`/`DeadlineExceeded` when `ctx` ends first.
    #[instrument(skip(self, ctx, client_key))]
    pub async fn get_messages(
        &self,
        ctx: &RequestContext,
        client_key: &str,
        clear: bool,
    ) -> Result<SignalInfo, ApiError> {
        const OPERATION: &str = "get_messages";
        require(OPERATION, "clientkey", client_key)?;

        let opt = RequestOption::new()
            .param("clientkey", client_key)
            .param("clear", if clear { "1" } else { "0" });
        let prepared = self.new_request(ctx, Method::GET.as_str(), PATH_MESSAGES, &opt)?;
        let response = self.execute(OPERATION, prepared).await?;

        let signal: SignalInfo = if response.body.iter().all(u8::is_ascii_whitespace) {
            SignalInfo::default()
        } else {
            decode(OPERATION, &response)?
        };
        if signal.is_empty() {
            debug!("long-poll returned without a signal");
        } else {
            info!(device_id = %signal.device_id, intervals = signal.message.data.len(), "signal received");
        }
        Ok(signal)
    }

    /// Send `prepared` through the transport, bounded by its context, and
    /// require a 200 response.
    async fn execute(
        &self,
        operation: &'static str,
        prepared: PreparedRequest,
    ) -> Result<TransportResponse, ApiError> {
        let PreparedRequest { request, context } = prepared;
        let transport = Arc::clone(&self.transport);

        let response = context
            .run(operation, async move {
                transport
                    .execute(request)
                    .await
                    .map_err(|source| ApiError::Transport { operation, source })
            })
            .await?;

        if response.status != StatusCode::OK {
            debug!(operation, status = %response.status, "unexpected status");
            return Err(ApiError::remote(operation, response.status));
        }

        Ok(response)
    }
}

fn require(operation: &'static str, name: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::invalid_argument(operation, format!("missing {name}")));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(
    operation: &'static str,
    response: &TransportResponse,
) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(|source| ApiError::Decode { operation, source })
}

/// Builder for [`InternetClient`]
#[derive(Default)]
pub struct InternetClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl InternetClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default [`HttpClient`] transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created
    pub fn build(self) -> Result<InternetClient, ApiError> {
        let config = self.config.unwrap_or_default();
        match self.transport {
            Some(transport) => InternetClient::with_transport(&config.base_url, transport),
            None => InternetClient::new(&config),
        }
    }
}

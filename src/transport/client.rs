//! Production HTTP client implementation using reqwest.

use crate::config::Settings;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Production HTTP client using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`HttpClient`] trait. The wrapped client owns reqwest's keep-alive
/// connection pool; cloning shares it.
///
/// # Example
///
/// ```no_run
/// use posts_client::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://jsonplaceholder.typicode.com/posts/1")?;
/// let request = HttpRequest::new(http::Method::GET, url);
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (timeouts, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

/// Maps a reqwest error onto the transport failure classes.
fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(Box::new(e))
    } else if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else if e.is_request() || e.is_body() || e.is_decode() {
        // Premature close and malformed framing surface here
        TransportError::Protocol(Box::new(e))
    } else {
        TransportError::Other(Box::new(e))
    }
}

/// Factory that allocates an [`HttpClient`] for a set of [`Settings`].
///
/// [`ApiClient::start`](crate::api::ApiClient::start) calls this lazily, so
/// no connection resources exist before the client is started.
pub trait Connector: Send + Sync {
    /// The client type produced.
    type Client: HttpClient;

    /// Builds a client configured from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the underlying client cannot be built.
    fn connect(&self, settings: &Settings) -> Result<Self::Client, TransportError>;
}

/// Builds [`ReqwestClient`]s with timeouts and keep-alive limits from settings.
///
/// reqwest has no dedicated write timeout, so the write budget is folded
/// into an overall per-request deadline of `connect + write + read`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl ReqwestConnector {
    /// Builds the underlying reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Other`] if the TLS backend or resolver
    /// cannot be initialized.
    pub fn build(settings: &Settings) -> Result<reqwest::Client, TransportError> {
        let timeouts = settings.timeouts;

        reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .timeout(timeouts.connect + timeouts.write + timeouts.read)
            .pool_max_idle_per_host(settings.pool_limit)
            .build()
            .map_err(|e| TransportError::Other(Box::new(e)))
    }
}

impl Connector for ReqwestConnector {
    type Client = ReqwestClient;

    fn connect(&self, settings: &Settings) -> Result<Self::Client, TransportError> {
        Self::build(settings).map(ReqwestClient::from_client)
    }
}

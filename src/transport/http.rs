//! Wire-level request/response values and the client seam.

use std::future::Future;
use std::sync::Arc;

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

use super::TransportError;

/// One physical HTTP exchange to perform.
///
/// Built once per logical call by the API layer and cloned for each retry,
/// so every attempt sends identical bytes.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: Method,
    /// Absolute target URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Encoded payload, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request without headers or payload.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attaches an encoded payload.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a header; repeated names keep every value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// A complete response with its body read to the end.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status line code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Wraps a received status, header set and body.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8 text; invalid sequences become U+FFFD.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs a single physical HTTP exchange.
///
/// Implementors do not retry and do not judge the status code: any
/// response that arrived in full, 404 and 500 included, is `Ok`. Only a
/// missing or truncated response is an error, classified so the retry
/// policy can tell transient failures from permanent ones.
///
/// The production implementation is [`ReqwestClient`](super::ReqwestClient);
/// tests substitute scripted mocks.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the whole response.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Connect`] when no connection could be opened
    /// - [`TransportError::Timeout`] when a phase ran past its deadline
    /// - [`TransportError::Protocol`] when the peer broke HTTP framing
    /// - [`TransportError::InvalidUrl`] when the request cannot be built
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        T::request(self, req)
    }
}

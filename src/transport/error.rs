//! Error types for transport operations.

use thiserror::Error;

/// Error type for a single physical HTTP exchange.
///
/// Describes what went wrong without dictating recovery strategy.
/// [`IsRetryable`] decides which variants are transient.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and TLS handshake failures.
    #[error("Connection error: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The response was malformed or the connection closed prematurely.
    #[error("Protocol error: {0}")]
    Protocol(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other client failure (redirect loop, client construction, ...).
    #[error("HTTP client error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error returned by [`ConnectionPool::send`](super::ConnectionPool::send).
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool was closed before a connection slot became available.
    #[error("Connection pool is closed")]
    Closed,

    /// The exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants a retry attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for TransportError {
    fn is_retryable(&self) -> bool {
        match self {
            // Connect failures, timeouts and broken framing are transient
            Self::Connect(_) | Self::Timeout | Self::Protocol(_) => true,
            Self::InvalidUrl(_) | Self::Other(_) => false,
        }
    }
}

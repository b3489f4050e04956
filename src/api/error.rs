//! Error type for client operations.

use thiserror::Error;

use crate::model::DecodeError;
use crate::transport::TransportError;

/// Error returned by [`ApiClient`](super::ApiClient) operations.
///
/// Lets callers distinguish "never got a response" ([`Transport`]) from
/// "got a rejection" ([`Status`]) and "got something unusable" ([`Decode`]).
///
/// [`Transport`]: ClientError::Transport
/// [`Status`]: ClientError::Status
/// [`Decode`]: ClientError::Decode
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client was used before [`start`](super::ApiClient::start) or after
    /// [`close`](super::ApiClient::close).
    #[error("Client is not started")]
    NotStarted,

    /// The last transport failure, after retries were exhausted or for a
    /// failure that is not retryable.
    ///
    /// The underlying error is surfaced unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status. Never retried.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code
        status: http::StatusCode,
        /// Response body, lossily decoded as UTF-8
        body: String,
    },

    /// The response body could not be decoded into the expected entity.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// The request payload could not be serialized.
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns the HTTP status if the server rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if no response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

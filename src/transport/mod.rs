//! Transport layer for sending HTTP requests to the Posts API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`], [`Connector`])
//! - Production HTTP client implementation ([`ReqwestClient`], [`ReqwestConnector`])
//! - Bounding concurrent connections ([`ConnectionPool`])
//! - Retry policy and jitter ([`RetryPolicy`], [`Jitter`])

mod client;
mod error;
mod http;
mod pool;
mod retry;

#[cfg(test)]
mod retry_tests;

pub use client::{Connector, ReqwestClient, ReqwestConnector};
pub use error::{IsRetryable, PoolError, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use pool::ConnectionPool;
pub use retry::{Jitter, NoJitter, RandomJitter, RetryDecision, RetryPolicy};

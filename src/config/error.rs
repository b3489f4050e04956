//! Error types for configuration loading.

use thiserror::Error;

/// Error type for configuration operations.
///
/// A malformed configuration value is a precondition failure, so these
/// errors are surfaced immediately and never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric value could not be parsed.
    #[error("Invalid value for {key} '{value}': {reason}")]
    InvalidNumber {
        /// Configuration key
        key: &'static str,
        /// The raw value that failed to parse
        value: String,
        /// Parser error message
        reason: String,
    },

    /// A numeric value parsed but is zero or negative.
    #[error("Invalid value for {key}: must be greater than zero")]
    NotPositive {
        /// Configuration key
        key: &'static str,
    },

    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known configuration keys.
///
/// Use these constants for compile-time safety when matching keys.
pub mod key {
    /// Base URL of the Posts API.
    pub const BASE_URL: &str = "API_BASE_URL";
    /// Connect timeout in seconds.
    pub const CONNECT_TIMEOUT: &str = "API_CONNECT_TIMEOUT";
    /// Read timeout in seconds.
    pub const READ_TIMEOUT: &str = "API_READ_TIMEOUT";
    /// Write timeout in seconds.
    pub const WRITE_TIMEOUT: &str = "API_WRITE_TIMEOUT";
    /// Connection pool limit.
    pub const POOL_LIMIT: &str = "API_POOL_LIMIT";
    /// Total attempts per request.
    pub const RETRY_ATTEMPTS: &str = "API_RETRY_ATTEMPTS";
    /// Initial retry backoff in seconds.
    pub const RETRY_BACKOFF: &str = "API_RETRY_BACKOFF";
}

impl ConfigError {
    /// Creates an `InvalidNumber` error from a parser error.
    pub fn invalid_number(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidNumber {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

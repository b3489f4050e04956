//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default base URL of the Posts API.
pub const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: f64 = 5.0;

/// Default read timeout in seconds.
pub const READ_TIMEOUT_SECS: f64 = 15.0;

/// Default write timeout in seconds.
pub const WRITE_TIMEOUT_SECS: f64 = 15.0;

/// Default connection pool limit.
pub const POOL_LIMIT: usize = 100;

/// Default total number of attempts (including the first).
pub const RETRY_ATTEMPTS: u32 = 3;

/// Default initial retry backoff in seconds.
pub const RETRY_BACKOFF_SECS: f64 = 0.2;

/// Upper bound for a single retry delay, in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 3;

/// Default connect timeout as Duration.
#[must_use]
pub fn connect_timeout() -> Duration {
    Duration::from_secs_f64(CONNECT_TIMEOUT_SECS)
}

/// Default read timeout as Duration.
#[must_use]
pub fn read_timeout() -> Duration {
    Duration::from_secs_f64(READ_TIMEOUT_SECS)
}

/// Default write timeout as Duration.
#[must_use]
pub fn write_timeout() -> Duration {
    Duration::from_secs_f64(WRITE_TIMEOUT_SECS)
}

/// Default initial retry backoff as Duration.
#[must_use]
pub fn retry_backoff() -> Duration {
    Duration::from_secs_f64(RETRY_BACKOFF_SECS)
}

/// Maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_secs(RETRY_MAX_DELAY_SECS)
}

//! Client settings resolved from a key-value source.
//!
//! Every field has a built-in default; the source only overrides. All
//! validation is performed during construction.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::transport::RetryPolicy;

use super::defaults;
use super::error::{ConfigError, key};

/// Per-phase HTTP timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Time allowed to establish a connection
    pub connect: Duration,
    /// Time allowed between reads of the response
    pub read: Duration,
    /// Time allowed to send the request
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: defaults::connect_timeout(),
            read: defaults::read_timeout(),
            write: defaults::write_timeout(),
        }
    }
}

/// Retry settings for transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Total tries per request, including the first (at least 1)
    pub attempts: u32,
    /// Delay before the first retry
    pub backoff: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: defaults::RETRY_ATTEMPTS,
            backoff: defaults::retry_backoff(),
        }
    }
}

/// Immutable configuration bundle for [`ApiClient`].
///
/// # Construction
///
/// Use [`Settings::load`] to read overrides from a mapping or the process
/// environment, or [`Settings::default`] plus the `with_*` methods to build
/// one in code.
///
/// [`ApiClient`]: crate::api::ApiClient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL without a trailing slash
    pub base_url: String,

    /// HTTP timeouts
    pub timeouts: Timeouts,

    /// Maximum number of simultaneously open connections (at least 1)
    pub pool_limit: usize,

    /// Retry settings for transport failures
    pub retry: RetrySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeouts: Timeouts::default(),
            pool_limit: defaults::POOL_LIMIT,
            retry: RetrySettings::default(),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings {{ base_url: {}, timeouts: connect={:?}/read={:?}/write={:?}, \
             pool_limit: {}, retry: {}x/{:?} }}",
            self.base_url,
            self.timeouts.connect,
            self.timeouts.read,
            self.timeouts.write,
            self.pool_limit,
            self.retry.attempts,
            self.retry.backoff,
        )
    }
}

impl Settings {
    /// Loads settings from `source`, or from the process environment if `None`.
    ///
    /// Keys are listed in [`key`](super::key); any key that is absent takes
    /// its default.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed or not positive,
    /// or if the base URL is not an absolute http(s) URL.
    pub fn load(source: Option<&HashMap<String, String>>) -> Result<Self, ConfigError> {
        match source {
            Some(map) => Self::from_lookup(|k| map.get(k).cloned()),
            None => Self::from_lookup(|k| std::env::var(k).ok()),
        }
    }

    /// Loads settings using an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(key::BASE_URL) {
            Some(raw) => normalize_base_url(&raw)?,
            None => defaults::BASE_URL.to_string(),
        };

        let timeouts = Timeouts {
            connect: parse_secs(&lookup, key::CONNECT_TIMEOUT, defaults::connect_timeout())?,
            read: parse_secs(&lookup, key::READ_TIMEOUT, defaults::read_timeout())?,
            write: parse_secs(&lookup, key::WRITE_TIMEOUT, defaults::write_timeout())?,
        };

        let pool_limit = parse_count(&lookup, key::POOL_LIMIT, defaults::POOL_LIMIT)?;

        let retry = RetrySettings {
            attempts: parse_count(&lookup, key::RETRY_ATTEMPTS, defaults::RETRY_ATTEMPTS)?,
            backoff: parse_secs(&lookup, key::RETRY_BACKOFF, defaults::retry_backoff())?,
        };

        Ok(Self {
            base_url,
            timeouts,
            pool_limit,
            retry,
        })
    }

    /// Replaces the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL is not an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Sets the connection pool limit.
    ///
    /// # Panics
    ///
    /// Panics if `pool_limit` is 0.
    #[must_use]
    pub const fn with_pool_limit(mut self, pool_limit: usize) -> Self {
        assert!(pool_limit >= 1, "pool_limit must be at least 1");
        self.pool_limit = pool_limit;
        self
    }

    /// Sets the HTTP timeouts.
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Sets the retry attempts and initial backoff.
    ///
    /// # Panics
    ///
    /// Panics if `attempts` is 0.
    #[must_use]
    pub const fn with_retry(mut self, attempts: u32, backoff: Duration) -> Self {
        assert!(attempts >= 1, "attempts must be at least 1");
        self.retry = RetrySettings { attempts, backoff };
        self
    }

    /// Builds the retry policy described by these settings.
    ///
    /// The delay cap is fixed at [`defaults::RETRY_MAX_DELAY_SECS`]. An
    /// `attempts` of 0 set directly on the field is treated as 1.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        let attempts = if self.retry.attempts == 0 {
            1
        } else {
            self.retry.attempts
        };

        RetryPolicy::new()
            .with_max_attempts(attempts)
            .with_initial_delay(self.retry.backoff)
            .with_max_delay(defaults::retry_max_delay())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

fn parse_secs<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid_number(key, &raw, e))?;

    if secs.is_nan() || secs <= 0.0 {
        return Err(ConfigError::NotPositive { key });
    }

    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::invalid_number(key, &raw, e))
}

fn parse_count<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default + PartialEq,
    T::Err: fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid_number(key, &raw, e))?;

    if value == T::default() {
        return Err(ConfigError::NotPositive { key });
    }

    Ok(value)
}

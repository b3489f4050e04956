//! Backoff schedule and retry decisions for transport failures.

use std::time::Duration;

use rand::Rng;

use super::IsRetryable;

/// Capped exponential backoff with full jitter.
///
/// The un-jittered delay before retry `n` (0-based) is
/// `initial_delay * multiplier^n`, clipped to `max_delay`. A jitter factor
/// in `[0, 1]` then scales it, so the actual wait lies anywhere between
/// zero and that ceiling.
///
/// # Defaults
///
/// - `max_attempts`: 3
/// - `initial_delay`: 200 milliseconds
/// - `max_delay`: 3 seconds
/// - `multiplier`: 2.0
///
/// # Example
///
/// ```
/// use posts_client::transport::{RetryDecision, RetryPolicy, TransportError};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_initial_delay(Duration::from_secs(1));
///
/// // Attempt 2 timed out; a factor of 1.0 disables jitter
/// let decision = policy.decide(2, &TransportError::Timeout, 1.0);
/// assert_eq!(decision, RetryDecision::RetryAfter(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per request, the first one included.
    ///
    /// 1 disables retrying.
    pub max_attempts: u32,

    /// Ceiling of the wait before the first retry.
    pub initial_delay: Duration,

    /// Upper bound on any single wait.
    pub max_delay: Duration,

    /// Growth factor between consecutive ceilings.
    pub multiplier: f64,
}

/// Outcome of [`RetryPolicy::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait for the given delay, then try again.
    RetryAfter(Duration),
    /// Give up and surface the error unchanged.
    Stop,
}

impl RetryPolicy {
    /// Default attempt count.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default first-retry ceiling.
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(200);

    /// Default cap on a single wait.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(3);

    /// Default growth factor.
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Creates a policy with the default schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Sets the total number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is 0.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(max_attempts >= 1, "max_attempts must be at least 1");
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the first-retry ceiling.
    ///
    /// Zero is accepted and makes every retry immediate.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the cap on a single wait.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the growth factor.
    ///
    /// # Panics
    ///
    /// Panics unless `multiplier` is greater than zero.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Un-jittered delay before retry number `retry` (0-based).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        // Exponents past i32::MAX saturate; the cap applies long before that
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
            .unwrap_or(self.max_delay)
    }

    /// Scales [`delay_for_retry`](Self::delay_for_retry) by a full-jitter factor.
    ///
    /// `factor` is clamped to `[0, 1]`, with NaN read as 1.
    #[must_use]
    pub fn jittered_delay(&self, retry: u32, factor: f64) -> Duration {
        let factor = if factor.is_nan() {
            1.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        let ceiling = self.delay_for_retry(retry);
        Duration::try_from_secs_f64(ceiling.as_secs_f64() * factor).unwrap_or(ceiling)
    }

    /// Returns true if another attempt may follow attempt `attempt` (1-based).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Decides what follows the failure of attempt `attempt` (1-based).
    ///
    /// Stops on a non-retryable error or once the attempts are used up.
    /// Otherwise waits the jittered delay for retry `attempt - 1`. The
    /// caller draws `factor` from a [`Jitter`] source, which keeps this
    /// function deterministic.
    #[must_use]
    pub fn decide<E: IsRetryable>(&self, attempt: u32, error: &E, factor: f64) -> RetryDecision {
        if !error.is_retryable() || !self.should_retry(attempt) {
            return RetryDecision::Stop;
        }
        RetryDecision::RetryAfter(self.jittered_delay(attempt.saturating_sub(1), factor))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of full-jitter factors in `[0, 1]`.
pub trait Jitter: Send + Sync {
    /// Returns the factor to scale the next retry delay by.
    fn factor(&self) -> f64;
}

/// Uniform draw from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn factor(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..=1.0)
    }
}

/// Always 1.0, so every wait equals its ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn factor(&self) -> f64 {
        1.0
    }
}

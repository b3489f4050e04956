//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant
//! sleeps in tests while using the real tokio timer in production.

use std::time::Duration;

/// Abstraction over async sleeping for testability.
///
/// Retry backoff is the only place the client waits on a timer, so routing
/// it through this trait lets tests run retry loops without real delays and
/// observe the delays that were requested.
///
/// # Example
///
/// ```
/// use posts_client::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Intended for tests that exercise retry loops.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

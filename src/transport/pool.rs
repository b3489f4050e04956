//! Bounded connection pool shared by concurrent calls.

use tokio::sync::Semaphore;

use super::{HttpClient, HttpRequest, HttpResponse, PoolError};

/// Caps the number of simultaneous exchanges on one [`HttpClient`].
///
/// The wrapped client keeps idle connections alive for reuse; this pool
/// bounds how many are open at once. Each [`send`](Self::send) holds one
/// slot for the duration of the exchange and queues when none is free.
///
/// # Concurrency
///
/// Slots are [`tokio::sync::Semaphore`] permits, so acquisition is safe
/// from any number of tasks without external locking. A permit is released
/// when the exchange finishes, fails, or its future is dropped.
#[derive(Debug)]
pub struct ConnectionPool<H> {
    client: H,
    permits: Semaphore,
    limit: usize,
}

impl<H> ConnectionPool<H> {
    /// Creates a pool allowing at most `limit` simultaneous exchanges.
    ///
    /// `limit` is clamped to `1..=Semaphore::MAX_PERMITS`.
    #[must_use]
    pub fn new(client: H, limit: usize) -> Self {
        let limit = limit.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            client,
            permits: Semaphore::new(limit),
            limit,
        }
    }

    /// Returns the configured slot limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of free slots.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Closes the pool.
    ///
    /// Exchanges already holding a slot run to completion; queued and
    /// future calls to [`send`](Self::send) fail with [`PoolError::Closed`].
    pub fn close(&self) {
        self.permits.close();
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

impl<H: HttpClient> ConnectionPool<H> {
    /// Performs one exchange while holding a slot.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Closed`] if the pool is closed while waiting,
    /// or [`PoolError::Transport`] if the exchange fails.
    pub async fn send(&self, req: HttpRequest) -> Result<HttpResponse, PoolError> {
        let _permit = self.permits.acquire().await.map_err(|_| PoolError::Closed)?;
        Ok(self.client.request(req).await?)
    }
}

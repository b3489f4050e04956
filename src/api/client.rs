//! Pooled, retrying client bound to one base URL.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;
use url::Url;

use crate::config::Settings;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{
    ConnectionPool, Connector, HttpRequest, HttpResponse, Jitter, PoolError, RandomJitter,
    ReqwestConnector, RetryDecision, RetryPolicy, TransportError,
};

use super::ClientError;

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Per-request headers and body passed to [`ApiClient::execute`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers to send
    pub headers: HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    /// Creates empty options: no extra headers, no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options carrying `value` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_vec(value).map_err(ClientError::Encode)?;
        Ok(Self::new()
            .with_header(CONTENT_TYPE, application_json())
            .with_body(body))
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// HTTP client for the Posts API with a bounded connection pool and
/// retries for transient transport failures.
///
/// # Lifecycle
///
/// A new client holds no connection resources. [`start`](Self::start)
/// allocates the pool and [`close`](Self::close) releases it; both are
/// idempotent. Prefer [`open`](Self::open), which returns a
/// [`ClientSession`] that closes the client when dropped.
///
/// # Concurrency
///
/// All operations take `&self`; share one client (for example behind an
/// `Arc`) across tasks. Concurrent calls share the pool, which bounds open
/// connections at `pool_limit` and queues excess demand. Backoff delays
/// are per call and do not hold a pool slot.
///
/// # Type Parameters
///
/// - `C`: Allocates the HTTP client on start (defaults to [`ReqwestConnector`])
/// - `S`: The sleeper for retry delays (defaults to [`TokioSleeper`])
/// - `J`: The jitter source for retry delays (defaults to [`RandomJitter`])
///
/// # Example
///
/// ```no_run
/// use posts_client::api::ApiClient;
/// use posts_client::config::Settings;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = ApiClient::new(Settings::load(None)?).open()?;
/// let post = session.get_post(1).await?;
/// println!("{}", post.title());
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<C: Connector = ReqwestConnector, S = TokioSleeper, J = RandomJitter> {
    settings: Settings,
    retry_policy: RetryPolicy,
    connector: C,
    sleeper: S,
    jitter: J,
    pool: RwLock<Option<Arc<ConnectionPool<C::Client>>>>,
}

impl ApiClient {
    /// Creates a reqwest-backed client with retry delays on the tokio timer.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_connector(settings, ReqwestConnector)
    }
}

impl<C: Connector> ApiClient<C> {
    /// Creates a client that allocates its HTTP client through `connector`.
    #[must_use]
    pub fn with_connector(settings: Settings, connector: C) -> Self {
        Self {
            retry_policy: settings.retry_policy(),
            settings,
            connector,
            sleeper: TokioSleeper,
            jitter: RandomJitter,
            pool: RwLock::new(None),
        }
    }
}

impl<C: Connector, S, J> ApiClient<C, S, J> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ApiClient<C, S2, J> {
        ApiClient {
            settings: self.settings,
            retry_policy: self.retry_policy,
            connector: self.connector,
            sleeper,
            jitter: self.jitter,
            pool: self.pool,
        }
    }

    /// Sets a custom jitter source for retry delays.
    #[must_use]
    pub fn with_jitter<J2>(self, jitter: J2) -> ApiClient<C, S, J2> {
        ApiClient {
            settings: self.settings,
            retry_policy: self.retry_policy,
            connector: self.connector,
            sleeper: self.sleeper,
            jitter,
            pool: self.pool,
        }
    }

    /// Replaces the retry policy derived from the settings.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the settings this client was built from.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the active retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns true between [`start`](Self::start) and [`close`](Self::close).
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Allocates the connection pool. A second call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the connector cannot build
    /// the HTTP client.
    pub fn start(&self) -> Result<(), ClientError> {
        let mut slot = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Ok(());
        }

        let client = self.connector.connect(&self.settings)?;
        *slot = Some(Arc::new(ConnectionPool::new(client, self.settings.pool_limit)));

        tracing::debug!(
            "Client started: {} (pool_limit {})",
            self.settings.base_url,
            self.settings.pool_limit
        );
        Ok(())
    }

    /// Releases the connection pool.
    ///
    /// Safe to call when never started or already closed. Exchanges already
    /// in flight finish; their pending retries and any queued calls fail
    /// with [`ClientError::NotStarted`].
    pub fn close(&self) {
        let pool = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(pool) = pool {
            pool.close();
            tracing::debug!("Client closed: {}", self.settings.base_url);
        }
    }

    /// Starts the client and wraps it in a guard that closes it on drop.
    ///
    /// # Errors
    ///
    /// See [`start`](Self::start).
    pub fn open(self) -> Result<ClientSession<C, S, J>, ClientError> {
        self.start()?;
        Ok(ClientSession { client: self })
    }

    /// Resolves `path` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        let joined = format!("{}{separator}{path}", self.settings.base_url);

        Url::parse(&joined)
            .map_err(|e| TransportError::InvalidUrl(format!("{joined}: {e}")).into())
    }

    fn pool(&self) -> Result<Arc<ConnectionPool<C::Client>>, ClientError> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ClientError::NotStarted)
    }
}

impl<C: Connector, S: Sleeper, J: Jitter> ApiClient<C, S, J> {
    /// Issues one logical request.
    ///
    /// Transient transport failures are retried per the retry policy. A
    /// response with a non-2xx status is returned as
    /// [`ClientError::Status`] without retrying.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotStarted`] if the client is not started
    /// - [`ClientError::Transport`] with the last failure once retries are exhausted
    /// - [`ClientError::Status`] for a non-2xx response
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        let pool = self.pool()?;

        let mut request = HttpRequest::new(method, self.endpoint(path)?);
        request.headers = options.headers;
        request.headers.entry(ACCEPT).or_insert_with(application_json);
        request.body = options.body;

        let response = self.send_with_retry(&pool, &request).await?;

        if !response.is_success() {
            tracing::debug!(
                "{} {} returned {}",
                request.method,
                request.url,
                response.status
            );
            return Err(ClientError::Status {
                status: response.status,
                body: response.body_text(),
            });
        }

        Ok(response)
    }

    /// Sends with retry logic.
    async fn send_with_retry(
        &self,
        pool: &ConnectionPool<C::Client>,
        request: &HttpRequest,
    ) -> Result<HttpResponse, ClientError> {
        let mut attempt = 1;

        loop {
            tracing::debug!("{} {} (attempt {attempt})", request.method, request.url);

            let error = match pool.send(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(PoolError::Closed) => return Err(ClientError::NotStarted),
                Err(PoolError::Transport(e)) => e,
            };

            match self
                .retry_policy
                .decide(attempt, &error, self.jitter.factor())
            {
                RetryDecision::Stop => return Err(error.into()),
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        "{} {} failed (attempt {}/{}): {}; retrying in {:?}",
                        request.method,
                        request.url,
                        attempt,
                        self.retry_policy.max_attempts,
                        error,
                        delay
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl<C: Connector, S, J> fmt::Debug for ApiClient<C, S, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("settings", &self.settings)
            .field("retry_policy", &self.retry_policy)
            .field("started", &self.is_started())
            .finish_non_exhaustive()
    }
}

/// A started [`ApiClient`] that is closed when dropped.
///
/// Dereferences to the client, so all operations are available directly.
/// Dropping the session releases the connection pool on every exit path,
/// including early returns and panics.
#[derive(Debug)]
pub struct ClientSession<C: Connector = ReqwestConnector, S = TokioSleeper, J = RandomJitter> {
    client: ApiClient<C, S, J>,
}

impl<C: Connector, S, J> Deref for ClientSession<C, S, J> {
    type Target = ApiClient<C, S, J>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl<C: Connector, S, J> Drop for ClientSession<C, S, J> {
    fn drop(&mut self) {
        self.client.close();
    }
}

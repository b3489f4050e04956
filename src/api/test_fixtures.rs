//! Shared test fixtures for client tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::{HeaderMap, StatusCode};

use crate::config::Settings;
use crate::time::{InstantSleeper, Sleeper};
use crate::transport::{
    Connector, HttpClient, HttpRequest, HttpResponse, NoJitter, TransportError,
};

use super::ApiClient;

pub const BASE_URL: &str = "http://api.test";

/// Mock HTTP client that returns queued results and records requests.
///
/// Once the queue is drained every call answers `200 {}`.
#[derive(Debug, Default)]
pub struct MockClient {
    results: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
    connects: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
}

impl MockClient {
    pub fn new(results: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            ..Self::default()
        })
    }

    /// Creates a client that holds every exchange open for `delay`.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ok_json("{}")))
    }
}

impl Connector for Arc<MockClient> {
    type Client = Self;

    fn connect(&self, _settings: &Settings) -> Result<Self::Client, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(self))
    }
}

/// Sleeper that records requested delays without waiting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

pub fn ok_json(body: &str) -> HttpResponse {
    HttpResponse::new(StatusCode::OK, HeaderMap::new(), body.as_bytes().to_vec())
}

pub fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        StatusCode::from_u16(code).unwrap(),
        HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}

pub fn connect_error() -> TransportError {
    TransportError::Connect("connection refused".into())
}

pub fn settings() -> Settings {
    Settings::default().with_base_url(BASE_URL).unwrap()
}

/// Builds a started client over `mock` that never waits between retries.
pub fn client(
    mock: &Arc<MockClient>,
) -> ApiClient<Arc<MockClient>, InstantSleeper, NoJitter> {
    let client = ApiClient::with_connector(settings(), Arc::clone(mock))
        .with_sleeper(InstantSleeper)
        .with_jitter(NoJitter);
    client.start().unwrap();
    client
}

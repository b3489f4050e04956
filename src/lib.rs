//! Posts client: a resilient HTTP client for the Posts REST resource
//!
//! A library for issuing CRUD requests against a Posts API through a
//! bounded connection pool, retrying transient transport failures with
//! capped exponential backoff and full jitter.

pub mod api;
pub mod config;
pub mod model;
pub mod time;
pub mod transport;

//! Client for the Posts resource.
//!
//! This module provides:
//! - The pooled, retrying client with explicit lifecycle ([`ApiClient`])
//! - A guard that closes the client on every exit path ([`ClientSession`])
//! - Per-request options ([`RequestOptions`])
//! - CRUD operations for posts (`get_post`, `create_post`, `update_post`, `delete_post`)
//! - The error type surfaced to callers ([`ClientError`])

mod client;
mod error;
mod posts;

#[cfg(test)]
mod test_fixtures;

pub use client::{ApiClient, ClientSession, RequestOptions};
pub use error::ClientError;

//! Configuration layer for the Posts client.
//!
//! This module provides:
//! - Client settings ([`Settings`], [`Timeouts`], [`RetrySettings`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Default values ([`defaults`])
//! - Configuration keys ([`key`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - only `--base-url`
//! 2. **Key-value source** - an explicit mapping, or the process environment
//! 3. **Built-in defaults** - see [`defaults`]
//!
//! # Keys
//!
//! | Key | Default |
//! |---|---|
//! | `API_BASE_URL` | `https://jsonplaceholder.typicode.com` |
//! | `API_CONNECT_TIMEOUT` | 5 (seconds) |
//! | `API_READ_TIMEOUT` | 15 (seconds) |
//! | `API_WRITE_TIMEOUT` | 15 (seconds) |
//! | `API_POOL_LIMIT` | 100 |
//! | `API_RETRY_ATTEMPTS` | 3 |
//! | `API_RETRY_BACKOFF` | 0.2 (seconds) |
//!
//! The maximum retry delay is not configurable; it is fixed at 3 seconds.

mod cli;
pub mod defaults;
mod error;
mod settings;


pub use cli::{Cli, Command, PostArgs};
pub use error::{ConfigError, key};
pub use settings::{RetrySettings, Settings, Timeouts};

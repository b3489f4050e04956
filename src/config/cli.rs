//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use clap::{Parser, Subcommand};

use super::{ConfigError, Settings, key};

/// Posts: a resilient client for the Posts REST resource
///
/// Settings are read from `API_*` environment variables; `--base-url`
/// overrides `API_BASE_URL`.
#[derive(Debug, Parser)]
#[command(name = "posts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the Posts API (overrides `API_BASE_URL`)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for posts
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a post by id
    Get {
        /// Post id
        id: u64,
    },

    /// Create a new post
    Create(PostArgs),

    /// Replace an existing post
    Update {
        /// Post id
        id: u64,

        #[command(flatten)]
        post: PostArgs,
    },

    /// Delete a post by id
    Delete {
        /// Post id
        id: u64,
    },
}

/// Post fields shared by `create` and `update`
#[derive(Debug, Clone, clap::Args)]
pub struct PostArgs {
    /// Post title
    #[arg(long)]
    pub title: String,

    /// Post body
    #[arg(long)]
    pub body: String,

    /// Owning user id
    #[arg(long = "user-id")]
    pub user_id: u64,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Resolves settings from the process environment, applying CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any value is malformed.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        self.settings_from(|k| std::env::var(k).ok())
    }

    /// Resolves settings from `lookup`, applying CLI overrides.
    ///
    /// Explicit CLI values win over the lookup, which wins over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any value is malformed.
    pub fn settings_from<F>(&self, lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Settings::from_lookup(|k| {
            if k == key::BASE_URL {
                self.base_url.clone().or_else(|| lookup(k))
            } else {
                lookup(k)
            }
        })
    }
}

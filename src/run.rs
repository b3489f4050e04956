//! Command execution.
//!
//! Runs one CLI subcommand against the Posts API and renders the
//! result as JSON.

use serde_json::Value;
use thiserror::Error;

use posts_client::api::{ApiClient, ClientError};
use posts_client::config::{Command, PostArgs, Settings};
use posts_client::model::{PostCreate, ValidationError};
use posts_client::time::Sleeper;
use posts_client::transport::{Connector, Jitter};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The post fields given on the command line are invalid.
    #[error("Invalid post: {0}")]
    Invalid(#[from] ValidationError),

    /// The request failed.
    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    /// The result could not be rendered.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl RunError {
    /// Returns true if the failure stems from user input rather than the API.
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Executes `command` with a client built from `settings`.
///
/// The client is closed before returning, on success and on error.
///
/// # Errors
///
/// See [`RunError`].
///
/// # Coverage Note
///
/// Excluded from coverage because it builds the real reqwest stack.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &Command, settings: Settings) -> Result<String, RunError> {
    let session = ApiClient::new(settings).open()?;
    let value = dispatch(&*session, command).await?;
    render(&value)
}

/// Runs `command` on a started client and returns the response as JSON.
async fn dispatch<C, S, J>(client: &ApiClient<C, S, J>, command: &Command) -> Result<Value, RunError>
where
    C: Connector,
    S: Sleeper,
    J: Jitter,
{
    let value = match command {
        Command::Get { id } => serde_json::to_value(client.get_post(*id).await?)?,
        Command::Create(args) => {
            let payload = payload(args)?;
            serde_json::to_value(client.create_post(&payload).await?)?
        }
        Command::Update { id, post } => {
            let payload = payload(post)?;
            serde_json::to_value(client.update_post(*id, &payload).await?)?
        }
        Command::Delete { id } => Value::Object(client.delete_post(*id).await?),
    };

    Ok(value)
}

fn payload(args: &PostArgs) -> Result<PostCreate, ValidationError> {
    PostCreate::new(args.title.as_str(), args.body.as_str(), args.user_id)
}

fn render(value: &Value) -> Result<String, RunError> {
    Ok(serde_json::to_string_pretty(value)?)
}

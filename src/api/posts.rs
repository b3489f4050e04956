//! CRUD operations for the Posts resource.

use http::Method;
use serde_json::{Map, Value};

use crate::model::{DecodeError, Post, PostCreate};
use crate::time::Sleeper;
use crate::transport::{Connector, Jitter};

use super::{ApiClient, ClientError, RequestOptions};

const POSTS_PATH: &str = "/posts";

fn post_path(id: u64) -> String {
    format!("{POSTS_PATH}/{id}")
}

impl<C: Connector, S: Sleeper, J: Jitter> ApiClient<C, S, J> {
    /// Fetches a post (`GET /posts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not a
    /// valid post.
    pub async fn get_post(&self, id: u64) -> Result<Post, ClientError> {
        let response = self
            .execute(Method::GET, &post_path(id), RequestOptions::new())
            .await?;
        Ok(Post::from_json(&response.body)?)
    }

    /// Creates a post (`POST /posts`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not a
    /// valid post.
    pub async fn create_post(&self, payload: &PostCreate) -> Result<Post, ClientError> {
        let response = self
            .execute(Method::POST, POSTS_PATH, RequestOptions::json(payload)?)
            .await?;
        Ok(Post::from_json(&response.body)?)
    }

    /// Replaces a post (`PUT /posts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is not a
    /// valid post.
    pub async fn update_post(&self, id: u64, payload: &PostCreate) -> Result<Post, ClientError> {
        let response = self
            .execute(Method::PUT, &post_path(id), RequestOptions::json(payload)?)
            .await?;
        Ok(Post::from_json(&response.body)?)
    }

    /// Deletes a post (`DELETE /posts/{id}`).
    ///
    /// Returns the JSON object the service answers with, or an empty map
    /// when the body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is neither
    /// empty nor a JSON object.
    pub async fn delete_post(&self, id: u64) -> Result<Map<String, Value>, ClientError> {
        let response = self
            .execute(Method::DELETE, &post_path(id), RequestOptions::new())
            .await?;
        Ok(decode_object(&response.body)?)
    }
}

/// Decodes a JSON object body; a blank body decodes to an empty map.
pub(super) fn decode_object(body: &[u8]) -> Result<Map<String, Value>, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice(body)? {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

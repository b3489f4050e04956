//! `Post` and `PostCreate` value objects.

use serde::{Deserialize, Deserializer, Serialize};

use super::{DecodeError, ValidationError};

/// Wire names of the Post fields.
mod field {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const USER_ID: &str = "userId";
}

/// Payload for creating or replacing a post.
///
/// Serializes to exactly `{"title", "body", "userId"}`. Construction fails
/// if `title` or `body` is empty or `user_id` is zero, so an invalid payload
/// never reaches the transport layer.
///
/// # Example
///
/// ```
/// use posts_client::model::PostCreate;
///
/// let payload = PostCreate::new("Hello", "World", 1).unwrap();
/// assert_eq!(payload.title(), "Hello");
///
/// assert!(PostCreate::new("", "World", 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCreate {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u64,
}

impl PostCreate {
    /// Creates a validated payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `title` or `body` is empty,
    /// or `user_id` is less than 1.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        user_id: u64,
    ) -> Result<Self, ValidationError> {
        let title = non_empty(field::TITLE, title.into())?;
        let body = non_empty(field::BODY, body.into())?;
        let user_id = positive(field::USER_ID, user_id)?;

        Ok(Self {
            title,
            body,
            user_id,
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the owning user id.
    #[must_use]
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }
}

impl<'de> Deserialize<'de> for PostCreate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPost::deserialize(deserializer)?;
        Self::new(raw.title, raw.body, raw.user_id).map_err(serde::de::Error::custom)
    }
}

/// A post as returned by the remote service.
///
/// Carries the [`PostCreate`] fields plus an optional `id`. The service
/// always returns an id, but decoding tolerates its absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u64,
}

impl Post {
    /// Creates a validated post.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] under the same rules as
    /// [`PostCreate::new`], and additionally when `id` is `Some(0)`.
    pub fn new(
        id: Option<u64>,
        title: impl Into<String>,
        body: impl Into<String>,
        user_id: u64,
    ) -> Result<Self, ValidationError> {
        let id = id.map(|id| positive(field::ID, id)).transpose()?;
        let PostCreate {
            title,
            body,
            user_id,
        } = PostCreate::new(title, body, user_id)?;

        Ok(Self {
            id,
            title,
            body,
            user_id,
        })
    }

    /// Decodes a post from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON or a missing/mistyped
    /// field, and [`DecodeError::Invalid`] when a field constraint fails.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw: RawPost = serde_json::from_slice(bytes)?;
        Ok(Self::new(raw.id, raw.title, raw.body, raw.user_id)?)
    }

    /// Returns the id, if the service supplied one.
    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the owning user id.
    #[must_use]
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Returns true if this post carries the same content as `payload`.
    #[must_use]
    pub fn matches(&self, payload: &PostCreate) -> bool {
        self.title == payload.title && self.body == payload.body && self.user_id == payload.user_id
    }
}

impl<'de> Deserialize<'de> for Post {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPost::deserialize(deserializer)?;
        Self::new(raw.id, raw.title, raw.body, raw.user_id).map_err(serde::de::Error::custom)
    }
}

/// Unvalidated wire shape shared by both entities.
#[derive(Deserialize)]
struct RawPost {
    #[serde(default)]
    id: Option<u64>,
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u64,
}

fn non_empty(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

const fn positive(field: &'static str, value: u64) -> Result<u64, ValidationError> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

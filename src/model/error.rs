//! Error types for entity construction and decoding.

use thiserror::Error;

/// A field constraint was violated while constructing an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A string field that must be non-empty was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Wire name of the field
        field: &'static str,
    },

    /// An integer field that must be at least 1 was not.
    #[error("{field} must be at least 1, got {value}")]
    NotPositive {
        /// Wire name of the field
        field: &'static str,
        /// The rejected value
        value: u64,
    },
}

/// A response body could not be turned into an entity.
///
/// Distinct from transport and status failures: the server answered
/// successfully, but with something this client cannot accept.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON or does not have the expected shape.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("Expected a JSON object, got {found}")]
    NotAnObject {
        /// Short description of the JSON value received
        found: &'static str,
    },

    /// The body decoded but violates a field constraint.
    #[error("Invalid entity: {0}")]
    Invalid(#[from] ValidationError),
}

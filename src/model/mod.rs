//! Entity model for the Posts resource.
//!
//! This module provides:
//! - The request payload for create/update ([`PostCreate`])
//! - The decoded response entity ([`Post`])
//! - Field constraint failures ([`ValidationError`])
//! - Response decoding failures ([`DecodeError`])
//!
//! All validation happens at construction or decoding time. A value that
//! exists is valid; nothing re-validates it later.

mod error;
mod post;


pub use error::{DecodeError, ValidationError};
pub use post::{Post, PostCreate};

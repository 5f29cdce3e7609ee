//! GymPal operations
//!
//! Transport-agnostic implementations shared by the HTTP API and the MCP
//! server. Each takes the data store and returns a serializable response.

pub mod nutrition;
pub mod profile;
pub mod routines;
pub mod status;
pub mod users;

use serde::Serialize;

/// Plain `{ "message": ... }` response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A trimmed, non-empty value or `None`
pub(crate) fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

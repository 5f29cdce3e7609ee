//! Service error types
//!
//! Shared by the HTTP and MCP surfaces. Messages are user-facing and match
//! what the mobile client displays.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Error de almacenamiento: {0}")]
    Store(#[from] StoreError),

    #[error("Error interno: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// True when the caller sent something wrong, as opposed to a server fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_) | Self::Internal(_))
    }
}

/// Reject text the line format cannot hold
pub fn ensure_storable(field: &str, value: &str) -> ServiceResult<()> {
    if value.contains(['|', '\n', '\r']) {
        return Err(ServiceError::validation(format!(
            "El campo '{}' contiene caracteres no permitidos.",
            field
        )));
    }
    Ok(())
}

/// Reject text that would split a field whose line breaks the codec escapes
pub fn ensure_single_field(field: &str, value: &str) -> ServiceResult<()> {
    if value.contains('|') {
        return Err(ServiceError::validation(format!(
            "El campo '{}' contiene caracteres no permitidos.",
            field
        )));
    }
    Ok(())
}

//! Service layer error types
//!
//! Abstracts over transport-specific errors (REST/WebSocket). Nothing here
//! is fatal to the session; user-facing failures become System timeline
//! entries.

use crate::ports::outbound::{ApiError, ConnectionError};

/// Errors that can occur in service operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("no character loaded")]
    NoCharacter,
}

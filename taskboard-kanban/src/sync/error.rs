//! Errors raised while talking to the persistence service

use crate::error::KanbanError;
use taskboard_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while synchronizing the board with the server
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an unexpected status
    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Missing, expired or insufficient credentials
    #[error("not authorized")]
    Unauthorized,

    /// The server does not know the resource
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The server rejected a write made against an outdated version
    #[error("version conflict on task {id}")]
    Conflict { id: String },

    /// The response body did not match the expected shape
    #[error("could not decode server response: {0}")]
    Decode(String),

    /// The local board rejected the change
    #[error(transparent)]
    Kanban(#[from] KanbanError),
}

impl SyncError {
    /// Create an HTTP status error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl Severity for SyncError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Conflict { .. } => ErrorSeverity::Warning,
            Self::Unauthorized => ErrorSeverity::Critical,
            Self::Kanban(e) => e.severity(),
            Self::Network(_) | Self::Http { .. } | Self::NotFound { .. } | Self::Decode(_) => {
                ErrorSeverity::Error
            }
        }
    }
}

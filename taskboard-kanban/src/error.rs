//! Error types for the kanban board

use taskboard_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur while mutating the board
#[derive(Debug, Error)]
pub enum KanbanError {
    /// No column is keyed by this section id
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task not found in the column it claims to belong to
    #[error("task not found: {id} in column {column}")]
    TaskNotFound { id: String, column: String },

    /// A gesture referenced a slot that does not exist
    #[error("index {index} out of range for column '{column}' with {len} tasks")]
    IndexOutOfRange {
        column: String,
        index: usize,
        len: usize,
    },

    /// The dragged card is no longer where the gesture says it started
    #[error("stale gesture: expected task {expected} at source, found {found}")]
    StaleGesture { expected: String, found: String },

    /// Board has not been bound to a project yet
    #[error("no project loaded")]
    ProjectNotLoaded,

    /// Parse error
    #[error("parse error: {message}")]
    Parse { message: String },
}

impl KanbanError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a column not found error
    pub fn column_not_found(id: impl ToString) -> Self {
        Self::ColumnNotFound { id: id.to_string() }
    }
}

impl Severity for KanbanError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StaleGesture { .. } => ErrorSeverity::Warning,
            Self::ColumnNotFound { .. }
            | Self::TaskNotFound { .. }
            | Self::IndexOutOfRange { .. }
            | Self::ProjectNotLoaded
            | Self::Parse { .. } => ErrorSeverity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::TaskNotFound {
            id: "abc123".into(),
            column: "todo".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123 in column todo");
    }

    #[test]
    fn test_parse_error() {
        let err = KanbanError::parse("unexpected token");
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_severity() {
        let stale = KanbanError::StaleGesture {
            expected: "a".into(),
            found: "b".into(),
        };
        assert_eq!(stale.severity(), ErrorSeverity::Warning);
        assert_eq!(
            KanbanError::column_not_found("x").severity(),
            ErrorSeverity::Error
        );
    }
}

//! Process exit codes

use taskboard_client::ConfigError;
use taskboard_common::{ErrorSeverity, Severity};
use taskboard_kanban::{AuthError, KanbanError, SyncError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_CRITICAL: i32 = 2;

/// Severity of the first typed error found in the chain
pub fn severity_of(error: &anyhow::Error) -> ErrorSeverity {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<SyncError>() {
            return e.severity();
        }
        if let Some(e) = cause.downcast_ref::<KanbanError>() {
            return e.severity();
        }
        if let Some(e) = cause.downcast_ref::<AuthError>() {
            return e.severity();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.severity();
        }
    }
    ErrorSeverity::Error
}

/// Exit code for a failed command; a failure never exits with success
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    match severity_of(error) {
        ErrorSeverity::Critical => EXIT_CRITICAL,
        ErrorSeverity::Warning | ErrorSeverity::Error => EXIT_ERROR,
    }
}

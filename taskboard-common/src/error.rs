//! Error severity classification shared by every Taskboard crate

/// Severity levels for error classification
///
/// These levels let callers pick a log level, an exit code, or a user-facing
/// presentation without matching on every concrete error variant.
///
/// - **Warning**: Potential issue but the operation can proceed.
/// - **Error**: The operation failed but the application can continue.
/// - **Critical**: The application cannot continue without intervention.
///
/// # Examples
///
/// ```rust
/// use taskboard_common::ErrorSeverity;
///
/// // A stale drag gesture is dropped and the user simply retries
/// let stale = ErrorSeverity::Warning;
///
/// // A task that vanished from its column fails that one update
/// let missing = ErrorSeverity::Error;
///
/// // Bad credentials block every further server call
/// let unauthorized = ErrorSeverity::Critical;
/// # let _ = (stale, missing, unauthorized);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but the application can continue
    Error,

    /// Application cannot continue, requires attention
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Trait for error types that have severity levels
///
/// Every Taskboard error enum implements this so the CLI and logging layers
/// can classify failures uniformly.
///
/// # Example
///
/// ```rust
/// use taskboard_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     SessionExpired,
///     ColumnMissing,
///     GestureCancelled,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::SessionExpired => ErrorSeverity::Critical,
///             MyError::ColumnMissing => ErrorSeverity::Error,
///             MyError::GestureCancelled => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::SessionExpired.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

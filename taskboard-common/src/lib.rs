//! # Taskboard Common
//!
//! Foundational pieces shared by every Taskboard crate:
//!
//! - [`error`] - `ErrorSeverity` and the `Severity` trait all error enums implement
//! - [`logging`] - subscriber setup for binaries and the `Pretty` log formatter

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::{configure_logging, Pretty};

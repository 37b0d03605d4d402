//! Logging utilities for Taskboard
//!
//! Library crates only emit `tracing` events. Binaries call
//! [`configure_logging`] once at startup to install a subscriber.

use serde::Serialize;
use std::fmt::Debug;
use tracing::Level;

/// Wrapper for pretty-printing types in logs as YAML
///
/// ```ignore
/// use taskboard_common::Pretty;
/// use tracing::debug;
///
/// debug!("Loaded board: {}", Pretty(&snapshot));
/// ```
///
/// Outputs YAML with a leading newline. Debug is used as a fallback if YAML
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Pick the log level from the usual trio of CLI flags.
///
/// `quiet` wins over `debug`, which wins over `verbose`.
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Install the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` is ignored in favour of the flags; noisy HTTP internals are
/// capped at `warn`. Calling this twice is harmless: the second install fails
/// silently.
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let level = log_level(verbose, debug, quiet);
    let filter = EnvFilter::new(format!("hyper=warn,reqwest=warn,{level}"));

    let _ = registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

//! Library side of the `taskboard` binary, exposed for integration tests

pub mod cli;
pub mod commands;
pub mod display;
pub mod exit_codes;

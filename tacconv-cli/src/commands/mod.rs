//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`action`] - One-shot actions (validate, compile, ..., health)
//! - [`config`] - Configuration management (path, init, show)
//! - [`shell`] - Interactive session over a TAC buffer

pub mod action;
pub mod config;
pub mod shell;

/// Process exit code when the requested action did not succeed.
pub const EXIT_ACTION_FAILED: i32 = 2;

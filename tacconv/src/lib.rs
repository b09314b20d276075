//! tacconv - client for a remote TAC compilation service
//!
//! This library drives a three-address-code compilation service over its
//! JSON-over-HTTP contract and turns the responses into renderable views.
//!
//! # High-Level API
//!
//! ```ignore
//! use tacconv::config::ConfigFile;
//! use tacconv::context::AppContext;
//! use tacconv::controller::{Controller, Mode};
//!
//! let config = ConfigFile::load()?;
//! let ctx = AppContext::connect(&config)?;
//! let controller = Controller::new(&ctx);
//!
//! let (_, outcome) = tokio::join!(
//!     controller.startup_health_check(),
//!     controller.run(Mode::Complete, "t1 = a + b\nc = t1"),
//! );
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod controller;
pub mod diff;
pub mod error;
pub mod gateway;
pub mod health;
pub mod logging;
pub mod notify;
pub mod render;

/// Version of the tacconv library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

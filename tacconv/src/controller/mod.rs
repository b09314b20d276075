//! Orchestration of user actions.
//!
//! The [`Controller`] turns an [`Action`] into exactly one gateway call,
//! maps the response through the renderer and updates the single
//! [`ViewState`]. Every action has its own pending slot:
//!
//! ```text
//! Idle ──▶ Pending ──▶ Success ──▶ Idle
//!                 └──▶ Failure ──▶ Idle
//! ```
//!
//! While an action is pending its control is disabled and a second trigger
//! is rejected as [`ActionOutcome::Busy`]. Leaving `Pending` always
//! re-enables the control, whatever the outcome.
//!
//! The controller is single-threaded. State sits in `RefCell`s that are
//! never borrowed across an await, so independent actions can be polled
//! concurrently (e.g. with `tokio::join!`) on one thread.

mod action;
mod history;
mod orchestrator;
mod state;

pub use action::{Action, Mode, Section};
pub use history::{AttemptOutcome, History, HistoryEntry};
pub use orchestrator::{ActionOutcome, Controller};
pub use state::{ModeUpdate, Panel, ViewState};

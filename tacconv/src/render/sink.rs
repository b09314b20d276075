//! Rendering sink interface.

use super::view::{
    AssemblyView, Banner, HealthView, OptimizationView, ResourcesView, ValidationView,
};
use crate::controller::{Action, ViewState};
use crate::notify::Notification;

/// Backend-level presentation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show the side-by-side comparison under the optimization view.
    pub show_diff: bool,
}

/// A drawing backend for view models.
///
/// Implementations receive already-mapped views and only decide how they
/// look. All text from the service must be escaped for the backend.
pub trait RenderSink {
    type Error;

    fn banner(&mut self, action: Action, banner: &Banner) -> Result<(), Self::Error>;

    fn validation(&mut self, view: &ValidationView) -> Result<(), Self::Error>;

    fn assembly(&mut self, view: &AssemblyView) -> Result<(), Self::Error>;

    fn resources(&mut self, view: &ResourcesView) -> Result<(), Self::Error>;

    fn optimization(
        &mut self,
        view: &OptimizationView,
        options: RenderOptions,
    ) -> Result<(), Self::Error>;

    fn health(&mut self, view: &HealthView) -> Result<(), Self::Error>;

    fn notification(&mut self, notification: &Notification) -> Result<(), Self::Error>;
}

/// Draw banners, then every visible section in display order.
pub fn draw<S: RenderSink>(
    sink: &mut S,
    state: &ViewState,
    options: RenderOptions,
) -> Result<(), S::Error> {
    for (action, banner) in state.banners() {
        sink.banner(action, banner)?;
    }
    if let Some(view) = state.validation.shown() {
        sink.validation(view)?;
    }
    if let Some(view) = state.assembly.shown() {
        sink.assembly(view)?;
    }
    if let Some(view) = state.resources.shown() {
        sink.resources(view)?;
    }
    if let Some(view) = state.optimization.shown() {
        sink.optimization(view, options)?;
    }
    if let Some(view) = state.health.shown() {
        sink.health(view)?;
    }
    Ok(())
}

//! The single view the controller keeps up to date.

use super::action::{Action, Mode, Section};
use crate::render::view::{
    AssemblyView, Banner, HealthView, OptimizationView, ResourcesView, ValidationView,
};
use std::collections::BTreeMap;

/// A section's content plus whether it is shown.
///
/// Hiding keeps the content; only a new result replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel<V> {
    visible: bool,
    content: Option<V>,
}

impl<V> Panel<V> {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&V> {
        self.content.as_ref()
    }

    /// Content, but only while the panel is shown.
    pub fn shown(&self) -> Option<&V> {
        self.content.as_ref().filter(|_| self.visible)
    }

    fn show(&mut self, content: V) {
        self.content = Some(content);
        self.visible = true;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl<V> Default for Panel<V> {
    fn default() -> Self {
        Self {
            visible: false,
            content: None,
        }
    }
}

/// Fresh views for every section a mode shows.
#[derive(Debug, Clone)]
pub enum ModeUpdate {
    Validation(ValidationView),
    Compile(AssemblyView),
    Complete {
        assembly: AssemblyView,
        resources: ResourcesView,
        optimization: OptimizationView,
    },
    Assembly(AssemblyView),
    Resources {
        assembly: AssemblyView,
        resources: ResourcesView,
    },
    Optimize(OptimizationView),
}

impl ModeUpdate {
    pub fn mode(&self) -> Mode {
        match self {
            ModeUpdate::Validation(_) => Mode::Validate,
            ModeUpdate::Compile(_) => Mode::Compile,
            ModeUpdate::Complete { .. } => Mode::Complete,
            ModeUpdate::Assembly(_) => Mode::Assembly,
            ModeUpdate::Resources { .. } => Mode::Resources,
            ModeUpdate::Optimize(_) => Mode::Optimize,
        }
    }
}

/// Every panel plus the inline banner of each action.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub validation: Panel<ValidationView>,
    pub assembly: Panel<AssemblyView>,
    pub resources: Panel<ResourcesView>,
    pub optimization: Panel<OptimizationView>,
    pub health: Panel<HealthView>,
    banners: BTreeMap<Action, Banner>,
}

impl ViewState {
    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::Validation => self.validation.is_visible(),
            Section::Assembly => self.assembly.is_visible(),
            Section::Resources => self.resources.is_visible(),
            Section::Optimization => self.optimization.is_visible(),
            Section::Health => self.health.is_visible(),
        }
    }

    /// Shown result sections, in display order. Health is excluded.
    pub fn visible_results(&self) -> Vec<Section> {
        Section::RESULTS
            .into_iter()
            .filter(|section| self.is_visible(*section))
            .collect()
    }

    pub fn banner(&self, action: Action) -> Option<&Banner> {
        self.banners.get(&action)
    }

    pub fn banners(&self) -> impl Iterator<Item = (Action, &Banner)> {
        self.banners.iter().map(|(action, banner)| (*action, banner))
    }

    pub(crate) fn set_banner(&mut self, action: Action, banner: Banner) {
        self.banners.insert(action, banner);
    }

    pub(crate) fn clear_banner(&mut self, action: Action) {
        self.banners.remove(&action);
    }

    /// Replace the sections of the update's mode and hide every other
    /// result section.
    pub(crate) fn apply(&mut self, update: ModeUpdate) {
        let targets = update.mode().sections();
        self.validation
            .set_visible(targets.contains(&Section::Validation));
        self.assembly.set_visible(targets.contains(&Section::Assembly));
        self.resources
            .set_visible(targets.contains(&Section::Resources));
        self.optimization
            .set_visible(targets.contains(&Section::Optimization));

        match update {
            ModeUpdate::Validation(view) => self.validation.show(view),
            ModeUpdate::Compile(view) | ModeUpdate::Assembly(view) => self.assembly.show(view),
            ModeUpdate::Complete {
                assembly,
                resources,
                optimization,
            } => {
                self.assembly.show(assembly);
                self.resources.show(resources);
                self.optimization.show(optimization);
            }
            ModeUpdate::Resources {
                assembly,
                resources,
            } => {
                self.assembly.show(assembly);
                self.resources.show(resources);
            }
            ModeUpdate::Optimize(view) => self.optimization.show(view),
        }
    }

    pub(crate) fn show_health(&mut self, view: HealthView) {
        self.health.show(view);
    }

    /// Hide every section and drop all banners.
    pub(crate) fn clear(&mut self) {
        self.validation.set_visible(false);
        self.assembly.set_visible(false);
        self.resources.set_visible(false);
        self.optimization.set_visible(false);
        self.health.set_visible(false);
        self.banners.clear();
    }
}

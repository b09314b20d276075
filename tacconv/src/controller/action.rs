//! Action identifiers and the mode table.

use crate::api::Endpoint;
use std::fmt;

/// Result section a mode may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Validation,
    Assembly,
    Resources,
    Optimization,
    Health,
}

impl Section {
    /// Sections owned by the result modes. Health is not one of them.
    pub const RESULTS: [Section; 4] = [
        Section::Validation,
        Section::Assembly,
        Section::Resources,
        Section::Optimization,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Validation => "Validation",
            Section::Assembly => "Assembly",
            Section::Resources => "Resource Analysis",
            Section::Optimization => "Optimization",
            Section::Health => "API Health",
        }
    }
}

/// Mutually exclusive request mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    Validate,
    Compile,
    Complete,
    Assembly,
    Resources,
    Optimize,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Validate,
        Mode::Compile,
        Mode::Complete,
        Mode::Assembly,
        Mode::Resources,
        Mode::Optimize,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Mode::Validate => "validate",
            Mode::Compile => "compile",
            Mode::Complete => "complete",
            Mode::Assembly => "assembly",
            Mode::Resources => "resources",
            Mode::Optimize => "optimize",
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Mode::Validate => Endpoint::Validate,
            Mode::Compile => Endpoint::Compile,
            Mode::Complete => Endpoint::Complete,
            Mode::Assembly => Endpoint::Assembly,
            Mode::Resources => Endpoint::Resources,
            Mode::Optimize => Endpoint::Optimize,
        }
    }

    /// Sections shown after this mode succeeds. All others are hidden.
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Mode::Validate => &[Section::Validation],
            Mode::Compile | Mode::Assembly => &[Section::Assembly],
            Mode::Complete => &[Section::Assembly, Section::Resources, Section::Optimization],
            Mode::Resources => &[Section::Assembly, Section::Resources],
            Mode::Optimize => &[Section::Optimization],
        }
    }

    pub fn progress_message(&self) -> &'static str {
        match self {
            Mode::Validate => "Validating TAC syntax...",
            Mode::Compile => "Compiling TAC to assembly...",
            _ => "Processing...",
        }
    }

    pub fn input_error(&self) -> &'static str {
        match self {
            Mode::Validate => "TAC code is required for validation.",
            _ => "TAC code is required for compilation.",
        }
    }

    /// Prefix of the notification raised on a transport failure.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Mode::Validate => "Validation failed",
            Mode::Compile => "Compilation failed",
            Mode::Complete => "Analysis failed",
            Mode::Assembly => "Assembly generation failed",
            Mode::Resources => "Resource analysis failed",
            Mode::Optimize => "Optimization failed",
        }
    }

    /// Whether attempts in this mode go into the compilation history.
    pub fn records_history(&self) -> bool {
        !matches!(self, Mode::Validate)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A user-triggerable control. Each one has its own pending slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Run(Mode),
    Health,
    Clear,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Run(Mode::Validate),
        Action::Run(Mode::Compile),
        Action::Run(Mode::Complete),
        Action::Run(Mode::Assembly),
        Action::Run(Mode::Resources),
        Action::Run(Mode::Optimize),
        Action::Health,
        Action::Clear,
    ];

    /// Dispatch table from action identifiers to actions.
    ///
    /// `tac` is accepted as an alias of `compile`, after its endpoint.
    pub fn from_id(id: &str) -> Option<Action> {
        let id = id.trim().to_ascii_lowercase();
        if id == "tac" {
            return Some(Action::Run(Mode::Compile));
        }
        Action::ALL.into_iter().find(|action| action.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Action::Run(mode) => mode.id(),
            Action::Health => "health",
            Action::Clear => "clear",
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        match self {
            Action::Run(mode) => Some(*mode),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

//! View models produced by the renderer.
//!
//! These are plain data. They carry already-formatted display strings and
//! style classes but nothing backend specific, so a terminal, HTML or
//! desktop sink can draw them without re-deriving anything.

use crate::diff::{DiffRow, DiffSummary};
use crate::notify::Severity;

/// Tri-level badge styling plus a neutral fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeClass {
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeClass::Success => "success",
            BadgeClass::Warning => "warning",
            BadgeClass::Danger => "danger",
            BadgeClass::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub class: BadgeClass,
}

/// Inline status line attached to an action's panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub severity: Severity,
    pub message: String,
}

impl Banner {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }
}

/// A labelled figure, e.g. "Total Instructions: 12".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

impl Stat {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationView {
    pub valid: bool,
    /// "Valid" or "Invalid".
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyView {
    pub status: Banner,
    /// Only populated for single-stage compilation.
    pub stats: Vec<Stat>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub label: &'static str,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRow {
    pub mnemonic: String,
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcesView {
    pub totals: Vec<Stat>,
    pub metrics: Vec<MetricRow>,
    /// In the order the service reported them.
    pub registers: Vec<String>,
    /// Two-column table in the order the service reported it.
    pub instruction_table: Vec<InstructionRow>,
}

/// Optimization log, or an explicit notice that it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogList {
    Entries(Vec<String>),
    NoneApplied(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeColumn {
    pub heading: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationView {
    pub summary: Vec<Stat>,
    pub instructions_saved: i64,
    /// Improvement rounded to two decimals, e.g. `"12.35%"`.
    pub improvement: String,
    pub logs: LogList,
    pub original: CodeColumn,
    pub optimized: CodeColumn,
    pub diff: Vec<DiffRow>,
    pub diff_summary: DiffSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReportView {
    pub status: Badge,
    pub message: String,
    pub server_time: String,
    pub response_time: String,
    pub api_base: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthView {
    Report(HealthReportView),
    Failed { error: Banner, hint: Banner },
}

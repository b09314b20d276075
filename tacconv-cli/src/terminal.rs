//! Terminal backend for the rendering sink.
//!
//! Writes plain text with optional ANSI styling through `console`. Every
//! string that came from the service passes through [`sanitize_terminal`]
//! so it cannot inject escape sequences.

use console::{style, StyledObject};
use std::io::{self, Write};
use tacconv::controller::{Action, Section};
use tacconv::diff::DiffRow;
use tacconv::notify::{Notification, Severity};
use tacconv::render::text::sanitize_terminal;
use tacconv::render::view::{
    AssemblyView, BadgeClass, Banner, HealthReportView, HealthView, LogList, OptimizationView,
    ResourcesView, Stat, ValidationView,
};
use tacconv::render::{RenderOptions, RenderSink};

/// Renders views as text lines on any writer.
pub struct TerminalSink<W> {
    out: W,
    styled: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), console::colors_enabled())
    }
}

impl TerminalSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr(), console::colors_enabled_stderr())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint<D>(&self, value: D) -> StyledObject<D> {
        style(value).force_styling(self.styled)
    }

    /// Write one unstyled line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Write a prompt and flush it.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", self.paint(text).bold())?;
        self.out.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn heading(&mut self, section: Section) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.paint(section.title()).bold().underlined())
    }

    fn severity_line(&mut self, severity: Severity, message: &str) -> io::Result<()> {
        let text = format!("{} {}", severity.symbol(), sanitize_terminal(message));
        let painted = match severity {
            Severity::Success => self.paint(text).green(),
            Severity::Error => self.paint(text).red(),
            Severity::Warning => self.paint(text).yellow(),
            Severity::Info => self.paint(text).cyan(),
        };
        writeln!(self.out, "{}", painted)
    }

    fn stats(&mut self, stats: &[Stat]) -> io::Result<()> {
        let width = stats.iter().map(|s| s.label.len()).max().unwrap_or(0);
        for stat in stats {
            writeln!(
                self.out,
                "  {:<width$}  {}",
                stat.label,
                self.paint(sanitize_terminal(&stat.value)).bold(),
                width = width
            )?;
        }
        Ok(())
    }

    fn code(&mut self, code: &str) -> io::Result<()> {
        for line in sanitize_terminal(code).lines() {
            writeln!(self.out, "    {}", line)?;
        }
        Ok(())
    }

    fn diff_table(&mut self, rows: &[DiffRow]) -> io::Result<()> {
        let left: Vec<String> = rows.iter().map(|r| sanitize_terminal(&r.left_line)).collect();
        let right: Vec<String> = rows.iter().map(|r| sanitize_terminal(&r.right_line)).collect();
        let width = left
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("Original".len());

        writeln!(
            self.out,
            "    {:<width$} | {}",
            self.paint("Original").bold(),
            self.paint("Optimized").bold(),
            width = width
        )?;
        for ((row, l), r) in rows.iter().zip(&left).zip(&right) {
            let padded = format!("{:<width$}", l, width = width);
            if row.changed {
                writeln!(
                    self.out,
                    "  ~ {} | {}",
                    self.paint(padded).red(),
                    self.paint(r).green()
                )?;
            } else {
                writeln!(self.out, "    {} | {}", padded, r)?;
            }
        }
        Ok(())
    }

    fn health_report(&mut self, view: &HealthReportView) -> io::Result<()> {
        let status = sanitize_terminal(&view.status.label);
        let status = match view.status.class {
            BadgeClass::Success => self.paint(status).green().bold(),
            _ => self.paint(status).red().bold(),
        };
        writeln!(self.out, "  {:<14} {}", "Status:", status)?;
        for (label, value) in [
            ("Message:", &view.message),
            ("Server Time:", &view.server_time),
            ("Response Time:", &view.response_time),
            ("API Base URL:", &view.api_base),
        ] {
            writeln!(self.out, "  {:<14} {}", label, sanitize_terminal(value))?;
        }
        Ok(())
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    type Error = io::Error;

    fn banner(&mut self, _action: Action, banner: &Banner) -> io::Result<()> {
        self.severity_line(banner.severity, &banner.message)
    }

    fn validation(&mut self, view: &ValidationView) -> io::Result<()> {
        self.heading(Section::Validation)?;
        let status = if view.valid {
            self.paint(view.status).green().bold()
        } else {
            self.paint(view.status).red().bold()
        };
        writeln!(self.out, "  Validation Status: {}", status)?;
        self.code(&view.message)
    }

    fn assembly(&mut self, view: &AssemblyView) -> io::Result<()> {
        self.heading(Section::Assembly)?;
        self.severity_line(view.status.severity, &view.status.message)?;
        if !view.stats.is_empty() {
            self.stats(&view.stats)?;
        }
        writeln!(self.out)?;
        self.code(&view.code)
    }

    fn resources(&mut self, view: &ResourcesView) -> io::Result<()> {
        self.heading(Section::Resources)?;
        self.stats(&view.totals)?;
        writeln!(self.out)?;

        for metric in &view.metrics {
            let label = sanitize_terminal(&metric.badge.label);
            let badge = match metric.badge.class {
                BadgeClass::Success => self.paint(label).green(),
                BadgeClass::Warning => self.paint(label).yellow(),
                BadgeClass::Danger => self.paint(label).red(),
                BadgeClass::Info => self.paint(label).cyan(),
            };
            writeln!(self.out, "  {:<24} {}", format!("{}:", metric.label), badge)?;
        }

        let registers: Vec<String> = view.registers.iter().map(|r| sanitize_terminal(r)).collect();
        writeln!(self.out, "  Registers: {}", registers.join(" "))?;

        if !view.instruction_table.is_empty() {
            writeln!(self.out)?;
            let width = view
                .instruction_table
                .iter()
                .map(|row| row.mnemonic.chars().count())
                .max()
                .unwrap_or(0)
                .max("Instruction".len());
            writeln!(
                self.out,
                "  {:<width$}  {}",
                "Instruction",
                "Count",
                width = width
            )?;
            for row in &view.instruction_table {
                writeln!(
                    self.out,
                    "  {:<width$}  {}",
                    sanitize_terminal(&row.mnemonic),
                    sanitize_terminal(&row.count),
                    width = width
                )?;
            }
        }
        Ok(())
    }

    fn optimization(&mut self, view: &OptimizationView, options: RenderOptions) -> io::Result<()> {
        self.heading(Section::Optimization)?;
        self.stats(&view.summary)?;
        writeln!(self.out)?;

        match &view.logs {
            LogList::Entries(entries) => {
                for entry in entries {
                    writeln!(self.out, "  - {}", sanitize_terminal(entry))?;
                }
            }
            LogList::NoneApplied(notice) => {
                writeln!(self.out, "  {}", self.paint(notice).dim())?;
            }
        }

        if options.show_diff {
            writeln!(self.out)?;
            self.diff_table(&view.diff)?;
            writeln!(
                self.out,
                "  {} of {} lines changed",
                view.diff_summary.changed, view.diff_summary.rows
            )?;
        } else {
            for column in [&view.original, &view.optimized] {
                writeln!(self.out)?;
                writeln!(self.out, "  {}", self.paint(sanitize_terminal(&column.heading)).bold())?;
                self.code(&column.code)?;
            }
        }
        Ok(())
    }

    fn health(&mut self, view: &HealthView) -> io::Result<()> {
        self.heading(Section::Health)?;
        match view {
            HealthView::Report(report) => self.health_report(report),
            HealthView::Failed { error, hint } => {
                self.severity_line(error.severity, &error.message)?;
                self.severity_line(hint.severity, &hint.message)
            }
        }
    }

    fn notification(&mut self, notification: &Notification) -> io::Result<()> {
        self.severity_line(notification.severity, &notification.message)
    }
}

//! HTML fragment backend.
//!
//! Produces markup with the class names of the service's bundled web page.
//! Every string that came from the service passes through [`escape_html`].

use super::sink::{RenderOptions, RenderSink};
use super::text::escape_html;
use super::view::{
    AssemblyView, Banner, HealthReportView, HealthView, LogList, OptimizationView, ResourcesView,
    Stat, ValidationView,
};
use crate::controller::Action;
use crate::diff::DiffRow;
use crate::notify::Notification;
use std::fmt::{self, Write};

/// Collects HTML fragments into a string.
#[derive(Debug, Default)]
pub struct HtmlSink {
    out: String,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn banner_div(&mut self, banner: &Banner) -> fmt::Result {
        writeln!(
            self.out,
            r#"<div class="{}-banner">{}</div>"#,
            banner.severity,
            escape_html(&banner.message)
        )
    }

    fn stats(&mut self, stats: &[Stat]) -> fmt::Result {
        self.out.push_str(r#"<div class="stats">"#);
        for stat in stats {
            write!(
                self.out,
                r#"<div class="stat-item"><span class="stat-value">{}</span><span class="stat-label">{}</span></div>"#,
                escape_html(&stat.value),
                stat.label
            )?;
        }
        self.out.push_str("</div>\n");
        Ok(())
    }

    fn diff_table(&mut self, rows: &[DiffRow]) -> fmt::Result {
        self.out.push_str(
            r#"<table class="diff-table"><thead><tr><th>Original</th><th>Optimized</th></tr></thead><tbody>"#,
        );
        for row in rows {
            let (left, right) = if row.changed {
                ("diff-changed-left", "diff-changed-right")
            } else {
                ("diff-unchanged", "diff-unchanged")
            };
            write!(
                self.out,
                r#"<tr><td class="{}"><pre>{}</pre></td><td class="{}"><pre>{}</pre></td></tr>"#,
                left,
                escape_html(&row.left_line),
                right,
                escape_html(&row.right_line)
            )?;
        }
        self.out.push_str("</tbody></table>\n");
        Ok(())
    }

    fn health_report(&mut self, view: &HealthReportView) -> fmt::Result {
        write!(
            self.out,
            r#"<div class="health-status"><div class="health-item"><strong>Status:</strong> <span class="{}">{}</span></div>"#,
            view.status.class.as_str(),
            escape_html(&view.status.label)
        )?;
        for (label, value) in [
            ("Message", &view.message),
            ("Server Time", &view.server_time),
            ("Response Time", &view.response_time),
            ("API Base URL", &view.api_base),
        ] {
            write!(
                self.out,
                r#"<div class="health-item"><strong>{}:</strong> {}</div>"#,
                label,
                escape_html(value)
            )?;
        }
        self.out.push_str("</div>\n");
        Ok(())
    }
}

impl RenderSink for HtmlSink {
    type Error = fmt::Error;

    fn banner(&mut self, _action: Action, banner: &Banner) -> fmt::Result {
        self.banner_div(banner)
    }

    fn validation(&mut self, view: &ValidationView) -> fmt::Result {
        let class = if view.valid { "success" } else { "error" };
        writeln!(
            self.out,
            r#"<div class="validation-status"><p class="{}"><strong>Validation Status:</strong> {}</p><pre>{}</pre></div>"#,
            class,
            view.status,
            escape_html(&view.message)
        )
    }

    fn assembly(&mut self, view: &AssemblyView) -> fmt::Result {
        self.banner_div(&view.status)?;
        if !view.stats.is_empty() {
            self.stats(&view.stats)?;
        }
        writeln!(
            self.out,
            r#"<pre class="code-block">{}</pre>"#,
            escape_html(&view.code)
        )
    }

    fn resources(&mut self, view: &ResourcesView) -> fmt::Result {
        self.stats(&view.totals)?;
        for metric in &view.metrics {
            write!(
                self.out,
                r#"<div class="metric-row"><span>{}:</span><span class="metric-badge {}">{}</span></div>"#,
                metric.label,
                metric.badge.class.as_str(),
                escape_html(&metric.badge.label)
            )?;
        }
        self.out.push_str(r#"<div class="register-list">"#);
        for register in &view.registers {
            write!(
                self.out,
                r#"<span class="register-badge">{}</span>"#,
                escape_html(register)
            )?;
        }
        self.out.push_str(
            r#"</div><table class="resource-table"><tr><th>Instruction</th><th>Count</th></tr>"#,
        );
        for row in &view.instruction_table {
            write!(
                self.out,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&row.mnemonic),
                escape_html(&row.count)
            )?;
        }
        self.out.push_str("</table>\n");
        Ok(())
    }

    fn optimization(&mut self, view: &OptimizationView, options: RenderOptions) -> fmt::Result {
        self.stats(&view.summary)?;
        match &view.logs {
            LogList::Entries(entries) => {
                self.out.push_str(r#"<ul class="optimization-logs">"#);
                for entry in entries {
                    write!(self.out, "<li>{}</li>", escape_html(entry))?;
                }
                self.out.push_str("</ul>\n");
            }
            LogList::NoneApplied(notice) => {
                writeln!(self.out, r#"<p class="info-text">{}</p>"#, notice)?;
            }
        }
        for column in [&view.original, &view.optimized] {
            writeln!(
                self.out,
                r#"<div class="code-column"><h4>{}</h4><pre class="code-block">{}</pre></div>"#,
                escape_html(&column.heading),
                escape_html(&column.code)
            )?;
        }
        if options.show_diff {
            self.diff_table(&view.diff)?;
        }
        Ok(())
    }

    fn health(&mut self, view: &HealthView) -> fmt::Result {
        match view {
            HealthView::Report(report) => self.health_report(report),
            HealthView::Failed { error, hint } => {
                self.banner_div(error)?;
                self.banner_div(hint)
            }
        }
    }

    fn notification(&mut self, notification: &Notification) -> fmt::Result {
        writeln!(
            self.out,
            r#"<div class="notification notification-{}" style="background: {}">{}</div>"#,
            notification.severity,
            notification.severity.color(),
            escape_html(&notification.message)
        )
    }
}

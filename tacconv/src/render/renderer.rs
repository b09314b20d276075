//! Pure mapping from typed results to view models.
//!
//! Nothing here performs I/O. Every function takes a result by reference
//! and returns a fresh view.

use super::view::{
    AssemblyView, Badge, BadgeClass, Banner, CodeColumn, HealthReportView, HealthView,
    InstructionRow, LogList, MetricRow, OptimizationView, ResourcesView, Stat, ValidationView,
};
use crate::api::{
    AssemblyResult, CompilationResult, Level, OptimizationResult, ResourceAnalysis,
    ValidationResult,
};
use crate::diff::{build_diff, DiffSummary};
use crate::gateway::GatewayError;
use crate::health::HealthRecord;

pub const NO_ASSEMBLY_GENERATED: &str = "No assembly code generated.";
pub const NO_OPTIMIZATIONS_APPLIED: &str = "No optimizations were applied.";
pub const BACKEND_HINT: &str = "Please ensure the backend server is running and accessible.";

// =============================================================================
// Formatting helpers
// =============================================================================

/// Round to two decimals and render as a percentage.
///
/// `12.345` renders as `"12.35%"`.
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{:.2}%", rounded)
}

/// Relative size difference between TAC input and generated assembly.
///
/// `round(|(lines - instructions) / instructions| * 100)`, or 0 when either
/// count is missing or zero.
pub fn compression_ratio(instruction_count: Option<i64>, assembly_lines: Option<i64>) -> i64 {
    match (instruction_count, assembly_lines) {
        (Some(instr), Some(lines)) if instr != 0 && lines != 0 => {
            let ratio = (lines - instr) as f64 / instr as f64 * 100.0;
            ratio.abs().round() as i64
        }
        _ => 0,
    }
}

/// Badge styling for a LOW/MEDIUM/HIGH level.
pub fn badge_class(level: &Level) -> BadgeClass {
    match level {
        Level::Low => BadgeClass::Success,
        Level::Medium => BadgeClass::Warning,
        Level::High => BadgeClass::Danger,
        Level::Other(_) => BadgeClass::Info,
    }
}

fn badge(level: &Level) -> Badge {
    Badge {
        label: level.to_string(),
        class: badge_class(level),
    }
}

// =============================================================================
// Result views
// =============================================================================

pub fn render_validation(result: &ValidationResult) -> ValidationView {
    ValidationView {
        valid: result.valid,
        status: if result.valid { "Valid" } else { "Invalid" },
        message: result.message.clone(),
    }
}

/// View for a successful single-stage compilation, with statistics.
pub fn render_compilation(result: &CompilationResult) -> AssemblyView {
    let ratio = compression_ratio(result.instruction_count, result.assembly_line_count);
    AssemblyView {
        status: Banner::success("Compilation Successful"),
        stats: vec![
            Stat::new("TAC Instructions", result.instruction_count.unwrap_or(0)),
            Stat::new("Assembly Lines", result.assembly_line_count.unwrap_or(0)),
            Stat::new("Compression", format!("{}%", ratio)),
        ],
        code: result
            .assembly_code
            .clone()
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| NO_ASSEMBLY_GENERATED.to_string()),
    }
}

pub fn render_assembly(result: &AssemblyResult) -> AssemblyView {
    AssemblyView {
        status: Banner::success("Assembly Generated Successfully"),
        stats: Vec::new(),
        code: result.assembly_code.clone(),
    }
}

pub fn render_resources(analysis: &ResourceAnalysis) -> ResourcesView {
    ResourcesView {
        totals: vec![
            Stat::new("Total Instructions", analysis.total_instructions),
            Stat::new("Registers Used", analysis.register_count),
            Stat::new("Memory Accesses", analysis.memory_accesses),
            Stat::new("Arithmetic Ops", analysis.arithmetic_operations),
            Stat::new("Jump Instructions", analysis.jump_instructions),
            Stat::new("Labels", analysis.label_count),
        ],
        metrics: vec![
            MetricRow {
                label: "Control Flow Complexity",
                badge: badge(&analysis.control_flow_complexity),
            },
            MetricRow {
                label: "Memory Pressure",
                badge: badge(&analysis.memory_pressure),
            },
            MetricRow {
                label: "Register Pressure",
                badge: badge(&analysis.register_pressure),
            },
        ],
        registers: analysis.registers_used.clone(),
        instruction_table: analysis
            .instruction_types
            .iter()
            .map(|row| InstructionRow {
                mnemonic: row.mnemonic.clone(),
                count: row.count.to_string(),
            })
            .collect(),
    }
}

pub fn render_optimization(result: &OptimizationResult) -> OptimizationView {
    let instructions_saved = result.instructions_saved();
    let improvement = format_percent(result.improvement_percentage);
    let diff = build_diff(&result.original_code, &result.optimized_code);
    let diff_summary = DiffSummary::of(&diff);

    let logs = if result.optimization_logs.is_empty() {
        LogList::NoneApplied(NO_OPTIMIZATIONS_APPLIED)
    } else {
        LogList::Entries(result.optimization_logs.clone())
    };

    OptimizationView {
        summary: vec![
            Stat::new("Optimizations Applied", result.optimizations_applied),
            Stat::new("Instructions Saved", instructions_saved),
            Stat::new("Improvement", &improvement),
        ],
        instructions_saved,
        improvement,
        logs,
        original: CodeColumn {
            heading: format!(
                "Original Code ({} instructions)",
                result.original_instruction_count
            ),
            code: result.original_code.clone(),
        },
        optimized: CodeColumn {
            heading: format!(
                "Optimized Code ({} instructions)",
                result.optimized_instruction_count
            ),
            code: result.optimized_code.clone(),
        },
        diff,
        diff_summary,
    }
}

// =============================================================================
// Health views
// =============================================================================

pub fn render_health(record: &HealthRecord, api_base: &str) -> HealthView {
    let report = &record.report;
    let class = if report.is_ok() {
        BadgeClass::Success
    } else {
        BadgeClass::Danger
    };
    let server_time = report
        .server_time()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    HealthView::Report(HealthReportView {
        status: Badge {
            label: report.status.clone(),
            class,
        },
        message: report.message.clone(),
        server_time,
        response_time: format!("{}ms", record.response_time.as_millis()),
        api_base: api_base.to_string(),
    })
}

pub fn render_health_failure(error: &GatewayError) -> HealthView {
    HealthView::Failed {
        error: Banner::error(format!("Health check failed: {}", error)),
        hint: Banner::info(BACKEND_HINT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HealthReport, InstructionCount};
    use chrono::Local;
    use std::time::Duration;

    fn analysis() -> ResourceAnalysis {
        ResourceAnalysis {
            total_instructions: 5,
            register_count: 2,
            memory_accesses: 3,
            arithmetic_operations: 1,
            jump_instructions: 0,
            label_count: 0,
            registers_used: vec!["R1".to_string(), "R0".to_string()],
            instruction_types: vec![
                InstructionCount {
                    mnemonic: "MOV".to_string(),
                    count: 4,
                },
                InstructionCount {
                    mnemonic: "ADD".to_string(),
                    count: 1,
                },
            ],
            control_flow_complexity: Level::Low,
            memory_pressure: Level::High,
            register_pressure: Level::Other("SEVERE".to_string()),
        }
    }

    fn optimization(logs: Vec<&str>) -> OptimizationResult {
        OptimizationResult {
            optimizations_applied: logs.len() as i64,
            original_code: "MOV R0, a\nMOV R0, a\nADD R0, b".to_string(),
            optimized_code: "MOV R0, a\nADD R0, b".to_string(),
            original_instruction_count: 3,
            optimized_instruction_count: 2,
            improvement_percentage: 12.345,
            optimization_logs: logs.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_format_percent_rounds_to_two_places() {
        assert_eq!(format_percent(12.345), "12.35%");
        assert_eq!(format_percent(33.333333), "33.33%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(-5.5), "-5.50%");
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(Some(4), Some(10)), 150);
        assert_eq!(compression_ratio(Some(10), Some(4)), 60);
        assert_eq!(compression_ratio(Some(3), Some(4)), 33);
        assert_eq!(compression_ratio(None, Some(4)), 0);
        assert_eq!(compression_ratio(Some(0), Some(4)), 0);
        assert_eq!(compression_ratio(Some(4), Some(0)), 0);
    }

    #[test]
    fn test_badge_classes() {
        assert_eq!(badge_class(&Level::Low), BadgeClass::Success);
        assert_eq!(badge_class(&Level::Medium), BadgeClass::Warning);
        assert_eq!(badge_class(&Level::High), BadgeClass::Danger);
        assert_eq!(badge_class(&Level::from("medium")), BadgeClass::Warning);
        assert_eq!(badge_class(&Level::from("EXTREME")), BadgeClass::Info);
    }

    #[test]
    fn test_resources_view_keeps_order() {
        let view = render_resources(&analysis());

        assert_eq!(view.registers, vec!["R1", "R0"]);
        assert_eq!(view.instruction_table[0].mnemonic, "MOV");
        assert_eq!(view.instruction_table[0].count, "4");
        assert_eq!(view.instruction_table[1].mnemonic, "ADD");
        assert_eq!(view.totals[0], Stat::new("Total Instructions", 5));
        assert_eq!(view.metrics[1].badge.class, BadgeClass::Danger);
        assert_eq!(view.metrics[2].badge.label, "SEVERE");
        assert_eq!(view.metrics[2].badge.class, BadgeClass::Info);
    }

    #[test]
    fn test_optimization_view() {
        let view = render_optimization(&optimization(vec!["Removed redundant MOV"]));

        assert_eq!(view.instructions_saved, 1);
        assert_eq!(view.improvement, "12.35%");
        assert_eq!(
            view.logs,
            LogList::Entries(vec!["Removed redundant MOV".to_string()])
        );
        assert_eq!(view.original.heading, "Original Code (3 instructions)");
        assert_eq!(view.diff.len(), 3);
        assert_eq!(view.diff_summary.changed, 2);
    }

    #[test]
    fn test_optimization_view_negative_savings_not_clamped() {
        let mut result = optimization(vec![]);
        result.original_instruction_count = 2;
        result.optimized_instruction_count = 5;

        let view = render_optimization(&result);

        assert_eq!(view.instructions_saved, -3);
        assert_eq!(view.summary[1].value, "-3");
        assert_eq!(view.logs, LogList::NoneApplied(NO_OPTIMIZATIONS_APPLIED));
    }

    #[test]
    fn test_compilation_view_stats_and_missing_code() {
        let view = render_compilation(&CompilationResult {
            success: true,
            message: "ok".to_string(),
            assembly_code: None,
            instruction_count: Some(4),
            assembly_line_count: Some(6),
        });

        assert_eq!(view.code, NO_ASSEMBLY_GENERATED);
        assert_eq!(view.stats[0].value, "4");
        assert_eq!(view.stats[1].value, "6");
        assert_eq!(view.stats[2].value, "50%");
    }

    #[test]
    fn test_validation_view() {
        let view = render_validation(&ValidationResult {
            valid: false,
            message: "Unknown operator at line 1".to_string(),
        });
        assert_eq!(view.status, "Invalid");
        assert!(!view.valid);
    }

    #[test]
    fn test_health_views() {
        let record = HealthRecord {
            checked_at: Local::now(),
            report: HealthReport {
                status: "DOWN".to_string(),
                message: "maintenance".to_string(),
                timestamp: None,
            },
            response_time: Duration::from_millis(42),
        };

        match render_health(&record, "http://svc/api/compile") {
            HealthView::Report(view) => {
                assert_eq!(view.status.class, BadgeClass::Danger);
                assert_eq!(view.response_time, "42ms");
                assert_eq!(view.server_time, "unknown");
                assert_eq!(view.api_base, "http://svc/api/compile");
            }
            other => panic!("unexpected view: {:?}", other),
        }

        match render_health_failure(&GatewayError::Timeout { timeout_ms: 5000 }) {
            HealthView::Failed { error, hint } => {
                assert_eq!(
                    error.message,
                    "Health check failed: Request timed out after 5000ms"
                );
                assert_eq!(hint.message, BACKEND_HINT);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }
}

//! Request and response bodies of the compilation service.

use chrono::{DateTime, Local};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Request
// =============================================================================

/// Body of every POST endpoint: `{ "tacCode": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationRequest {
    pub tac_code: String,
}

impl CompilationRequest {
    /// Build a request from raw editor text.
    ///
    /// The source is trimmed; `None` when nothing but whitespace remains.
    pub fn from_source(source: &str) -> Option<Self> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            tac_code: trimmed.to_string(),
        })
    }
}

// =============================================================================
// Version 1 responses
// =============================================================================

/// Response of `POST /validate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Response of `POST /tac`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationResult {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub assembly_code: Option<String>,
    #[serde(default)]
    pub instruction_count: Option<i64>,
    #[serde(default)]
    pub assembly_line_count: Option<i64>,
}

// =============================================================================
// Version 2 responses
// =============================================================================

/// Shared envelope of the `/v2/*` endpoints.
///
/// Which optional parts are present depends on the endpoint; the
/// `into_*` conversions check the parts a given endpoint promises.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V2Response {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub assembly_code: Option<String>,
    #[serde(default)]
    pub resource_analysis: Option<ResourceAnalysis>,
    #[serde(default)]
    pub optimization: Option<OptimizationResult>,
}

/// A successful `/v2/*` response lacked a part its endpoint promises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("response is missing `{field}`")]
pub struct IncompleteResponse {
    pub field: &'static str,
}

impl V2Response {
    fn assembly(&mut self) -> Result<AssemblyResult, IncompleteResponse> {
        let assembly_code = self.assembly_code.take().ok_or(IncompleteResponse {
            field: "assemblyCode",
        })?;
        Ok(AssemblyResult {
            message: std::mem::take(&mut self.message),
            assembly_code,
        })
    }

    fn analysis(&mut self) -> Result<ResourceAnalysis, IncompleteResponse> {
        self.resource_analysis.take().ok_or(IncompleteResponse {
            field: "resourceAnalysis",
        })
    }

    fn optimized(&mut self) -> Result<OptimizationResult, IncompleteResponse> {
        self.optimization.take().ok_or(IncompleteResponse {
            field: "optimization",
        })
    }

    pub fn into_assembly(mut self) -> Result<AssemblyResult, IncompleteResponse> {
        self.assembly()
    }

    pub fn into_resources(mut self) -> Result<ResourcesResult, IncompleteResponse> {
        Ok(ResourcesResult {
            assembly: self.assembly()?,
            analysis: self.analysis()?,
        })
    }

    pub fn into_optimization(mut self) -> Result<OptimizationResult, IncompleteResponse> {
        self.optimized()
    }

    pub fn into_complete(mut self) -> Result<CompleteAnalysisResult, IncompleteResponse> {
        Ok(CompleteAnalysisResult {
            assembly: self.assembly()?,
            analysis: self.analysis()?,
            optimization: self.optimized()?,
        })
    }
}

/// Generated assembly from a `/v2` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyResult {
    pub message: String,
    pub assembly_code: String,
}

/// Result of `/v2/resources`: assembly plus its resource analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcesResult {
    pub assembly: AssemblyResult,
    pub analysis: ResourceAnalysis,
}

/// Result of `/v2/complete`. All three parts are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteAnalysisResult {
    pub assembly: AssemblyResult,
    pub analysis: ResourceAnalysis,
    pub optimization: OptimizationResult,
}

/// Coarse LOW/MEDIUM/HIGH classification reported by the analyzer.
///
/// Parsing is case-insensitive. Values the client does not know are kept
/// verbatim in [`Level::Other`] so newer service versions still render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Level {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for Level {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "low" => Level::Low,
            "medium" => Level::Medium,
            "high" => Level::High,
            _ => Level::Other(raw),
        }
    }
}

impl From<&str> for Level {
    fn from(raw: &str) -> Self {
        Level::from(raw.to_string())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::Medium => f.write_str("MEDIUM"),
            Level::High => f.write_str("HIGH"),
            Level::Other(raw) => f.write_str(raw),
        }
    }
}

/// One row of the instruction-type breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionCount {
    pub mnemonic: String,
    pub count: i64,
}

/// Static resource counts over generated assembly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAnalysis {
    pub total_instructions: i64,
    pub register_count: i64,
    pub memory_accesses: i64,
    pub arithmetic_operations: i64,
    pub jump_instructions: i64,
    pub label_count: i64,
    /// Registers in the order the service listed them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub registers_used: Vec<String>,
    /// Instruction mnemonics in the order the service listed them.
    #[serde(default, deserialize_with = "ordered_counts")]
    pub instruction_types: Vec<InstructionCount>,
    pub control_flow_complexity: Level,
    pub memory_pressure: Level,
    pub register_pressure: Level,
}

/// Output of the external optimizer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimizations_applied: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optimized_code: String,
    pub original_instruction_count: i64,
    pub optimized_instruction_count: i64,
    pub improvement_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optimization_logs: Vec<String>,
}

impl OptimizationResult {
    /// Instructions removed by the optimizer. Negative when it grew the code.
    pub fn instructions_saved(&self) -> i64 {
        self.original_instruction_count - self.optimized_instruction_count
    }
}

// =============================================================================
// Health
// =============================================================================

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Server clock in milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// Server clock converted to the local timezone.
    pub fn server_time(&self) -> Option<DateTime<Local>> {
        self.timestamp
            .and_then(DateTime::from_timestamp_millis)
            .map(|t| t.with_timezone(&Local))
    }
}

// =============================================================================
// serde helpers
// =============================================================================

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a JSON object of integer counts, keeping key order.
fn ordered_counts<'de, D>(deserializer: D) -> Result<Vec<InstructionCount>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?
        .unwrap_or_default();

    let mut counts = Vec::with_capacity(map.len());
    for (mnemonic, value) in map {
        let count = match value.as_i64() {
            Some(count) => count,
            None => {
                return Err(D::Error::custom(format!(
                    "count for instruction '{}' is not an integer",
                    mnemonic
                )))
            }
        };
        counts.push(InstructionCount { mnemonic, count });
    }
    Ok(counts)
}

//! Wire contract of the compilation service.
//!
//! All request and response bodies are JSON. Field names follow the
//! service's camelCase convention; the Rust side uses snake_case via serde
//! renames.
//!
//! | Method | Path | Request | Response |
//! |--------|------|---------|----------|
//! | POST | `/validate` | [`CompilationRequest`] | [`ValidationResult`] |
//! | POST | `/tac` | [`CompilationRequest`] | [`CompilationResult`] |
//! | POST | `/v2/complete` | [`CompilationRequest`] | [`V2Response`] → [`CompleteAnalysisResult`] |
//! | POST | `/v2/assembly` | [`CompilationRequest`] | [`V2Response`] → [`AssemblyResult`] |
//! | POST | `/v2/resources` | [`CompilationRequest`] | [`V2Response`] → [`ResourcesResult`] |
//! | POST | `/v2/optimize` | [`CompilationRequest`] | [`V2Response`] → [`OptimizationResult`] |
//! | GET | `/health` | none | [`HealthReport`] |

mod endpoint;
mod types;

pub use endpoint::{Endpoint, Method};
pub use types::{
    AssemblyResult, CompilationRequest, CompilationResult, CompleteAnalysisResult, HealthReport,
    IncompleteResponse, InstructionCount, Level, OptimizationResult, ResourceAnalysis,
    ResourcesResult, V2Response, ValidationResult,
};

//! junit-gate - CI quality gate over JUnit-style XML reports
//!
//! Discovers test report files, aggregates their test/failure/error counts,
//! computes a failure rate and decides whether the pipeline stage passes.
//! Results are exported as `KEY=VALUE` variables for downstream steps.

pub mod aggregate;
pub mod config;
pub mod discovery;
pub mod export;
pub mod gate;
pub mod logging;
pub mod pipeline;

pub use aggregate::{AggregateStats, SkippedReport};
pub use config::{ConfigError, EffectiveConfig, EnvVars, ExportConfig, GateConfig};
pub use discovery::{discover_reports, DiscoveryError, ReportDiscovery};
pub use export::{ExportError, ExportVariables, GateSummary, ResultExporter};
pub use gate::{ExitCode, GateEvaluator, GateResult, GateStatus};
pub use junit_report::{CaseDetail, CountMode, ParsedReport, ReportCounts, ReportError, ReportParser};
pub use pipeline::{GatePipeline, PipelineError, RunOutcome};

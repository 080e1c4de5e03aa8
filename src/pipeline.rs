//! Gate pipeline orchestration
//!
//! One sequential pass:
//! - Discover report files
//! - Parse each report and fold it into the run totals
//! - Evaluate the gate once on the final totals
//! - Export results
//!
//! A report that fails to parse is logged and skipped; it never aborts
//! the run.

use std::error::Error as StdError;
use std::path::PathBuf;

use junit_report::ReportParser;
use thiserror::Error;

use crate::aggregate::AggregateStats;
use crate::config::GateConfig;
use crate::discovery::{DiscoveryError, ReportDiscovery};
use crate::export::{ExportError, ExportReport, ResultExporter};
use crate::gate::{ExitCode, GateEvaluator, GateResult};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunOutcome {
    /// Report files matched by the pattern
    pub discovered: Vec<PathBuf>,
    pub stats: AggregateStats,
    pub gate: GateResult,
    pub export: Result<ExportReport, ExportError>,
}

impl RunOutcome {
    /// Process exit code for this run.
    ///
    /// The gate decides the code. An export failure only overrides a
    /// passing gate when `fail_on_export_error` is set.
    pub fn exit_code(&self, fail_on_export_error: bool) -> ExitCode {
        let gate_code = self.gate.exit_code();
        if fail_on_export_error && self.export.is_err() && gate_code.is_success() {
            return ExitCode::ExportFailed;
        }
        gate_code
    }
}

/// Runs the gate for a resolved configuration
#[derive(Debug, Clone)]
pub struct GatePipeline {
    config: GateConfig,
}

impl GatePipeline {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Discover, parse, evaluate and export
    pub fn run(&self) -> Result<RunOutcome, PipelineError> {
        let discovery = ReportDiscovery::new(&self.config.pattern)?;
        tracing::info!(
            pattern = %self.config.pattern,
            count_mode = %self.config.count_mode,
            "starting report discovery"
        );
        let discovered = discovery.discover();
        if discovered.is_empty() {
            tracing::warn!(pattern = %self.config.pattern, "no report files matched");
        }

        let stats = aggregate_reports(&discovered, ReportParser::new(self.config.count_mode));

        let gate = GateEvaluator::new(self.config.threshold).evaluate(&stats);
        if gate.passed() {
            tracing::info!(failure_rate = gate.failure_rate, threshold = gate.threshold, "{}", gate.reason);
        } else {
            tracing::error!(failure_rate = gate.failure_rate, threshold = gate.threshold, "{}", gate.reason);
        }

        let export = ResultExporter::new(self.config.export.clone()).export(
            &self.config.pattern,
            self.config.count_mode,
            &stats,
            &gate,
        );
        if let Err(ref e) = export {
            tracing::error!(error = %error_chain(e), "result export failed");
        }

        Ok(RunOutcome {
            discovered,
            stats,
            gate,
            export,
        })
    }
}

/// Parse every path in order and fold the results.
///
/// Parse failures are logged with their full error chain and recorded as
/// skipped.
pub fn aggregate_reports(paths: &[PathBuf], parser: ReportParser) -> AggregateStats {
    let mut stats = AggregateStats::new();

    for path in paths {
        match parser.parse_file(path) {
            Ok(report) => {
                let counts = report.counts;
                stats.fold(report);
                tracing::info!(
                    path = %path.display(),
                    tests = counts.tests,
                    failures = counts.failures,
                    errors = counts.errors,
                    "processed report"
                );
                if counts.failures > 0 || counts.errors > 0 {
                    tracing::warn!(
                        path = %path.display(),
                        failures = counts.failures,
                        errors = counts.errors,
                        "report contains failing tests"
                    );
                }
            }
            Err(e) => {
                let chain = error_chain(&e);
                tracing::error!(path = %path.display(), error = %chain, "skipping report");
                stats.record_skipped(path.clone(), chain);
            }
        }
    }

    tracing::debug!(
        processed = stats.files_processed,
        skipped = stats.skipped.len(),
        total_tests = stats.total_tests,
        total_failures = stats.total_failures,
        total_errors = stats.total_errors,
        "aggregation complete"
    );
    stats
}

/// Render an error with every `source()` in its chain
pub fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": caused by: ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

//! Result export
//!
//! Publishes the run totals, failure rate and case details to downstream
//! pipeline steps: as variables in the current process environment, as a
//! `KEY=VALUE` artifact, and optionally as a JSON summary.

mod summary;
mod variables;

pub use summary::{human_summary, GateSummary, SUMMARY_SCHEMA_ID, SUMMARY_SCHEMA_VERSION};
pub use variables::{
    details_json, ExportVariables, KEY_ERROR_TESTS_JSON, KEY_FAILED_TESTS_JSON,
    KEY_FAILURE_RATE, KEY_GATE_STATUS, KEY_TOTAL_ERRORS, KEY_TOTAL_FAILURES,
    KEY_TOTAL_FAILURES_AND_ERRORS, KEY_TOTAL_TESTS,
};

use junit_report::CountMode;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::aggregate::AggregateStats;
use crate::config::ExportConfig;
use crate::gate::GateResult;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize case details: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What an export run produced
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub variables: ExportVariables,
    pub artifact_path: PathBuf,
    pub summary_path: Option<PathBuf>,
}

/// Writes results to every configured target
#[derive(Debug, Clone)]
pub struct ResultExporter {
    config: ExportConfig,
}

impl ResultExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export to all targets, stopping at the first failure
    pub fn export(
        &self,
        pattern: &str,
        count_mode: CountMode,
        stats: &AggregateStats,
        gate: &GateResult,
    ) -> Result<ExportReport, ExportError> {
        let variables = ExportVariables::from_results(stats, gate)?;

        if self.config.process_env {
            set_process_env(&variables);
        }

        write_env_file(&self.config.output_path, &variables)?;
        tracing::info!(path = %self.config.output_path.display(), keys = variables.len(), "wrote result artifact");

        if let Some(ref path) = self.config.summary_path {
            GateSummary::new(pattern, count_mode, stats, gate)
                .write_to_file(path)
                .map_err(|source| ExportError::Write {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(path = %path.display(), "wrote gate summary");
        }

        Ok(ExportReport {
            variables,
            artifact_path: self.config.output_path.clone(),
            summary_path: self.config.summary_path.clone(),
        })
    }
}

/// Set every variable in the current process environment
pub fn set_process_env(variables: &ExportVariables) {
    for (key, value) in variables.iter() {
        std::env::set_var(key, value);
    }
}

/// Truncate and rewrite the `KEY=VALUE` artifact
pub fn write_env_file(path: &Path, variables: &ExportVariables) -> Result<(), ExportError> {
    fs::write(path, variables.to_env_file()).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateEvaluator;
    use tempfile::TempDir;

    fn export_config(dir: &TempDir) -> ExportConfig {
        ExportConfig {
            output_path: dir.path().join("gate.env"),
            summary_path: None,
            process_env: false,
            fail_on_error: false,
        }
    }

    fn stats() -> AggregateStats {
        AggregateStats {
            total_tests: 4,
            total_failures: 1,
            total_errors: 1,
            files_processed: 1,
            ..AggregateStats::default()
        }
    }

    #[test]
    fn test_artifact_overwritten_not_appended() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir);
        fs::write(&config.output_path, "STALE=1\nOLD=2\nMORE=3\nLINES=4\nHERE=5\nX=6\nY=7\nZ=8\nW=9\n").unwrap();

        let stats = stats();
        let gate = GateEvaluator::new(0.0).evaluate(&stats);
        ResultExporter::new(config.clone())
            .export("**/*.xml", CountMode::Aggregate, &stats, &gate)
            .unwrap();

        let contents = fs::read_to_string(&config.output_path).unwrap();
        assert!(!contents.contains("STALE"));
        assert_eq!(contents.lines().count(), 8);
        assert!(contents.contains("FAILURE_RATE=50.00\n"));
    }

    #[test]
    fn test_summary_written_when_configured() {
        let dir = TempDir::new().unwrap();
        let mut config = export_config(&dir);
        let summary_path = dir.path().join("summary.json");
        config.summary_path = Some(summary_path.clone());

        let stats = stats();
        let gate = GateEvaluator::new(50.0).evaluate(&stats);
        let report = ResultExporter::new(config)
            .export("**/*.xml", CountMode::Individual, &stats, &gate)
            .unwrap();

        assert_eq!(report.summary_path, Some(summary_path.clone()));
        let summary = GateSummary::from_file(&summary_path).unwrap();
        assert_eq!(summary.count_mode, CountMode::Individual);
        assert_eq!(summary.failure_rate, 50.0);
    }

    #[test]
    fn test_write_failure_is_typed_error() {
        let dir = TempDir::new().unwrap();
        let mut config = export_config(&dir);
        config.output_path = dir.path().join("missing-dir").join("gate.env");

        let stats = stats();
        let gate = GateEvaluator::new(0.0).evaluate(&stats);
        let err = ResultExporter::new(config)
            .export("**/*.xml", CountMode::Aggregate, &stats, &gate)
            .unwrap_err();

        match err {
            ExportError::Write { path, .. } => assert!(path.ends_with("missing-dir/gate.env")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

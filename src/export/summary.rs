//! Gate summary (summary.json)

use chrono::{DateTime, Utc};
use junit_report::{CaseDetail, CountMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::aggregate::{AggregateStats, SkippedReport};
use crate::gate::{GateResult, GateStatus};

/// Schema version for summary.json
pub const SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for summary.json
pub const SUMMARY_SCHEMA_ID: &str = "junit-gate/summary@1";

/// Machine-readable record of one gate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSummary {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When the summary was created
    pub created_at: DateTime<Utc>,

    /// Discovery pattern used
    pub pattern: String,

    /// Counting mode used
    pub count_mode: CountMode,

    /// Gate decision
    pub status: GateStatus,

    /// Exit code the process ends with for this decision
    pub exit_code: i32,

    pub failure_rate: f64,
    pub threshold: f64,
    pub reason: String,

    pub total_tests: u64,
    pub total_failures: u64,
    pub total_errors: u64,

    /// Reports folded into the totals
    pub files_processed: usize,

    /// Reports that could not be parsed
    #[serde(default)]
    pub skipped: Vec<SkippedReport>,

    #[serde(default)]
    pub failure_details: Vec<CaseDetail>,

    #[serde(default)]
    pub error_details: Vec<CaseDetail>,

    /// Human-readable summary
    pub human_summary: String,
}

impl GateSummary {
    pub fn new(pattern: &str, count_mode: CountMode, stats: &AggregateStats, gate: &GateResult) -> Self {
        Self {
            schema_version: SUMMARY_SCHEMA_VERSION,
            schema_id: SUMMARY_SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            pattern: pattern.to_string(),
            count_mode,
            status: gate.status,
            exit_code: gate.exit_code().as_i32(),
            failure_rate: gate.failure_rate,
            threshold: gate.threshold,
            reason: gate.reason.clone(),
            total_tests: stats.total_tests,
            total_failures: stats.total_failures,
            total_errors: stats.total_errors,
            files_processed: stats.files_processed,
            skipped: stats.skipped.clone(),
            failure_details: stats.failure_details.clone(),
            error_details: stats.error_details.clone(),
            human_summary: human_summary(stats, gate),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))
    }
}

/// One-line description of a finished run
pub fn human_summary(stats: &AggregateStats, gate: &GateResult) -> String {
    let mut line = format!(
        "Gate {}: {} tests, {} failures, {} errors ({:.2}% failure rate, threshold {}%)",
        gate.status,
        stats.total_tests,
        stats.total_failures,
        stats.total_errors,
        gate.failure_rate,
        gate.threshold
    );
    if !stats.skipped.is_empty() {
        line.push_str(&format!(", {} report(s) skipped", stats.skipped.len()));
    }
    if !gate.passed() {
        line.push_str(&format!(" - {}", gate.reason));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateEvaluator;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_stats() -> AggregateStats {
        AggregateStats {
            total_tests: 10,
            total_failures: 2,
            total_errors: 1,
            files_processed: 2,
            ..AggregateStats::default()
        }
    }

    #[test]
    fn test_summary_fields() {
        let stats = sample_stats();
        let gate = GateEvaluator::new(50.0).evaluate(&stats);
        let summary = GateSummary::new("**/*.xml", CountMode::Aggregate, &stats, &gate);

        assert_eq!(summary.status, GateStatus::Pass);
        assert_eq!(summary.exit_code, 0);
        assert_eq!(summary.total_tests, 10);
        assert_eq!(summary.files_processed, 2);
    }

    #[test]
    fn test_serialization() {
        let stats = sample_stats();
        let gate = GateEvaluator::new(0.0).evaluate(&stats);
        let json = GateSummary::new("**/*.xml", CountMode::Individual, &stats, &gate)
            .to_json()
            .unwrap();

        assert!(json.contains(r#""schema_id": "junit-gate/summary@1""#));
        assert!(json.contains(r#""status": "FAIL""#));
        assert!(json.contains(r#""count_mode": "individual""#));
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = TempDir::new().unwrap();
        let mut stats = sample_stats();
        stats.record_skipped(PathBuf::from("broken.xml"), "malformed XML");
        let gate = GateEvaluator::new(0.0).evaluate(&stats);
        let summary = GateSummary::new("**/*.xml", CountMode::Aggregate, &stats, &gate);

        let path = dir.path().join("summary.json");
        summary.write_to_file(&path).unwrap();

        let loaded = GateSummary::from_file(&path).unwrap();
        assert_eq!(loaded.status, GateStatus::Fail);
        assert_eq!(loaded.exit_code, 1);
        assert_eq!(loaded.skipped.len(), 1);
    }

    #[test]
    fn test_human_summary_pass() {
        let stats = sample_stats();
        let gate = GateEvaluator::new(50.0).evaluate(&stats);
        assert_eq!(
            human_summary(&stats, &gate),
            "Gate PASS: 10 tests, 2 failures, 1 errors (30.00% failure rate, threshold 50%)"
        );
    }

    #[test]
    fn test_human_summary_no_tests() {
        let stats = AggregateStats::default();
        let gate = GateEvaluator::new(0.0).evaluate(&stats);
        let line = human_summary(&stats, &gate);
        assert!(line.starts_with("Gate FAIL: 0 tests"));
        assert!(line.ends_with("no tests executed"));
    }
}

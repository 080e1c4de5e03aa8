//! Aggregation of per-file report results into run totals

use junit_report::{CaseDetail, ParsedReport, ReportCounts};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A report file that contributed nothing because it failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedReport {
    pub path: PathBuf,
    pub reason: String,
}

/// Running totals for one gate run.
///
/// Counts only ever grow; a report is folded in as a whole or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_tests: u64,
    pub total_failures: u64,
    pub total_errors: u64,

    /// Failure details in file-processing order
    pub failure_details: Vec<CaseDetail>,

    /// Error details in file-processing order
    pub error_details: Vec<CaseDetail>,

    /// Number of reports folded in
    pub files_processed: usize,

    /// Reports that failed to parse
    pub skipped: Vec<SkippedReport>,
}

impl AggregateStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one parsed report to the totals
    pub fn fold(&mut self, report: ParsedReport) {
        let ReportCounts {
            tests,
            failures,
            errors,
        } = report.counts;

        self.total_tests = self.total_tests.saturating_add(tests);
        self.total_failures = self.total_failures.saturating_add(failures);
        self.total_errors = self.total_errors.saturating_add(errors);
        self.failure_details.extend(report.failures);
        self.error_details.extend(report.errors);
        self.files_processed += 1;
    }

    /// Note a report that was skipped
    pub fn record_skipped(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.skipped.push(SkippedReport {
            path,
            reason: reason.into(),
        });
    }

    /// Failures plus errors
    pub fn total_failed(&self) -> u64 {
        self.total_failures.saturating_add(self.total_errors)
    }
}

impl FromIterator<ParsedReport> for AggregateStats {
    fn from_iter<I: IntoIterator<Item = ParsedReport>>(iter: I) -> Self {
        let mut stats = Self::new();
        for report in iter {
            stats.fold(report);
        }
        stats
    }
}

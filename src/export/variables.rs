//! Result variables shared by every export target

use junit_report::CaseDetail;

use super::ExportError;
use crate::aggregate::AggregateStats;
use crate::gate::GateResult;

pub const KEY_TOTAL_TESTS: &str = "TOTAL_TESTS";
pub const KEY_TOTAL_FAILURES: &str = "TOTAL_FAILURES";
pub const KEY_TOTAL_ERRORS: &str = "TOTAL_ERRORS";
pub const KEY_TOTAL_FAILURES_AND_ERRORS: &str = "TOTAL_FAILURES_AND_ERRORS";
pub const KEY_FAILURE_RATE: &str = "FAILURE_RATE";
pub const KEY_GATE_STATUS: &str = "GATE_STATUS";
pub const KEY_FAILED_TESTS_JSON: &str = "FAILED_TESTS_JSON";
pub const KEY_ERROR_TESTS_JSON: &str = "ERROR_TESTS_JSON";

/// Ordered KEY=VALUE pairs describing a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportVariables {
    entries: Vec<(&'static str, String)>,
}

impl ExportVariables {
    /// Build the variables for final stats and gate result
    pub fn from_results(stats: &AggregateStats, gate: &GateResult) -> Result<Self, ExportError> {
        let entries = vec![
            (KEY_TOTAL_TESTS, stats.total_tests.to_string()),
            (KEY_TOTAL_FAILURES, stats.total_failures.to_string()),
            (KEY_TOTAL_ERRORS, stats.total_errors.to_string()),
            (KEY_TOTAL_FAILURES_AND_ERRORS, stats.total_failed().to_string()),
            (KEY_FAILURE_RATE, format!("{:.2}", gate.failure_rate)),
            (KEY_GATE_STATUS, gate.status.as_str().to_string()),
            (KEY_FAILED_TESTS_JSON, details_json(&stats.failure_details)?),
            (KEY_ERROR_TESTS_JSON, details_json(&stats.error_details)?),
        ];
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as one `KEY=VALUE` line per entry
    pub fn to_env_file(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Parse `KEY=VALUE` lines back into pairs
    pub fn parse_env_file(contents: &str) -> Vec<(String, String)> {
        contents
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Compact single-line JSON array of case details
pub fn details_json(details: &[CaseDetail]) -> Result<String, ExportError> {
    let json = serde_json::to_string(details).map_err(ExportError::Serialize)?;
    Ok(single_line(&json))
}

fn single_line(value: &str) -> String {
    value.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

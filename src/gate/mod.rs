//! Gate evaluation
//!
//! Turns the final run totals into a PASS/FAIL decision against the
//! configured failure-rate threshold.

mod exit;

pub use exit::ExitCode;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::AggregateStats;

/// Reason reported when no test was counted
pub const NO_TESTS_REASON: &str = "no tests executed";

/// Gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateStatus {
    Pass,
    Fail,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Pass => "PASS",
            GateStatus::Fail => "FAIL",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            GateStatus::Pass => ExitCode::Success,
            GateStatus::Fail => ExitCode::GateFailed,
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating the gate once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub status: GateStatus,

    /// Percentage of tests that failed or errored, within [0, 100]
    pub failure_rate: f64,

    pub threshold: f64,

    pub reason: String,
}

impl GateResult {
    pub fn passed(&self) -> bool {
        self.status == GateStatus::Pass
    }

    pub fn exit_code(&self) -> ExitCode {
        self.status.exit_code()
    }
}

/// Evaluates run totals against a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateEvaluator {
    threshold: f64,
}

impl Default for GateEvaluator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl GateEvaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Decide the gate from final run totals
    pub fn evaluate(&self, stats: &AggregateStats) -> GateResult {
        self.evaluate_totals(stats.total_tests, stats.total_failures, stats.total_errors)
    }

    /// Decide the gate from raw totals.
    ///
    /// Zero tests always fails. Otherwise the gate fails only when the rate
    /// is strictly above the threshold. The decision uses the uncapped rate;
    /// only the reported `failure_rate` is capped at 100.
    pub fn evaluate_totals(&self, tests: u64, failures: u64, errors: u64) -> GateResult {
        if tests == 0 {
            return GateResult {
                status: GateStatus::Fail,
                failure_rate: 0.0,
                threshold: self.threshold,
                reason: NO_TESTS_REASON.to_string(),
            };
        }

        let raw_rate = raw_failure_rate(tests, failures, errors);
        let failure_rate = raw_rate.min(100.0);
        if raw_rate > self.threshold {
            GateResult {
                status: GateStatus::Fail,
                failure_rate,
                threshold: self.threshold,
                reason: format!(
                    "failure rate ({:.2}%) exceeds threshold ({}%)",
                    raw_rate, self.threshold
                ),
            }
        } else {
            GateResult {
                status: GateStatus::Pass,
                failure_rate,
                threshold: self.threshold,
                reason: format!(
                    "failure rate ({:.2}%) is within acceptable threshold ({}%)",
                    failure_rate, self.threshold
                ),
            }
        }
    }
}

/// `(failures + errors) / tests * 100`, capped at 100.
///
/// Cases carrying both markers are counted twice, so the raw ratio can
/// exceed 100. Returns 0 when `tests` is 0.
pub fn failure_rate(tests: u64, failures: u64, errors: u64) -> f64 {
    raw_failure_rate(tests, failures, errors).min(100.0)
}

fn raw_failure_rate(tests: u64, failures: u64, errors: u64) -> f64 {
    if tests == 0 {
        return 0.0;
    }
    let failed = failures.saturating_add(errors) as f64;
    failed / tests as f64 * 100.0
}

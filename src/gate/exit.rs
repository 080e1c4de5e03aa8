//! Stable process exit codes

use serde::{Deserialize, Serialize};

/// Exit codes for the `junit-gate` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ExitCode {
    /// Gate passed
    Success = 0,
    /// Gate failed, including runs with no tests
    GateFailed = 1,
    /// Configuration or discovery pattern could not be used
    Config = 2,
    /// Export failed and the export policy treats that as fatal
    ExportFailed = 3,
}

impl ExitCode {
    /// Get the integer value of the exit code
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Create from integer value
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(ExitCode::Success),
            1 => Some(ExitCode::GateFailed),
            2 => Some(ExitCode::Config),
            3 => Some(ExitCode::ExportFailed),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

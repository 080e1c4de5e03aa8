//! Typed gate configuration
//!
//! The merged configuration is deserialized into [`GateConfig`] once at
//! startup and validated before any report is read.

use junit_report::CountMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::effective::ConfigError;

/// Fully resolved configuration for one gate run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Glob pattern for report files
    pub pattern: String,

    /// How tests are counted per report
    pub count_mode: CountMode,

    /// Verbose diagnostic logging
    pub debug: bool,

    /// Maximum tolerated failure rate in percent
    pub threshold: f64,

    /// Result export settings
    pub export: ExportConfig,
}

/// Where and how results are exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// KEY=VALUE artifact path
    pub output_path: PathBuf,

    /// Optional JSON run summary path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,

    /// Set result variables in the current process environment
    pub process_env: bool,

    /// Turn an export failure into a non-zero exit
    pub fail_on_error: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        let defaults = super::BuiltinDefaults::default();
        Self {
            pattern: defaults.pattern,
            count_mode: defaults.count_mode,
            debug: defaults.debug,
            threshold: defaults.threshold,
            export: ExportConfig {
                output_path: PathBuf::from(defaults.output_path),
                summary_path: None,
                process_env: defaults.export_process_env,
                fail_on_error: defaults.fail_on_export_error,
            },
        }
    }
}

impl GateConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "pattern must not be empty".to_string(),
            ));
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "threshold must be a finite percentage >= 0 (got {})",
                self.threshold
            )));
        }

        if self.export.output_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "export.output_path must not be empty".to_string(),
            ));
        }

        if let Some(ref summary) = self.export.summary_path {
            if summary.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "export.summary_path must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

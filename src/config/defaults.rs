//! Built-in gate defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

use junit_report::CountMode;
use serde::{Deserialize, Serialize};

/// Default discovery pattern
pub const DEFAULT_PATTERN: &str = "**/*.xml";

/// Default KEY=VALUE artifact path
pub const DEFAULT_OUTPUT_PATH: &str = "default_env_file.env";

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Report discovery glob (default: "**/*.xml")
    pub pattern: String,

    /// Counting mode (default: aggregate)
    pub count_mode: CountMode,

    /// Verbose diagnostics (default: false)
    pub debug: bool,

    /// Maximum tolerated failure rate in percent (default: 0)
    pub threshold: f64,

    /// Artifact path (default: "default_env_file.env")
    pub output_path: String,

    /// Export results as process environment variables (default: true)
    pub export_process_env: bool,

    /// Fail the process when the export cannot be written (default: false)
    pub fail_on_export_error: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            count_mode: CountMode::Aggregate,
            debug: false,
            threshold: 0.0,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            export_process_env: true,
            fail_on_export_error: false,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "pattern": self.pattern,
            "count_mode": self.count_mode,
            "debug": self.debug,
            "threshold": self.threshold,
            "export": {
                "output_path": self.output_path,
                "process_env": self.export_process_env,
                "fail_on_error": self.fail_on_export_error
            }
        })
    }
}

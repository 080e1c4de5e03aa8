//! Environment variable layer (layer 3)
//!
//! CI plugins receive their settings as `PLUGIN_*` variables; the artifact
//! path follows the runner's `DRONE_OUTPUT` convention.

use junit_report::CountMode;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::effective::ConfigError;

/// Path to an optional TOML config file
pub const ENV_CONFIG_FILE: &str = "PLUGIN_CONFIG";

/// Discovery glob
pub const ENV_PATTERN: &str = "PLUGIN_EXPRESSION";

/// Counting mode
pub const ENV_COUNT_MODE: &str = "PLUGIN_COUNT_MODE";

/// Debug logging flag
pub const ENV_DEBUG: &str = "PLUGIN_DEBUG";

/// Failure-rate threshold in percent
pub const ENV_THRESHOLD: &str = "PLUGIN_THRESHOLD";

/// KEY=VALUE artifact path
pub const ENV_OUTPUT: &str = "DRONE_OUTPUT";

/// JSON summary path
pub const ENV_SUMMARY_JSON: &str = "PLUGIN_SUMMARY_JSON";

/// Process environment export toggle
pub const ENV_EXPORT_ENV: &str = "PLUGIN_EXPORT_ENV";

/// Export failure policy
pub const ENV_FAIL_ON_EXPORT_ERROR: &str = "PLUGIN_FAIL_ON_EXPORT_ERROR";

/// Every variable the gate reads
pub const KNOWN_VARS: &[&str] = &[
    ENV_CONFIG_FILE,
    ENV_PATTERN,
    ENV_COUNT_MODE,
    ENV_DEBUG,
    ENV_THRESHOLD,
    ENV_OUTPUT,
    ENV_SUMMARY_JSON,
    ENV_EXPORT_ENV,
    ENV_FAIL_ON_EXPORT_ERROR,
];

/// Snapshot of the gate's environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    /// Capture the known variables from the process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are ignored.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    /// Build from arbitrary pairs, keeping only known non-empty variables
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| KNOWN_VARS.contains(&k.as_str()) && !v.trim().is_empty())
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.as_str())
    }

    /// True when no setting other than the config file path is present
    pub fn has_settings(&self) -> bool {
        self.vars.keys().any(|k| k != ENV_CONFIG_FILE)
    }

    /// Convert to a JSON layer, validating typed values
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        let mut root = Map::new();
        let mut export = Map::new();

        if let Some(pattern) = self.get(ENV_PATTERN) {
            root.insert("pattern".to_string(), Value::String(pattern.to_string()));
        }
        if let Some(raw) = self.get(ENV_COUNT_MODE) {
            let mode: CountMode = raw
                .parse()
                .map_err(|e: junit_report::ParseCountModeError| {
                    ConfigError::invalid(ENV_COUNT_MODE, raw, e.to_string())
                })?;
            root.insert("count_mode".to_string(), Value::String(mode.to_string()));
        }
        if let Some(raw) = self.get(ENV_DEBUG) {
            root.insert("debug".to_string(), Value::Bool(parse_bool(ENV_DEBUG, raw)?));
        }
        if let Some(raw) = self.get(ENV_THRESHOLD) {
            root.insert("threshold".to_string(), parse_threshold(ENV_THRESHOLD, raw)?);
        }
        if let Some(path) = self.get(ENV_OUTPUT) {
            export.insert("output_path".to_string(), Value::String(path.to_string()));
        }
        if let Some(path) = self.get(ENV_SUMMARY_JSON) {
            export.insert("summary_path".to_string(), Value::String(path.to_string()));
        }
        if let Some(raw) = self.get(ENV_EXPORT_ENV) {
            export.insert(
                "process_env".to_string(),
                Value::Bool(parse_bool(ENV_EXPORT_ENV, raw)?),
            );
        }
        if let Some(raw) = self.get(ENV_FAIL_ON_EXPORT_ERROR) {
            export.insert(
                "fail_on_error".to_string(),
                Value::Bool(parse_bool(ENV_FAIL_ON_EXPORT_ERROR, raw)?),
            );
        }

        if !export.is_empty() {
            root.insert("export".to_string(), Value::Object(export));
        }
        Ok(Value::Object(root))
    }
}

/// Parse a boolean setting (`true/false`, `1/0`, `yes/no`, `on/off`)
pub fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected a boolean")),
    }
}

/// Parse a threshold percentage into a JSON number
pub fn parse_threshold(key: &str, raw: &str) -> Result<Value, ConfigError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, raw, "expected a number"))?;
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| ConfigError::invalid(key, raw, "expected a finite number"))
}

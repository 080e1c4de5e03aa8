//! Counting modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How tests, failures and errors are counted for a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Trust the `tests`/`failures`/`errors` attributes on the root element.
    #[default]
    Aggregate,
    /// Enumerate every test case element.
    Individual,
}

impl CountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountMode::Aggregate => "aggregate",
            CountMode::Individual => "individual",
        }
    }
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown count mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown count mode '{0}' (expected 'aggregate' or 'individual')")]
pub struct ParseCountModeError(pub String);

impl FromStr for CountMode {
    type Err = ParseCountModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggregate" => Ok(CountMode::Aggregate),
            "individual" => Ok(CountMode::Individual),
            _ => Err(ParseCountModeError(s.to_string())),
        }
    }
}

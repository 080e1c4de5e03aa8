//! Report parsing errors.

use std::io;
use std::path::PathBuf;

/// Reasons a report file could not be parsed.
///
/// Every variant carries the offending path so callers can log and skip.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read report '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed XML in '{}': {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("attribute '{attribute}' on root of '{}' is not a non-negative integer: '{value}'", path.display())]
    InvalidAttribute {
        path: PathBuf,
        attribute: &'static str,
        value: String,
    },
}

impl ReportError {
    /// Path of the report that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            ReportError::Io { path, .. }
            | ReportError::Xml { path, .. }
            | ReportError::InvalidAttribute { path, .. } => path,
        }
    }
}

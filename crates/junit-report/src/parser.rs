//! Report parsing under both counting modes.

use crate::detail::CaseDetail;
use crate::error::ReportError;
use crate::mode::CountMode;
use crate::{ERROR_MARKER, FAILURE_MARKER, SYSTEM_ERR, TESTCASE};
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Counts contributed by a single report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportCounts {
    pub tests: u64,
    pub failures: u64,
    pub errors: u64,
}

/// Everything extracted from one successfully parsed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport {
    pub path: PathBuf,
    pub counts: ReportCounts,
    pub failures: Vec<CaseDetail>,
    pub errors: Vec<CaseDetail>,
}

/// Parses report files with a fixed counting mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportParser {
    mode: CountMode,
}

impl ReportParser {
    pub fn new(mode: CountMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CountMode {
        self.mode
    }

    /// Read and parse a report from disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedReport, ReportError> {
        let contents = fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&contents, path)
    }

    /// Parse report contents; `path` is used for error context only.
    pub fn parse_str(&self, contents: &str, path: &Path) -> Result<ParsedReport, ReportError> {
        let doc = Document::parse(contents).map_err(|source| ReportError::Xml {
            path: path.to_path_buf(),
            source,
        })?;
        let root = doc.root_element();

        let counts = match self.mode {
            CountMode::Aggregate => ReportCounts {
                tests: root_count(root, "tests", path)?,
                failures: root_count(root, "failures", path)?,
                errors: root_count(root, "errors", path)?,
            },
            CountMode::Individual => count_cases(root),
        };

        let mut failures = Vec::new();
        let mut errors = Vec::new();
        for case in test_cases(root) {
            let stack_trace = child(case, SYSTEM_ERR).and_then(|n| n.text());
            if let Some(marker) = child(case, FAILURE_MARKER) {
                failures.push(CaseDetail::from_marker(case, marker, stack_trace));
            }
            if let Some(marker) = child(case, ERROR_MARKER) {
                errors.push(CaseDetail::from_marker(case, marker, stack_trace));
            }
        }

        tracing::debug!(
            path = %path.display(),
            mode = %self.mode,
            tests = counts.tests,
            failures = counts.failures,
            errors = counts.errors,
            failure_details = failures.len(),
            error_details = errors.len(),
            "parsed report"
        );

        Ok(ParsedReport {
            path: path.to_path_buf(),
            counts,
            failures,
            errors,
        })
    }
}

/// Integer attribute on the root element; absent means zero.
fn root_count(root: Node<'_, '_>, attribute: &'static str, path: &Path) -> Result<u64, ReportError> {
    match root.attribute(attribute) {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ReportError::InvalidAttribute {
                path: path.to_path_buf(),
                attribute,
                value: raw.to_string(),
            }),
    }
}

// A case carrying both markers counts once as a failure and once as an error.
fn count_cases(root: Node<'_, '_>) -> ReportCounts {
    test_cases(root).fold(ReportCounts::default(), |mut acc, case| {
        acc.tests += 1;
        if child(case, FAILURE_MARKER).is_some() {
            acc.failures += 1;
        }
        if child(case, ERROR_MARKER).is_some() {
            acc.errors += 1;
        }
        acc
    })
}

/// `testcase` elements strictly below `root`
fn test_cases<'a, 'input>(root: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    root.descendants()
        .skip(1)
        .filter(|n| n.is_element() && n.tag_name().name() == TESTCASE)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

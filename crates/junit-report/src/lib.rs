//! JUnit-style XML report parser.
//!
//! Reads one report file and produces per-file counts under a chosen
//! counting mode, together with structured failure and error details for
//! every test case that carries a marker.

mod detail;
mod error;
mod mode;
mod parser;

pub use detail::{CaseDetail, NOT_AVAILABLE};
pub use error::ReportError;
pub use mode::{CountMode, ParseCountModeError};
pub use parser::{ParsedReport, ReportCounts, ReportParser};

/// Element name of a single test case.
pub const TESTCASE: &str = "testcase";

/// Child element signalling an assertion failure.
pub const FAILURE_MARKER: &str = "failure";

/// Child element signalling an unexpected exception.
pub const ERROR_MARKER: &str = "error";

/// Child element holding captured standard error.
pub const SYSTEM_ERR: &str = "system-err";

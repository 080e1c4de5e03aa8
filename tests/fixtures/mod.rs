//! Report fixtures shared by integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Root of the static report fixtures
pub fn reports_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reports")
}

/// Aggregate-mode Surefire report: tests=10 failures=2 errors=1
pub fn surefire_report() -> PathBuf {
    reports_dir().join("surefire/TEST-shop.CartTest.xml")
}

/// pytest report with 4 cases: #2 failure, #3 error
pub fn individual_report() -> PathBuf {
    reports_dir().join("individual/pytest-results.xml")
}

/// Truncated, unparseable report
pub fn broken_report() -> PathBuf {
    reports_dir().join("broken/truncated.xml")
}

/// Copy a fixture into `dir` under `name`
pub fn copy_into(fixture: &Path, dir: &Path, name: &str) -> PathBuf {
    let dest = dir.join(name);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::copy(fixture, &dest).unwrap();
    dest
}

/// Write an inline report into `dir` under `name`
pub fn write_report(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let dest = dir.join(name);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&dest, contents).unwrap();
    dest
}

//! Report file discovery
//!
//! Expands a glob pattern into the list of report files to parse. The
//! literal directory prefix of the pattern becomes the walk root; `**`
//! matches across directories while `*` and `?` stay within one path
//! component. Results are sorted so runs are reproducible.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Characters that start a glob construct
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Errors for report discovery
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid report pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A compiled discovery pattern
#[derive(Debug, Clone)]
pub struct ReportDiscovery {
    pattern: String,
    matcher: GlobMatcher,
    root: PathBuf,
    /// Pattern segments that spell out a leading `.`
    dot_segments: Vec<GlobMatcher>,
}

impl ReportDiscovery {
    /// Compile a discovery pattern.
    ///
    /// Leading `./` components are dropped so `./**/*.xml` and `**/*.xml`
    /// select the same files.
    pub fn new(pattern: &str) -> Result<Self, DiscoveryError> {
        let normalized = strip_current_dir(pattern);
        let glob = GlobBuilder::new(normalized)
            .literal_separator(true)
            .build()
            .map_err(|source| DiscoveryError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
            root: walk_root(normalized),
            dot_segments: dot_segments(normalized),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Directory (or file) the walk starts from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find all matching report files, sorted by path.
    ///
    /// Symlinked files are followed; symlinked directories are not.
    /// Unreadable directories are logged and skipped.
    pub fn discover(&self) -> Vec<PathBuf> {
        let strip_dot = self.root == Path::new(".");
        let mut found = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e) || self.names_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        path = ?e.path(),
                        error = %e,
                        "skipping unreadable path during report discovery"
                    );
                    continue;
                }
            };

            if !is_report_file(&entry) {
                continue;
            }

            let path = entry.path();
            let candidate = if strip_dot {
                path.strip_prefix(".").unwrap_or(path)
            } else {
                path
            };

            if self.matcher.is_match(candidate) {
                found.push(candidate.to_path_buf());
            }
        }

        found.sort();
        tracing::debug!(pattern = %self.pattern, root = %self.root.display(), matches = found.len(), "discovered report files");
        found
    }

    /// Whether a hidden entry is named by a dot segment of the pattern
    fn names_hidden(&self, entry: &DirEntry) -> bool {
        self.dot_segments
            .iter()
            .any(|m| m.is_match(entry.file_name()))
    }
}

/// Convenience wrapper: compile `pattern` and discover matches
pub fn discover_reports(pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    Ok(ReportDiscovery::new(pattern)?.discover())
}

/// Literal leading path components of a pattern
fn walk_root(pattern: &str) -> PathBuf {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal: Vec<&str> = segments
        .iter()
        .take_while(|s| !s.contains(GLOB_META))
        .copied()
        .collect();

    // "/" alone splits into two empty segments
    let joined = literal.join("/");
    if joined.is_empty() {
        if pattern.starts_with('/') {
            PathBuf::from("/")
        } else {
            PathBuf::from(".")
        }
    } else {
        PathBuf::from(joined)
    }
}

fn strip_current_dir(pattern: &str) -> &str {
    let mut rest = pattern;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
    }
    rest
}

/// Matchers for segments like `.reports` or `.junit*`
fn dot_segments(pattern: &str) -> Vec<GlobMatcher> {
    pattern
        .split('/')
        .filter(|s| s.starts_with('.') && *s != "." && *s != "..")
        .filter_map(|s| GlobBuilder::new(s).build().ok())
        .map(|g| g.compile_matcher())
        .collect()
}

/// Regular files, or symlinks that resolve to one
fn is_report_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        if entry.path().is_file() {
            return true;
        }
        tracing::debug!(path = %entry.path().display(), "ignoring symlink that is not a file");
    }
    false
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

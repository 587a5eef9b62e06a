//! Read-only filesystem queries against a rooted project tree.

use regex::{Regex, RegexBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Answers existence and content questions about files under a project root.
///
/// Every query takes a path relative to the root. Paths that are absolute or
/// that climb out of the root with `..` never resolve, so every query on them
/// answers `false`. Read failures are swallowed and reported as "no match".
#[derive(Debug, Clone)]
pub struct Probe {
    root: PathBuf,
}

impl Probe {
    /// Creates a probe rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if !root.is_dir() {
            warn!("Project root {} is not a readable directory", root.display());
        }
        Self { root }
    }

    /// Returns the project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true iff `path` resolves under the root and is a regular file.
    #[must_use]
    pub fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }

    /// Returns true iff `path` resolves under the root and is a directory.
    #[must_use]
    pub fn directory_exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_dir())
    }

    /// Returns true iff `pattern` matches anywhere in the file at `path`.
    ///
    /// The pattern is compiled case-insensitive and multi-line. A missing
    /// file, an unreadable file or an invalid pattern all answer `false`.
    #[must_use]
    pub fn content_matches(&self, path: &str, pattern: &str) -> bool {
        match compile_pattern(pattern) {
            Ok(regex) => self.content_matches_regex(path, &regex),
            Err(e) => {
                warn!("Invalid content pattern {pattern:?}: {e}");
                false
            }
        }
    }

    /// Like [`Probe::content_matches`] with an already compiled pattern.
    #[must_use]
    pub fn content_matches_regex(&self, path: &str, regex: &Regex) -> bool {
        self.read_to_string(path)
            .is_some_and(|content| regex.is_match(&content))
    }

    /// Reads the file at `path` as UTF-8.
    ///
    /// Returns `None` when the path does not resolve, does not exist or
    /// cannot be read.
    #[must_use]
    pub fn read_to_string(&self, path: &str) -> Option<String> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return None;
        }
        match std::fs::read_to_string(&full) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Failed to read {}: {e}", full.display());
                None
            }
        }
    }

    /// Joins `path` onto the root if it stays inside it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let mut depth = 0usize;
        let mut saw_normal = false;

        for component in relative.components() {
            match component {
                Component::Normal(_) => {
                    depth += 1;
                    saw_normal = true;
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if depth == 0 {
                        debug!("Path escapes project root: {path}");
                        return None;
                    }
                    depth -= 1;
                }
                Component::RootDir | Component::Prefix(_) => {
                    debug!("Absolute path rejected: {path}");
                    return None;
                }
            }
        }

        saw_normal.then(|| self.root.join(relative))
    }
}

/// Compiles a content pattern the way every probe query matches it.
///
/// Patterns use `regex` crate syntax, where a bare `{` that does not open
/// a repetition is an error; write `\{` for a literal brace.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid regular expression.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
}

//! Predicate checks: verdicts that file existence alone cannot express.
//!
//! The built-in kinds are plain data dispatched by `match`. Anything else is
//! a [`Predicate::custom`] closure. Predicates are total: every fault they
//! hit while answering becomes a failing [`Verdict`].

use crate::probe::{compile_pattern, Probe};
use crate::requirement::Verdict;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A validated content pattern, compiled once.
///
/// Matching is case-insensitive and multi-line, the same as
/// [`Probe::content_matches`].
#[derive(Debug, Clone)]
pub struct ContentPattern {
    raw: String,
    compiled: Regex,
}

impl ContentPattern {
    /// Compiles a new content pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            raw: pattern.to_string(),
            compiled: compile_pattern(pattern)?,
        })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.compiled
    }
}

type CheckFn = dyn Fn(&Probe) -> Verdict + Send + Sync;

/// A predicate check evaluated against the project tree.
#[derive(Clone)]
pub enum Predicate {
    /// A regex must match somewhere in a file.
    ContentMatch {
        /// File to search.
        path: String,
        /// Pattern to find.
        pattern: ContentPattern,
        /// Explanation on match.
        found: Option<String>,
        /// Explanation when the file exists but does not match.
        missing: Option<String>,
    },
    /// Every term must appear in a file, ignoring case.
    ContainsAll {
        /// File to search.
        path: String,
        /// Terms that must all appear.
        terms: Vec<String>,
    },
    /// A literal must appear in at least one of several candidate files.
    ContainsAnyFile {
        /// Candidate files, tried in order.
        paths: Vec<String>,
        /// Literal to find.
        needle: String,
    },
    /// A directory must exist.
    DirectoryExists {
        /// Directory relative to the project root.
        path: String,
    },
    /// Arbitrary check supplied by the caller.
    Custom {
        /// Label shown in listings.
        label: String,
        /// The check itself.
        check: Arc<CheckFn>,
    },
}

impl Predicate {
    /// Builds a content-match predicate with default explanations.
    #[must_use]
    pub fn content_match(path: impl Into<String>, pattern: ContentPattern) -> Self {
        Self::ContentMatch {
            path: path.into(),
            pattern,
            found: None,
            missing: None,
        }
    }

    /// Builds a contains-all predicate.
    #[must_use]
    pub fn contains_all<I, S>(path: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ContainsAll {
            path: path.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a contains-any-file predicate.
    #[must_use]
    pub fn contains_any_file<I, S>(paths: I, needle: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ContainsAnyFile {
            paths: paths.into_iter().map(Into::into).collect(),
            needle: needle.into(),
        }
    }

    /// Builds a directory-exists predicate.
    #[must_use]
    pub fn directory_exists(path: impl Into<String>) -> Self {
        Self::DirectoryExists { path: path.into() }
    }

    /// Wraps a closure that always produces a verdict.
    #[must_use]
    pub fn custom<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Probe) -> Verdict + Send + Sync + 'static,
    {
        Self::Custom {
            label: label.into(),
            check: Arc::new(check),
        }
    }

    /// Wraps a closure that may fail. An `Err` becomes a failing verdict.
    #[must_use]
    pub fn fallible<F, E>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Probe) -> Result<Verdict, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::custom(label, move |probe| {
            check(probe).unwrap_or_else(|e| Verdict::fail(format!("check failed: {e}")))
        })
    }

    /// Returns the kind label (e.g. `content-match`).
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::ContentMatch { .. } => "content-match",
            Self::ContainsAll { .. } => "contains-all",
            Self::ContainsAnyFile { .. } => "contains-any-file",
            Self::DirectoryExists { .. } => "directory-exists",
            Self::Custom { label, .. } => label.as_str(),
        }
    }

    /// Evaluates the predicate against the project tree.
    #[must_use]
    pub fn evaluate(&self, probe: &Probe) -> Verdict {
        match self {
            Self::ContentMatch {
                path,
                pattern,
                found,
                missing,
            } => {
                let content = match read(probe, path) {
                    Ok(content) => content,
                    Err(verdict) => return verdict,
                };
                if pattern.regex().is_match(&content) {
                    Verdict::pass(
                        found
                            .clone()
                            .unwrap_or_else(|| format!("Pattern found in {path}")),
                    )
                } else {
                    Verdict::fail(
                        missing
                            .clone()
                            .unwrap_or_else(|| format!("Pattern not found in {path}")),
                    )
                }
            }
            Self::ContainsAll { path, terms } => {
                let content = match read(probe, path) {
                    Ok(content) => content.to_lowercase(),
                    Err(verdict) => return verdict,
                };
                let absent: Vec<&str> = terms
                    .iter()
                    .filter(|term| !content.contains(&term.to_lowercase()))
                    .map(String::as_str)
                    .collect();
                if absent.is_empty() {
                    Verdict::pass(format!("All items present in {path}"))
                } else {
                    Verdict::fail(format!("Missing items: {}", absent.join(", ")))
                }
            }
            Self::ContainsAnyFile { paths, needle } => {
                let hit = paths.iter().find(|path| {
                    probe
                        .read_to_string(path)
                        .is_some_and(|content| content.contains(needle.as_str()))
                });
                match hit {
                    Some(path) => Verdict::pass(format!("Found '{needle}' in {path}")),
                    None => Verdict::fail(format!(
                        "'{needle}' not found in any of: {}",
                        paths.join(", ")
                    )),
                }
            }
            Self::DirectoryExists { path } => {
                if probe.directory_exists(path) {
                    Verdict::pass(format!("Directory exists: {path}"))
                } else {
                    Verdict::fail(format!("Directory missing: {path}"))
                }
            }
            Self::Custom { check, .. } => check(probe),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentMatch { path, pattern, .. } => f
                .debug_struct("ContentMatch")
                .field("path", path)
                .field("pattern", &pattern.as_str())
                .finish_non_exhaustive(),
            Self::ContainsAll { path, terms } => f
                .debug_struct("ContainsAll")
                .field("path", path)
                .field("terms", terms)
                .finish(),
            Self::ContainsAnyFile { paths, needle } => f
                .debug_struct("ContainsAnyFile")
                .field("paths", paths)
                .field("needle", needle)
                .finish(),
            Self::DirectoryExists { path } => f
                .debug_struct("DirectoryExists")
                .field("path", path)
                .finish(),
            Self::Custom { label, .. } => f
                .debug_struct("Custom")
                .field("label", label)
                .finish_non_exhaustive(),
        }
    }
}

/// Reads a file for a predicate, turning absence and read faults into verdicts.
fn read(probe: &Probe, path: &str) -> Result<String, Verdict> {
    if !probe.file_exists(path) {
        return Err(Verdict::fail(format!("File not found: {path}")));
    }
    probe
        .read_to_string(path)
        .ok_or_else(|| Verdict::fail(format!("Could not read {path}")))
}

//! # Issues — Shared Validation Reporting Primitives
//!
//! Every FormQA validator reports through the same two types: an [`Issue`]
//! locates one finding (severity, document path, message), and an
//! [`IssueList`] accumulates findings for one validation call.
//!
//! ## Severity Contract
//!
//! - [`Severity::Error`] — a structural violation: missing required
//!   attribute, wrong shape, duplicate key, non-canonical key. Errors drive
//!   the non-zero exit status of a run.
//! - [`Severity::Warning`] — a heuristic or advisory finding: vocabulary
//!   drift, unresolved conditional reference, suspicious type/section,
//!   low coverage. Warnings never block.
//!
//! Validators push issues and keep going; partial failure of one check
//! never suppresses the others.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Structural violation. Fails the run.
    Error,
    /// Heuristic or advisory finding. Never blocks.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A single validation finding with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Finding severity.
    pub severity: Severity,
    /// Location within the validated document, e.g. `general[3].key` or
    /// `_meta.version`. Empty for document-level findings.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    /// Construct an error-severity issue.
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Construct a warning-severity issue.
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: (root): {}", self.severity, self.message)
        } else {
            write!(f, "{}: {}: {}", self.severity, self.path, self.message)
        }
    }
}

/// Accumulated findings of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueList {
    issues: Vec<Issue>,
}

impl IssueList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Append an error-severity issue.
    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Issue::error(path, message));
    }

    /// Append a warning-severity issue.
    pub fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Issue::warning(path, message));
    }

    /// Absorb another list, preserving order.
    pub fn extend(&mut self, other: IssueList) {
        self.issues.extend(other.issues);
    }

    /// All issues, in the order they were found.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Iterate over error-severity issues.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    /// Iterate over warning-severity issues.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// True when at least one error-severity issue is present.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// True when no issues of any severity are present.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Total number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Consume the list and return the inner Vec.
    pub fn into_inner(self) -> Vec<Issue> {
        self.issues
    }
}

impl fmt::Display for IssueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl FromIterator<Issue> for IssueList {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_filters() {
        let mut list = IssueList::new();
        list.error("general[0].key", "missing key");
        list.warning("general[1].type", "unknown type \"slider\"");
        list.warning("aliases.Phone", "alias target does not resolve");

        assert_eq!(list.len(), 3);
        assert_eq!(list.error_count(), 1);
        assert_eq!(list.warning_count(), 2);
        assert!(list.has_errors());
        assert!(!list.is_empty());
    }

    #[test]
    fn test_empty_list() {
        let list = IssueList::new();
        assert!(list.is_empty());
        assert!(!list.has_errors());
        assert_eq!(list.to_string(), "");
    }

    #[test]
    fn test_display_includes_location() {
        let issue = Issue::error("general[2].key", "duplicate key \"dob\"");
        let line = issue.to_string();
        assert!(line.contains("error"));
        assert!(line.contains("general[2].key"));
        assert!(line.contains("duplicate key"));
    }

    #[test]
    fn test_display_root_location() {
        let issue = Issue::error("", "dictionary root must be a map");
        assert!(issue.to_string().contains("(root)"));
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut a = IssueList::new();
        a.error("x", "first");
        let mut b = IssueList::new();
        b.warning("y", "second");
        a.extend(b);
        assert_eq!(a.issues()[0].message, "first");
        assert_eq!(a.issues()[1].message, "second");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut list = IssueList::new();
        list.error("fields[0]", "field record is missing its key");
        let json = serde_json::to_string(&list).unwrap();
        let parsed: IssueList = serde_json::from_str(&json).unwrap();
        assert_eq!(list, parsed);
    }
}

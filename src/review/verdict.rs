//! Typed model of the reviewer's verdict.

use serde::{Deserialize, Serialize};

/// Severity of a review issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The spec cannot be implemented as written.
    Critical,
    /// Needs resolution before work starts, but the spec is salvageable.
    Major,
    /// Worth fixing; does not block work on its own.
    Minor,
}

/// A single problem the reviewer found in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewIssue {
    /// How badly the issue undermines the spec.
    pub severity: Severity,
    /// What is wrong.
    pub description: String,
    /// How the reviewer suggests resolving it.
    pub fix_hint: String,
}

/// The reviewer's overall judgment of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewVerdict {
    /// Problems found, possibly empty.
    pub issues: Vec<ReviewIssue>,
    /// Whether the document is internally consistent and implementable.
    pub coherent: bool,
}

impl ReviewVerdict {
    /// Returns true when the verdict is coherent with no issues at all.
    pub fn is_clean(&self) -> bool {
        self.coherent && self.issues.is_empty()
    }

    /// Counts issues of the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

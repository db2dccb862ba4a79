//! Issue reports

use classical_core::{Issue, Level};
use serde::Serialize;
use std::fmt;

/// Issues of one validation run, with level-grouped rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    /// Wrap a list of issues
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Every issue in emission order
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Add issues from another stage
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Issues at `level`, in emission order
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.level == level)
    }

    /// Number of issues at `level`
    pub fn count(&self, level: Level) -> usize {
        self.at_level(level).count()
    }

    /// Error-level issues
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.at_level(Level::Error)
    }

    /// Whether any error-level issue exists
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Whether there are no issues at all
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// One-line count summary
    pub fn summary(&self) -> String {
        format!(
            "{} error(s), {} warning(s), {} info",
            self.count(Level::Error),
            self.count(Level::Warning),
            self.count(Level::Info)
        )
    }

    /// Render issues grouped by level, errors first, then the summary
    pub fn render(&self) -> String {
        let mut out = String::new();
        for level in [Level::Error, Level::Warning, Level::Info] {
            for issue in self.at_level(level) {
                out.push_str(&issue.to_string());
                out.push('\n');
            }
        }
        out.push_str(&self.summary());
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Vec<Issue>> for Report {
    fn from(issues: Vec<Issue>) -> Self {
        Self::new(issues)
    }
}

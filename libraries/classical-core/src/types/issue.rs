//! Validation issues

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an issue, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Blocks tagging and upload
    Error,
    /// Should be fixed, does not block
    Warning,
    /// Informational
    Info,
}

impl Level {
    /// Uppercase label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an issue is about.
///
/// Serialized as an integer: `0` album, `-1` directory, `n > 0` track ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Scope {
    /// The release as a whole
    Album,
    /// The release directory layout
    Directory,
    /// One track, by 1-based ordinal in the file list
    Track(u32),
}

impl From<i64> for Scope {
    fn from(value: i64) -> Self {
        match value {
            0 => Scope::Album,
            v if v < 0 => Scope::Directory,
            v => Scope::Track(u32::try_from(v).unwrap_or(u32::MAX)),
        }
    }
}

impl From<Scope> for i64 {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Album => 0,
            Scope::Directory => -1,
            Scope::Track(n) => i64::from(n),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Album => f.write_str("album"),
            Scope::Directory => f.write_str("directory"),
            Scope::Track(n) => write!(f, "track {n}"),
        }
    }
}

/// A leveled finding produced by a rule or by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Severity
    pub level: Level,
    /// Album, directory or track
    pub scope: Scope,
    /// Opaque rule identifier
    pub rule: String,
    /// Human-readable explanation
    pub message: String,
}

impl Issue {
    /// Create an issue
    pub fn new(
        level: Level,
        scope: Scope,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            scope,
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Create an error-level issue
    pub fn error(scope: Scope, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::Error, scope, rule, message)
    }

    /// Create a warning-level issue
    pub fn warning(scope: Scope, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::Warning, scope, rule, message)
    }

    /// Create an info-level issue
    pub fn info(scope: Scope, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::Info, scope, rule, message)
    }

    /// Whether this issue blocks the pipeline
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.level, self.rule, self.scope, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_wire_format() {
        assert_eq!(serde_json::to_string(&Scope::Album).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Scope::Directory).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Scope::Track(7)).unwrap(), "7");
        assert_eq!(serde_json::from_str::<Scope>("-1").unwrap(), Scope::Directory);
        assert_eq!(serde_json::from_str::<Scope>("3").unwrap(), Scope::Track(3));
    }

    #[test]
    fn display_line() {
        let issue = Issue::error(Scope::Track(3), "2.3.8", "composer in title");
        assert_eq!(issue.to_string(), "[ERROR] 2.3.8 track 3: composer in title");
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Info);
    }
}

//! Core result types shared by rules, the driver and the writers.

use crate::common::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{text}")
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity '{other}' (expected 'warning' or 'error')"
            )),
        }
    }
}

/// A single finding, anchored at an absolute character offset in its file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub reference_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub character_offset: usize,
    pub location: Location,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .file
            .as_deref()
            .map(Path::display)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "<input>".to_string());
        write!(
            f,
            "{}:{}: {}: {} ({})",
            file, self.location, self.severity, self.message, self.rule_id
        )
    }
}

/// Violations found in one file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

/// Result of linting a set of files.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Report {
    pub files: Vec<FileReport>,
    pub files_checked: usize,
    pub failed_files: Vec<PathBuf>,
}

impl Report {
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.files.iter().flat_map(|f| f.violations.iter())
    }

    pub fn violation_count(&self) -> usize {
        self.violations().count()
    }

    pub fn count_at(&self, severity: Severity) -> usize {
        self.violations().filter(|v| v.severity == severity).count()
    }

    /// Whether the run should fail: any error, or any finding at all when
    /// `strict` is set.
    pub fn is_failure(&self, strict: bool) -> bool {
        if strict {
            self.violation_count() > 0
        } else {
            self.count_at(Severity::Error) > 0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: Severity) -> Violation {
        Violation {
            rule_id: "unused_capture_list".into(),
            reference_name: "self".into(),
            file: Some(PathBuf::from("Sources/App.swift")),
            character_offset: 8,
            location: Location { line: 3, column: 9 },
            severity,
            message: "Unused reference self in a capture list should be removed.".into(),
        }
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            violation(Severity::Warning).to_string(),
            "Sources/App.swift:3:9: warning: Unused reference self in a capture list should be removed. (unused_capture_list)"
        );
    }

    #[test]
    fn test_report_failure_policy() {
        let report = Report {
            files: vec![FileReport {
                path: PathBuf::from("a.swift"),
                violations: vec![violation(Severity::Warning)],
            }],
            files_checked: 1,
            failed_files: vec![],
        };
        assert!(!report.is_failure(false));
        assert!(report.is_failure(true));
        assert_eq!(report.count_at(Severity::Warning), 1);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }
}

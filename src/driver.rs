//! Runs rules over files and collects their findings.

use crate::common::SourceFile;
use crate::core::{FileReport, Report, Violation};
use crate::errors::Result;
use crate::rules::{LintFile, Rule};
use crate::suppression::{parse_suppression_comments, SuppressionStats};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Lint one file. Violations come back ordered by character offset; findings
/// at the same offset keep rule and closure order.
pub fn lint_source(source: SourceFile, rules: &[Box<dyn Rule>]) -> Vec<Violation> {
    let file = LintFile::new(source);
    let suppressions = parse_suppression_comments(&file.source, &file.syntax);
    let stats = suppressions.get_stats();
    if stats.total_suppressions > 0 {
        log::debug!(
            "{}: {} suppression(s)",
            display_path(file.source.path()),
            stats.total_suppressions
        );
    }
    for warning in unclosed_block_warnings(&stats) {
        log::warn!("{warning}");
    }

    let lint_file = &file;
    let mut violations: Vec<Violation> = file
        .structure
        .nodes()
        .flat_map(|node| {
            rules
                .iter()
                .flat_map(move |rule| rule.validate(lint_file, node))
        })
        .filter(|v| !suppressions.is_suppressed(v.location.line, &v.rule_id))
        .collect();
    violations.sort_by_key(|v| v.character_offset);
    violations
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<input>".to_string())
}

fn unclosed_block_warnings(stats: &SuppressionStats) -> Vec<String> {
    stats
        .unclosed_blocks
        .iter()
        .map(|block| {
            format!(
                "{}:{}: caplint:ignore-start without matching caplint:ignore-end",
                display_path(block.file.as_deref()),
                block.start_line
            )
        })
        .collect()
}

fn lint_path(path: &Path, rules: &[Box<dyn Rule>]) -> Result<FileReport> {
    let source = SourceFile::read(path)?;
    let violations = lint_source(source, rules);
    log::debug!("{}: {} violation(s)", path.display(), violations.len());
    Ok(FileReport {
        path: path.to_path_buf(),
        violations,
    })
}

/// Lint a set of files. Files that cannot be read are logged and listed in
/// [`Report::failed_files`]; the others are still checked.
pub fn lint_paths(files: &[PathBuf], rules: &[Box<dyn Rule>], parallel: bool) -> Result<Report> {
    log::info!(
        "linting {} file(s) with {} rule(s){}",
        files.len(),
        rules.len(),
        if parallel { " in parallel" } else { "" }
    );

    let results: Vec<(PathBuf, Result<FileReport>)> = if parallel {
        files
            .par_iter()
            .map(|path| (path.clone(), lint_path(path, rules)))
            .collect()
    } else {
        files
            .iter()
            .map(|path| (path.clone(), lint_path(path, rules)))
            .collect()
    };

    let mut report = Report::default();
    for (path, result) in results {
        match result {
            Ok(file_report) => {
                report.files_checked += 1;
                if !file_report.violations.is_empty() {
                    report.files.push(file_report);
                }
            }
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                report.failed_files.push(path);
            }
        }
    }
    report.files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CaplintConfig, RuleConfig};
    use crate::core::Severity;
    use crate::rules::{enabled_rules, UnusedCaptureListRule};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn default_rules() -> Vec<Box<dyn Rule>> {
        enabled_rules(&CaplintConfig::default())
    }

    fn names(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.reference_name.as_str()).collect()
    }

    #[test]
    fn test_lint_source_orders_by_offset() {
        let source = SourceFile::new(indoc! {"
            let a = { [x] in print(1) }
            let b = { [y, z] in print(y) }
        "});
        let violations = lint_source(source, &default_rules());
        assert_eq!(names(&violations), vec!["x", "z"]);
        assert!(violations[0].character_offset < violations[1].character_offset);
    }

    #[test]
    fn test_lint_source_honors_suppressions() {
        let source = SourceFile::new(indoc! {"
            // caplint:ignore-next-line [unused_capture_list]
            let a = { [x] in print(1) }
            let b = { [y] in print(1) } // caplint:ignore
            let c = { [z] in print(1) }
        "});
        let violations = lint_source(source, &default_rules());
        assert_eq!(names(&violations), vec!["z"]);
        assert_eq!(violations[0].location.line, 4);
    }

    #[test]
    fn test_unclosed_block_warnings_come_from_stats() {
        let source = SourceFile::new("a()\n// caplint:ignore-start\nf { [x] in print(1) }\n")
            .with_path("Sources/A.swift");
        let syntax = crate::syntax::SyntaxMap::from_source(&source);
        let stats = parse_suppression_comments(&source, &syntax).get_stats();
        assert_eq!(stats.total_suppressions, 1);
        assert_eq!(
            unclosed_block_warnings(&stats),
            vec!["Sources/A.swift:2: caplint:ignore-start without matching caplint:ignore-end"]
        );
        assert!(lint_source(source, &default_rules()).is_empty());
    }

    #[test]
    fn test_lint_source_without_rules() {
        let source = SourceFile::new("let a = { [x] in print(1) }");
        assert!(lint_source(source, &[]).is_empty());
    }

    #[test]
    fn test_lint_paths_collects_reports() {
        let dir = TempDir::new().unwrap();
        let dirty = dir.path().join("Dirty.swift");
        let clean = dir.path().join("Clean.swift");
        fs::write(&dirty, "run { [weak self] in print(1) }\n").unwrap();
        fs::write(&clean, "run { [weak self] in self?.go() }\n").unwrap();

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(UnusedCaptureListRule::new(
            RuleConfig::default().with_severity(Severity::Error),
        ))];
        for parallel in [true, false] {
            let report = lint_paths(&[dirty.clone(), clean.clone()], &rules, parallel).unwrap();
            assert_eq!(report.files_checked, 2);
            assert_eq!(report.files.len(), 1);
            assert_eq!(report.files[0].path, dirty);
            assert_eq!(report.files[0].violations[0].file.as_deref(), Some(dirty.as_path()));
            assert_eq!(report.count_at(Severity::Error), 1);
        }
    }

    #[test]
    fn test_lint_paths_continues_after_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Missing.swift");
        let present = dir.path().join("Present.swift");
        fs::write(&present, "run { [a] in print(1) }\n").unwrap();

        let report = lint_paths(&[missing.clone(), present], &default_rules(), false).unwrap();
        assert_eq!(report.files_checked, 1);
        assert_eq!(report.failed_files, vec![missing]);
        assert_eq!(report.violation_count(), 1);
    }
}

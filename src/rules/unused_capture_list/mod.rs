//! Unused capture list entries.
//!
//! Flags names bound in a closure's capture list that the closure body never
//! spells out:
//!
//! ```swift
//! items.forEach { [weak self] item in print(item) }   // `self` is unused
//! ```
//!
//! The check runs in four steps, each in its own module:
//! 1. [`boundary`] narrows the closure to the text before its first nested
//!    expression;
//! 2. [`capture_list`] matches `{ [ ... ]` at the start of that window and
//!    splits the list into entries;
//! 3. [`usage`] collects the names spelled in the rest of the closure;
//! 4. every entry whose name is missing becomes a [`Violation`].
//!
//! Inconsistent ranges never abort a run: the closure is skipped.

pub mod boundary;
pub mod capture_list;
pub mod usage;

use super::{LintFile, Rule, RuleDescription, RuleKind};
use crate::config::RuleConfig;
use crate::core::Violation;
use crate::syntax::StructureNode;
use boundary::ClosureNode;
use capture_list::CaptureEntry;

pub use capture_list::{extract_capture_list, parse_capture_entries};

static DESCRIPTION: RuleDescription = RuleDescription {
    identifier: "unused_capture_list",
    name: "Unused Capture List",
    description: "Unused reference in a capture list should be removed.",
    kind: RuleKind::Lint,
};

#[derive(Debug, Clone, Default)]
pub struct UnusedCaptureListRule {
    config: RuleConfig,
}

impl UnusedCaptureListRule {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Violations for one closure, in capture list order.
    pub fn check(&self, file: &LintFile, closure: &ClosureNode) -> Vec<Violation> {
        self.find_violations(file, closure).unwrap_or_else(|| {
            log::trace!(
                "skipping closure at byte {}: inconsistent source ranges",
                closure.byte_offset
            );
            Vec::new()
        })
    }

    fn find_violations(&self, file: &LintFile, closure: &ClosureNode) -> Option<Vec<Violation>> {
        let source = &file.source;
        let closure_range = source.byte_range_to_char_range(closure.byte_range())?;
        let window = boundary::capture_list_search_range(source, closure)?;

        let Some(capture_list) = capture_list::extract_capture_list(source, window) else {
            return Some(Vec::new());
        };
        let entries = capture_list::parse_capture_entries(capture_list.text);
        if entries.is_empty() {
            return Some(Vec::new());
        }

        let body = usage::body_range(closure_range, capture_list.range)?;
        let usages = usage::identifier_usages(file, body)?;

        Some(
            usage::unused_entries(&entries, &usages)
                .map(|entry| self.violation(file, capture_list.range.location, entry))
                .collect(),
        )
    }

    fn violation(&self, file: &LintFile, list_start: usize, entry: &CaptureEntry) -> Violation {
        let character_offset = list_start + entry.name_offset_within_list();
        Violation {
            rule_id: DESCRIPTION.identifier.to_string(),
            reference_name: entry.reference_name.clone(),
            file: file.source.path().map(|p| p.to_path_buf()),
            character_offset,
            location: file.source.location(character_offset).unwrap_or_default(),
            severity: self.config.severity,
            message: format!(
                "Unused reference {} in a capture list should be removed.",
                entry.reference_name
            ),
        }
    }
}

impl Rule for UnusedCaptureListRule {
    fn description(&self) -> &'static RuleDescription {
        &DESCRIPTION
    }

    fn validate(&self, file: &LintFile, node: &StructureNode) -> Vec<Violation> {
        match ClosureNode::from_structure(node) {
            Some(closure) => self.check(file, &closure),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SourceFile;
    use crate::core::Severity;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> Vec<Violation> {
        let file = LintFile::new(SourceFile::new(source));
        let rule = UnusedCaptureListRule::default();
        file.structure
            .nodes()
            .flat_map(|node| rule.validate(&file, node))
            .collect()
    }

    fn names(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.reference_name.as_str()).collect()
    }

    fn text_at(source: &str, violation: &Violation) -> String {
        source
            .chars()
            .skip(violation.character_offset)
            .take(violation.reference_name.chars().count())
            .collect()
    }

    #[test]
    fn test_used_self_is_not_flagged() {
        assert!(check("{ [weak self] num in self?.handle(num) }").is_empty());
    }

    #[test]
    fn test_unused_self_is_flagged_at_the_name() {
        let source = "{ [weak self] num in print(num) }";
        let violations = check(source);
        assert_eq!(names(&violations), vec!["self"]);
        assert_eq!(violations[0].character_offset, 8);
        assert_eq!(text_at(source, &violations[0]), "self");
        assert_eq!(
            violations[0].message,
            "Unused reference self in a capture list should be removed."
        );
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].rule_id, "unused_capture_list");
    }

    #[test]
    fn test_alias_name_is_checked_not_its_target() {
        let source = "{ [weak self, unowned delegate = self.delegate!] foo in self?.handle(foo) }";
        let violations = check(source);
        assert_eq!(names(&violations), vec!["delegate"]);
        assert_eq!(text_at(source, &violations[0]), "delegate");
    }

    #[test]
    fn test_immediately_invoked_closure() {
        let violations = check("{ [foo] in _ }()");
        assert_eq!(names(&violations), vec!["foo"]);
        assert_eq!(violations[0].character_offset, 3);
    }

    #[test]
    fn test_empty_capture_list() {
        assert!(check("{ [] in doSomething() }").is_empty());
    }

    #[test]
    fn test_nested_brackets_in_alias_yield_nothing() {
        assert!(check("{ [a = [1]] in a }").is_empty());
        assert!(check("{ [x = [a, b]] in x }").is_empty());
        assert!(check("{ [x = [1, 2]] in print(1) }").is_empty());
    }

    #[test]
    fn test_backticked_name_is_a_different_spelling() {
        let violations = check("{ [weak self] in print(`self`) }");
        assert_eq!(names(&violations), vec!["self"]);
    }

    #[test]
    fn test_array_literal_at_closure_start() {
        assert!(check("sizes.max().flatMap { [(offset: offset, size: $0)] } ?? []").is_empty());
    }

    #[test]
    fn test_violations_follow_capture_list_order() {
        let source = "{ [c, weak self, a, b] in print(b) }";
        let violations = check(source);
        assert_eq!(names(&violations), vec!["c", "self", "a"]);
        for violation in &violations {
            assert_eq!(text_at(source, violation), violation.reference_name);
        }
    }

    #[test]
    fn test_offsets_after_multibyte_text() {
        let source = "let ünïcödé = \"🙂\"\nlet f = { [weak self, ü] in print(x) }";
        let violations = check(source);
        assert_eq!(names(&violations), vec!["self", "ü"]);
        assert_eq!(text_at(source, &violations[0]), "self");
        assert_eq!(text_at(source, &violations[1]), "ü");
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 17);
    }

    #[test]
    fn test_shadowing_counts_as_use() {
        // lexical approximation: the inner `let value` hides the unused capture
        assert!(check("{ [value] in let value = 1; print(value) }").is_empty());
    }

    #[test]
    fn test_nested_closure_capture_lists_are_checked_separately() {
        let source = "outer { [a] in inner { [weak self] in print(a) } }";
        let violations = check(source);
        assert_eq!(names(&violations), vec!["self"]);
        assert_eq!(text_at(source, &violations[0]), "self");
    }

    #[test]
    fn test_nested_capture_list_does_not_leak_into_outer_closure() {
        let source = "run { inner { [weak self] in print(1) } }";
        let file = LintFile::new(SourceFile::new(source));
        let rule = UnusedCaptureListRule::default();
        let outer = file.structure.closures().next().unwrap();
        assert!(rule.validate(&file, outer).is_empty());
        let inner = file.structure.closures().nth(1).unwrap();
        assert_eq!(names(&rule.validate(&file, inner)), vec!["self"]);
    }

    #[test]
    fn test_use_inside_string_interpolation() {
        assert!(check(r#"{ [weak self] in print("\(self?.name ?? "")") }"#).is_empty());
    }

    #[test]
    fn test_use_only_in_comment_or_string_is_unused() {
        let violations = check("{ [weak self] in\n // self\n print(\"self\") }");
        assert_eq!(names(&violations), vec!["self"]);
    }

    #[test]
    fn test_configured_severity_is_applied() {
        let file = LintFile::new(SourceFile::new("{ [a] in }"));
        let rule = UnusedCaptureListRule::new(RuleConfig::default().with_severity(Severity::Error));
        let closure = file.structure.closures().next().unwrap();
        let violations = rule.validate(&file, closure);
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn test_non_closure_nodes_are_ignored() {
        let file = LintFile::new(SourceFile::new("let x = [a]"));
        let rule = UnusedCaptureListRule::default();
        let node = file.structure.nodes().next().unwrap();
        assert!(rule.validate(&file, node).is_empty());
    }

    #[test]
    fn test_inconsistent_closure_fails_open() {
        let file = LintFile::new(SourceFile::new("{ [a] in }"));
        let rule = UnusedCaptureListRule::default();
        let closure = ClosureNode {
            byte_offset: 0,
            byte_length: 100,
            first_child_byte_offset: None,
        };
        assert!(rule.check(&file, &closure).is_empty());
    }

    #[test]
    fn test_check_is_idempotent() {
        let source = "{ [weak self, b] in print(1) }";
        assert_eq!(check(source), check(source));
    }
}

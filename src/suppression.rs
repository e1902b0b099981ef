//! Inline suppression comments.
//!
//! ```swift
//! // caplint:ignore-next-line [unused_capture_list] -- kept for symmetry
//! handler = { [weak self, unowned owner] in self?.run() }
//!
//! // caplint:ignore-start
//! ...
//! // caplint:ignore-end
//! ```

use crate::common::SourceFile;
use crate::syntax::{SyntaxMap, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct SuppressionContext {
    pub active_blocks: Vec<SuppressionBlock>,
    pub line_suppressions: HashMap<usize, SuppressionRule>,
    pub unclosed_blocks: Vec<UnclosedBlock>,
}

#[derive(Debug, Clone)]
pub struct SuppressionBlock {
    pub start_line: usize,
    /// `None` for a block that is never closed; it then runs to end of file.
    pub end_line: Option<usize>,
    pub rule_ids: Vec<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SuppressionRule {
    pub rule_ids: Vec<String>,
    pub reason: Option<String>,
    pub applies_to_next_line: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclosedBlock {
    pub file: Option<PathBuf>,
    pub start_line: usize,
}

#[derive(Debug, Clone)]
pub struct SuppressionStats {
    pub total_suppressions: usize,
    pub unclosed_blocks: Vec<UnclosedBlock>,
}

impl SuppressionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self, line: usize, rule_id: &str) -> bool {
        [
            self.is_in_suppression_block(line, rule_id),
            self.has_line_suppression(line, rule_id),
            self.has_next_line_suppression(line, rule_id),
        ]
        .into_iter()
        .any(|suppressed| suppressed)
    }

    fn is_in_suppression_block(&self, line: usize, rule_id: &str) -> bool {
        self.active_blocks
            .iter()
            .filter(|block| line_within_block(line, block))
            .any(|block| rule_matches(rule_id, &block.rule_ids))
    }

    fn has_line_suppression(&self, line: usize, rule_id: &str) -> bool {
        self.line_suppressions.get(&line).is_some_and(|rule| {
            !rule.applies_to_next_line && rule_matches(rule_id, &rule.rule_ids)
        })
    }

    fn has_next_line_suppression(&self, line: usize, rule_id: &str) -> bool {
        (line > 0)
            .then(|| self.line_suppressions.get(&(line - 1)))
            .flatten()
            .is_some_and(|rule| rule.applies_to_next_line && rule_matches(rule_id, &rule.rule_ids))
    }

    pub fn get_stats(&self) -> SuppressionStats {
        SuppressionStats {
            total_suppressions: self.active_blocks.len() + self.line_suppressions.len(),
            unclosed_blocks: self.unclosed_blocks.clone(),
        }
    }
}

fn line_within_block(line: usize, block: &SuppressionBlock) -> bool {
    line >= block.start_line && block.end_line.map_or(true, |end| line <= end)
}

fn rule_matches(rule_id: &str, allowed: &[String]) -> bool {
    // Empty list means wildcard
    allowed.is_empty() || allowed.iter().any(|id| id == "*" || id == rule_id)
}

struct SuppressionPatterns {
    block_start: Regex,
    block_end: Regex,
    line: Regex,
    next_line: Regex,
}

static PATTERNS: Lazy<SuppressionPatterns> = Lazy::new(|| {
    let tail = r"(?:\s*\[([\w,*\s]+)\])?(?:\s*--\s*(.*?))?\s*$";
    let build = |pattern: String| Regex::new(&pattern).expect("suppression pattern is valid");
    SuppressionPatterns {
        block_start: build(format!(r"^//+\s*caplint:ignore-start{tail}")),
        block_end: build(r"^//+\s*caplint:ignore-end\s*$".to_string()),
        line: build(format!(r"^//+\s*caplint:ignore{tail}")),
        next_line: build(format!(r"^//+\s*caplint:ignore-next-line{tail}")),
    }
});

enum CommentDirective {
    BlockStart(Vec<String>, Option<String>),
    BlockEnd,
    NextLine(Vec<String>, Option<String>),
    Line(Vec<String>, Option<String>),
}

fn parse_comment(comment: &str, patterns: &SuppressionPatterns) -> Option<CommentDirective> {
    let comment = comment.trim_end();
    let with_rules = |regex: &Regex| {
        regex.captures(comment).map(|captures| {
            (
                parse_rule_ids(captures.get(1).map(|m| m.as_str())),
                captures
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|r| !r.is_empty()),
            )
        })
    };

    if let Some((ids, reason)) = with_rules(&patterns.block_start) {
        return Some(CommentDirective::BlockStart(ids, reason));
    }
    if patterns.block_end.is_match(comment) {
        return Some(CommentDirective::BlockEnd);
    }
    if let Some((ids, reason)) = with_rules(&patterns.next_line) {
        return Some(CommentDirective::NextLine(ids, reason));
    }
    with_rules(&patterns.line).map(|(ids, reason)| CommentDirective::Line(ids, reason))
}

fn parse_rule_ids(ids: Option<&str>) -> Vec<String> {
    ids.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Collect suppression directives from the `//` comments of a file.
pub fn parse_suppression_comments(source: &SourceFile, syntax: &SyntaxMap) -> SuppressionContext {
    let mut context = SuppressionContext::new();
    let mut open_blocks: Vec<SuppressionBlock> = Vec::new();

    let comments = syntax
        .tokens()
        .iter()
        .filter(|token| token.kind == TokenKind::Comment);
    for token in comments {
        let Some(text) = source.substring_bytes(token.range) else {
            continue;
        };
        let line = source.line_of_byte(token.range.location);
        match parse_comment(text, &PATTERNS) {
            Some(CommentDirective::BlockStart(rule_ids, reason)) => {
                open_blocks.push(SuppressionBlock {
                    start_line: line,
                    end_line: None,
                    rule_ids,
                    reason,
                });
            }
            Some(CommentDirective::BlockEnd) => {
                if let Some(mut block) = open_blocks.pop() {
                    block.end_line = Some(line);
                    context.active_blocks.push(block);
                }
            }
            Some(CommentDirective::NextLine(rule_ids, reason)) => {
                context.line_suppressions.insert(
                    line,
                    SuppressionRule {
                        rule_ids,
                        reason,
                        applies_to_next_line: true,
                    },
                );
            }
            Some(CommentDirective::Line(rule_ids, reason)) => {
                context.line_suppressions.insert(
                    line,
                    SuppressionRule {
                        rule_ids,
                        reason,
                        applies_to_next_line: false,
                    },
                );
            }
            None => {}
        }
    }

    for block in open_blocks {
        context.unclosed_blocks.push(UnclosedBlock {
            file: source.path().map(|p| p.to_path_buf()),
            start_line: block.start_line,
        });
        context.active_blocks.push(block);
    }

    context
}

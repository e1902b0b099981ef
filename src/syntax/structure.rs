//! Expression structure built from the token stream
//!
//! The tree only records the expression kinds the rules care about. Statement
//! and declaration bodies are transparent: nodes found inside an `if` body or
//! a function body are attached to whatever node encloses the statement.

use super::keywords::{BODY_KEYWORDS, CALLEE_KEYWORDS, EXPRESSION_KEYWORDS, IMMEDIATE_BODY_WORDS};
use super::token::{SyntaxMap, SyntaxToken, TokenKind};
use crate::common::{ByteRange, SourceFile};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprKind {
    Closure,
    Call,
    Array,
    Dictionary,
    Tuple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureNode {
    pub kind: ExprKind,
    pub byte_offset: usize,
    pub byte_length: usize,
    pub substructure: Vec<StructureNode>,
}

impl StructureNode {
    pub fn byte_range(&self) -> ByteRange {
        ByteRange::new(self.byte_offset, self.byte_length)
    }

    pub fn first_child_byte_offset(&self) -> Option<usize> {
        self.substructure.first().map(|child| child.byte_offset)
    }
}

/// Top-level expression nodes of one file.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub substructure: Vec<StructureNode>,
}

impl Structure {
    pub fn build(file: &SourceFile, syntax: &SyntaxMap) -> Self {
        let tokens = syntax
            .tokens()
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .copied()
            .collect();
        let mut builder = Builder {
            file,
            source: file.contents(),
            tokens,
            pos: 0,
        };
        let sequence = builder.parse_sequence(None);
        Self {
            substructure: sequence.nodes,
        }
    }

    /// Every node in source order, parents before their children.
    pub fn nodes(&self) -> impl Iterator<Item = &StructureNode> {
        let mut stack: Vec<&StructureNode> = self.substructure.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.substructure.iter().rev());
            Some(node)
        })
    }

    pub fn closures(&self) -> impl Iterator<Item = &StructureNode> {
        self.nodes().filter(|node| node.kind == ExprKind::Closure)
    }
}

struct Sequence {
    nodes: Vec<StructureNode>,
    /// End byte of the closing token, when the expected closer was found.
    closed_at: Option<usize>,
}

/// What the next `{` in a sequence would belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    /// `if`, `func`, `struct`, ... waiting for their body.
    Body,
    /// A `var` declaration that may still turn out to be computed.
    Binding { line: usize },
}

enum Callee {
    /// Callee chain starts at this token index.
    Start(usize),
    /// The chain continues into the group closed by this token index.
    AfterGroup { closer: usize, start: Option<usize> },
}

struct Builder<'a> {
    file: &'a SourceFile,
    source: &'a str,
    tokens: Vec<SyntaxToken>,
    pos: usize,
}

impl<'a> Builder<'a> {
    fn peek(&self) -> Option<SyntaxToken> {
        self.tokens.get(self.pos).copied()
    }

    fn token_at(&self, index: usize) -> Option<&SyntaxToken> {
        self.tokens.get(index)
    }

    fn text(&self, token: &SyntaxToken) -> &'a str {
        token.text(self.source)
    }

    fn last_consumed_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.token_at(i))
            .map_or(0, |t| t.range.end())
    }

    fn parse_sequence(&mut self, closer: Option<&str>) -> Sequence {
        let mut nodes = Vec::new();
        let mut pending = Pending::None;

        while let Some(token) = self.peek() {
            let text = self.text(&token);
            if token.kind == TokenKind::Punctuation {
                match text {
                    ")" | "]" | "}" => {
                        if Some(text) == closer {
                            self.pos += 1;
                            return Sequence {
                                nodes,
                                closed_at: Some(token.range.end()),
                            };
                        }
                        if closer.is_none() {
                            // stray closer at file level
                            self.pos += 1;
                            continue;
                        }
                        return Sequence {
                            nodes,
                            closed_at: None,
                        };
                    }
                    "{" => {
                        if self.opens_body(pending, &token) {
                            pending = Pending::None;
                            self.pos += 1;
                            nodes.extend(self.parse_sequence(Some("}")).nodes);
                        } else {
                            let closure = self.parse_closure();
                            nodes.push(closure);
                        }
                        continue;
                    }
                    "(" => {
                        let node = self.parse_parenthesized(&mut nodes);
                        nodes.push(node);
                        continue;
                    }
                    "[" => {
                        if self.follows_callee() {
                            self.pos += 1;
                            nodes.extend(self.parse_sequence(Some("]")).nodes);
                        } else {
                            let node = self.parse_collection();
                            nodes.push(node);
                        }
                        continue;
                    }
                    ";" => pending = Pending::None,
                    _ => {}
                }
            }

            pending = self.update_pending(pending, &token);
            self.pos += 1;
        }

        Sequence {
            nodes,
            closed_at: None,
        }
    }

    fn update_pending(&self, pending: Pending, token: &SyntaxToken) -> Pending {
        let text = self.text(token);
        if token.kind == TokenKind::Keyword && !self.is_member_position() {
            if BODY_KEYWORDS.contains(&text) {
                return Pending::Body;
            }
            if text == "var" && pending == Pending::None {
                return Pending::Binding {
                    line: self.file.line_of_byte(token.range.location),
                };
            }
        }
        match pending {
            Pending::Binding { .. } if token.is_symbol(self.source, "=") => Pending::None,
            other => other,
        }
    }

    /// True when the current token is written as `.name` or `name.`.
    fn is_member_position(&self) -> bool {
        let before = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.token_at(i))
            .is_some_and(|t| t.is_symbol(self.source, "."));
        let after = self
            .token_at(self.pos + 1)
            .is_some_and(|t| t.is_symbol(self.source, "."));
        before || after
    }

    fn opens_body(&self, pending: Pending, brace: &SyntaxToken) -> bool {
        let Some(previous) = self.pos.checked_sub(1).and_then(|i| self.token_at(i)) else {
            return false;
        };
        let text = self.text(previous);

        if matches!(previous.kind, TokenKind::Keyword | TokenKind::Identifier)
            && IMMEDIATE_BODY_WORDS.contains(&text)
        {
            return true;
        }

        let forces_closure = match previous.kind {
            TokenKind::Punctuation => matches!(text, "(" | "[" | "," | ":" | "{" | ";"),
            TokenKind::Operator => !matches!(text, "?" | "!" | ">"),
            TokenKind::Keyword => EXPRESSION_KEYWORDS.contains(&text),
            _ => false,
        };
        if forces_closure {
            return false;
        }

        match pending {
            Pending::None => false,
            Pending::Body => true,
            Pending::Binding { line } => self.file.line_of_byte(brace.range.location) == line,
        }
    }

    fn parse_closure(&mut self) -> StructureNode {
        let open = self.tokens[self.pos];
        self.pos += 1;
        if let Some(close) = self.capture_list_close() {
            self.pos = close + 1;
        }

        let body = self.parse_sequence(Some("}"));
        let end = body.closed_at.unwrap_or_else(|| self.last_consumed_end());
        StructureNode {
            kind: ExprKind::Closure,
            byte_offset: open.range.location,
            byte_length: end - open.range.location,
            substructure: body.nodes,
        }
    }

    /// Index of the `]` closing a capture list at the current position.
    ///
    /// A leading `[...]` is a capture list only when the closure signature's
    /// `in` follows it before the body could have started.
    fn capture_list_close(&self) -> Option<usize> {
        let open = self.peek()?;
        if !open.is_symbol(self.source, "[") {
            return None;
        }

        let mut depth = 0usize;
        let mut close = None;
        for (index, token) in self.tokens.iter().enumerate().skip(self.pos) {
            match self.text(token) {
                "[" if token.kind == TokenKind::Punctuation => depth += 1,
                "]" if token.kind == TokenKind::Punctuation => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(index);
                        break;
                    }
                }
                "{" | "}" if token.kind == TokenKind::Punctuation => return None,
                _ => {}
            }
        }
        let close = close?;

        let mut depth = 0usize;
        for token in &self.tokens[close + 1..] {
            let text = self.text(token);
            match token.kind {
                TokenKind::Keyword if text == "in" && depth == 0 => return Some(close),
                TokenKind::Punctuation => match text {
                    "(" | "[" => depth += 1,
                    ")" | "]" => depth = depth.checked_sub(1)?,
                    "{" | "}" | ";" => return None,
                    _ => {}
                },
                _ => {}
            }
        }
        None
    }

    fn parse_parenthesized(&mut self, nodes: &mut Vec<StructureNode>) -> StructureNode {
        let open = self.tokens[self.pos];
        let callee = self.callee();
        self.pos += 1;
        let inner = self.parse_sequence(Some(")"));
        let end = inner.closed_at.unwrap_or_else(|| self.last_consumed_end());

        let (kind, offset, mut substructure) = match callee {
            None => (ExprKind::Tuple, open.range.location, Vec::new()),
            Some(Callee::Start(start)) => {
                (ExprKind::Call, self.tokens[start].range.location, Vec::new())
            }
            Some(Callee::AfterGroup { closer, start }) => {
                let closer_end = self.tokens[closer].range.end();
                let absorbed = if nodes
                    .last()
                    .is_some_and(|last| last.byte_range().end() == closer_end)
                {
                    nodes.pop()
                } else {
                    None
                };
                match absorbed {
                    Some(group) => (ExprKind::Call, group.byte_offset, vec![group]),
                    None => {
                        let start =
                            start.map_or(open.range.location, |s| self.tokens[s].range.location);
                        (ExprKind::Call, start, Vec::new())
                    }
                }
            }
        };
        substructure.extend(inner.nodes);

        StructureNode {
            kind,
            byte_offset: offset,
            byte_length: end - offset,
            substructure,
        }
    }

    /// Walk back over a `a?.b.c` chain ending right before the current token.
    fn callee(&self) -> Option<Callee> {
        let mut index = self.pos;
        let mut start = None;
        while let Some(previous) = index.checked_sub(1) {
            let token = &self.tokens[previous];
            if self.is_chain_name(token) {
                start = Some(previous);
                match previous.checked_sub(1) {
                    Some(dot) if self.tokens[dot].is_symbol(self.source, ".") => {
                        start = Some(dot);
                        index = dot;
                    }
                    _ => break,
                }
            } else if self.is_postfix(previous) {
                start = Some(previous);
                index = previous;
            } else if matches!(self.text(token), ")" | "]" | "}")
                && token.kind == TokenKind::Punctuation
            {
                return Some(Callee::AfterGroup {
                    closer: previous,
                    start,
                });
            } else {
                break;
            }
        }
        start.map(Callee::Start)
    }

    fn is_chain_name(&self, token: &SyntaxToken) -> bool {
        match token.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword => CALLEE_KEYWORDS.contains(&self.text(token)),
            _ => false,
        }
    }

    /// A `?` or `!` glued to the token before it.
    fn is_postfix(&self, index: usize) -> bool {
        let token = &self.tokens[index];
        token.kind == TokenKind::Operator
            && matches!(self.text(token), "?" | "!")
            && index
                .checked_sub(1)
                .is_some_and(|p| self.tokens[p].range.end() == token.range.location)
    }

    fn follows_callee(&self) -> bool {
        let Some(previous) = self.pos.checked_sub(1) else {
            return false;
        };
        let token = &self.tokens[previous];
        self.is_chain_name(token)
            || self.is_postfix(previous)
            || (token.kind == TokenKind::Punctuation
                && matches!(self.text(token), ")" | "]" | "}")
                && token.range.end() == self.tokens[self.pos].range.location)
    }

    fn parse_collection(&mut self) -> StructureNode {
        let open = self.tokens[self.pos];
        let kind = if self.has_top_level_colon() {
            ExprKind::Dictionary
        } else {
            ExprKind::Array
        };
        self.pos += 1;
        let inner = self.parse_sequence(Some("]"));
        let end = inner.closed_at.unwrap_or_else(|| self.last_consumed_end());
        StructureNode {
            kind,
            byte_offset: open.range.location,
            byte_length: end - open.range.location,
            substructure: inner.nodes,
        }
    }

    fn has_top_level_colon(&self) -> bool {
        let mut depth = 0usize;
        for token in &self.tokens[self.pos + 1..] {
            if token.kind != TokenKind::Punctuation {
                continue;
            }
            match self.text(token) {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                ":" if depth == 0 => return true,
                _ => {}
            }
        }
        false
    }
}

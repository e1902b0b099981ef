//! Swift lexer
//!
//! A hand-written, never-failing lexer. It only has to be precise enough to
//! tell names apart from everything else and to give the structure builder
//! balanced punctuation; anything it does not recognise becomes a
//! one-character punctuation token.

use super::keywords::is_keyword;
use super::token::{SyntaxToken, TokenKind};

const OPERATOR_CHARS: &[u8] = b"/=-+!*%<>&|^~?";

/// Tokenize a whole source file.
pub fn tokenize(source: &str) -> Vec<SyntaxToken> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<SyntaxToken>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::with_capacity(source.len() / 4),
        }
    }

    fn run(mut self) -> Vec<SyntaxToken> {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.lex_token();
        }
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn starts_with(&self, text: &str) -> bool {
        self.bytes[self.pos..].starts_with(text.as_bytes())
    }

    fn advance_char(&mut self) {
        self.pos += self.current_char().map_or(1, char::len_utf8);
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        if self.pos > start {
            self.tokens.push(SyntaxToken::new(kind, start, self.pos));
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn lex_token(&mut self) {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return;
        };

        match c {
            b'/' if self.peek_at(1) == Some(b'/') => self.lex_line_comment(start),
            b'/' if self.peek_at(1) == Some(b'*') => self.lex_block_comment(start),
            b'"' => self.lex_string(start, 0),
            b'#' => self.lex_pound(start),
            b'@' => {
                self.pos += 1;
                self.eat_identifier_chars();
                let kind = if self.pos - start > 1 {
                    TokenKind::Attribute
                } else {
                    TokenKind::Punctuation
                };
                self.push(kind, start);
            }
            b'`' => self.lex_backticked(start),
            b'$' => {
                self.pos += 1;
                self.eat_identifier_chars();
                self.push(TokenKind::Identifier, start);
            }
            b'0'..=b'9' => self.lex_number(start),
            b'(' | b')' | b'[' | b']' | b'{' | b'}' | b',' | b':' | b';' | b'\\' => {
                self.pos += 1;
                self.push(TokenKind::Punctuation, start);
            }
            b'.' => {
                let dots = self.bytes[self.pos..]
                    .iter()
                    .take_while(|&&b| b == b'.')
                    .count();
                self.pos += dots;
                if dots > 1 {
                    if self.peek() == Some(b'<') {
                        self.pos += 1;
                    }
                    self.push(TokenKind::Operator, start);
                } else {
                    self.push(TokenKind::Punctuation, start);
                }
            }
            _ if OPERATOR_CHARS.contains(&c) => self.lex_operator(start),
            _ => match self.current_char() {
                Some(ch) if is_identifier_start(ch) => self.lex_identifier(start),
                _ => {
                    self.advance_char();
                    self.push(TokenKind::Punctuation, start);
                }
            },
        }
    }

    fn lex_line_comment(&mut self, start: usize) {
        self.pos = self.source[self.pos..]
            .find('\n')
            .map_or(self.bytes.len(), |i| self.pos + i);
        self.push(TokenKind::Comment, start);
    }

    fn lex_block_comment(&mut self, start: usize) {
        self.pos += 2;
        let mut depth = 1usize;
        while !self.is_at_end() && depth > 0 {
            if self.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if self.starts_with("*/") {
                depth -= 1;
                self.pos += 2;
            } else {
                self.pos += 1;
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        self.push(TokenKind::Comment, start);
    }

    fn lex_pound(&mut self, start: usize) {
        let hashes = self.bytes[self.pos..]
            .iter()
            .take_while(|&&b| b == b'#')
            .count();
        if self.peek_at(hashes) == Some(b'"') {
            self.lex_string(start, hashes);
            return;
        }

        self.pos += 1;
        let name_start = self.pos;
        self.eat_identifier_chars();
        let kind = if self.pos > name_start {
            TokenKind::Keyword
        } else {
            TokenKind::Punctuation
        };
        self.push(kind, start);
    }

    fn lex_backticked(&mut self, start: usize) {
        let rest = &self.source[self.pos + 1..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        match rest[..line_end].find('`') {
            Some(close) if close > 0 => {
                self.pos += close + 2;
                self.push(TokenKind::Identifier, start);
            }
            _ => {
                self.pos += 1;
                self.push(TokenKind::Punctuation, start);
            }
        }
    }

    fn lex_number(&mut self, start: usize) {
        let is_hex = self.starts_with("0x") || self.starts_with("0X");
        self.pos += 1;
        while let Some(b) = self.peek() {
            let previous = self.bytes[self.pos - 1];
            let continues = b.is_ascii_alphanumeric()
                || b == b'_'
                || (b == b'.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()))
                || ((b == b'+' || b == b'-')
                    && if is_hex {
                        matches!(previous, b'p' | b'P')
                    } else {
                        matches!(previous, b'e' | b'E')
                    });
            if !continues {
                break;
            }
            self.pos += 1;
        }
        self.push(TokenKind::Number, start);
    }

    fn lex_identifier(&mut self, start: usize) {
        self.eat_identifier_chars();
        let kind = if is_keyword(&self.source[start..self.pos]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, start);
    }

    fn eat_identifier_chars(&mut self) {
        while let Some(c) = self.current_char() {
            if !is_identifier_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn lex_operator(&mut self, start: usize) {
        let c = self.bytes[self.pos];
        if (c == b'?' || c == b'!') && self.is_left_bound() && self.peek_at(1) != Some(b'=') {
            self.pos += 1;
            self.push(TokenKind::Operator, start);
            return;
        }

        while let Some(b) = self.peek() {
            if !OPERATOR_CHARS.contains(&b) || self.starts_with("//") || self.starts_with("/*") {
                break;
            }
            self.pos += 1;
        }
        self.push(TokenKind::Operator, start);
    }

    /// True when the previous token ends exactly here and can take a postfix
    /// operator (`value?`, `call()!`).
    fn is_left_bound(&self) -> bool {
        let Some(previous) = self.tokens.last() else {
            return false;
        };
        if previous.range.end() != self.pos {
            return false;
        }
        match previous.kind {
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::Number | TokenKind::String => {
                true
            }
            TokenKind::Punctuation => matches!(previous.text(self.source), ")" | "]" | "}"),
            TokenKind::Operator => matches!(previous.text(self.source), "?" | "!"),
            TokenKind::Attribute | TokenKind::Comment => false,
        }
    }

    /// Lex a string literal starting at `start` (which includes any leading
    /// `#` delimiters). Interpolated expressions are lexed as ordinary tokens
    /// between the string segments.
    fn lex_string(&mut self, start: usize, hashes: usize) {
        self.pos = start + hashes;
        let multiline = self.starts_with("\"\"\"");
        let quotes = if multiline { 3 } else { 1 };
        self.pos += quotes;

        let mut segment_start = start;
        loop {
            let Some(b) = self.peek() else {
                self.push(TokenKind::String, segment_start);
                return;
            };

            match b {
                b'\\' => {
                    let escape_hashes = self.bytes[self.pos + 1..]
                        .iter()
                        .take_while(|&&b| b == b'#')
                        .count();
                    if escape_hashes != hashes {
                        self.pos += 1;
                        continue;
                    }
                    if self.peek_at(1 + hashes) == Some(b'(') {
                        self.push(TokenKind::String, segment_start);
                        self.pos += 2 + hashes;
                        self.lex_interpolation();
                        segment_start = self.pos;
                    } else {
                        self.pos += 1 + hashes;
                        if !self.is_at_end() {
                            self.advance_char();
                        }
                    }
                }
                b'"' if self.closes_string(quotes, hashes) => {
                    self.pos += quotes + hashes;
                    self.push(TokenKind::String, segment_start);
                    return;
                }
                b'\n' if !multiline => {
                    self.push(TokenKind::String, segment_start);
                    return;
                }
                _ => self.advance_char(),
            }
        }
    }

    fn closes_string(&self, quotes: usize, hashes: usize) -> bool {
        let rest = &self.bytes[self.pos..];
        rest.len() >= quotes + hashes
            && rest[..quotes].iter().all(|&b| b == b'"')
            && rest[quotes..quotes + hashes].iter().all(|&b| b == b'#')
    }

    fn lex_interpolation(&mut self) {
        let mut depth = 0usize;
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return,
                Some(b'(') => depth += 1,
                Some(b')') => {
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.lex_token();
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic() || (!c.is_ascii() && !c.is_whitespace() && !c.is_control())
}

fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit() || c.is_numeric()
}

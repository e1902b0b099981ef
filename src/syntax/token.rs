//! Token definitions and the per-file syntax map

use crate::common::{ByteRange, SourceFile};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Attribute,
    Number,
    String,
    Comment,
    Punctuation,
    Operator,
}

impl TokenKind {
    /// Kinds that spell a name in the source.
    pub fn is_name(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Keyword)
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub range: ByteRange,
}

impl SyntaxToken {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            range: ByteRange::new(start, end - start),
        }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.range.location..self.range.end()).unwrap_or("")
    }

    /// True for a punctuation or operator token spelled exactly `text`.
    pub fn is_symbol(&self, source: &str, text: &str) -> bool {
        matches!(self.kind, TokenKind::Punctuation | TokenKind::Operator)
            && self.text(source) == text
    }

    pub fn is_keyword(&self, source: &str, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text(source) == text
    }
}

/// Ordered lexical tokens of one file.
#[derive(Debug, Clone, Default)]
pub struct SyntaxMap {
    tokens: Vec<SyntaxToken>,
    source_len: usize,
}

impl SyntaxMap {
    pub fn new(tokens: Vec<SyntaxToken>, source_len: usize) -> Self {
        Self { tokens, source_len }
    }

    pub fn from_source(file: &SourceFile) -> Self {
        let tokens = super::lexer::tokenize(file.contents());
        Self::new(tokens, file.byte_len())
    }

    pub fn tokens(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    /// Tokens starting inside `range`, or `None` if the range reaches past the
    /// end of the file.
    pub fn tokens_in_byte_range(&self, range: ByteRange) -> Option<&[SyntaxToken]> {
        if range.end() > self.source_len {
            return None;
        }
        let start = self
            .tokens
            .partition_point(|t| t.range.location < range.location);
        let end = self.tokens.partition_point(|t| t.range.location < range.end());
        Some(&self.tokens[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> SyntaxMap {
        SyntaxMap::new(
            vec![
                SyntaxToken::new(TokenKind::Identifier, 0, 3),
                SyntaxToken::new(TokenKind::Punctuation, 3, 4),
                SyntaxToken::new(TokenKind::Identifier, 5, 8),
            ],
            8,
        )
    }

    #[test]
    fn test_tokens_in_byte_range_selects_by_start() {
        let map = map();
        let tokens = map.tokens_in_byte_range(ByteRange::new(1, 5)).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].range.location, 3);
        assert_eq!(tokens[1].range.location, 5);
    }

    #[test]
    fn test_tokens_in_byte_range_rejects_out_of_bounds() {
        assert!(map().tokens_in_byte_range(ByteRange::new(4, 10)).is_none());
    }

    #[test]
    fn test_empty_range_has_no_tokens() {
        let map = map();
        assert!(map.tokens_in_byte_range(ByteRange::new(5, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_name_kinds() {
        assert!(TokenKind::Identifier.is_name());
        assert!(TokenKind::Keyword.is_name());
        assert!(!TokenKind::String.is_name());
        assert!(!TokenKind::Attribute.is_name());
    }
}

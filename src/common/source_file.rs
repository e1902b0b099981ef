//! In-memory source file with explicit byte and character coordinates.
//!
//! Structure and token ranges are byte based, while pattern matching over
//! capture lists and every reported offset are character based. A range only
//! crosses into the other encoding through [`SourceFile`].

use super::source_location::Location;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

/// Half-open range measured in UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub location: usize,
    pub length: usize,
}

impl ByteRange {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub fn end(&self) -> usize {
        self.location + self.length
    }
}

/// Half-open range measured in characters (Unicode scalar values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub location: usize,
    pub length: usize,
}

impl CharRange {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub fn end(&self) -> usize {
        self.location + self.length
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Option<PathBuf>,
    contents: String,
    /// Byte offset of every character, followed by the total byte length.
    char_offsets: Vec<usize>,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(contents: impl Into<String>) -> Self {
        let contents = contents.into();
        let char_offsets = contents
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(contents.len()))
            .collect();
        let line_starts = std::iter::once(0)
            .chain(
                contents
                    .bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            path: None,
            contents,
            char_offsets,
            line_starts,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Load a file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileSystem {
            message: format!("failed to read {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        })?;
        Ok(Self::new(contents).with_path(path))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn byte_len(&self) -> usize {
        self.contents.len()
    }

    pub fn char_len(&self) -> usize {
        self.char_offsets.len() - 1
    }

    /// Character offset of a byte offset, or `None` when the byte offset is
    /// past the end or falls inside a multi-byte character.
    pub fn byte_to_char_offset(&self, byte: usize) -> Option<usize> {
        self.char_offsets.binary_search(&byte).ok()
    }

    pub fn char_to_byte_offset(&self, char_offset: usize) -> Option<usize> {
        self.char_offsets.get(char_offset).copied()
    }

    pub fn byte_range_to_char_range(&self, range: ByteRange) -> Option<CharRange> {
        let start = self.byte_to_char_offset(range.location)?;
        let end = self.byte_to_char_offset(range.end())?;
        Some(CharRange::new(start, end - start))
    }

    pub fn char_range_to_byte_range(&self, range: CharRange) -> Option<ByteRange> {
        let start = self.char_to_byte_offset(range.location)?;
        let end = self.char_to_byte_offset(range.end())?;
        Some(ByteRange::new(start, end - start))
    }

    pub fn substring_bytes(&self, range: ByteRange) -> Option<&str> {
        self.contents.get(range.location..range.end())
    }

    pub fn substring(&self, range: CharRange) -> Option<&str> {
        self.char_range_to_byte_range(range)
            .and_then(|bytes| self.substring_bytes(bytes))
    }

    /// 1-based line and character column of a character offset.
    pub fn location(&self, char_offset: usize) -> Option<Location> {
        let byte = self.char_to_byte_offset(char_offset)?;
        let line_index = self.line_starts.partition_point(|&start| start <= byte) - 1;
        let line_start = self.byte_to_char_offset(self.line_starts[line_index])?;
        Some(Location {
            line: line_index + 1,
            column: char_offset - line_start + 1,
        })
    }

    /// 1-based line number containing a byte offset.
    pub fn line_of_byte(&self, byte: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identical() {
        let file = SourceFile::new("let x = 1");
        assert_eq!(file.byte_to_char_offset(4), Some(4));
        assert_eq!(file.char_to_byte_offset(9), Some(9));
        assert_eq!(file.char_len(), 9);
    }

    #[test]
    fn test_multibyte_characters_shift_offsets() {
        // "é" is two bytes, "🙂" is four
        let file = SourceFile::new("é🙂x");
        assert_eq!(file.byte_len(), 7);
        assert_eq!(file.char_len(), 3);
        assert_eq!(file.byte_to_char_offset(2), Some(1));
        assert_eq!(file.byte_to_char_offset(6), Some(2));
        assert_eq!(file.char_to_byte_offset(2), Some(6));
    }

    #[test]
    fn test_byte_offset_inside_character_is_rejected() {
        let file = SourceFile::new("é");
        assert_eq!(file.byte_to_char_offset(1), None);
        assert_eq!(file.byte_range_to_char_range(ByteRange::new(0, 1)), None);
    }

    #[test]
    fn test_range_conversion_is_lossless() {
        let file = SourceFile::new("// ü\nlet 🙂 = [1]");
        let chars = CharRange::new(5, 9);
        let bytes = file.char_range_to_byte_range(chars).unwrap();
        assert_eq!(file.byte_range_to_char_range(bytes), Some(chars));
        assert_eq!(file.substring(chars), Some("let 🙂 = ["));
    }

    #[test]
    fn test_out_of_bounds_ranges_fail() {
        let file = SourceFile::new("abc");
        assert_eq!(file.char_range_to_byte_range(CharRange::new(2, 5)), None);
        assert_eq!(file.substring_bytes(ByteRange::new(1, 10)), None);
    }

    #[test]
    fn test_location_is_one_based_in_characters() {
        let file = SourceFile::new("a\nüb c");
        assert_eq!(file.location(0), Some(Location { line: 1, column: 1 }));
        assert_eq!(file.location(2), Some(Location { line: 2, column: 1 }));
        assert_eq!(file.location(5), Some(Location { line: 2, column: 4 }));
    }

    #[test]
    fn test_line_of_byte() {
        let file = SourceFile::new("a\nb\nc");
        assert_eq!(file.line_of_byte(0), 1);
        assert_eq!(file.line_of_byte(2), 2);
        assert_eq!(file.line_of_byte(4), 3);
    }
}

//! Capture list extraction and entry parsing.
//!
//! Entries holding nested brackets (`[x = [1]]`) are not understood: the
//! pattern stops at the first `]`, and such a list is skipped entirely.

use crate::common::{last_word, leading_whitespace_chars, ByteRange, CharRange, SourceFile};
use once_cell::sync::Lazy;
use regex::Regex;

static CAPTURE_LIST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{\s*\[([^\]]+)\]").expect("capture list pattern is valid"));

/// Text between a closure's capture list brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureListText<'a> {
    pub text: &'a str,
    /// Character range of `text` in the file.
    pub range: CharRange,
}

/// Match a capture list anchored at the start of `window`.
///
/// Returns `None` when the window does not open with `{ [...]`, when the
/// brackets hold nothing but whitespace, or when an entry holds a nested `[`.
pub fn extract_capture_list(file: &SourceFile, window: CharRange) -> Option<CaptureListText<'_>> {
    let window_bytes = file.char_range_to_byte_range(window)?;
    let haystack = file.substring_bytes(window_bytes)?;
    let group = CAPTURE_LIST_PATTERN.captures(haystack)?.get(1)?;
    if group.as_str().trim().is_empty() || group.as_str().contains('[') {
        return None;
    }

    let group_bytes = ByteRange::new(window_bytes.location + group.start(), group.len());
    let range = file.byte_range_to_char_range(group_bytes)?;
    Some(CaptureListText {
        text: group.as_str(),
        range,
    })
}

/// One entry of a capture list, e.g. `weak self` or `unowned d = self.d!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEntry {
    /// The name the entry binds inside the closure.
    pub reference_name: String,
    /// Characters from the start of the list to the entry's first
    /// non-whitespace character.
    pub offset_within_list: usize,
    /// Characters from the entry's first non-whitespace character to the
    /// bound name (skips qualifiers such as `weak`).
    pub name_offset: usize,
}

impl CaptureEntry {
    pub fn name_offset_within_list(&self) -> usize {
        self.offset_within_list + self.name_offset
    }
}

/// Split a capture list into entries, left to right.
///
/// The bound name is the last word before any `=`; qualifiers and the aliased
/// expression are ignored. Blank items and items without a name are skipped.
pub fn parse_capture_entries(list: &str) -> Vec<CaptureEntry> {
    let mut entries = Vec::new();
    let mut consumed = 0;

    for item in list.split(',') {
        let item_start = consumed;
        // +1 for the comma
        consumed += item.chars().count() + 1;

        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        let binding = trimmed.split_once('=').map_or(trimmed, |(name, _)| name);
        let Some((name_offset, name)) = last_word(binding) else {
            continue;
        };

        entries.push(CaptureEntry {
            reference_name: name.to_string(),
            offset_within_list: item_start + leading_whitespace_chars(item),
            name_offset,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str, offset: usize, name_offset: usize) -> CaptureEntry {
        CaptureEntry {
            reference_name: name.to_string(),
            offset_within_list: offset,
            name_offset,
        }
    }

    fn whole(file: &SourceFile) -> CharRange {
        CharRange::new(0, file.char_len())
    }

    #[test]
    fn test_extracts_list_and_range() {
        let file = SourceFile::new("{ [weak self] num in }");
        let list = extract_capture_list(&file, whole(&file)).unwrap();
        assert_eq!(list.text, "weak self");
        assert_eq!(list.range, CharRange::new(3, 9));
    }

    #[test]
    fn test_allows_leading_whitespace_and_newlines() {
        let file = SourceFile::new("  {\n  [\n  a,\n  b\n  ] in }");
        let list = extract_capture_list(&file, whole(&file)).unwrap();
        assert_eq!(list.text, "\n  a,\n  b\n  ");
    }

    #[test]
    fn test_requires_match_at_window_start() {
        let file = SourceFile::new("foo { [a] in }");
        assert!(extract_capture_list(&file, whole(&file)).is_none());
        let file = SourceFile::new("{ x in [a] }");
        assert!(extract_capture_list(&file, whole(&file)).is_none());
    }

    #[test]
    fn test_empty_and_blank_lists_yield_nothing() {
        let file = SourceFile::new("{ [] in doSomething() }");
        assert!(extract_capture_list(&file, whole(&file)).is_none());
        let file = SourceFile::new("{ [   ] in doSomething() }");
        assert!(extract_capture_list(&file, whole(&file)).is_none());
    }

    #[test]
    fn test_range_after_multibyte_characters() {
        let file = SourceFile::new("/*é*/ { [ü] in }");
        let window = CharRange::new(6, file.char_len() - 6);
        let list = extract_capture_list(&file, window).unwrap();
        assert_eq!(list.text, "ü");
        assert_eq!(list.range, CharRange::new(9, 1));
    }

    #[test]
    fn test_nested_brackets_are_not_a_capture_list() {
        for source in [
            "{ [a = [1]] in a }",
            "{ [x = [a, b]] in x }",
            "{ [weak self, x = [1, 2]] in print(1) }",
        ] {
            let file = SourceFile::new(source);
            assert!(extract_capture_list(&file, whole(&file)).is_none(), "{source}");
        }
    }

    #[test]
    fn test_parses_plain_and_qualified_entries() {
        assert_eq!(
            parse_capture_entries("weak self, foo, unowned(unsafe) bar"),
            vec![entry("self", 0, 5), entry("foo", 11, 0), entry("bar", 16, 16)]
        );
    }

    #[test]
    fn test_alias_binds_left_hand_side() {
        assert_eq!(
            parse_capture_entries("weak self, unowned delegate = self.delegate!"),
            vec![entry("self", 0, 5), entry("delegate", 11, 8)]
        );
        assert_eq!(
            parse_capture_entries("x=y"),
            vec![entry("x", 0, 0)]
        );
    }

    #[test]
    fn test_blank_items_keep_later_offsets_correct() {
        let entries = parse_capture_entries(" a, , b,");
        assert_eq!(entries, vec![entry("a", 1, 0), entry("b", 6, 0)]);
    }

    #[test]
    fn test_nameless_entries_are_skipped() {
        assert_eq!(
            parse_capture_entries("= self.x, b"),
            vec![entry("b", 10, 0)]
        );
    }

    #[test]
    fn test_offsets_count_characters() {
        let list = "ü, weak ö";
        let entries = parse_capture_entries(list);
        assert_eq!(entries, vec![entry("ü", 0, 0), entry("ö", 3, 5)]);
        let name: String = list.chars().skip(entries[1].name_offset_within_list()).collect();
        assert_eq!(name, "ö");
    }
}

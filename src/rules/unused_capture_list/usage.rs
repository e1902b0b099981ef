//! Names spelled in a closure body.
//!
//! "Used" is purely lexical: a capture counts as used when any identifier or
//! keyword token in the body has the same spelling, whatever scope it is in.
//! An inner declaration shadowing a captured name therefore hides the unused
//! capture.

use super::capture_list::CaptureEntry;
use crate::common::CharRange;
use crate::rules::LintFile;
use std::collections::HashSet;

/// Everything after the capture list's closing `]` through the closure end.
pub fn body_range(closure: CharRange, capture_list: CharRange) -> Option<CharRange> {
    let start = capture_list.end() + 1;
    let end = closure.end();
    (start <= end).then(|| CharRange::new(start, end - start))
}

/// Distinct spellings of the identifier and keyword tokens inside `body`.
pub fn identifier_usages(file: &LintFile, body: CharRange) -> Option<HashSet<&str>> {
    let bytes = file.source.char_range_to_byte_range(body)?;
    let tokens = file.syntax.tokens_in_byte_range(bytes)?;
    Some(
        tokens
            .iter()
            .filter(|token| token.kind.is_name())
            .filter_map(|token| file.source.substring_bytes(token.range))
            .collect(),
    )
}

/// Entries whose name never appears in `usages`, in capture list order.
pub fn unused_entries<'e>(
    entries: &'e [CaptureEntry],
    usages: &'e HashSet<&'e str>,
) -> impl Iterator<Item = &'e CaptureEntry> + 'e {
    entries
        .iter()
        .filter(move |entry| !usages.contains(entry.reference_name.as_str()))
}

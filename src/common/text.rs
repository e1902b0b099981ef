//! Character-counted text helpers

/// Number of leading whitespace characters.
pub fn leading_whitespace_chars(s: &str) -> usize {
    s.chars().take_while(|c| c.is_whitespace()).count()
}

/// Character offset of the last whitespace-separated word and the word itself.
pub fn last_word(s: &str) -> Option<(usize, &str)> {
    let trimmed = s.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let word = &trimmed[start..];
    if word.is_empty() {
        return None;
    }
    Some((trimmed[..start].chars().count(), word))
}

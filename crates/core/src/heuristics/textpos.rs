//! Character-position helpers.
//!
//! The splitting heuristics are defined in terms of character positions
//! (30/80/100/120); these helpers keep slicing safe on multi-byte text.

/// Byte offset of the `n`th character, or the end of the string.
pub(crate) fn byte_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Number of characters in `s`.
pub(crate) fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Slice by character positions `[start, end)`.
pub(crate) fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    &s[byte_of_char(s, start)..byte_of_char(s, end)]
}

/// Character position of the first `needle` at position `from` or later.
pub(crate) fn find_char_from(s: &str, needle: char, from: usize) -> Option<usize> {
    s.chars()
        .enumerate()
        .skip(from)
        .find(|&(_, c)| c == needle)
        .map(|(i, _)| i)
}

/// Character position of the last `needle` at position `upto` or earlier.
pub(crate) fn rfind_char_upto(s: &str, needle: char, upto: usize) -> Option<usize> {
    s.chars()
        .enumerate()
        .take(upto.saturating_add(1))
        .filter(|&(_, c)| c == needle)
        .map(|(i, _)| i)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_slicing() {
        let s = "éléphant rosé";
        assert_eq!(char_count(s), 13);
        assert_eq!(slice_chars(s, 0, 8), "éléphant");
        assert_eq!(find_char_from(s, 'r', 0), Some(9));
        assert_eq!(rfind_char_upto(s, 'é', 4), Some(2));
    }
}

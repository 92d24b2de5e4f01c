//! Text normalization for cell values and column headers.
//! Folding is for matching only; stored values keep their original script.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex for collapsing whitespace runs.
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Compiled regex for splitting text into alphanumeric tokens.
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

/// Fold text for keyword matching.
///
/// Pipeline:
/// 1. Transliterate non-Latin characters via deunicode
/// 2. Lowercase
/// 3. Collapse and trim whitespace
pub fn fold(text: &str) -> String {
    let latin = deunicode(text);
    collapse_whitespace(&latin.to_lowercase())
}

/// Split folded text into alphanumeric tokens.
pub fn tokens(folded: &str) -> Vec<String> {
    RE_NON_ALNUM
        .split(folded)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").to_string()
}

/// Whether `needle` occurs in `haystack` with no alphanumeric neighbour on
/// either side.
pub fn contains_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(needle) {
        let begin = start + offset;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = begin
            + haystack[begin..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }

    false
}

/// Count of digit characters.
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// Whether the text is nothing but an (optionally signed/decimal) number.
pub fn is_numeric_only(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;

//! Text normalization shared by the lexicon scorer and the relevance matcher.
//!
//! Two granularities live here. [`normalize_text`] produces a phrase-level
//! canonical form used for lexicon and vocabulary matching, while
//! [`extract_keywords`] works at token granularity for topic matching.

mod stopwords;

pub use stopwords::is_stop_word;

use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Tokens at or below this many characters never become keywords.
pub const MIN_KEYWORD_CHARS: usize = 4;

/// Canonical phrase-level form of free text.
///
/// Full-width characters are folded to their half-width forms, everything is
/// lower-cased, apostrophes are dropped, and any other punctuation (including
/// hyphen runs) becomes a single space. `+`, `#` and interior dots survive so
/// names such as `c++` or `gpt-4.5` keep their meaning.
pub fn normalize_text(value: &str) -> String {
    let folded = value.nfkc().collect::<String>().to_lowercase();

    let mut cleaned = String::with_capacity(folded.len());
    for ch in folded.chars() {
        match ch {
            '\'' | '\u{2019}' | '\u{2018}' => {}
            c if c.is_alphanumeric() || matches!(c, '+' | '#' | '.') => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }

    cleaned
        .split_whitespace()
        .map(|token| token.trim_matches('.'))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits normalized text into its tokens.
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Lower-cases and deletes every character that is neither a word character
/// nor whitespace, so `GPT-5` becomes `gpt5`.
pub fn strip_non_word(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || ch.is_whitespace())
        .collect()
}

/// Distinct significant keywords of a piece of text.
pub fn extract_keywords(value: &str) -> BTreeSet<String> {
    strip_non_word(value)
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

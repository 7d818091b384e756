//! Normalizer: case and accent folding for search matching.
//!
//! The same function is applied to the query and to every candidate field so
//! matching is symmetric: `"Émile"`, `"EMILE"`, and `"emile"` all fold to
//! `"emile"`.

use unicode_normalization::UnicodeNormalization;

/// Lowercase, decompose (NFD), and drop combining diacritical marks.
pub fn normalize(s: &str) -> String {
    s.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// True when `haystack` contains `needle` after both are normalized.
/// `needle` is expected to be normalized already.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(needle)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

//! Accent- and case-insensitive folding for polytonic Greek search.

use unicode_normalization::UnicodeNormalization;

/// Fold text for substring comparison.
///
/// Steps:
/// 1. Canonical decomposition (NFD)
/// 2. Drop combining diacritical marks (U+0300..=U+036F)
/// 3. Lowercase
/// 4. Drop iota subscript, acute and grave (U+0345, U+0301, U+0300)
///
/// Step 4 catches marks that reappear after case mapping.
#[must_use]
pub fn normalize(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_diacritic(*c)).collect();

    stripped
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\u{0345}' | '\u{0301}' | '\u{0300}'))
        .collect()
}

/// Normalize each term once up front so a scan can reuse them per record.
#[must_use]
pub fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms.iter().map(|t| normalize(t.as_ref())).collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

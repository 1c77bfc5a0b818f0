//! Keyword vocabulary and approximate keyword matching.
//!
//! The vocabulary is a fixed list of the keywords users most often mistype.
//! Matching is tolerant in proportion to word length: short tokens may
//! differ by a single edit, longer tokens by roughly a third of their length.

use std::sync::LazyLock;

use regex::Regex;

use crate::distance::distance;

/// Canonical keywords checked for misspellings, in reporting priority order.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "ON",
    "AND",
    "OR"
];

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

/// A token that looks like a mistyped keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    /// The offending token, uppercased
    pub token:   String,
    /// The vocabulary entry it most likely stands for
    pub keyword: &'static str
}

/// Decide whether `word` is a likely misspelling of `keyword`.
///
/// Both sides are expected to be case-normalized already. Identical words
/// are not misspellings.
///
/// # Example
///
/// ```
/// use sql_checker::keywords::is_probable_misspelling;
///
/// assert!(is_probable_misspelling("SELCT", "SELECT"));
/// assert!(!is_probable_misspelling("SELECT", "SELECT"));
/// assert!(!is_probable_misspelling("ON", "AND"));
/// ```
pub fn is_probable_misspelling(word: &str, keyword: &str) -> bool {
    if word == keyword {
        return false;
    }
    let word_len = word.chars().count();
    let keyword_len = keyword.chars().count();
    let edits = distance(word, keyword);
    if word_len.min(keyword_len) <= 4 {
        return edits <= 1;
    }
    let threshold = (word_len.max(keyword_len) / 3).max(1);
    edits <= threshold
}

/// Scan the words of `sql` in order and return the first probable keyword
/// misspelling.
///
/// Numbers, words of two characters or fewer, and words that already spell
/// part of a vocabulary keyword (`ORDER`, `BY`, `LEFT`, ...) are skipped.
/// Multi-word keywords are compared with their spaces removed.
pub fn find_misspelling(sql: &str) -> Option<Misspelling> {
    let upper = sql.to_uppercase();
    WORD_REGEX
        .find_iter(&upper)
        .map(|m| m.as_str())
        .filter(|word| is_candidate(word))
        .find_map(|word| {
            KEYWORD_VOCABULARY
                .iter()
                .find(|keyword| is_probable_misspelling(word, &compact(keyword)))
                .map(|keyword| Misspelling {
                    token:   word.to_string(),
                    keyword: *keyword
                })
        })
}

fn is_candidate(word: &str) -> bool {
    if word.chars().count() <= 2 || word.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !KEYWORD_VOCABULARY
        .iter()
        .flat_map(|keyword| keyword.split_whitespace())
        .any(|part| part == word)
}

fn compact(keyword: &str) -> String {
    keyword.split_whitespace().collect()
}

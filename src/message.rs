//! Recognizers for the parse failure message families.
//!
//! Shared by the translator and the suggestion engine so that both read a
//! failure message the same way.

use std::sync::LazyLock;

use regex::Regex;

static EXPECTED_FOUND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\bexpected:?\s*(?P<expected>.*?),?\s+found:?\s*(?P<found>.*?)(?:\s+at\s+(?:line|pos)\b.*)?$"
    )
    .expect("valid regex")
});

static EXPECTED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bexpected:\s*(?P<expected>.*?)(?:\s+at\s+(?:line|pos)\b.*)?$")
        .expect("valid regex")
});

static UNEXPECTED_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)unexpected token:?\s*'(?P<token>.*?)'").expect("valid regex")
});

static NO_SUCH_COLUMN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)no such column:\s*(?P<name>[^\s(]+)").expect("valid regex")
});

static NO_SUCH_TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)no such table:\s*(?P<name>[^\s(]+)").expect("valid regex")
});

/// `Expected: <E>, found: <F>` as `(E, F)`, both trimmed and non-empty.
pub fn expected_found(message: &str) -> Option<(&str, &str)> {
    let caps = EXPECTED_FOUND_REGEX.captures(message)?;
    let expected = caps.name("expected")?.as_str().trim();
    let found = caps.name("found")?.as_str().trim();
    (!expected.is_empty() && !found.is_empty()).then_some((expected, found))
}

/// The `<E>` of an `Expected: <E>` fragment, with or without a `found` part.
pub fn expected(message: &str) -> Option<&str> {
    if let Some((expected, _)) = expected_found(message) {
        return Some(expected);
    }
    let expected = EXPECTED_REGEX
        .captures(message)?
        .name("expected")?
        .as_str()
        .trim();
    (!expected.is_empty()).then_some(expected)
}

pub fn unexpected_token(message: &str) -> Option<&str> {
    UNEXPECTED_TOKEN_REGEX
        .captures(message)?
        .name("token")
        .map(|m| m.as_str())
}

pub fn is_missing_from(message: &str) -> bool {
    message.to_lowercase().contains("missing from clause")
}

pub fn no_such_column(message: &str) -> Option<&str> {
    NO_SUCH_COLUMN_REGEX
        .captures(message)?
        .name("name")
        .map(|m| m.as_str())
}

pub fn no_such_table(message: &str) -> Option<&str> {
    NO_SUCH_TABLE_REGEX
        .captures(message)?
        .name("name")
        .map(|m| m.as_str())
}

/// Whether the message is about parentheses or brackets.
///
/// True for messages naming them outright, and for `Expected`/`found`
/// fragments that are themselves a parenthesis (`Expected: ), found: EOF`).
pub fn mentions_brackets(message: &str) -> bool {
    let lower = message.to_lowercase();
    if lower.contains("parenthes") || lower.contains("bracket") {
        return true;
    }
    let is_paren = |s: &str| matches!(s.trim_matches(|c: char| c == '\'' || c == '"'), "(" | ")");
    match expected_found(message) {
        Some((expected, found)) => is_paren(expected) || is_paren(found),
        None => expected(message).is_some_and(is_paren)
    }
}

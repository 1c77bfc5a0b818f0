//! Parse failure to friendly diagnostic.
//!
//! Message families are tried in a fixed order; the first match decides the
//! wording. Failures that match no family fall back to a caret snippet at the
//! reported position, and finally to the raw message.

use crate::{checker::Diagnostic, message, parser::ParseFailure};

/// Characters shown on each side of the error position in a snippet.
const SNIPPET_RADIUS: usize = 10;

/// Turn a parse failure into a single user-facing diagnostic.
///
/// # Example
///
/// ```
/// use sql_checker::{parser::ParseFailure, translate::translate};
///
/// let failure = ParseFailure::new("Expected: an SQL statement, found: SELCT", Some(0));
/// let diagnostic = translate(&failure, "SELCT * FROM t");
///
/// assert_eq!(
///     diagnostic.message,
///     "Syntax error: expected 'an SQL statement' but found 'SELCT'"
/// );
/// ```
pub fn translate(failure: &ParseFailure, original_sql: &str) -> Diagnostic {
    let msg = failure.message.as_str();
    if let Some((expected, found)) = message::expected_found(msg) {
        return Diagnostic::new(format!(
            "Syntax error: expected '{}' but found '{}'",
            expected, found
        ));
    }
    if let Some(token) = message::unexpected_token(msg) {
        return Diagnostic::new(format!("Syntax error: unexpected token '{}'", token));
    }
    if message::is_missing_from(msg) {
        return Diagnostic::new("Syntax error: SELECT statement is missing a FROM clause");
    }
    if let Some(column) = message::no_such_column(msg) {
        return Diagnostic::new(format!("Error: column '{}' does not exist", column));
    }
    if let Some(table) = message::no_such_table(msg) {
        return Diagnostic::new(format!("Error: table '{}' does not exist", table));
    }
    if let Some(snippet) = failure
        .position
        .and_then(|pos| render_snippet(original_sql, pos))
    {
        return Diagnostic::new(format!("Syntax error near:\n{}", snippet));
    }
    raw(failure)
}

/// The parser's own message, unchanged apart from a prefix.
pub fn raw(failure: &ParseFailure) -> Diagnostic {
    Diagnostic::new(format!("Syntax error: {}", failure.message))
}

/// Window of the statement around `position` with a caret line beneath.
///
/// Returns `None` when `position` lies outside the statement. Line breaks
/// and tabs inside the window are shown as spaces so the caret stays
/// aligned.
pub fn render_snippet(sql: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = sql.chars().collect();
    if position >= chars.len() {
        return None;
    }
    let start = position.saturating_sub(SNIPPET_RADIUS);
    let end = (position + SNIPPET_RADIUS).min(chars.len());
    let context: String = chars[start..end]
        .iter()
        .map(|&c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();
    let marker = format!("{}^", " ".repeat(position - start));
    Some(format!("{}\n{}", context, marker))
}

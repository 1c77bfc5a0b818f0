//! Fix suggestions for parse failures.
//!
//! Rules are evaluated in order and the first one that produces text wins,
//! so a failure never yields more than one suggestion. The last rule is a
//! generic reminder that always answers.

use tracing::trace;

use crate::{checker::Suggestion, keywords::find_misspelling, message, parser::ParseFailure};

type SuggestionRule = fn(&ParseFailure, &str) -> Option<Suggestion>;

const RULES: &[(&str, SuggestionRule)] = &[
    ("missing_from", missing_from),
    ("misspelled_keyword", misspelled_keyword),
    ("unbalanced_parentheses", unbalanced_parentheses),
    ("expected_keyword", expected_keyword),
    ("unknown_column", unknown_column),
    ("unknown_table", unknown_table),
    ("generic", generic)
];

/// Propose at most one remedy for a parse failure.
///
/// # Example
///
/// ```
/// use sql_checker::{parser::ParseFailure, suggest::suggest};
///
/// let failure = ParseFailure::new("Expected: ), found: EOF", None);
/// let suggestion = suggest(&failure, "SELECT * FROM t WHERE (a = 1").unwrap();
///
/// assert_eq!(
///     suggestion.message,
///     "SQL statement is missing 1 closing parenthesis ')'"
/// );
/// ```
pub fn suggest(failure: &ParseFailure, original_sql: &str) -> Option<Suggestion> {
    RULES.iter().find_map(|(name, rule)| {
        let suggestion = rule(failure, original_sql)?;
        trace!(rule = *name, "suggestion rule matched");
        Some(suggestion)
    })
}

fn missing_from(failure: &ParseFailure, _sql: &str) -> Option<Suggestion> {
    message::is_missing_from(&failure.message).then(|| {
        Suggestion::new("Add a FROM clause naming the table, e.g. 'FROM table_name'")
    })
}

fn misspelled_keyword(_failure: &ParseFailure, sql: &str) -> Option<Suggestion> {
    let found = find_misspelling(sql)?;
    Some(Suggestion::new(format!(
        "'{}' may be a misspelling of '{}'",
        found.token, found.keyword
    )))
}

fn unbalanced_parentheses(failure: &ParseFailure, sql: &str) -> Option<Suggestion> {
    if !message::mentions_brackets(&failure.message) {
        return None;
    }
    let open = sql.matches('(').count();
    let close = sql.matches(')').count();
    let noun = |n: usize| if n == 1 { "parenthesis" } else { "parentheses" };
    match open.cmp(&close) {
        std::cmp::Ordering::Greater => {
            let missing = open - close;
            Some(Suggestion::new(format!(
                "SQL statement is missing {} closing {} ')'",
                missing,
                noun(missing)
            )))
        }
        std::cmp::Ordering::Less => {
            let extra = close - open;
            Some(Suggestion::new(format!(
                "SQL statement has {} extra closing {} ')'",
                extra,
                noun(extra)
            )))
        }
        std::cmp::Ordering::Equal => None
    }
}

fn expected_keyword(failure: &ParseFailure, _sql: &str) -> Option<Suggestion> {
    let expected = message::expected(&failure.message)?;
    Some(Suggestion::new(format!(
        "Keyword '{}' is required at this position",
        expected
    )))
}

fn unknown_column(failure: &ParseFailure, _sql: &str) -> Option<Suggestion> {
    let column = message::no_such_column(&failure.message)?;
    Some(Suggestion::new(format!(
        "Check that column '{}' is spelled correctly or needs a table qualifier",
        column
    )))
}

fn unknown_table(failure: &ParseFailure, _sql: &str) -> Option<Suggestion> {
    let table = message::no_such_table(&failure.message)?;
    Some(Suggestion::new(format!(
        "Check that table '{}' is spelled correctly or exists in the schema",
        table
    )))
}

fn generic(_failure: &ParseFailure, _sql: &str) -> Option<Suggestion> {
    Some(Suggestion::new(
        "Check SQL syntax: verify keyword spelling and clause completeness"
    ))
}

use sql_checker::{
    parser::ParseFailure,
    translate::{raw, render_snippet, translate}
};

fn translated(message: &str, position: Option<usize>, sql: &str) -> String {
    translate(&ParseFailure::new(message, position), sql).message
}

#[test]
fn test_expected_found() {
    assert_eq!(
        translated("Expected: an SQL statement, found: SELCT at Line: 1, Column: 1", Some(0), "SELCT * FROM t"),
        "Syntax error: expected 'an SQL statement' but found 'SELCT'"
    );
}

#[test]
fn test_expected_found_with_pos_suffix() {
    assert_eq!(
        translated("Expected: ), found: EOF at pos 27", Some(27), "SELECT * FROM t WHERE (a = 1"),
        "Syntax error: expected ')' but found 'EOF'"
    );
}

#[test]
fn test_unexpected_token() {
    assert_eq!(
        translated("unexpected token: 'FORM'", None, "SELECT * FORM t"),
        "Syntax error: unexpected token 'FORM'"
    );
}

#[test]
fn test_missing_from() {
    assert_eq!(
        translated("missing FROM clause", None, "SELECT a, b"),
        "Syntax error: SELECT statement is missing a FROM clause"
    );
}

#[test]
fn test_no_such_column() {
    assert_eq!(
        translated("no such column: agee", None, "SELECT agee FROM users"),
        "Error: column 'agee' does not exist"
    );
}

#[test]
fn test_no_such_table() {
    assert_eq!(
        translated("no such table: userz", None, "SELECT * FROM userz"),
        "Error: table 'userz' does not exist"
    );
}

#[test]
fn test_family_order_prefers_expected_found() {
    assert_eq!(
        translated("Expected: identifier, found: ( no such column: x", None, "SELECT"),
        "Syntax error: expected 'identifier' but found '( no such column: x'"
    );
}

#[test]
fn test_snippet_fallback() {
    let sql = "SELECT * FROM users WHERE";

    assert_eq!(
        translated("something odd", Some(15), sql),
        "Syntax error near:\nT * FROM users WHERE\n          ^"
    );
}

#[test]
fn test_raw_fallback_without_position() {
    assert_eq!(translated("something odd", None, "SELECT 1"), "Syntax error: something odd");
}

#[test]
fn test_raw_fallback_for_position_past_end() {
    assert_eq!(translated("something odd", Some(99), "SELECT 1"), "Syntax error: something odd");
}

#[test]
fn test_raw_keeps_parser_message() {
    let failure = ParseFailure::new("Expected: ), found: EOF", None);

    assert_eq!(raw(&failure).message, "Syntax error: Expected: ), found: EOF");
}

#[test]
fn test_snippet_at_start() {
    assert_eq!(render_snippet("SELCT * FROM t", 0).unwrap(), "SELCT * FR\n^");
}

#[test]
fn test_snippet_replaces_line_breaks() {
    assert_eq!(render_snippet("SELECT *\nFROM t", 9).unwrap(), "SELECT * FROM t\n         ^");
}

#[test]
fn test_snippet_out_of_range() {
    assert!(render_snippet("SELECT", 6).is_none());
    assert!(render_snippet("", 0).is_none());
}

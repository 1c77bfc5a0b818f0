use std::thread;

use sql_checker::{
    CheckResult, Checker, EngineConfig, Outcome, check,
    checker::ErrorFormat,
    parser::{Grammar, ParseFailure, SqlDialect}
};

fn sqlite(sql: &str) -> CheckResult {
    check(sql, SqlDialect::SQLite)
}

struct FixedFailure(&'static str, Option<usize>);

impl Grammar for FixedFailure {
    fn parse(&self, _sql: &str) -> Result<(), ParseFailure> {
        Err(ParseFailure::new(self.0, self.1))
    }
}

struct PanickingGrammar;

impl Grammar for PanickingGrammar {
    fn parse(&self, _sql: &str) -> Result<(), ParseFailure> {
        panic!("grammar exploded")
    }
}

#[test]
fn test_valid_statement() {
    let result = sqlite("SELECT name FROM users WHERE age > 30 ORDER BY name");

    assert!(result.is_valid);
    assert_eq!(result.outcome, Outcome::Clean);
    assert!(result.errors.is_empty());
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_missing_from() {
    let result = sqlite("SELECT a, b;");

    assert!(!result.is_valid);
    assert_eq!(result.outcome, Outcome::SyntaxError);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].message,
        "Syntax error: SELECT statement is missing a FROM clause"
    );
    assert_eq!(result.suggestions.len(), 1);
    assert!(result.suggestions[0].message.contains("FROM"));
}

#[test]
fn test_misspelled_select() {
    let result = sqlite("SELCT * FROM users");

    assert!(!result.is_valid);
    assert_eq!(result.outcome, Outcome::SyntaxError);
    assert_eq!(
        result.errors[0].message,
        "Syntax error: expected 'an SQL statement' but found 'SELCT'"
    );
    assert_eq!(
        result.suggestions[0].message,
        "'SELCT' may be a misspelling of 'SELECT'"
    );
}

#[test]
fn test_misspelled_where() {
    let result = sqlite("SELECT * FROM users WHER id = 1");

    assert_eq!(result.outcome, Outcome::SyntaxError);
    assert_eq!(
        result.suggestions[0].message,
        "'WHER' may be a misspelling of 'WHERE'"
    );
}

#[test]
fn test_unclosed_parenthesis() {
    let result = sqlite("SELECT * FROM t WHERE (a = 1");

    assert_eq!(result.outcome, Outcome::SyntaxError);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.suggestions[0].message,
        "SQL statement is missing 1 closing parenthesis ')'"
    );
}

#[test]
fn test_implicit_join() {
    let result = sqlite("SELECT * FROM t1, t2");

    assert!(!result.is_valid);
    assert_eq!(result.outcome, Outcome::StructuralMistake);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].message, "implicit join syntax used");
    assert_eq!(
        result.suggestions[0].message,
        "prefer explicit JOIN syntax over comma-separated tables"
    );
}

#[test]
fn test_explicit_join_is_clean() {
    assert!(sqlite("SELECT * FROM t1 JOIN t2 ON t1.id = t2.id").is_valid);
}

#[test]
fn test_findings_pair_errors_with_suggestions() {
    let result = sqlite("SELECT a, b FROM t1, t2 GROUP BY a ORDER BY c");

    assert_eq!(result.outcome, Outcome::StructuralMistake);
    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.suggestions.len(), 3);
    assert_eq!(result.errors[0].message, "implicit join syntax used");
    assert_eq!(
        result.suggestions[2].message,
        "ensure ORDER BY columns are present in SELECT or use positional index"
    );
}

#[test]
fn test_empty_input() {
    for sql in ["", "   ", "\n\t "] {
        let result = sqlite(sql);

        assert!(!result.is_valid);
        assert_eq!(result.outcome, Outcome::EmptyInput);
        assert_eq!(result.errors[0].message, "SQL statement is empty");
        assert_eq!(result.suggestions[0].message, "Enter a valid SQL statement");
    }
}

#[test]
fn test_is_valid_matches_errors() {
    let statements = [
        "SELECT id FROM users",
        "SELECT a, b;",
        "SELCT * FROM users",
        "SELECT * FROM t1, t2",
        "",
        "SELECT 1"
    ];
    for sql in statements {
        let result = sqlite(sql);
        assert_eq!(result.is_valid, result.errors.is_empty(), "{}", sql);
    }
}

#[test]
fn test_check_is_idempotent() {
    let checker = Checker::for_dialect(SqlDialect::SQLite);
    for sql in ["SELCT * FROM users", "SELECT * FROM t1, t2", "SELECT id FROM users"] {
        assert_eq!(checker.check(sql), checker.check(sql));
    }
}

#[test]
fn test_dialects_accept_plain_select() {
    let dialects = [
        SqlDialect::Generic,
        SqlDialect::PostgreSQL,
        SqlDialect::MySQL,
        SqlDialect::MsSql,
        SqlDialect::Snowflake
    ];
    for dialect in dialects {
        assert!(check("SELECT id FROM users", dialect).is_valid, "{}", dialect);
    }
}

#[test]
fn test_suggestions_disabled() {
    let config = EngineConfig {
        suggest_fixes: false,
        ..EngineConfig::default()
    };
    let checker = Checker::new(config).unwrap();
    let result = checker.check("SELCT * FROM users");

    assert_eq!(result.errors.len(), 1);
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_suggestions_disabled_keeps_mistake_suggestions() {
    let config = EngineConfig {
        suggest_fixes: false,
        ..EngineConfig::default()
    };
    let result = Checker::new(config).unwrap().check("SELECT * FROM t1, t2");

    assert_eq!(result.suggestions.len(), 1);
}

#[test]
fn test_raw_error_format() {
    let config = EngineConfig {
        error_format: ErrorFormat::Raw,
        ..EngineConfig::default()
    };
    let result = Checker::new(config).unwrap().check("SELCT * FROM users");

    assert!(result.errors[0].message.starts_with("Syntax error: Expected"));
    assert!(result.errors[0].message.contains("SELCT"));
}

#[test]
fn test_disabled_rules() {
    let config = EngineConfig {
        disabled_rules: vec!["MISTAKE002".to_string()],
        ..EngineConfig::default()
    };
    let result = Checker::new(config).unwrap().check("SELECT * FROM t1, t2");

    assert!(result.is_valid);
}

#[test]
fn test_unknown_disabled_rule_is_rejected() {
    let config = EngineConfig {
        disabled_rules: vec!["MISTAKE999".to_string()],
        ..EngineConfig::default()
    };

    assert!(Checker::new(config).is_err());
}

#[test]
fn test_error_format_from_str() {
    assert_eq!("RAW".parse::<ErrorFormat>().unwrap(), ErrorFormat::Raw);
    assert_eq!("friendly".parse::<ErrorFormat>().unwrap(), ErrorFormat::Friendly);
    assert!("verbose".parse::<ErrorFormat>().is_err());
}

#[test]
fn test_custom_grammar_unknown_table() {
    let checker = Checker::for_dialect(SqlDialect::SQLite)
        .with_grammar(Box::new(FixedFailure("no such table: foo", None)));
    let result = checker.check("SELECT * FROM foo");

    assert_eq!(result.errors[0].message, "Error: table 'foo' does not exist");
    assert_eq!(
        result.suggestions[0].message,
        "Check that table 'foo' is spelled correctly or exists in the schema"
    );
}

#[test]
fn test_custom_grammar_snippet() {
    let checker = Checker::for_dialect(SqlDialect::SQLite)
        .with_grammar(Box::new(FixedFailure("something odd", Some(15))));
    let result = checker.check("SELECT * FROM users WHERE");

    assert_eq!(
        result.errors[0].message,
        "Syntax error near:\nT * FROM users WHERE\n          ^"
    );
    assert_eq!(
        result.suggestions[0].message,
        "Check SQL syntax: verify keyword spelling and clause completeness"
    );
}

#[test]
fn test_panic_becomes_internal_failure() {
    let checker = Checker::for_dialect(SqlDialect::SQLite).with_grammar(Box::new(PanickingGrammar));
    let result = checker.check("SELECT 1");

    assert!(!result.is_valid);
    assert_eq!(result.outcome, Outcome::InternalFailure);
    assert_eq!(result.errors[0].message, "internal error while analyzing query");
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_empty_input_skips_grammar() {
    let checker = Checker::for_dialect(SqlDialect::SQLite).with_grammar(Box::new(PanickingGrammar));

    assert_eq!(checker.check("  ").outcome, Outcome::EmptyInput);
}

#[test]
fn test_checker_shared_across_threads() {
    let checker = &Checker::for_dialect(SqlDialect::SQLite);
    let statements = ["SELECT id FROM users", "SELCT * FROM users", "SELECT * FROM t1, t2"];

    let results: Vec<CheckResult> = thread::scope(|scope| {
        let handles: Vec<_> = statements
            .iter()
            .map(|&sql| scope.spawn(move || checker.check(sql)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results[0].is_valid);
    assert_eq!(results[1].outcome, Outcome::SyntaxError);
    assert_eq!(results[2].outcome, Outcome::StructuralMistake);
}

#[test]
fn test_result_serializes_outcome_in_snake_case() {
    let json = serde_json::to_string(&sqlite("SELECT * FROM t1, t2")).unwrap();

    assert!(json.contains("\"outcome\":\"structural_mistake\""));
    assert!(json.contains("\"is_valid\":false"));
}

#[test]
fn test_commented_statements_are_valid() {
    let statements = [
        "SELECT *\nFROM users -- main table, see docs\nWHERE id = 1",
        "SELECT * FROM t WHERE a = 1 -- see a, b\n",
        "SELECT a, -- the key\n b FROM t GROUP BY a, b",
        "SELECT DISTINCT\n    dept\nFROM staff\nGROUP BY dept"
    ];
    for sql in statements {
        let result = sqlite(sql);
        assert!(result.is_valid, "{}: {:?}", sql, result.errors);
    }
}

use std::io::Write;

use sql_checker::{
    Outcome,
    app::{
        CheckParams, build_checker, calculate_exit_code, check_script, convert_dialect,
        read_sql_input, run_check, run_rules
    },
    checker::ErrorFormat,
    cli::{Dialect, Format},
    config::Config,
    parser::SqlDialect
};
use tempfile::NamedTempFile;

fn params(input: &str) -> CheckParams {
    CheckParams {
        input:         input.to_string(),
        dialect:       None,
        output_format: Format::Text,
        no_suggest:    false,
        raw_errors:    false,
        disable:       Vec::new(),
        no_color:      true
    }
}

fn sql_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_convert_dialect() {
    assert_eq!(convert_dialect(Dialect::Sqlite), SqlDialect::SQLite);
    assert_eq!(convert_dialect(Dialect::Postgresql), SqlDialect::PostgreSQL);
    assert_eq!(convert_dialect(Dialect::Mssql), SqlDialect::MsSql);
}

#[test]
fn test_build_checker_applies_overrides() {
    let mut p = params("-");
    p.dialect = Some(Dialect::Mysql);
    p.no_suggest = true;
    p.raw_errors = true;
    p.disable = vec!["MISTAKE002".to_string()];

    let checker = build_checker(&p, &Config::default()).unwrap();
    let config = checker.config();

    assert_eq!(config.dialect, SqlDialect::MySQL);
    assert!(!config.suggest_fixes);
    assert_eq!(config.error_format, ErrorFormat::Raw);
    assert_eq!(config.disabled_rules, ["MISTAKE002"]);
}

#[test]
fn test_build_checker_merges_disabled_rules() {
    let config = Config::parse("[rules]\ndisabled = [\"MISTAKE001\"]\n").unwrap();
    let mut p = params("-");
    p.disable = vec!["MISTAKE003".to_string()];

    let checker = build_checker(&p, &config).unwrap();

    assert_eq!(checker.config().disabled_rules, ["MISTAKE001", "MISTAKE003"]);
}

#[test]
fn test_build_checker_rejects_unknown_rule() {
    let mut p = params("-");
    p.disable = vec!["NOPE".to_string()];

    assert!(build_checker(&p, &Config::default()).is_err());
}

#[test]
fn test_check_script_keeps_order() {
    let checker = build_checker(&params("-"), &Config::default()).unwrap();
    let report = check_script(
        &checker,
        "SELECT id FROM users;\nSELCT * FROM users;\nSELECT * FROM t1, t2;"
    );
    let outcomes: Vec<Outcome> = report.statements.iter().map(|s| s.result.outcome).collect();

    assert_eq!(
        outcomes,
        [Outcome::Clean, Outcome::SyntaxError, Outcome::StructuralMistake]
    );
    assert_eq!(report.statements[2].index, 3);
    assert_eq!(report.statements[2].line, 3);
    assert_eq!(calculate_exit_code(&report), 1);
}

#[test]
fn test_check_empty_script() {
    let checker = build_checker(&params("-"), &Config::default()).unwrap();
    let report = check_script(&checker, "  \n ");

    assert_eq!(report.statements.len(), 1);
    assert_eq!(report.statements[0].result.outcome, Outcome::EmptyInput);
    assert_eq!(calculate_exit_code(&report), 1);
}

#[test]
fn test_exit_code_all_valid() {
    let checker = build_checker(&params("-"), &Config::default()).unwrap();
    let report = check_script(&checker, "SELECT 1; SELECT id FROM users");

    assert_eq!(calculate_exit_code(&report), 0);
}

#[test]
fn test_read_sql_input_file() {
    let file = sql_file("SELECT 1;");

    assert_eq!(read_sql_input(file.path().to_str().unwrap()).unwrap(), "SELECT 1;");
}

#[test]
fn test_read_sql_input_missing_file() {
    assert!(read_sql_input("/nonexistent/queries.sql").is_err());
}

#[test]
fn test_run_check_valid_file() {
    let file = sql_file("SELECT id FROM users;");
    let result = run_check(params(file.path().to_str().unwrap()), Config::default()).unwrap();

    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("OK"));
}

#[test]
fn test_run_check_invalid_file() {
    let file = sql_file("SELECT a, b;");
    let result = run_check(params(file.path().to_str().unwrap()), Config::default()).unwrap();

    assert_eq!(result.exit_code, 1);
    assert!(result.output.contains("missing a FROM clause"));
}

#[test]
fn test_run_check_json() {
    let file = sql_file("SELECT * FROM t1, t2");
    let mut p = params(file.path().to_str().unwrap());
    p.output_format = Format::Json;
    let result = run_check(p, Config::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();

    assert_eq!(value["statements"][0]["outcome"], "structural_mistake");
}

#[test]
fn test_run_rules() {
    let result = run_rules(Format::Text).unwrap();

    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("MISTAKE003"));
}

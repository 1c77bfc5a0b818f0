//! Application logic for the SQL Checker CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing.

use std::{
    fs::read_to_string,
    io::{self, Read}
};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    batch::split_statements,
    checker::{Checker, ErrorFormat},
    cli::{Dialect, Format},
    config::Config,
    error::{AppResult, file_read_error},
    output::{
        CheckReport, OutputFormat, OutputOptions, StatementReport, format_report, format_rules
    },
    parser::SqlDialect,
    rules::rule_catalog
};

/// Parameters for the check command
#[derive(Debug, Clone)]
pub struct CheckParams {
    pub input:         String,
    pub dialect:       Option<Dialect>,
    pub output_format: Format,
    pub no_suggest:    bool,
    pub raw_errors:    bool,
    pub disable:       Vec<String>,
    pub no_color:      bool
}

/// Rendered output and the process exit code it implies
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub output:    String
}

/// Convert CLI dialect to internal SqlDialect
pub fn convert_dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::Generic => SqlDialect::Generic,
        Dialect::Sqlite => SqlDialect::SQLite,
        Dialect::Postgresql => SqlDialect::PostgreSQL,
        Dialect::Mysql => SqlDialect::MySQL,
        Dialect::Clickhouse => SqlDialect::ClickHouse,
        Dialect::Mssql => SqlDialect::MsSql,
        Dialect::Bigquery => SqlDialect::BigQuery,
        Dialect::Snowflake => SqlDialect::Snowflake
    }
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Create output options from parameters
pub fn create_output_options(format: Format, no_color: bool) -> OutputOptions {
    OutputOptions {
        format:  convert_format(format),
        colored: !no_color
    }
}

/// Read SQL from file or stdin
pub fn read_sql_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Build a checker from configuration with command-line overrides applied
pub fn build_checker(params: &CheckParams, config: &Config) -> AppResult<Checker> {
    let mut engine = config.engine_config()?;
    if let Some(dialect) = params.dialect {
        engine.dialect = convert_dialect(dialect);
    }
    if params.no_suggest {
        engine.suggest_fixes = false;
    }
    if params.raw_errors {
        engine.error_format = ErrorFormat::Raw;
    }
    engine.disabled_rules.extend(params.disable.iter().cloned());
    Checker::new(engine)
}

/// Check every statement of `script` in parallel, keeping script order.
///
/// A script without any statement is checked as a single empty statement.
pub fn check_script(checker: &Checker, script: &str) -> CheckReport {
    let statements = split_statements(script);
    if statements.is_empty() {
        return CheckReport::new(vec![StatementReport {
            index:  1,
            line:   1,
            sql:    String::new(),
            result: checker.check("")
        }]);
    }
    debug!(
        count = statements.len(),
        dialect = %checker.config().dialect,
        "checking statements"
    );
    let reports = statements
        .par_iter()
        .enumerate()
        .map(|(idx, statement)| StatementReport {
            index:  idx + 1,
            line:   statement.line,
            sql:    statement.sql.to_string(),
            result: checker.check(statement.sql)
        })
        .collect();
    CheckReport::new(reports)
}

/// Calculate exit code from a report
pub fn calculate_exit_code(report: &CheckReport) -> i32 {
    if report.all_valid() { 0 } else { 1 }
}

/// Run the check command
pub fn run_check(params: CheckParams, config: Config) -> AppResult<CommandResult> {
    let checker = build_checker(&params, &config)?;
    let script = read_sql_input(&params.input)?;
    let report = check_script(&checker, &script);
    let output_opts = create_output_options(params.output_format, params.no_color);
    let output = format_report(&report, &output_opts)?;
    Ok(CommandResult {
        exit_code: calculate_exit_code(&report),
        output
    })
}

/// Run the rules command
pub fn run_rules(output_format: Format) -> AppResult<CommandResult> {
    let output_opts = create_output_options(output_format, false);
    let output = format_rules(&rule_catalog(), &output_opts)?;
    Ok(CommandResult {
        exit_code: 0,
        output
    })
}

//! Delegated grammar parsing.
//!
//! The engine never parses SQL itself. It asks a [`Grammar`] whether a
//! statement is well-formed and receives a [`ParseFailure`] on rejection. The
//! translation and suggestion logic matches on the failure text, so a grammar
//! must phrase its errors using these families:
//!
//! - `Expected: <what>, found: <token> [at Line: L, Column: C | at pos N]`
//! - `unexpected token: '<token>'`
//! - `missing FROM clause`
//! - `no such column: <name>` / `no such table: <name>`
//!
//! [`SqlParserGrammar`] adapts the `sqlparser` crate, whose messages already
//! follow the first family.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use sqlparser::{
    ast::{Expr, SelectItem, SetExpr, Statement},
    dialect::{
        BigQueryDialect, ClickHouseDialect, Dialect, GenericDialect, MsSqlDialect, MySqlDialect,
        PostgreSqlDialect, SQLiteDialect, SnowflakeDialect
    },
    parser::{Parser, ParserError}
};
use tracing::trace;

static POS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bat pos (\d+)").expect("valid regex"));

static LINE_COLUMN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Line:\s*(\d+),\s*Column:?\s*(\d+)").expect("valid regex")
});

/// SQL dialect for parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum SqlDialect {
    Generic,
    #[default]
    SQLite,
    PostgreSQL,
    MySQL,
    ClickHouse,
    MsSql,
    BigQuery,
    Snowflake
}

impl SqlDialect {
    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::ClickHouse => Box::new(ClickHouseDialect {}),
            Self::MsSql => Box::new(MsSqlDialect {}),
            Self::BigQuery => Box::new(BigQueryDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {})
        }
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "ansi" => Ok(Self::Generic),
            "sqlite" => Ok(Self::SQLite),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSQL),
            "mysql" => Ok(Self::MySQL),
            "clickhouse" => Ok(Self::ClickHouse),
            "mssql" | "tsql" => Ok(Self::MsSql),
            "bigquery" => Ok(Self::BigQuery),
            "snowflake" => Ok(Self::Snowflake),
            _ => Err(format!(
                "Unknown dialect: '{}'. Supported dialects: generic, sqlite, postgresql, mysql, \
                 clickhouse, mssql, bigquery, snowflake",
                s
            ))
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generic => "generic",
            Self::SQLite => "sqlite",
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::ClickHouse => "clickhouse",
            Self::MsSql => "mssql",
            Self::BigQuery => "bigquery",
            Self::Snowflake => "snowflake"
        };
        write!(f, "{}", name)
    }
}

/// Raw rejection reported by a [`Grammar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Parser message, without any library prefix
    pub message:  String,
    /// Character offset into the statement, when the parser reported one
    pub position: Option<usize>
}

impl ParseFailure {
    pub fn new(message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            message: message.into(),
            position
        }
    }

    /// Build a failure and derive its position from the message text.
    ///
    /// Understands `at pos N` (a character offset) and `Line: L, Column: C`
    /// (1-based, converted to an offset into `sql`).
    ///
    /// ```
    /// use sql_checker::parser::ParseFailure;
    ///
    /// let sql = "SELECT *\nFROM t WHER x";
    /// let failure = ParseFailure::locate("Expected: end of statement, found: x at Line: 2, Column: 13", sql);
    /// assert_eq!(failure.position, Some(21));
    /// ```
    pub fn locate(message: impl Into<String>, sql: &str) -> Self {
        let message = message.into();
        let position = POS_REGEX
            .captures(&message)
            .and_then(|caps| caps[1].parse().ok())
            .or_else(|| {
                let caps = LINE_COLUMN_REGEX.captures(&message)?;
                let line: usize = caps[1].parse().ok()?;
                let column: usize = caps[2].parse().ok()?;
                line_column_offset(sql, line, column)
            });
        Self {
            message,
            position
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A parser the engine delegates syntax checking to.
///
/// Implementations must be reentrant; the engine may call `parse` from
/// several threads at once.
pub trait Grammar: Send + Sync {
    /// Accept the statement or describe why it was rejected.
    fn parse(&self, sql: &str) -> Result<(), ParseFailure>;
}

/// [`Grammar`] backed by `sqlparser`.
///
/// Besides grammar errors it rejects a SELECT whose projection reads columns
/// while no FROM clause is present (`SELECT a, b`), reported as
/// `missing FROM clause`. A SELECT of literals only (`SELECT 1`) is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlParserGrammar {
    dialect: SqlDialect
}

impl SqlParserGrammar {
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect
        }
    }
}

impl Grammar for SqlParserGrammar {
    fn parse(&self, sql: &str) -> Result<(), ParseFailure> {
        let parser_dialect = self.dialect.into_parser_dialect();
        let statements = Parser::parse_sql(parser_dialect.as_ref(), sql).map_err(|err| {
            let message = match err {
                ParserError::TokenizerError(msg) | ParserError::ParserError(msg) => msg,
                ParserError::RecursionLimitExceeded => String::from("recursion limit exceeded")
            };
            trace!(dialect = %self.dialect, %message, "sqlparser rejected statement");
            ParseFailure::locate(message, sql)
        })?;
        if statements.iter().any(statement_missing_from) {
            return Err(ParseFailure::new("missing FROM clause", None));
        }
        Ok(())
    }
}

fn statement_missing_from(statement: &Statement) -> bool {
    match statement {
        Statement::Query(query) => set_expr_missing_from(&query.body),
        _ => false
    }
}

fn set_expr_missing_from(body: &SetExpr) -> bool {
    match body {
        SetExpr::Select(select) => {
            select.from.is_empty() && select.projection.iter().any(projects_column)
        }
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => set_expr_missing_from(left) || set_expr_missing_from(right),
        SetExpr::Query(query) => set_expr_missing_from(&query.body),
        _ => false
    }
}

fn projects_column(item: &SelectItem) -> bool {
    match item {
        SelectItem::UnnamedExpr(expr)
        | SelectItem::ExprWithAlias {
            expr, ..
        } => references_column(expr),
        _ => true
    }
}

fn references_column(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) | Expr::CompoundIdentifier(_) => true,
        Expr::BinaryOp {
            left,
            right,
            ..
        } => references_column(left) || references_column(right),
        Expr::UnaryOp {
            expr, ..
        }
        | Expr::Nested(expr) => references_column(expr),
        _ => false
    }
}

/// Convert a 1-based line/column pair into a character offset.
fn line_column_offset(sql: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }
    let mut offset = 0;
    for (idx, text) in sql.split('\n').enumerate() {
        if idx + 1 == line {
            let width = text.chars().count();
            return (column - 1 <= width).then_some(offset + column - 1);
        }
        offset += text.chars().count() + 1;
    }
    None
}

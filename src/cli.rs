use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Checker - Find syntax errors and common mistakes in SQL statements
#[derive(Parser, Debug)]
#[command(name = "sql-checker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the statements of a SQL file
    Check {
        /// Path to SQL file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// SQL dialect for parsing (overrides configuration)
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Do not attach fix suggestions to syntax errors
        #[arg(long)]
        no_suggest: bool,

        /// Report the parser's own error messages
        #[arg(long)]
        raw_errors: bool,

        /// Disable a mistake rule by ID (repeatable)
        #[arg(long = "disable", value_name = "RULE_ID")]
        disable: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },
    /// List the built-in mistake rules
    Rules {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    Generic,
    Sqlite,
    Postgresql,
    Mysql,
    Clickhouse,
    Mssql,
    Bigquery,
    Snowflake
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}

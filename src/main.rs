//! # SQL Checker
//!
//! Syntax checking, friendly error messages, fix suggestions and common
//! mistake detection for SQL statements.
//!
//! # Quick Start
//!
//! ```bash
//! # Check a script
//! sql-checker check queries.sql
//!
//! # Read from stdin with a specific dialect
//! echo "SELCT * FROM users" | sql-checker check --dialect postgresql
//!
//! # Machine-readable output
//! sql-checker check queries.sql -f json
//!
//! # List the mistake rules
//! sql-checker rules
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Every statement is valid
//! - `1` - At least one statement has errors
//! - `2` - The tool itself failed (unreadable input, bad configuration)
//!
//! # Logging
//!
//! Logs go to stderr. `RUST_LOG` selects the filter; `--verbose` enables
//! debug output.

use std::process;

use clap::Parser;
use sql_checker::{
    app::{CheckParams, run_check, run_rules},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn run(cli: Cli) -> AppResult<i32> {
    let result = match cli.command {
        Commands::Check {
            input,
            dialect,
            output_format,
            no_suggest,
            raw_errors,
            disable,
            no_color
        } => {
            let config = Config::load()?;
            let params = CheckParams {
                input: input.display().to_string(),
                dialect,
                output_format,
                no_suggest,
                raw_errors,
                disable,
                no_color
            };
            run_check(params, config)?
        }
        Commands::Rules {
            output_format
        } => run_rules(output_format)?
    };
    println!("{}", result.output);
    Ok(result.exit_code)
}

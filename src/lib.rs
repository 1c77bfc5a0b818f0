//! # SQL Checker Library
//!
//! Diagnostics engine for SQL statements: syntax checking through a
//! delegated parser, friendly error messages, fix suggestions and detection
//! of common authoring mistakes.
//!
//! ```
//! use sql_checker::{check, parser::SqlDialect};
//!
//! let result = check("SELECT a, b;", SqlDialect::SQLite);
//! assert!(!result.is_valid);
//! assert!(result.suggestions[0].message.contains("FROM"));
//! ```

pub mod app;
pub mod batch;
pub mod checker;
pub mod clause;
pub mod cli;
pub mod config;
pub mod distance;
pub mod error;
pub mod keywords;
pub mod message;
pub mod output;
pub mod parser;
pub mod rules;
pub mod suggest;
pub mod translate;

pub use checker::{CheckResult, Checker, Diagnostic, EngineConfig, Outcome, Suggestion, check};
pub use masterror::{AppError, AppResult};

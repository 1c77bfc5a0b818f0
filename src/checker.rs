//! Statement checking entry point.
//!
//! A check runs in two stages. The statement is first handed to the
//! delegated [`Grammar`]; a rejection is translated into a diagnostic and,
//! when enabled, one fix suggestion. A statement the grammar accepts is then
//! run through the [`MistakeDetector`]. Empty input short-circuits before
//! either stage.
//!
//! ```text
//!  sql ──▶ empty? ──yes──▶ EmptyInput
//!            │no
//!            ▼
//!         Grammar ──reject──▶ translate + suggest ──▶ SyntaxError
//!            │accept
//!            ▼
//!      MistakeDetector ──findings──▶ StructuralMistake
//!            │none
//!            ▼
//!          Clean
//! ```
//!
//! Nothing in a check can fail the caller: a panic raised while analyzing is
//! caught here and reported as [`Outcome::InternalFailure`].

mod types;

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    str::FromStr
};

use tracing::{debug, error};
pub use types::{CheckResult, Diagnostic, Outcome, Suggestion};

use crate::{
    error::{AppResult, config_error},
    parser::{Grammar, ParseFailure, SqlDialect, SqlParserGrammar},
    rules::{MistakeDetector, rule_catalog},
    suggest::suggest,
    translate
};

/// How syntax errors are worded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorFormat {
    /// Rewritten into a plain-language message
    #[default]
    Friendly,
    /// The parser's own message
    Raw
}

impl FromStr for ErrorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "friendly" => Ok(Self::Friendly),
            "raw" => Ok(Self::Raw),
            _ => Err(format!(
                "Unknown error format: '{}'. Expected 'friendly' or 'raw'",
                s
            ))
        }
    }
}

impl fmt::Display for ErrorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Friendly => write!(f, "friendly"),
            Self::Raw => write!(f, "raw")
        }
    }
}

/// Settings for a [`Checker`], fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grammar used by the delegated parser
    pub dialect:        SqlDialect,
    /// Attach a fix suggestion to syntax errors
    pub suggest_fixes:  bool,
    pub error_format:   ErrorFormat,
    /// Mistake rule ids to skip
    pub disabled_rules: Vec<String>
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialect:        SqlDialect::default(),
            suggest_fixes:  true,
            error_format:   ErrorFormat::default(),
            disabled_rules: Vec::new()
        }
    }
}

impl EngineConfig {
    pub fn with_dialect(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Reject disabled rule ids that name no known rule.
    pub fn validate(&self) -> AppResult<()> {
        let catalog = rule_catalog();
        for id in &self.disabled_rules {
            if !catalog.iter().any(|info| info.id.eq_ignore_ascii_case(id)) {
                return Err(config_error(format!("Unknown rule id '{}'", id)));
            }
        }
        Ok(())
    }
}

/// Checks SQL statements.
///
/// Holds no per-call state, so one checker can serve any number of threads.
///
/// # Example
///
/// ```
/// use sql_checker::checker::{Checker, EngineConfig, Outcome};
///
/// let checker = Checker::new(EngineConfig::default()).unwrap();
///
/// let result = checker.check("SELECT id FROM users");
/// assert!(result.is_valid);
///
/// let result = checker.check("SELCT * FROM users");
/// assert_eq!(result.outcome, Outcome::SyntaxError);
/// assert!(result.suggestions[0].message.contains("SELECT"));
/// ```
pub struct Checker {
    config:   EngineConfig,
    grammar:  Box<dyn Grammar>,
    detector: MistakeDetector
}

impl Checker {
    /// Build a checker, validating `config` once.
    pub fn new(config: EngineConfig) -> AppResult<Self> {
        config.validate()?;
        let detector = MistakeDetector::with_disabled(&config.disabled_rules);
        Ok(Self {
            grammar: Box::new(SqlParserGrammar::new(config.dialect)),
            config,
            detector
        })
    }

    /// Checker with default settings for `dialect`
    pub fn for_dialect(dialect: SqlDialect) -> Self {
        Self {
            config:   EngineConfig::with_dialect(dialect),
            grammar:  Box::new(SqlParserGrammar::new(dialect)),
            detector: MistakeDetector::new()
        }
    }

    /// Replace the delegated grammar.
    pub fn with_grammar(mut self, grammar: Box<dyn Grammar>) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check one statement.
    pub fn check(&self, sql: &str) -> CheckResult {
        if sql.trim().is_empty() {
            return CheckResult::empty_input();
        }
        panic::catch_unwind(AssertUnwindSafe(|| self.analyze(sql))).unwrap_or_else(|cause| {
            let reason = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            error!(%reason, "analysis panicked");
            CheckResult::internal_failure()
        })
    }

    fn analyze(&self, sql: &str) -> CheckResult {
        match self.grammar.parse(sql) {
            Err(failure) => self.syntax_error(&failure, sql),
            Ok(()) => {
                let findings = self.detector.detect(sql);
                if findings.is_empty() {
                    return CheckResult::clean();
                }
                let (errors, suggestions) = findings
                    .into_iter()
                    .map(|finding| (finding.error, finding.suggestion))
                    .unzip();
                CheckResult::invalid(Outcome::StructuralMistake, errors, suggestions)
            }
        }
    }

    fn syntax_error(&self, failure: &ParseFailure, sql: &str) -> CheckResult {
        debug!(message = %failure, position = ?failure.position, "statement rejected");
        let diagnostic = match self.config.error_format {
            ErrorFormat::Friendly => translate::translate(failure, sql),
            ErrorFormat::Raw => translate::raw(failure)
        };
        let suggestions = if self.config.suggest_fixes {
            suggest(failure, sql).into_iter().collect()
        } else {
            Vec::new()
        };
        CheckResult::invalid(Outcome::SyntaxError, vec![diagnostic], suggestions)
    }
}

/// Check one statement with default settings for `dialect`.
///
/// ```
/// use sql_checker::{check, parser::SqlDialect};
///
/// let result = check("SELECT * FROM t1, t2", SqlDialect::SQLite);
/// assert!(!result.is_valid);
/// assert_eq!(result.errors[0].message, "implicit join syntax used");
/// ```
pub fn check(sql: &str, dialect: SqlDialect) -> CheckResult {
    Checker::for_dialect(dialect).check(sql)
}

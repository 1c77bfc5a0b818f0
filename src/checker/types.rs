//! Result types produced by the checker.
//!
//! - [`Diagnostic`] - A single reported problem
//! - [`Suggestion`] - A single proposed remedy
//! - [`Outcome`] - Which path produced the result
//! - [`CheckResult`] - Complete result of checking one statement

use std::fmt;

use serde::Serialize;

/// One user-facing problem line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into()
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// One user-facing remedy line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: String
}

impl Suggestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into()
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// How a check concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Parsed and no mistake rule fired
    Clean,
    /// Input was empty or whitespace only
    EmptyInput,
    /// The grammar rejected the statement
    SyntaxError,
    /// Parsed, but at least one mistake rule fired
    StructuralMistake,
    /// The analysis itself failed unexpectedly
    InternalFailure
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::EmptyInput => write!(f, "empty input"),
            Self::SyntaxError => write!(f, "syntax error"),
            Self::StructuralMistake => write!(f, "structural mistake"),
            Self::InternalFailure => write!(f, "internal failure")
        }
    }
}

/// Result of checking a single statement.
///
/// `is_valid` is always `errors.is_empty()`. Mistake findings keep their
/// error and suggestion at the same index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub is_valid:    bool,
    pub outcome:     Outcome,
    pub errors:      Vec<Diagnostic>,
    pub suggestions: Vec<Suggestion>
}

impl CheckResult {
    pub fn clean() -> Self {
        Self {
            is_valid:    true,
            outcome:     Outcome::Clean,
            errors:      Vec::new(),
            suggestions: Vec::new()
        }
    }

    /// Result carrying problems; `errors` must not be empty.
    pub fn invalid(
        outcome: Outcome,
        errors: Vec<Diagnostic>,
        suggestions: Vec<Suggestion>
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            outcome,
            errors,
            suggestions
        }
    }

    pub fn empty_input() -> Self {
        Self::invalid(
            Outcome::EmptyInput,
            vec![Diagnostic::new("SQL statement is empty")],
            vec![Suggestion::new("Enter a valid SQL statement")]
        )
    }

    pub fn internal_failure() -> Self {
        Self::invalid(
            Outcome::InternalFailure,
            vec![Diagnostic::new("internal error while analyzing query")],
            Vec::new()
        )
    }
}

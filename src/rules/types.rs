//! Type definitions for the mistake rules.
//!
//! - [`RuleInfo`] - Rule identity for listing and configuration
//! - [`Finding`] - A fired rule with its diagnostic and suggestion
//! - [`StatementContext`] - Read access to one statement's clauses

use serde::Serialize;

use crate::{
    checker::{Diagnostic, Suggestion},
    clause::{Clause, ClauseExtractor}
};

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., "MISTAKE001")
    pub id:          &'static str,
    /// Human-readable rule name
    pub name:        &'static str,
    /// One-line description of what the rule looks for
    pub description: &'static str
}

/// A single mistake found in a statement.
///
/// Every finding carries exactly one diagnostic and one suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id:    &'static str,
    pub error:      Diagnostic,
    pub suggestion: Suggestion
}

impl Finding {
    pub fn new(
        info: RuleInfo,
        error: impl Into<String>,
        suggestion: impl Into<String>
    ) -> Self {
        Self {
            rule_id:    info.id,
            error:      Diagnostic::new(error),
            suggestion: Suggestion::new(suggestion)
        }
    }
}

/// Statement text plus the extractor used to read its clauses.
#[derive(Clone, Copy)]
pub struct StatementContext<'a> {
    pub sql: &'a str,
    clauses: &'a dyn ClauseExtractor
}

impl<'a> StatementContext<'a> {
    pub fn new(sql: &'a str, clauses: &'a dyn ClauseExtractor) -> Self {
        Self {
            sql,
            clauses
        }
    }

    /// Body of `clause`, if the statement has one
    pub fn clause(&self, clause: Clause) -> Option<&'a str> {
        self.clauses.clause(self.sql, clause)
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.clauses.contains_keyword(self.sql, keyword)
    }

    /// SELECT list without a leading `DISTINCT` or `ALL`
    pub fn projection(&self) -> Option<&'a str> {
        let select = self.clause(Clause::Select)?;
        let stripped = select
            .split_once(char::is_whitespace)
            .filter(|(head, _)| {
                head.eq_ignore_ascii_case("DISTINCT") || head.eq_ignore_ascii_case("ALL")
            })
            .map(|(_, rest)| rest.trim_start());
        Some(stripped.unwrap_or(select))
    }
}

//! Common mistake detection for syntactically valid statements.
//!
//! A grammar accepts plenty of SQL that is almost certainly not what the
//! author meant. Each rule here looks for one such pattern in the statement
//! text and reports at most one [`Finding`]: the first violation it sees.
//! Rules prefer missing a problem over reporting a false one.
//!
//! # Rules
//!
//! | ID | Name | Looks for |
//! |----|------|-----------|
//! | MISTAKE001 | Comma in WHERE | `WHERE a = 1, b = 2` |
//! | MISTAKE002 | Implicit join | `FROM t1, t2` without any JOIN |
//! | MISTAKE003 | Ungrouped column | SELECT item that is neither aggregated nor grouped |
//! | MISTAKE004 | Dangling ORDER BY | ORDER BY key absent from the SELECT list |
//!
//! # Configuration
//!
//! ```toml
//! [rules]
//! disabled = ["MISTAKE004"]
//! ```

mod grouping;
mod joins;
mod types;

use rayon::prelude::*;
use tracing::debug;
pub use types::{Finding, RuleInfo, StatementContext};

use crate::clause::{ClauseExtractor, LexicalExtractor};

/// Trait for implementing mistake rules.
///
/// Rules are stateless and must be `Send + Sync`; the detector runs them in
/// parallel.
pub trait MistakeRule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Inspects a statement and returns the first violation, if any.
    fn check(&self, statement: &StatementContext<'_>) -> Option<Finding>;
}

/// Every built-in rule, in reporting order.
pub fn all_rules() -> Vec<Box<dyn MistakeRule>> {
    vec![
        Box::new(joins::CommaInWhere),
        Box::new(joins::ImplicitJoin),
        Box::new(grouping::UngroupedColumn),
        Box::new(grouping::DanglingOrderBy),
    ]
}

/// Metadata of every built-in rule
pub fn rule_catalog() -> Vec<RuleInfo> {
    all_rules().iter().map(|rule| rule.info()).collect()
}

/// Runs the enabled rules over a statement.
///
/// # Example
///
/// ```
/// use sql_checker::rules::MistakeDetector;
///
/// let detector = MistakeDetector::new();
/// let findings = detector.detect("SELECT * FROM t1, t2");
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].rule_id, "MISTAKE002");
/// ```
pub struct MistakeDetector {
    rules:   Vec<Box<dyn MistakeRule>>,
    clauses: Box<dyn ClauseExtractor>
}

impl Default for MistakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MistakeDetector {
    /// Detector with every built-in rule
    pub fn new() -> Self {
        Self::with_disabled(&[])
    }

    /// Detector without the rules whose ids appear in `disabled`
    /// (case-insensitive).
    pub fn with_disabled(disabled: &[String]) -> Self {
        let rules = all_rules()
            .into_iter()
            .filter(|r| !disabled.iter().any(|d| d.eq_ignore_ascii_case(r.info().id)))
            .collect();
        Self {
            rules,
            clauses: Box::new(LexicalExtractor)
        }
    }

    /// Replace the clause extractor the rules read through.
    pub fn with_extractor(mut self, clauses: Box<dyn ClauseExtractor>) -> Self {
        self.clauses = clauses;
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run every enabled rule; findings follow rule order.
    pub fn detect(&self, sql: &str) -> Vec<Finding> {
        let statement = StatementContext::new(sql, self.clauses.as_ref());
        let findings: Vec<Finding> = self
            .rules
            .par_iter()
            .filter_map(|rule| rule.check(&statement))
            .collect();
        for finding in &findings {
            debug!(rule = finding.rule_id, message = %finding.error, "mistake rule fired");
        }
        findings
    }
}

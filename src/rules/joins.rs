use super::{Finding, MistakeRule, RuleInfo, StatementContext};
use crate::clause::{Clause, has_top_level_comma, split_from_list};

/// Commas used to chain WHERE predicates
pub struct CommaInWhere;

impl MistakeRule for CommaInWhere {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "MISTAKE001",
            name:        "Comma in WHERE",
            description: "WHERE conditions separated by commas instead of AND/OR"
        }
    }

    fn check(&self, statement: &StatementContext<'_>) -> Option<Finding> {
        let body = statement.clause(Clause::Where)?;
        has_top_level_comma(body).then(|| {
            Finding::new(
                self.info(),
                "comma usage in WHERE clause may be incorrect",
                "conditions in WHERE should be joined with AND or OR, not commas"
            )
        })
    }
}

/// Comma-separated tables in FROM without any JOIN
pub struct ImplicitJoin;

impl MistakeRule for ImplicitJoin {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "MISTAKE002",
            name:        "Implicit join",
            description: "Tables listed with commas in FROM instead of explicit JOIN"
        }
    }

    fn check(&self, statement: &StatementContext<'_>) -> Option<Finding> {
        let body = statement.clause(Clause::From)?;
        if statement.has_keyword("JOIN") || split_from_list(body).len() < 2 {
            return None;
        }
        Some(Finding::new(
            self.info(),
            "implicit join syntax used",
            "prefer explicit JOIN syntax over comma-separated tables"
        ))
    }
}

use std::sync::LazyLock;

use regex::Regex;

use super::{Finding, MistakeRule, RuleInfo, StatementContext};
use crate::clause::{Clause, clean_identifier, split_top_level};

static AGGREGATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(COUNT|SUM|AVG|MIN|MAX)\s*\(").expect("valid regex")
});

static SORT_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s+(?:ASC|DESC))?(?:\s+NULLS\s+(?:FIRST|LAST))?\s*$")
        .expect("valid regex")
});

/// Non-aggregated SELECT item missing from GROUP BY
pub struct UngroupedColumn;

impl MistakeRule for UngroupedColumn {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "MISTAKE003",
            name:        "Ungrouped column",
            description: "Non-aggregated SELECT item that does not appear in GROUP BY"
        }
    }

    fn check(&self, statement: &StatementContext<'_>) -> Option<Finding> {
        let group_by = statement.clause(Clause::GroupBy)?.to_lowercase();
        let projection = statement.projection()?;
        split_top_level(projection)
            .into_iter()
            .filter(|item| !is_aggregate(item) && !is_wildcard(item) && !is_literal(item))
            .find(|item| {
                let name = clean_identifier(item);
                !name.is_empty() && !group_by.contains(&name.to_lowercase())
            })
            .map(|item| {
                Finding::new(
                    self.info(),
                    format!("'{}' may need to be included in the GROUP BY clause", item),
                    "non-aggregated columns should appear in GROUP BY"
                )
            })
    }
}

/// ORDER BY key that the SELECT list does not mention
pub struct DanglingOrderBy;

impl MistakeRule for DanglingOrderBy {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "MISTAKE004",
            name:        "Dangling ORDER BY",
            description: "ORDER BY column that does not appear in the SELECT list"
        }
    }

    fn check(&self, statement: &StatementContext<'_>) -> Option<Finding> {
        let order_by = statement.clause(Clause::OrderBy)?;
        let projection = statement.projection()?;
        if is_wildcard(projection) {
            return None;
        }
        let select_text = projection.to_lowercase();
        split_top_level(order_by)
            .into_iter()
            .map(|item| SORT_SUFFIX_REGEX.replace(item, "").into_owned())
            .filter(|column| !column.is_empty() && !column.chars().all(|c| c.is_ascii_digit()))
            .find(|column| {
                let bare = clean_identifier(column).to_lowercase();
                !select_text.contains(&column.to_lowercase())
                    && (bare.is_empty() || !select_text.contains(&bare))
            })
            .map(|column| {
                Finding::new(
                    self.info(),
                    format!("'{}' in ORDER BY may not be in the SELECT list", column),
                    "ensure ORDER BY columns are present in SELECT or use positional index"
                )
            })
    }
}

fn is_aggregate(item: &str) -> bool {
    AGGREGATE_REGEX.is_match(item)
}

fn is_wildcard(item: &str) -> bool {
    let item = item.trim();
    item == "*" || item.ends_with(".*")
}

fn is_literal(item: &str) -> bool {
    let head = item.split_whitespace().next().unwrap_or("");
    head.starts_with('\'') || head.parse::<f64>().is_ok() || head.eq_ignore_ascii_case("null")
}

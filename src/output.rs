//! Rendering check results.
//!
//! Text output lists each statement with its errors and suggestions as
//! indented bullets; JSON and YAML serialize the same report structure.

use colored::Colorize;
use serde::Serialize;

use crate::{
    checker::CheckResult,
    error::{AppResult, output_error},
    rules::RuleInfo
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Result of one statement of a script
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    /// 1-based position of the statement in the script
    pub index:  usize,
    /// Line on which the statement starts
    pub line:   usize,
    pub sql:    String,
    #[serde(flatten)]
    pub result: CheckResult
}

/// Results for a whole script
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub statements: Vec<StatementReport>
}

impl CheckReport {
    pub fn new(statements: Vec<StatementReport>) -> Self {
        Self {
            statements
        }
    }

    pub fn invalid_count(&self) -> usize {
        self.statements
            .iter()
            .filter(|s| !s.result.is_valid)
            .count()
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}

/// Format a check report based on output options
pub fn format_report(report: &CheckReport, opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| output_error("JSON", e))
        }
        OutputFormat::Yaml => serde_yaml::to_string(report).map_err(|e| output_error("YAML", e)),
        OutputFormat::Text => Ok(format_text_report(report, opts))
    }
}

/// Format the rule catalog based on output options
pub fn format_rules(rules: &[RuleInfo], opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(rules).map_err(|e| output_error("JSON", e))
        }
        OutputFormat::Yaml => serde_yaml::to_string(rules).map_err(|e| output_error("YAML", e)),
        OutputFormat::Text => {
            let mut output = String::new();
            for rule in rules {
                let id = if opts.colored {
                    rule.id.cyan().bold().to_string()
                } else {
                    rule.id.to_string()
                };
                output.push_str(&format!("{}  {}\n    {}\n", id, rule.name, rule.description));
            }
            Ok(output)
        }
    }
}

fn format_text_report(report: &CheckReport, opts: &OutputOptions) -> String {
    let mut output = String::new();

    for statement in &report.statements {
        let header = format!("Statement #{} (line {}):", statement.index, statement.line);
        if opts.colored {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');
        push_indented(&mut output, "  ", &statement.sql);

        let result = &statement.result;
        if result.is_valid {
            let ok = if opts.colored { "OK".green().to_string() } else { "OK".to_string() };
            output.push_str(&format!("  {}\n", ok));
        } else {
            let label = if opts.colored {
                "Errors:".red().bold().to_string()
            } else {
                "Errors:".to_string()
            };
            output.push_str(&format!("  {}\n", label));
            for error in &result.errors {
                push_bullet(&mut output, &error.message);
            }
            if !result.suggestions.is_empty() {
                let label = if opts.colored {
                    "Suggestions:".yellow().bold().to_string()
                } else {
                    "Suggestions:".to_string()
                };
                output.push_str(&format!("  {}\n", label));
                for suggestion in &result.suggestions {
                    push_bullet(&mut output, &suggestion.message);
                }
            }
        }
        output.push('\n');
    }

    let summary = format!(
        "Checked {} statement(s): {} invalid",
        report.statements.len(),
        report.invalid_count()
    );
    if opts.colored && !report.all_valid() {
        output.push_str(&summary.red().to_string());
    } else if opts.colored {
        output.push_str(&summary.green().to_string());
    } else {
        output.push_str(&summary);
    }
    output
}

/// Bullet whose continuation lines stay under the bullet text
fn push_bullet(output: &mut String, message: &str) {
    let mut lines = message.lines();
    if let Some(first) = lines.next() {
        output.push_str(&format!("    - {}\n", first));
    }
    for line in lines {
        output.push_str(&format!("      {}\n", line));
    }
}

fn push_indented(output: &mut String, indent: &str, text: &str) {
    for line in text.lines() {
        output.push_str(indent);
        output.push_str(line);
        output.push('\n');
    }
}

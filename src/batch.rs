//! Splitting scripts into statements.
//!
//! The checker looks at one statement at a time; scripts are cut at `;`
//! outside quoted literals and comments before checking.

/// One statement of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStatement<'a> {
    /// 1-based line on which the statement text starts
    pub line: usize,
    /// Statement text, trimmed, without the terminating `;`
    pub sql:  &'a str
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quoted(char),
    LineComment,
    BlockComment
}

/// Split `script` into its non-empty statements.
///
/// # Example
///
/// ```
/// use sql_checker::batch::split_statements;
///
/// let statements = split_statements("SELECT ';' FROM t;\n-- done;\nSELECT 2");
/// let texts: Vec<&str> = statements.iter().map(|s| s.sql).collect();
///
/// assert_eq!(texts, ["SELECT ';' FROM t", "-- done;\nSELECT 2"]);
/// assert_eq!(statements[1].line, 2);
/// ```
pub fn split_statements(script: &str) -> Vec<ScriptStatement<'_>> {
    let mut statements = Vec::new();
    let mut state = State::Code;
    let mut start = 0;
    let mut prev = '\0';
    for (idx, c) in script.char_indices() {
        let opens_block = state == State::Code && prev == '/' && c == '*';
        let closes_block = state == State::BlockComment && prev == '*' && c == '/';
        state = match (state, c) {
            (State::Code, '\'' | '"' | '`') => State::Quoted(c),
            (State::Code, '-') if prev == '-' => State::LineComment,
            (State::Code, _) if opens_block => State::BlockComment,
            (State::Code, ';') => {
                push_statement(&mut statements, script, start, idx);
                start = idx + 1;
                State::Code
            }
            (State::Quoted(q), _) if c == q => State::Code,
            (State::LineComment, '\n') => State::Code,
            (State::BlockComment, _) if closes_block => State::Code,
            (current, _) => current
        };
        // A delimiter character never starts the next delimiter
        prev = if opens_block || closes_block { '\0' } else { c };
    }
    push_statement(&mut statements, script, start, script.len());
    statements
}

fn push_statement<'a>(
    statements: &mut Vec<ScriptStatement<'a>>,
    script: &'a str,
    start: usize,
    end: usize
) {
    let segment = &script[start..end];
    let sql = segment.trim();
    if sql.is_empty() {
        return;
    }
    let leading = segment.len() - segment.trim_start().len();
    let line = script[..start + leading].matches('\n').count() + 1;
    statements.push(ScriptStatement {
        line,
        sql
    });
}

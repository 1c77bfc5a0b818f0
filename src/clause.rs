//! Lexical clause extraction.
//!
//! Locates the text of a named clause (SELECT list, FROM, WHERE, GROUP BY,
//! ORDER BY) by scanning for clause keywords. The scan understands word
//! boundaries, quoted literals and comments, but not parentheses: a subquery
//! carrying its own `FROM` or `ORDER BY` can end the outer clause early.
//! Everything that reads clause text goes through [`ClauseExtractor`], so an
//! AST-backed extractor can replace [`LexicalExtractor`] without touching the
//! rules.
//!
//! # Example
//!
//! ```
//! use sql_checker::clause::{Clause, ClauseExtractor, LexicalExtractor};
//!
//! let sql = "SELECT id, name FROM users WHERE active = 1 ORDER BY name";
//! let clauses = LexicalExtractor;
//!
//! assert_eq!(clauses.clause(sql, Clause::Select), Some("id, name"));
//! assert_eq!(clauses.clause(sql, Clause::Where), Some("active = 1"));
//! ```

use smallvec::SmallVec;

/// Small list of clause items (select items, order keys, tables)
pub type ItemVec<'a> = SmallVec<[&'a str; 8]>;

const JOIN_MODIFIERS: &[&str] = &["LEFT", "RIGHT", "INNER", "OUTER", "CROSS", "FULL", "NATURAL"];

/// Clause of a SELECT statement that the rules inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// Projection list between `SELECT` and `FROM`
    Select,
    From,
    Where,
    GroupBy,
    OrderBy
}

impl Clause {
    /// Keyword opening the clause
    pub fn start_keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::OrderBy => "ORDER BY"
        }
    }

    /// Keywords that end the clause
    pub fn boundaries(self) -> &'static [&'static str] {
        match self {
            Self::Select => &["FROM"],
            Self::From => &[
                "WHERE",
                "GROUP BY",
                "HAVING",
                "ORDER BY",
                "LIMIT",
                "UNION",
                "INTERSECT",
                "EXCEPT",
                "WINDOW"
            ],
            Self::Where => &[
                "GROUP BY",
                "HAVING",
                "ORDER BY",
                "LIMIT",
                "UNION",
                "INTERSECT",
                "EXCEPT"
            ],
            Self::GroupBy => &["HAVING", "ORDER BY", "LIMIT", "UNION", "INTERSECT", "EXCEPT"],
            Self::OrderBy => &["LIMIT", "OFFSET", "FETCH"]
        }
    }
}

/// Source of clause text for the mistake rules.
pub trait ClauseExtractor: Send + Sync {
    /// Text between the first `start_keyword` and the earliest following
    /// boundary keyword (or end of input), trimmed, without a trailing `;`.
    ///
    /// Returns `None` when `start_keyword` does not occur.
    fn extract_clause<'a>(
        &self,
        sql: &'a str,
        start_keyword: &str,
        boundary_keywords: &[&str]
    ) -> Option<&'a str>;

    /// Body of a well-known clause
    fn clause<'a>(&self, sql: &'a str, clause: Clause) -> Option<&'a str> {
        self.extract_clause(sql, clause.start_keyword(), clause.boundaries())
    }

    /// Whether `keyword` occurs anywhere outside literals and comments
    fn contains_keyword(&self, sql: &str, keyword: &str) -> bool {
        self.extract_clause(sql, keyword, &[]).is_some()
    }
}

/// Keyword scanner over the raw statement text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalExtractor;

impl ClauseExtractor for LexicalExtractor {
    fn extract_clause<'a>(
        &self,
        sql: &'a str,
        start_keyword: &str,
        boundary_keywords: &[&str]
    ) -> Option<&'a str> {
        let spans = word_spans(sql);
        let (_, body_start) = find_keyword(sql, &spans, start_keyword, 0)?;
        let body_end = boundary_keywords
            .iter()
            .filter_map(|kw| find_keyword(sql, &spans, kw, body_start).map(|(start, _)| start))
            .min()
            .unwrap_or(sql.len());
        Some(trim_clause(&sql[body_start..body_end]))
    }
}

/// Reduce a table or column reference to its bare name.
///
/// Drops an `AS alias` or bare alias, surrounding parentheses, quoting and
/// any schema or table qualifier.
///
/// ```
/// use sql_checker::clause::clean_identifier;
///
/// assert_eq!(clean_identifier("public.users AS u"), "users");
/// assert_eq!(clean_identifier("e.salary"), "salary");
/// assert_eq!(clean_identifier("orders o"), "orders");
/// ```
pub fn clean_identifier(raw: &str) -> &str {
    let raw = raw.trim();
    let head = match raw.to_ascii_uppercase().find(" AS ") {
        Some(idx) => &raw[..idx],
        None => raw.split_whitespace().next().unwrap_or("")
    };
    let head = head
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    let name = match head.rfind('.') {
        Some(idx) => &head[idx + 1..],
        None => head
    };
    name.trim_matches(|c: char| matches!(c, '"' | '`' | '[' | ']'))
}

/// Split a FROM clause body into bare table names.
///
/// Without a `JOIN` the body is a comma list. With one, the body is cut at
/// every JOIN-family keyword and each joined segment is truncated at its
/// `ON` / `USING` condition.
pub fn split_from_list(body: &str) -> Vec<&str> {
    let spans = word_spans(body);
    let has_join = spans
        .iter()
        .any(|&(s, e)| body[s..e].eq_ignore_ascii_case("JOIN"));
    if !has_join {
        return split_top_level(body)
            .into_iter()
            .map(clean_identifier)
            .filter(|name| !name.is_empty())
            .collect();
    }
    let mut segments = Vec::new();
    let mut segment_start = 0;
    for (idx, &(start, end)) in spans.iter().enumerate() {
        if !body[start..end].eq_ignore_ascii_case("JOIN") {
            continue;
        }
        let mut cut = start;
        let mut back = idx;
        while back > 0 {
            let (ps, pe) = spans[back - 1];
            let word = &body[ps..pe];
            let adjacent = body[pe..cut].trim().is_empty();
            if !adjacent || !JOIN_MODIFIERS.iter().any(|m| word.eq_ignore_ascii_case(m)) {
                break;
            }
            cut = ps;
            back -= 1;
        }
        segments.push(&body[segment_start..cut]);
        segment_start = end;
    }
    segments.push(&body[segment_start..]);
    segments
        .into_iter()
        .map(strip_join_condition)
        .flat_map(split_top_level)
        .map(clean_identifier)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Split on commas that are outside parentheses, quoted literals and
/// comments. Comments around an item are dropped with its whitespace.
///
/// ```
/// use sql_checker::clause::split_top_level;
///
/// let items = split_top_level("a, COALESCE(b, c), 'x,y'");
/// assert_eq!(items.as_slice(), ["a", "COALESCE(b, c)", "'x,y'"]);
/// ```
pub fn split_top_level(body: &str) -> ItemVec<'_> {
    let mut items = ItemVec::new();
    let mut start = 0;
    for idx in top_level_commas(body) {
        push_item(&mut items, &body[start..idx]);
        start = idx + 1;
    }
    push_item(&mut items, &body[start..]);
    items
}

/// Whether `body` has a comma outside parentheses, quoted literals and
/// comments
pub fn has_top_level_comma(body: &str) -> bool {
    !top_level_commas(body).is_empty()
}

fn push_item<'a>(items: &mut ItemVec<'a>, item: &'a str) {
    let item = trim_code(item);
    if !item.is_empty() {
        items.push(item);
    }
}

fn top_level_commas(body: &str) -> Vec<usize> {
    let mut depth = 0usize;
    code_chars(body)
        .into_iter()
        .filter(|&(_, _, region)| region == Region::Code)
        .filter_map(|(idx, c, _)| match c {
            '(' => {
                depth += 1;
                None
            }
            ')' => {
                depth = depth.saturating_sub(1);
                None
            }
            ',' if depth == 0 => Some(idx),
            _ => None
        })
        .collect()
}

fn strip_join_condition(segment: &str) -> &str {
    let spans = word_spans(segment);
    let cut = ["ON", "USING"]
        .iter()
        .filter_map(|kw| find_keyword(segment, &spans, kw, 0).map(|(start, _)| start))
        .min()
        .unwrap_or(segment.len());
    &segment[..cut]
}

fn trim_clause(body: &str) -> &str {
    trim_code(body).trim_end_matches(';').trim_end()
}

/// `text` without surrounding whitespace and comments
fn trim_code(text: &str) -> &str {
    let visible: Vec<(usize, char)> = code_chars(text)
        .into_iter()
        .filter(|(_, c, _)| !c.is_whitespace())
        .map(|(idx, c, _)| (idx, c))
        .collect();
    match (visible.first(), visible.last()) {
        (Some(&(start, _)), Some(&(last, c))) => &text[start..last + c.len_utf8()],
        _ => ""
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Region {
    Code,
    /// Inside a quoted literal, quotes included
    Quoted
}

/// Characters of `sql` outside comments, with their byte offsets.
///
/// A line comment keeps its terminating newline so that it still separates
/// the words around it.
fn code_chars(sql: &str) -> Vec<(usize, char, Region)> {
    let bytes = sql.as_bytes();
    let mut out = Vec::with_capacity(sql.len());
    let mut chars = sql.char_indices();
    let mut quote: Option<char> = None;
    while let Some((idx, c)) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            out.push((idx, c, Region::Quoted));
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                out.push((idx, c, Region::Quoted));
            }
            '-' if bytes.get(idx + 1) == Some(&b'-') => {
                for (skipped_idx, skipped) in chars.by_ref() {
                    if skipped == '\n' {
                        out.push((skipped_idx, skipped, Region::Code));
                        break;
                    }
                }
            }
            '/' if bytes.get(idx + 1) == Some(&b'*') => {
                chars.next();
                let mut prev = '\0';
                for (_, skipped) in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push((idx, c, Region::Code))
        }
    }
    out
}

/// Byte spans of the words of `sql`, skipping quoted literals and comments.
fn word_spans(sql: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut word: Option<(usize, usize)> = None;
    for (idx, c, region) in code_chars(sql) {
        let is_word = region == Region::Code && (c.is_alphanumeric() || c == '_');
        match word {
            // A skipped comment leaves a gap and ends the word
            Some((start, end)) if is_word && end == idx => {
                word = Some((start, idx + c.len_utf8()));
            }
            _ => {
                spans.extend(word.take());
                if is_word {
                    word = Some((idx, idx + c.len_utf8()));
                }
            }
        }
    }
    spans.extend(word);
    spans
}

/// First occurrence of a (possibly multi-word) keyword starting at or after
/// byte `from`, as the byte range it covers.
fn find_keyword(
    sql: &str,
    spans: &[(usize, usize)],
    keyword: &str,
    from: usize
) -> Option<(usize, usize)> {
    let parts: SmallVec<[&str; 2]> = keyword.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }
    let first = spans.iter().position(|&(start, _)| start >= from)?;
    (first..spans.len()).find_map(|idx| {
        let window = spans.get(idx..idx + parts.len())?;
        let words_match = window
            .iter()
            .zip(&parts)
            .all(|(&(s, e), part)| sql[s..e].eq_ignore_ascii_case(part));
        let contiguous = window
            .windows(2)
            .all(|pair| sql[pair[0].1..pair[1].0].trim().is_empty());
        (words_match && contiguous).then(|| (window[0].0, window[parts.len() - 1].1))
    })
}

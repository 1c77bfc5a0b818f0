//! Levenshtein edit distance.
//!
//! Used by the keyword matcher to decide whether a token is a probable
//! misspelling of a SQL keyword.

/// Minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`.
///
/// Works on `char`s, so multi-byte input is measured in characters rather
/// than bytes. Only one row of the table is kept, sized by the shorter
/// string.
///
/// # Example
///
/// ```
/// use sql_checker::distance::distance;
///
/// assert_eq!(distance("SELCT", "SELECT"), 1);
/// assert_eq!(distance("", "FROM"), 4);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    let (long, short): (Vec<char>, Vec<char>) = {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.len() >= b.len() { (a, b) } else { (b, a) }
    };
    if short.is_empty() {
        return long.len();
    }
    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = diagonal + usize::from(lc != sc);
            let insertion = row[j] + 1;
            let deletion = row[j + 1] + 1;
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(insertion).min(deletion);
        }
    }
    row[short.len()]
}

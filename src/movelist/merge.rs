//! Merge alternate commands for one move into a single notation
//!
//! Characters often bind a move to several commands that differ in one slot
//! (`Lx`, `Ly`, `Lz` for "quarter circle + any punch"). Merging them column by
//! column gives `Lx+y+z`. This is a heuristic: alternates with different
//! shapes produce nonsense, and only the N <= 2 special cases are exact.

use super::token::ALTERNATION;

/// Merge tokenized alternates into one string
///
/// - no commands: empty
/// - one command: returned as is
/// - two commands that are reversals of each other: the first one
/// - otherwise: column merge
pub fn merge(commands: &[String]) -> String {
    match commands {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] if is_mirrored(first, second) => {
            tracing::debug!("Commands {:?} and {:?} are mirrored, keeping one", first, second);
            first.clone()
        }
        _ => merge_columns(commands),
    }
}

fn is_mirrored(a: &str, b: &str) -> bool {
    a.chars().eq(b.chars().rev())
}

/// Column merge over every alternate as long as the longest one
///
/// Shorter alternates contribute nothing at all; they are not aligned.
fn merge_columns(commands: &[String]) -> String {
    tracing::debug!("Attempting to merge commands: {:?}", commands);

    let rows: Vec<Vec<char>> = commands.iter().map(|c| c.chars().collect()).collect();
    let longest = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut merged = String::new();
    for column in 0..longest {
        let mut seen: Vec<char> = Vec::new();
        for row in rows.iter().filter(|row| row.len() >= longest) {
            let c = row[column];
            if !seen.contains(&c) {
                seen.push(c);
            }
        }

        for (i, c) in seen.into_iter().enumerate() {
            if i > 0 {
                merged.push(ALTERNATION);
            }
            merged.push(c);
        }
    }

    collapse_alternations(&merged)
}

/// Collapse runs of alternation markers to one
fn collapse_alternations(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous = None;
    for c in input.chars() {
        if c == ALTERNATION && previous == Some(ALTERNATION) {
            continue;
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

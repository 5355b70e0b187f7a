//! Line grammar for command files
//!
//! The format is INI-like: `[Section]` headers, `key = value` lines and `;`
//! comments. Anything else is skipped. Parsing never fails; a damaged line
//! just doesn't contribute.

use super::document::{IniDocument, Section};
use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_until, take_while1},
    character::complete::{char, space0},
    combinator::{map, rest},
    sequence::{delimited, preceded, separated_pair},
    IResult, Parser,
};

/// State headers whose label is at most this long (after dropping `state `)
/// take their name from the comment line directly above them
pub const UNNAMED_LABEL_MAX_LEN: usize = 6;

const STATE_PREFIX: &str = "state ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Header(&'a str),
    Comment(&'a str),
    Entry(&'a str, &'a str),
}

fn header(input: &str) -> IResult<&str, Line<'_>> {
    map(
        delimited(char('['), take_until("]"), char(']')),
        |name: &str| Line::Header(name.trim()),
    )
    .parse(input)
}

fn comment(input: &str) -> IResult<&str, Line<'_>> {
    map(
        preceded(take_while1(|c: char| c == ';' || c == '#'), rest),
        |text: &str| Line::Comment(text.trim()),
    )
    .parse(input)
}

fn entry(input: &str) -> IResult<&str, Line<'_>> {
    map(
        separated_pair(take_till1(|c: char| c == '='), char('='), rest),
        |(key, value): (&str, &str)| Line::Entry(key.trim(), value),
    )
    .parse(input)
}

fn line(input: &str) -> IResult<&str, Line<'_>> {
    preceded(space0, alt((header, comment, entry))).parse(input)
}

/// Name of the section a raw line opens, if it is a header
pub fn header_name(raw: &str) -> Option<&str> {
    match line(raw) {
        Ok((_, Line::Header(name))) => Some(name),
        _ => None,
    }
}

/// True if a raw line is a `key = value` pair
pub fn is_entry(raw: &str) -> bool {
    matches!(line(raw), Ok((_, Line::Entry(key, _))) if !key.is_empty())
}

/// Drop an inline `;` or `#` comment that isn't inside quotes, trim, and unwrap a
/// fully quoted value
fn clean_value(raw: &str) -> &str {
    let mut in_quotes = false;
    let mut end = raw.len();
    for (i, c) in raw.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' | '#' if !in_quotes => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let value = raw[..end].trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Apply the comment-label convention to a header name
///
/// `; Fireball` above `[State -1, 3]` yields `State -1, Fireball`. Headers
/// with a longer label (`[State -1, Fireball]`) are left alone, as are
/// non-state headers.
pub fn substitute_label(header: &str, comment: Option<&str>) -> Option<String> {
    let comment = comment.filter(|c| !c.is_empty())?;
    let prefix = header.get(..STATE_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(STATE_PREFIX) {
        return None;
    }

    let label = &header[STATE_PREFIX.len()..];
    if label.chars().count() > UNNAMED_LABEL_MAX_LEN {
        return None;
    }

    let state = header.split(',').next().unwrap_or(header).trim_end();
    Some(format!("{}, {}", state, comment))
}

/// Parse command-file text into sections
pub fn parse_document(source: &str) -> IniDocument {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut doc = IniDocument::new();
    let mut current: Option<Section> = None;
    let mut previous_comment: Option<&str> = None;

    for raw in source.lines() {
        let parsed = line(raw).ok().map(|(_, parsed)| parsed);

        match parsed {
            Some(Line::Header(name)) => {
                if let Some(section) = current.take() {
                    doc.push_section(section);
                }
                let name = substitute_label(name, previous_comment)
                    .unwrap_or_else(|| name.to_string());
                current = Some(Section::new(name));
            }
            Some(Line::Entry(key, value)) if !key.is_empty() => match current.as_mut() {
                Some(section) => section.push(key, clean_value(value)),
                None => tracing::debug!("Skipping key outside any section: {}", key),
            },
            _ => {}
        }

        previous_comment = match parsed {
            Some(Line::Comment(text)) => Some(text),
            _ => None,
        };
    }

    if let Some(section) = current.take() {
        doc.push_section(section);
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_keys() {
        let doc = parse_document(
            "[Command]\nname = \"QCF_x\"\ncommand = ~D, DF, F, x\ntime = 15\n\n[Statedef -1]\n",
        );
        assert_eq!(doc.sections().len(), 2);
        let cmd = &doc.sections()[0];
        assert!(cmd.name_is("command"));
        assert_eq!(cmd.get("name"), Some("QCF_x"));
        assert_eq!(cmd.get("command"), Some("~D, DF, F, x"));
        assert_eq!(cmd.get("time"), Some("15"));
        assert!(doc.sections()[1].name_is("statedef -1"));
    }

    #[test]
    fn test_trigger_value_keeps_inner_equals() {
        let doc = parse_document("[State -1, Fireball]\ntrigger1 = command = \"QCF_x\"\n");
        assert_eq!(
            doc.sections()[0].get("trigger1"),
            Some("command = \"QCF_x\"")
        );
    }

    #[test]
    fn test_inline_comments_and_junk_lines() {
        let doc = parse_document(
            "junk before\n[Command]\nname = \"a;b\" ; the name\ncommand = x ; press x\nnot a pair\n[broken\n",
        );
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].get("name"), Some("a;b"));
        assert_eq!(doc.sections()[0].get("command"), Some("x"));
    }

    #[test]
    fn test_inline_hash_comments() {
        assert_eq!(clean_value(" x # press x"), "x");
        assert_eq!(clean_value(" \"a#b\" # the name"), "a#b");
        assert_eq!(clean_value(" ~D, DF, F, x;#"), "~D, DF, F, x");
    }

    #[test]
    fn test_repeated_sections_and_shadows() {
        let doc = parse_document(
            "[State -1, A]\ntriggerall = command = \"a\"\ntriggerall = power >= 1000\n[State -1, A]\n",
        );
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.sections()[0].shadows("triggerall").len(), 2);
    }

    #[test]
    fn test_comment_label_replaces_short_label() {
        let doc = parse_document(";Shinkuu Hadouken\n[State -1, 3]\ntype = ChangeState\n");
        assert_eq!(doc.sections()[0].name(), "State -1, Shinkuu Hadouken");
    }

    #[test]
    fn test_comment_label_without_label() {
        let doc = parse_document("; --- Dash ---\n[State -1]\n");
        assert_eq!(doc.sections()[0].name(), "State -1, --- Dash ---");
    }

    #[test]
    fn test_comment_label_keeps_long_label() {
        let doc = parse_document(";Something else\n[State -1, Fireball]\n");
        assert_eq!(doc.sections()[0].name(), "State -1, Fireball");
    }

    #[test]
    fn test_label_threshold_is_inclusive() {
        // "-1, ab" is exactly six characters
        assert_eq!(
            substitute_label("State -1, ab", Some("Named")),
            Some("State -1, Named".to_string())
        );
        assert_eq!(substitute_label("State -1, abc", Some("Named")), None);
    }

    #[test]
    fn test_comment_must_be_adjacent() {
        let doc = parse_document(";Fireball\n\n[State -1, 3]\n");
        assert_eq!(doc.sections()[0].name(), "State -1, 3");
    }

    #[test]
    fn test_statedef_is_not_relabelled() {
        let doc = parse_document(";Header comment\n[Statedef -1]\n");
        assert_eq!(doc.sections()[0].name(), "Statedef -1");
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(header_name("  [Files] ; comment"), Some("Files"));
        assert_eq!(header_name("cmd = kfm.cmd"), None);
        assert!(is_entry("cmd = kfm.cmd"));
        assert!(!is_entry("; cmd = kfm.cmd"));
        assert!(!is_entry("[Files]"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_document("").sections().is_empty());
    }
}

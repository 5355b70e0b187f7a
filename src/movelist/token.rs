//! Tokenizer / detokenizer for command notation
//!
//! Command strings like `~D, DF, F, x` are reduced to one character per input
//! (`236x`) so alternate commands can be compared column by column, and then
//! common motions are folded into a single glyph (`Lx`). Detokenizing maps each
//! token back to its movelist glyph (`_QCF^X`).
//!
//! Every substitution table is ordered. Longer patterns come first so that a
//! shorter rule never splits a longer one (`/DF` before `/D`, full circles
//! before half circles before quarter circles).

use crate::core::config::ButtonScheme;
use regex::Regex;
use std::sync::OnceLock;

/// Simultaneous-press and alternation marker
pub const ALTERNATION: char = '+';

/// Held directions: notation, token, rendering
pub const HELD_DIRECTIONS: [(&str, char, &str); 8] = [
    ("/DF", '!', "~DF"),
    ("/DB", '@', "~DB"),
    ("/UF", '#', "~UF"),
    ("/UB", '$', "~UB"),
    ("/D", '%', "~D"),
    ("/F", '^', "~F"),
    ("/U", '&', "~U"),
    ("/B", '*', "~B"),
];

/// Held buttons: notation, token, button they render as
pub const HELD_BUTTONS: [(&str, char, char); 9] = [
    ("/a", '(', 'a'),
    ("/b", ')', 'b'),
    ("/c", '<', 'c'),
    ("/x", '>', 'x'),
    ("/y", ';', 'y'),
    ("/z", '\'', 'z'),
    ("/s", '{', 's'),
    ("/d", '?', 'd'),
    ("/w", '=', 'w'),
];

/// Directions in numpad notation, diagonals first
pub const DIRECTIONS: [(&str, char, &str); 8] = [
    ("DF", '3', "_DF"),
    ("DB", '1', "_DB"),
    ("UF", '9', "_UF"),
    ("UB", '7', "_UB"),
    ("D", '2', "_D"),
    ("F", '6', "_F"),
    ("U", '8', "_U"),
    ("B", '4', "_B"),
];

/// Motion compression over numpad tokens, most specific first
pub const MOTIONS: [(&str, char, &str); 24] = [
    // full circles, each with the rotation started one step late
    ("41236987", 'A', "_FCF"),
    ("12369874", 'A', "_FCF"),
    ("63214789", 'C', "_FCB"),
    ("32147896", 'C', "_FCB"),
    ("47896321", 'E', "_RFCF"),
    ("78963214", 'E', "_RFCF"),
    ("69874123", 'G', "_RFCB"),
    ("98741236", 'G', "_RFCB"),
    // half circles
    ("41236", 'H', "_HCF"),
    ("63214", 'I', "_HCB"),
    ("47896", 'J', "_RHCF"),
    ("69874", 'K', "_RHCB"),
    // quarter circles
    ("236", 'L', "_QCF"),
    ("214", 'M', "_QCB"),
    ("896", 'N', "_QUF"),
    ("874", 'O', "_QUB"),
    ("632", 'P', "_QFD"),
    ("412", 'Q', "_QBD"),
    ("698", 'R', "_QFU"),
    ("478", 'S', "_QBU"),
    // dragon punch
    ("623", 'T', "_DPF"),
    ("421", 'V', "_DPB"),
    // dashes
    ("66", 'Y', "_XFF"),
    ("44", 'Z', "_XBB"),
];

/// Buttons: token, letter rendering, strike rendering
pub const BUTTONS: [(char, &str, &str); 9] = [
    ('a', "^A", "^LK"),
    ('b', "^B", "^MK"),
    ('c', "^C", "^HK"),
    ('x', "^X", "^LP"),
    ('y', "^Y", "^MP"),
    ('z', "^Z", "^HP"),
    ('s', "^S", "^S"),
    ('d', "^D", "^D"),
    ('w', "^W", "^W"),
];

/// Markers with no token of their own: no-gap `>`, 4-way `$`, whitespace
const FORMAT_MARKERS: [&str; 4] = [">", "$", " ", "\t"];

fn charge_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"~\d*").expect("charge pattern is a valid regex"))
}

/// Replace each pattern with its token, in order
///
/// Each rule is a plain global, non-overlapping, left-to-right replacement
/// over the output of the previous rule.
pub fn apply_rules<'a, I>(input: &str, rules: I) -> String
where
    I: IntoIterator<Item = (&'a str, char)>,
{
    let mut buf = [0u8; 4];
    rules
        .into_iter()
        .fold(input.to_string(), |acc, (pattern, token)| {
            acc.replace(pattern, token.encode_utf8(&mut buf))
        })
}

fn held_rules() -> impl Iterator<Item = (&'static str, char)> {
    HELD_DIRECTIONS
        .iter()
        .map(|&(pattern, token, _)| (pattern, token))
        .chain(HELD_BUTTONS.iter().map(|&(pattern, token, _)| (pattern, token)))
}

fn direction_rules() -> impl Iterator<Item = (&'static str, char)> {
    DIRECTIONS.iter().map(|&(pattern, token, _)| (pattern, token))
}

fn motion_rules() -> impl Iterator<Item = (&'static str, char)> {
    MOTIONS.iter().map(|&(pattern, token, _)| (pattern, token))
}

/// Reduce a single comma-free input group to tokens
fn tokenize_group(group: &str) -> String {
    let held = apply_rules(group, held_rules());
    apply_rules(&held, direction_rules())
}

/// Tokenize command notation
///
/// 1. drop charge annotations (`~` with an optional duration)
/// 2. drop no-gap and 4-way markers
/// 3. split on `,` and tokenize each group on its own
/// 4. held inputs, then directions
/// 5. fold motions into glyphs when `compress` is set
pub fn tokenize(command: &str, compress: bool) -> String {
    let uncharged = charge_pattern().replace_all(command, "");
    let unmarked = FORMAT_MARKERS
        .iter()
        .fold(uncharged.into_owned(), |acc, marker| acc.replace(marker, ""));

    let tokens: String = unmarked.split(',').map(tokenize_group).collect();

    if compress {
        apply_rules(&tokens, motion_rules())
    } else {
        tokens
    }
}

/// Tokens that are split off into the held prefix when they make up a whole
/// command: held directions, held a/b/x/y/z, and held-rendering punctuation
pub const HELD_SINGLETONS: &str = "!@#$%^&*()[];'.~>";

/// True for a token that is rendered as a held prefix when it stands alone
pub fn is_held_token(c: char) -> bool {
    HELD_SINGLETONS.contains(c)
}

fn render_button(c: char, scheme: ButtonScheme) -> Option<&'static str> {
    BUTTONS
        .iter()
        .find(|&&(token, _, _)| token == c)
        .map(|&(_, letters, strike)| match scheme {
            ButtonScheme::Letters => letters,
            ButtonScheme::Strike => strike,
        })
}

fn render_token(c: char, scheme: ButtonScheme) -> Option<&'static str> {
    if c == ALTERNATION {
        return Some("_+");
    }
    if let Some(&(_, _, glyph)) = HELD_DIRECTIONS.iter().find(|&&(_, token, _)| token == c) {
        return Some(glyph);
    }
    if let Some(&(_, _, button)) = HELD_BUTTONS.iter().find(|&&(_, token, _)| token == c) {
        return render_button(button, scheme);
    }
    if let Some(&(_, _, glyph)) = DIRECTIONS.iter().find(|&&(_, token, _)| token == c) {
        return Some(glyph);
    }
    if let Some(&(_, _, glyph)) = MOTIONS.iter().find(|&&(_, token, _)| token == c) {
        return Some(glyph);
    }
    render_button(c, scheme)
}

/// Render tokens as movelist glyphs
///
/// Separators and whitespace are dropped first. Each token is rendered in a
/// single pass, so a rendering is never itself re-rendered. Unknown characters
/// pass through unchanged.
pub fn detokenize(tokens: &str, scheme: ButtonScheme) -> String {
    let mut out = String::with_capacity(tokens.len() * 4);
    for c in tokens.chars().filter(|&c| c != ',' && !c.is_whitespace()) {
        match render_token(c, scheme) {
            Some(glyph) => out.push_str(glyph),
            None => out.push(c),
        }
    }
    out
}

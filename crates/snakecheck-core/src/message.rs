//! Message arguments and positional template substitution

use std::fmt;

/// A single value substituted into a message template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageArg {
    /// An identifier, shown quoted (`'os'`)
    Name(String),

    /// A line number of an earlier definition
    Line(u32),

    /// Raw text, shown verbatim
    Text(String),

    /// A list of identifiers, shown as a bracketed list (`['a', 'b']`)
    Names(Vec<String>),
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(&quote(name)),
            Self::Line(line) => write!(f, "{line}"),
            Self::Text(text) => f.write_str(text),
            Self::Names(names) => {
                f.write_str("[")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&quote(name))?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Placeholder marker used by every template
pub const PLACEHOLDER: &str = "{}";

/// Substitute `args` into `template` in order
///
/// # Panics
///
/// Panics when the number of placeholders differs from the number of
/// arguments. That can only come from a defect in the code that built the
/// arguments, so it is never papered over.
pub fn substitute(template: &str, args: &[MessageArg]) -> String {
    let expected = template.matches(PLACEHOLDER).count();
    assert_eq!(
        expected,
        args.len(),
        "template {template:?} takes {expected} argument(s) but {} were supplied",
        args.len()
    );

    let mut pieces = template.split(PLACEHOLDER);
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    out.push_str(pieces.next().unwrap_or_default());
    for (arg, piece) in args.iter().zip(pieces) {
        out.push_str(&arg.to_string());
        out.push_str(piece);
    }
    out
}

/// Quote a name the way Python's `repr` quotes a string
///
/// Single quotes unless the text contains a single quote and no double
/// quote. Backslashes and the chosen quote are escaped, as are characters
/// Python does not print: control characters, whitespace other than the
/// plain space, and the common zero-width format characters. Other
/// unassigned or private-use code points are passed through.
pub fn quote(text: &str) -> String {
    let delim = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(delim);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '\u{ad}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{feff}'
        ))
}

fn escape_code_point(c: char) -> String {
    let cp = c as u32;
    if cp <= 0xff {
        format!("\\x{cp:02x}")
    } else if cp <= 0xffff {
        format!("\\u{cp:04x}")
    } else {
        format!("\\U{cp:08x}")
    }
}

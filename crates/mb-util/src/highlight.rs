//! Pretty-printing capabilities used when rendering values.
//!
//! A [`Highlighter`] turns a [`Cell`] into colorized text. It is chosen once,
//! when a [`ValueRenderer`](crate::value::ValueRenderer) or
//! [`Table`](crate::table::Table) is built, and may decline any value by
//! returning `None`; the caller then falls back to the bolded raw
//! representation (`ESC[1m...ESC[0m`).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::Cell;

/// Formats a value as colorized text for a display `columns` wide.
///
/// `columns` is a layout hint; implementations that never wrap can ignore it.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, value: &Cell, columns: usize) -> Option<String>;
}

impl fmt::Debug for dyn Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Highlighter")
    }
}

/// Declines every value, so output is always the bold fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoldHighlighter;

impl Highlighter for BoldHighlighter {
    fn highlight(&self, _value: &Cell, _columns: usize) -> Option<String> {
        None
    }
}

/// Highlights the raw representation of a value with [`syntax`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntaxHighlighter;

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, value: &Cell, _columns: usize) -> Option<String> {
        Some(syntax(&value.inspect()))
    }
}

/// The bolded raw representation used when a highlighter declines a value.
pub fn bold_fallback(value: &Cell) -> String {
    format!("\x1b[1m{}\x1b[0m", value.inspect())
}

static SYNTAX_RULES: Lazy<[(Regex, &'static str); 5]> = Lazy::new(|| {
    let rule = |pattern: &str, color: &'static str| {
        (
            Regex::new(pattern).expect("syntax highlight pattern is valid"),
            color,
        )
    };
    [
        rule(r"[0-9]+", "34"),
        rule(r"[[:upper:]][[:alpha:]_]+", "32"),
        rule(r"[{}=<>]+", "33"),
        rule(r#"["'`]+"#, "35"),
        rule(r"[:,]+", "36"),
    ]
});

/// Character-class highlighting for code or debug output.
///
/// Numbers are blue, capitalized identifiers green, braces and comparison
/// characters yellow, quotes magenta, colons and commas cyan. Each run is
/// followed by `ESC[37m`. Rules apply in that order, so later rules never
/// see the digits inside earlier escape sequences.
///
/// ```rust
/// use mb_util::highlight::syntax;
///
/// assert_eq!(syntax("x = 1"), "x \x1b[33m=\x1b[37m \x1b[34m1\x1b[37m");
/// ```
pub fn syntax(code: &str) -> String {
    SYNTAX_RULES
        .iter()
        .fold(code.to_string(), |text, (pattern, color)| {
            pattern
                .replace_all(&text, format!("\x1b[{color}m${{0}}\x1b[37m").as_str())
                .into_owned()
        })
}

/// Highlights `value` with [`SyntaxHighlighter`] for a display `columns`
/// wide, defaulting to the terminal width.
pub fn highlight(value: &Cell, columns: Option<usize>) -> String {
    let columns = columns.unwrap_or_else(crate::console::width);
    SyntaxHighlighter
        .highlight(value, columns)
        .unwrap_or_else(|| bold_fallback(value))
}

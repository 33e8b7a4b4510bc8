//! Cell values and their conversion to display text.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::ansi::visible_length;
use crate::console::{LiveTerminal, TerminalWidth};
use crate::highlight::{bold_fallback, BoldHighlighter, Highlighter};

/// Word shown for an absent value when absences are displayed.
pub const ABSENT_LABEL: &str = "nil";

/// A single value in a table.
///
/// `Absent` is distinct from an empty `Text`: it marks a cell with no value,
/// such as the padding added to short rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Any other value, carried as its raw representation.
    Other(String),
}

impl Cell {
    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    /// The raw, uncolored representation of the value. Text is quoted.
    pub fn inspect(&self) -> String {
        match self {
            Cell::Absent => ABSENT_LABEL.to_string(),
            Cell::Text(s) => format!("{s:?}"),
            Cell::Integer(n) => n.to_string(),
            Cell::Float(f) => format!("{f:?}"),
            Cell::Bool(b) => b.to_string(),
            Cell::Other(raw) => raw.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&String> for Cell {
    fn from(s: &String) -> Self {
        Cell::Text(s.clone())
    }
}

macro_rules! cell_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Cell {
                fn from(n: $t) -> Self {
                    Cell::Integer(i64::from(n))
                }
            }
        )*
    };
}

cell_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! cell_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Cell {
                fn from(n: $t) -> Self {
                    i64::try_from(n).map_or_else(|_| Cell::Other(n.to_string()), Cell::Integer)
                }
            }
        )*
    };
}

cell_from_wide_int!(u64, usize, isize, i128, u128);

impl From<f32> for Cell {
    fn from(f: f32) -> Self {
        Cell::Float(f64::from(f))
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Absent, Into::into)
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Absent,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Cell::Integer(i)
                } else if n.is_f64() {
                    n.as_f64().map_or_else(|| Cell::Other(n.to_string()), Cell::Float)
                } else {
                    Cell::Other(n.to_string())
                }
            }
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Other(value.to_string()),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Cell::Text(s),
            other => Cell::from(&other),
        }
    }
}

/// Display text together with its visible length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    /// Length of `text` excluding escape sequences.
    pub visible: usize,
}

impl RenderedCell {
    pub fn new(text: String) -> Self {
        let visible = visible_length(&text);
        Self { text, visible }
    }
}

/// Turns [`Cell`]s into display strings.
///
/// Never fails: values the highlighter declines are shown bolded.
#[derive(Clone, Debug)]
pub struct ValueRenderer {
    highlighter: Arc<dyn Highlighter>,
    columns: usize,
    show_absence: bool,
    raw_strings: bool,
}

impl Default for ValueRenderer {
    fn default() -> Self {
        Self::new(Arc::new(BoldHighlighter))
    }
}

impl ValueRenderer {
    /// A renderer that hides absences, shows text unquoted, and lays values
    /// out for the current terminal width.
    pub fn new(highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            highlighter,
            columns: LiveTerminal.current_width(),
            show_absence: false,
            raw_strings: true,
        }
    }

    /// Display width passed on to the highlighter.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Takes the display width from `terminal`.
    pub fn terminal(self, terminal: &impl TerminalWidth) -> Self {
        self.columns(terminal.current_width())
    }

    /// Render absent values as [`ABSENT_LABEL`] instead of blank.
    pub fn show_absence(mut self, show: bool) -> Self {
        self.show_absence = show;
        self
    }

    /// When false, text is quoted and highlighted like any other value.
    pub fn raw_strings(mut self, raw: bool) -> Self {
        self.raw_strings = raw;
        self
    }

    pub fn render(&self, value: &Cell) -> String {
        match value {
            Cell::Absent if !self.show_absence => String::new(),
            Cell::Text(s) if self.raw_strings => s.clone(),
            other => self.pretty(other),
        }
    }

    pub fn render_cell(&self, value: &Cell) -> RenderedCell {
        RenderedCell::new(self.render(value))
    }

    fn pretty(&self, value: &Cell) -> String {
        match self.highlighter.highlight(value, self.columns) {
            Some(text) => text.trim().to_string(),
            None => {
                debug!(?value, "highlighter declined value, using bold fallback");
                bold_fallback(value)
            }
        }
    }
}

//! # mb-util - Terminal Output Helpers
//!
//! Small building blocks for command-line programs that print colorized text:
//!
//! - [`ansi`]: strip, measure, center and wrap text containing ANSI escapes
//! - [`color`]: 256-color and truecolor escape sequences from RGB or HSV
//! - [`table`]: aligned, bordered tables whose widths ignore escape sequences
//! - [`value`] and [`highlight`]: turning values into (colorized) cell text
//! - [`trace`]: colorized call traces and error cause chains
//! - [`console`]: terminal width and height
//!
//! ## Quick Start
//!
//! ```rust
//! use mb_util::ansi::{strip_ansi, visible_length};
//! use mb_util::table::{Header, Table, TableData};
//!
//! let data = TableData::columns(vec![
//!     ("name", vec!["ls", "cat"]),
//!     ("size", vec!["142k", "38k"]),
//! ]);
//!
//! let lines = Table::new().render_lines(data);
//! assert_eq!(lines.len(), 4);
//!
//! // Every line has the same visible width, colors or not.
//! let width = visible_length(&lines[0]);
//! assert!(lines.iter().all(|l| visible_length(l) == width));
//! assert_eq!(strip_ansi(&lines[2]), " ls   | 142k ");
//! ```
//!
//! ## Highlighting
//!
//! Non-text cells go through a [`Highlighter`](highlight::Highlighter). The
//! default [`BoldHighlighter`](highlight::BoldHighlighter) declines every
//! value, so they are shown bold; [`SyntaxHighlighter`](highlight::SyntaxHighlighter)
//! colors digits, quotes and punctuation. Any other pretty-printer can be
//! plugged in by implementing the trait.
//!
//! ```rust
//! use std::sync::Arc;
//! use mb_util::highlight::SyntaxHighlighter;
//! use mb_util::table::{Table, TableData};
//!
//! let table = Table::new()
//!     .highlighter(Arc::new(SyntaxHighlighter))
//!     .raw_strings(false);
//! println!("{}", table.render(TableData::rows(vec![vec!["a", "b"]])));
//! ```

pub mod ansi;
pub mod color;
pub mod console;
mod error;
pub mod highlight;
pub mod table;
pub mod trace;
pub mod value;

// Error types
pub use error::{Result, TraceFormatError, UtilError};

// Common entry points
pub use ansi::{center_ansi, strip_ansi, visible_length, wrap};
pub use color::{hsv_to_truecolor, rgb256, rgb_to_ansi256, rgb_truecolor, Layer};
pub use console::{height, width};
pub use highlight::{highlight, syntax};
pub use table::{BorderStyle, ColumnWidths, Header, Table, TableData};
pub use trace::{ErrorReport, TraceEntry, TraceFormatter, TraceLine, TracedError};
pub use value::{Cell, ValueRenderer};

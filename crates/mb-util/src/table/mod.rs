//! ANSI-aware table formatting.
//!
//! [`Table`] lays out row-major or named-column data as aligned text with a
//! header, a separator line and `|`-joined columns. Widths are measured on
//! the visible text, so colorized cells line up with plain ones.
//!
//! ```rust
//! use mb_util::ansi::strip_ansi;
//! use mb_util::table::{Table, TableData};
//!
//! let data = TableData::columns(vec![
//!     ("a", vec![11, 37]),
//!     ("b", vec![22, 27]),
//! ]);
//! let lines: Vec<String> = Table::new()
//!     .render_lines(data)
//!     .iter()
//!     .map(|l| strip_ansi(l).into_owned())
//!     .collect();
//!
//! assert_eq!(lines, vec![" a  | b  ", "----+----", " 11 | 22 ", " 37 | 27 "]);
//! ```
//!
//! # Headers
//!
//! - [`Header::Auto`] - column names, or `1`, `2`, ... for row data
//! - [`Header::Labels`] - explicit labels, each in its own color
//! - [`Header::Title`] - one bold title spanning the table
//! - [`Header::Hidden`] - data rows only
//!
//! # Column widths
//!
//! - [`ColumnWidths::Uniform`] - every column as wide as the widest
//! - [`ColumnWidths::Variable`] - each column fits its own content
//! - [`ColumnWidths::Min`] / [`ColumnWidths::PerColumn`] - content widths
//!   with lower bounds

mod border;
mod formatter;
mod types;

pub use border::BorderStyle;
pub use formatter::Table;
pub use types::{ColumnWidths, Header, TableData};

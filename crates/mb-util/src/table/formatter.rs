//! Table layout: width computation, header handling and line assembly.

use std::io::Write;
use std::sync::Arc;

use tracing::trace;

use super::border::{BorderChars, BorderStyle};
use super::types::{ColumnWidths, Header, TableData};
use crate::ansi::{center_ansi, visible_length};
use crate::console::{LiveTerminal, TerminalWidth};
use crate::error::Result;
use crate::highlight::{BoldHighlighter, Highlighter};
use crate::value::{Cell, RenderedCell, ValueRenderer};

/// Number of foreground colors header labels cycle through (31 through 37).
const HEADER_COLORS: usize = 7;

/// An aligned, color-highlighted text table.
///
/// The table is a reusable layout description; data is supplied to each
/// render call.
///
/// # Example
///
/// ```rust
/// use mb_util::ansi::strip_ansi;
/// use mb_util::table::{Header, Table, TableData};
///
/// let table = Table::new().header(Header::Hidden);
/// let lines = table.render_lines(TableData::rows(vec![vec![1, 22], vec![333, 4]]));
///
/// assert_eq!(strip_ansi(&lines[0]), " 1   | 22  ");
/// assert_eq!(strip_ansi(&lines[1]), " 333 | 4   ");
/// ```
#[derive(Clone, Debug)]
pub struct Table {
    header: Header,
    widths: ColumnWidths,
    border: BorderStyle,
    show_absence: bool,
    separate_rows: bool,
    raw_strings: bool,
    highlighter: Arc<dyn Highlighter>,
    columns: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// The header after resolving [`Header`] against the data.
enum ResolvedHeader {
    None,
    Title(String),
    Labels(Vec<String>),
}

impl Table {
    /// A table with an automatic header, uniform column widths, ASCII
    /// borders and bolded (unhighlighted) non-text values, laid out for the
    /// current terminal width.
    pub fn new() -> Self {
        Table {
            header: Header::Auto,
            widths: ColumnWidths::Uniform,
            border: BorderStyle::Ascii,
            show_absence: false,
            separate_rows: false,
            raw_strings: true,
            highlighter: Arc::new(BoldHighlighter),
            columns: LiveTerminal.current_width(),
        }
    }

    /// Set the header.
    pub fn header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    /// Set the column width policy.
    pub fn column_widths(mut self, widths: ColumnWidths) -> Self {
        self.widths = widths;
        self
    }

    /// Shorthand for [`ColumnWidths::Variable`] or [`ColumnWidths::Uniform`].
    pub fn variable_width(self, variable: bool) -> Self {
        self.column_widths(if variable {
            ColumnWidths::Variable
        } else {
            ColumnWidths::Uniform
        })
    }

    /// Set the border style.
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Show absent cells as `nil` instead of leaving them blank.
    pub fn show_absence(mut self, show: bool) -> Self {
        self.show_absence = show;
        self
    }

    /// Add a separator line between data rows.
    pub fn separate_rows(mut self, separate: bool) -> Self {
        self.separate_rows = separate;
        self
    }

    /// When false, text cells are quoted and highlighted.
    pub fn raw_strings(mut self, raw: bool) -> Self {
        self.raw_strings = raw;
        self
    }

    /// Set the highlighter used for non-text values.
    pub fn highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Display width handed to the highlighter.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Takes the display width from `terminal`.
    pub fn terminal(self, terminal: &impl TerminalWidth) -> Self {
        self.columns(terminal.current_width())
    }

    fn renderer(&self) -> ValueRenderer {
        ValueRenderer::new(Arc::clone(&self.highlighter))
            .columns(self.columns)
            .show_absence(self.show_absence)
            .raw_strings(self.raw_strings)
    }

    /// Lays out `data` and returns the table's lines.
    pub fn render_lines(&self, data: impl Into<TableData>) -> Vec<String> {
        let (mut rows, names) = data.into().into_rows();
        let synthesize_labels = matches!(self.header, Header::Auto) && names.is_none();

        let mut header = match &self.header {
            Header::Hidden => ResolvedHeader::None,
            Header::Title(title) => ResolvedHeader::Title(title.clone()),
            Header::Labels(labels) => ResolvedHeader::Labels(labels.clone()),
            Header::Auto => ResolvedHeader::Labels(names.unwrap_or_default()),
        };

        let mut column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        match &header {
            ResolvedHeader::Labels(labels) => column_count = column_count.max(labels.len()),
            // A title needs at least one column to span.
            ResolvedHeader::Title(_) => column_count = column_count.max(1),
            ResolvedHeader::None => {}
        }

        for row in &mut rows {
            row.resize(column_count, Cell::Absent);
        }
        if let ResolvedHeader::Labels(labels) = &mut header {
            if synthesize_labels {
                *labels = (1..=column_count).map(|i| i.to_string()).collect();
            } else {
                labels.resize(column_count, String::new());
            }
        }

        let renderer = self.renderer();
        let rendered: Vec<Vec<RenderedCell>> = rows
            .iter()
            .map(|row| row.iter().map(|v| renderer.render_cell(v)).collect())
            .collect();

        let mut natural: Vec<usize> = match &header {
            ResolvedHeader::Labels(labels) => {
                labels.iter().map(|l| visible_length(l) + 2).collect()
            }
            _ => vec![0; column_count],
        };
        for row in &rendered {
            for (width, cell) in natural.iter_mut().zip(row) {
                *width = (*width).max(cell.visible + 2);
            }
        }

        let mut widths = self.widths.resolve(&natural);
        if let ResolvedHeader::Title(title) = &header {
            grow_to_fit(&mut widths, visible_length(title) + 2, self.widths.is_shared());
        }
        trace!(?widths, rows = rendered.len(), "computed table column widths");

        let chars = self.border.chars();
        let separator = chars.separator(&widths);
        let mut output = Vec::with_capacity(rendered.len() * 2 + 2);

        match &header {
            ResolvedHeader::None => {}
            ResolvedHeader::Title(title) => {
                output.push(center_ansi(
                    &format!("\x1b[1m{title}\x1b[0m"),
                    total_width(&widths),
                ));
                output.push(separator.clone());
            }
            ResolvedHeader::Labels(labels) => {
                output.push(header_line(labels, &widths, chars));
                output.push(separator.clone());
            }
        }

        let last = rendered.len().saturating_sub(1);
        for (idx, row) in rendered.iter().enumerate() {
            output.push(data_line(row, &widths, chars));
            if self.separate_rows && idx < last {
                output.push(separator.clone());
            }
        }

        output
    }

    /// Lays out `data` and joins the lines with newlines.
    pub fn render(&self, data: impl Into<TableData>) -> String {
        self.render_lines(data).join("\n")
    }

    /// Writes each line of the table, newline-terminated, to `sink`.
    pub fn write_to<W: Write>(&self, data: impl Into<TableData>, sink: &mut W) -> Result<()> {
        for line in self.render_lines(data) {
            writeln!(sink, "{line}")?;
        }
        Ok(())
    }

    /// Prints the table to standard output.
    pub fn print(&self, data: impl Into<TableData>) -> Result<()> {
        let term = console::Term::stdout();
        for line in self.render_lines(data) {
            term.write_line(&line)?;
        }
        Ok(())
    }
}

/// Width of the joined columns, counting one separator character between each.
fn total_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + widths.len().saturating_sub(1)
}

/// Widens columns one step at a time until the table is at least `target`
/// wide. Shared widths grow together; otherwise the narrowest column (the
/// leftmost on ties) takes each extra unit.
fn grow_to_fit(widths: &mut [usize], target: usize, shared: bool) {
    if widths.is_empty() {
        return;
    }

    let mut total = total_width(widths);
    while total < target {
        if shared {
            for w in widths.iter_mut() {
                *w += 1;
            }
            total += widths.len();
        } else {
            let mut narrowest = 0;
            for (i, &w) in widths.iter().enumerate() {
                if w < widths[narrowest] {
                    narrowest = i;
                }
            }
            widths[narrowest] += 1;
            total += 1;
        }
    }
}

fn header_line(labels: &[String], widths: &[usize], chars: BorderChars) -> String {
    let vertical = chars.vertical.to_string();
    labels
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (label, &width))| {
            format!(
                "\x1b[1;{}m{}\x1b[0m",
                31 + idx % HEADER_COLORS,
                center_ansi(label, width)
            )
        })
        .collect::<Vec<_>>()
        .join(&vertical)
}

fn data_line(row: &[RenderedCell], widths: &[usize], chars: BorderChars) -> String {
    let vertical = chars.vertical.to_string();
    row.iter()
        .zip(widths)
        .map(|(cell, &width)| {
            // Negative numbers lose their left pad so their digits line up.
            let pre = if crate::ansi::strip_ansi(&cell.text).starts_with('-') {
                0
            } else {
                1
            };
            let post = width.saturating_sub(cell.visible + pre);

            format!("{}{}{}", " ".repeat(pre), cell.text, " ".repeat(post))
        })
        .collect::<Vec<_>>()
        .join(&vertical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;

    fn plain(lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| strip_ansi(l).into_owned()).collect()
    }

    #[test]
    fn test_grow_to_fit_shared() {
        let mut widths = vec![3, 3];
        grow_to_fit(&mut widths, 10, true);
        assert_eq!(widths, vec![5, 5]);
    }

    #[test]
    fn test_grow_to_fit_narrowest_first() {
        let mut widths = vec![4, 2, 2];
        grow_to_fit(&mut widths, 13, false);
        // 10 -> 13: the 2s grow first, leftmost on ties.
        assert_eq!(widths, vec![4, 4, 3]);
    }

    #[test]
    fn test_grow_to_fit_already_wide() {
        let mut widths = vec![8];
        grow_to_fit(&mut widths, 5, false);
        assert_eq!(widths, vec![8]);
    }

    #[test]
    fn test_grow_to_fit_no_columns() {
        let mut widths: Vec<usize> = Vec::new();
        grow_to_fit(&mut widths, 5, true);
        assert!(widths.is_empty());
    }

    #[test]
    fn test_auto_header_numbers_columns() {
        let lines = Table::new().render_lines(TableData::rows(vec![vec![1, 2, 3]]));
        let lines = plain(&lines);
        assert_eq!(lines[0], " 1 | 2 | 3 ");
        assert_eq!(lines[1], "---+---+---");
        assert_eq!(lines[2], " 1 | 2 | 3 ");
    }

    #[test]
    fn test_header_label_colors_rotate() {
        let labels: Vec<String> = (0..8).map(|i| i.to_string()).collect();
        let lines = Table::new()
            .header(Header::Labels(labels))
            .render_lines(TableData::Rows(Vec::new()));
        assert!(lines[0].starts_with("\x1b[1;31m"));
        assert!(lines[0].contains("\x1b[1;37m"));
        assert!(lines[0].ends_with("\x1b[1;31m 7 \x1b[0m"));
    }

    #[test]
    fn test_negative_numbers_not_left_padded() {
        let lines = Table::new()
            .header(Header::Hidden)
            .render_lines(TableData::rows(vec![vec![-5, 10]]));
        assert_eq!(plain(&lines), vec!["-5  | 10 "]);
    }

    #[test]
    fn test_title_grows_uniform_columns() {
        let lines = Table::new()
            .header(Header::title("A long title"))
            .render_lines(TableData::rows(vec![vec![1, 2]]));
        let lines = plain(&lines);
        // The title needs 14 columns; 3+1+3 grows two at a time to 7+1+7.
        assert_eq!(lines[0], " A long title  ");
        assert_eq!(lines[1], "-------+-------");
        assert_eq!(lines[2], " 1     | 2     ");
    }

    #[test]
    fn test_title_with_no_data() {
        let lines = Table::new()
            .header(Header::title("T"))
            .render_lines(TableData::Rows(Vec::new()));
        assert_eq!(plain(&lines), vec![" T ", "---"]);
    }

    #[test]
    fn test_empty_table_emits_header_and_separator() {
        let lines = Table::new().render_lines(TableData::Rows(Vec::new()));
        assert_eq!(lines, vec![String::new(), String::new()]);
    }

    #[test]
    fn test_hidden_header_empty_table() {
        let lines = Table::new()
            .header(Header::Hidden)
            .render_lines(TableData::Rows(Vec::new()));
        assert!(lines.is_empty());
    }

    #[derive(Debug)]
    struct ColumnsEcho;

    impl Highlighter for ColumnsEcho {
        fn highlight(&self, _value: &Cell, columns: usize) -> Option<String> {
            Some(format!("w{columns}"))
        }
    }

    #[test]
    fn test_terminal_width_reaches_highlighter() {
        let lines = Table::new()
            .header(Header::Hidden)
            .highlighter(Arc::new(ColumnsEcho))
            .terminal(&crate::console::FixedWidth(40))
            .render_lines(TableData::rows(vec![vec![1]]));
        assert_eq!(lines, vec![" w40 "]);
    }

    #[test]
    fn test_write_to_sink() {
        let mut sink = Vec::new();
        Table::new()
            .header(Header::Hidden)
            .write_to(TableData::rows(vec![vec!["a"]]), &mut sink)
            .unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), " a \n");
    }
}

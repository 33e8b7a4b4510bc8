//! Property-based tests for text measurement and table layout.

use mb_util::ansi::{center_ansi, strip_ansi, visible_length};
use mb_util::color::{rgb_to_ansi256, rgb_truecolor, Layer};
use mb_util::table::{ColumnWidths, Header, Table, TableData};
use mb_util::value::Cell;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Text mixed with SGR, cursor and clear sequences.
fn ansi_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Z0-9 .,-]{0,8}",
        Just("\x1b[0m".to_string()),
        Just("\x1b[1;33m".to_string()),
        Just("\x1b[38;5;240m".to_string()),
        Just("\x1b[2J".to_string()),
        Just("\x1b[m".to_string()),
    ];
    prop::collection::vec(piece, 0..8).prop_map(|pieces| pieces.concat())
}

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Absent),
        any::<i64>().prop_map(Cell::Integer),
        (-1.0e6f64..1.0e6).prop_map(Cell::Float),
        any::<bool>().prop_map(Cell::Bool),
        ansi_text().prop_map(Cell::Text),
    ]
}

fn rows() -> impl Strategy<Value = Vec<Vec<Cell>>> {
    prop::collection::vec(prop::collection::vec(cell(), 0..5), 0..6)
}

fn header() -> impl Strategy<Value = Header> {
    prop_oneof![
        Just(Header::Hidden),
        Just(Header::Auto),
        prop::collection::vec("[a-z]{0,6}", 0..6).prop_map(Header::Labels),
        "[A-Za-z ]{0,30}".prop_map(Header::Title),
    ]
}

fn widths() -> impl Strategy<Value = ColumnWidths> {
    prop_oneof![
        Just(ColumnWidths::Uniform),
        Just(ColumnWidths::Variable),
        (0usize..12).prop_map(ColumnWidths::Min),
        prop::collection::vec(0usize..12, 0..6).prop_map(ColumnWidths::PerColumn),
    ]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Stripping twice is the same as stripping once.
    #[test]
    fn strip_is_idempotent(s in ansi_text()) {
        let once = strip_ansi(&s).into_owned();
        prop_assert_eq!(strip_ansi(&once).into_owned(), once);
    }

    /// Centering never shrinks text and fills narrower targets exactly.
    #[test]
    fn center_reaches_target_width(s in ansi_text(), width in 0usize..40) {
        let centered = center_ansi(&s, width);
        prop_assert_eq!(visible_length(&centered), visible_length(&s).max(width));
    }

    /// Every line of a table has the same visible width.
    #[test]
    fn table_lines_have_equal_width(
        rows in rows(),
        header in header(),
        widths in widths(),
        separate in any::<bool>(),
        show_absence in any::<bool>(),
    ) {
        let lines = Table::new()
            .header(header)
            .column_widths(widths)
            .separate_rows(separate)
            .show_absence(show_absence)
            .render_lines(TableData::Rows(rows));

        if let Some(first) = lines.first() {
            let width = visible_length(first);
            for line in &lines {
                prop_assert_eq!(visible_length(line), width);
            }
        }
    }

    /// Without a header, there is exactly one line per row plus separators.
    #[test]
    fn table_line_count(rows in rows(), separate in any::<bool>()) {
        let count = rows.len();
        let lines = Table::new()
            .header(Header::Hidden)
            .separate_rows(separate)
            .render_lines(TableData::Rows(rows));

        let expected = if separate { (2 * count).saturating_sub(1) } else { count };
        prop_assert_eq!(lines.len(), expected);
    }

    /// Palette indices stay within the extended 256-color range.
    #[test]
    fn ansi256_in_range(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        prop_assert!(rgb_to_ansi256((r, g, b)) >= 16);
    }

    /// Truecolor sequences are pure escapes with no visible text.
    #[test]
    fn truecolor_is_invisible(
        r in -100.0f64..400.0,
        g in -100.0f64..400.0,
        b in -100.0f64..400.0,
        fallback in any::<bool>(),
    ) {
        let seq = rgb_truecolor(r, g, b, fallback, Layer::Foreground);
        prop_assert_eq!(visible_length(&seq), 0);
    }
}

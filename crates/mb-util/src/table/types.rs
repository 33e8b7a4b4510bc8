//! Input and layout types for [`Table`](super::Table).

use crate::value::Cell;

/// Tabular data in row-major or named-column form.
#[derive(Clone, Debug, PartialEq)]
pub enum TableData {
    /// Rows of cells. Rows may have different lengths.
    Rows(Vec<Vec<Cell>>),
    /// Named columns in display order. Columns may have different lengths.
    Columns(Vec<(String, Vec<Cell>)>),
}

impl TableData {
    /// Builds row-major data from anything iterable.
    ///
    /// ```rust
    /// use mb_util::table::TableData;
    ///
    /// let data = TableData::rows(vec![vec![1, 2], vec![3]]);
    /// ```
    pub fn rows<R, C>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        TableData::Rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Builds named-column data. Names become the default header labels.
    pub fn columns<K, V, C>(columns: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        TableData::Columns(
            columns
                .into_iter()
                .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Converts to rows, returning the column names for named-column data.
    ///
    /// Columns are padded with [`Cell::Absent`] to the longest one before
    /// being transposed, so every resulting row has one cell per column.
    pub(crate) fn into_rows(self) -> (Vec<Vec<Cell>>, Option<Vec<String>>) {
        match self {
            TableData::Rows(rows) => (rows, None),
            TableData::Columns(columns) => {
                let height = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
                let mut names = Vec::with_capacity(columns.len());
                let mut rows = vec![Vec::with_capacity(columns.len()); height];

                for (name, values) in columns {
                    names.push(name);
                    let mut values = values.into_iter();
                    for row in &mut rows {
                        row.push(values.next().unwrap_or_default());
                    }
                }

                (rows, Some(names))
            }
        }
    }
}

impl From<Vec<Vec<Cell>>> for TableData {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        TableData::Rows(rows)
    }
}

impl From<Vec<(String, Vec<Cell>)>> for TableData {
    fn from(columns: Vec<(String, Vec<Cell>)>) -> Self {
        TableData::Columns(columns)
    }
}

/// What to show above the data rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Header {
    /// No header and no separator line.
    Hidden,
    /// Column names for named-column data, otherwise `1`, `2`, `3`, ...
    #[default]
    Auto,
    /// Explicit labels. Missing labels are blank; extra labels add columns.
    Labels(Vec<String>),
    /// One bold title centered across the whole table.
    Title(String),
}

impl Header {
    pub fn labels<S: Into<String>, I: IntoIterator<Item = S>>(labels: I) -> Self {
        Header::Labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn title(title: impl Into<String>) -> Self {
        Header::Title(title.into())
    }
}

/// How column widths are chosen.
///
/// Widths include one column of padding on each side of the content. No
/// column is ever narrower than its widest cell or label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnWidths {
    /// Every column is as wide as the widest column.
    #[default]
    Uniform,
    /// Each column is as wide as its own content.
    Variable,
    /// Each column is sized to its content but at least this wide.
    Min(usize),
    /// Per-column minimums; columns beyond the list have none.
    PerColumn(Vec<usize>),
}

impl ColumnWidths {
    /// Applies this policy to the natural (content) widths.
    pub(crate) fn resolve(&self, natural: &[usize]) -> Vec<usize> {
        match self {
            ColumnWidths::Uniform => {
                let widest = natural.iter().copied().max().unwrap_or(0);
                vec![widest; natural.len()]
            }
            ColumnWidths::Variable => natural.to_vec(),
            ColumnWidths::Min(min) => natural.iter().map(|&w| w.max(*min)).collect(),
            ColumnWidths::PerColumn(mins) => natural
                .iter()
                .enumerate()
                .map(|(i, &w)| w.max(mins.get(i).copied().unwrap_or(0)))
                .collect(),
        }
    }

    /// Whether all columns grow together when the table must get wider.
    pub(crate) fn is_shared(&self) -> bool {
        matches!(self, ColumnWidths::Uniform)
    }
}

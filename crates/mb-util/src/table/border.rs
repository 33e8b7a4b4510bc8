//! Border character sets.

/// Characters used for column separators and separator lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// ASCII borders: -, |, +
    #[default]
    Ascii,
    /// Light box-drawing: ─, │, ┼
    Light,
    /// Heavy box-drawing: ━, ┃, ╋
    Heavy,
    /// Double-line box-drawing: ═, ║, ╬
    Double,
}

impl BorderStyle {
    pub(crate) fn chars(self) -> BorderChars {
        match self {
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                cross: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                cross: '┼',
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                cross: '╋',
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                cross: '╬',
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub cross: char,
}

impl BorderChars {
    /// A separator line: one run of `horizontal` per column, joined by `cross`.
    pub fn separator(&self, widths: &[usize]) -> String {
        let mut line = String::new();
        for (i, &width) in widths.iter().enumerate() {
            if i > 0 {
                line.push(self.cross);
            }
            line.extend(std::iter::repeat(self.horizontal).take(width));
        }
        line
    }
}

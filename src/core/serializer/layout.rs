//! Column widths and line assembly

use super::options::TableOptions;
use crate::ast::Align;

/// Narrowest column that still fits `---`, `:--`, `--:` and `:-:`
const MIN_DELIMITER_WIDTH: usize = 3;

/// Rendered cell text, laid out into lines
pub(crate) struct Layout<'a> {
    options: &'a TableOptions,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl<'a> Layout<'a> {
    /// Normalize every row to `columns` cells and measure the columns
    pub fn new(
        options: &'a TableOptions,
        align: &[Align],
        mut rows: Vec<Vec<String>>,
        columns: usize,
        with_delimiter: bool,
    ) -> Self {
        let align: Vec<Align> = (0..columns)
            .map(|c| align.get(c).copied().unwrap_or_default())
            .collect();
        for row in &mut rows {
            row.resize(columns, String::new());
        }

        let minimum = if with_delimiter { MIN_DELIMITER_WIDTH } else { 1 };
        let widths = (0..columns)
            .map(|c| {
                rows.iter()
                    .map(|row| options.string_length.measure(&row[c]))
                    .max()
                    .unwrap_or(0)
                    .max(minimum)
            })
            .collect();

        Layout {
            options,
            align,
            rows,
            widths,
        }
    }

    /// Every row as a line, with the delimiter row after the first
    pub fn table_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let mut rows = self.rows.iter();
        let header = rows.next().cloned().unwrap_or_else(|| vec![String::new(); self.widths.len()]);
        lines.push(self.line(&header));
        lines.push(self.line(&self.delimiter_cells()));
        lines.extend(rows.map(|row| self.line(row)));
        lines
    }

    /// The first row only
    pub fn row_line(&self) -> String {
        self.rows.first().map(|row| self.line(row)).unwrap_or_default()
    }

    fn delimiter_cells(&self) -> Vec<String> {
        self.align
            .iter()
            .zip(&self.widths)
            .map(|(align, &width)| {
                let before = if align.leading_colon() { ":" } else { "" };
                let after = if align.trailing_colon() { ":" } else { "" };
                let dashes = if self.options.pipe_align {
                    width.saturating_sub(before.len() + after.len()).max(1)
                } else {
                    1
                };
                format!("{}{}{}", before, "-".repeat(dashes), after)
            })
            .collect()
    }

    fn line(&self, cells: &[String]) -> String {
        let mut line = String::new();
        for (c, cell) in cells.iter().enumerate() {
            let (before, after) = if self.options.pipe_align {
                let size = self.options.string_length.measure(cell);
                pad(self.align[c], self.widths[c].saturating_sub(size))
            } else {
                (0, 0)
            };

            line.push('|');
            if self.options.cell_padding && !(cell.is_empty() && !self.options.pipe_align) {
                line.push(' ');
            }
            line.push_str(&" ".repeat(before));
            line.push_str(cell);
            line.push_str(&" ".repeat(after));
            if self.options.cell_padding {
                line.push(' ');
            }
        }
        line.push('|');
        line
    }
}

/// Spaces before and after a cell that is `room` short of its column
fn pad(align: Align, room: usize) -> (usize, usize) {
    match align {
        Align::Right => (room, 0),
        Align::Center => (room / 2, room - room / 2),
        Align::None | Align::Left => (0, room),
    }
}

//! Table, row and cell nodes

use super::inline::Inline;
use super::position::Position;

/// Column alignment, from the colons of the delimiter row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// `---`
    #[default]
    None,
    /// `:--`
    Left,
    /// `:-:`
    Center,
    /// `--:`
    Right,
}

impl Align {
    /// Alignment for a delimiter cell with the given colon markers
    pub fn from_colons(leading: bool, trailing: bool) -> Self {
        match (leading, trailing) {
            (true, true) => Align::Center,
            (true, false) => Align::Left,
            (false, true) => Align::Right,
            (false, false) => Align::None,
        }
    }

    /// Whether the delimiter cell starts with a colon
    pub fn leading_colon(&self) -> bool {
        matches!(self, Align::Left | Align::Center)
    }

    /// Whether the delimiter cell ends with a colon
    pub fn trailing_colon(&self) -> bool {
        matches!(self, Align::Right | Align::Center)
    }

    /// Name used in diagnostics and debug output
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::None => "none",
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// A table cell: phrasing content, aligned by its column in the table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub children: Vec<Inline>,
    pub position: Option<Position>,
}

impl Cell {
    pub fn new(children: Vec<Inline>) -> Self {
        Cell {
            children,
            position: None,
        }
    }

    /// Cell holding a single text node
    pub fn text(value: impl Into<String>) -> Self {
        Cell::new(vec![Inline::text(value)])
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A table row. The first row of a table is its header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub position: Option<Position>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row {
            cells,
            position: None,
        }
    }

    /// Row of single-text cells
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Row::new(texts.into_iter().map(Cell::text).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A pipe table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// One entry per column
    pub align: Vec<Align>,
    pub rows: Vec<Row>,
    pub position: Option<Position>,
}

impl Table {
    pub fn new(align: Vec<Align>, rows: Vec<Row>) -> Self {
        Table {
            align,
            rows,
            position: None,
        }
    }

    /// Number of columns: the alignment length, or the widest row when no
    /// alignment is set.
    pub fn num_cols(&self) -> usize {
        if self.align.is_empty() {
            self.rows.iter().map(Row::len).max().unwrap_or(0)
        } else {
            self.align.len()
        }
    }

    /// Copy of this table with every position removed
    pub fn without_positions(&self) -> Table {
        let mut table = self.clone();
        table.strip_positions();
        table
    }

    pub fn strip_positions(&mut self) {
        self.position = None;
        for row in &mut self.rows {
            row.position = None;
            for cell in &mut row.cells {
                cell.position = None;
                cell.children.iter_mut().for_each(Inline::strip_positions);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_from_colons() {
        assert_eq!(Align::from_colons(false, false), Align::None);
        assert_eq!(Align::from_colons(true, false), Align::Left);
        assert_eq!(Align::from_colons(false, true), Align::Right);
        assert_eq!(Align::from_colons(true, true), Align::Center);
    }

    #[test]
    fn test_num_cols_without_alignment() {
        let table = Table::new(
            vec![],
            vec![Row::from_texts(["a", "b"]), Row::from_texts(["c", "d", "e"])],
        );
        assert_eq!(table.num_cols(), 3);
    }

    #[test]
    fn test_num_cols_follows_alignment() {
        let table = Table::new(vec![Align::None], vec![Row::from_texts(["a", "b"])]);
        assert_eq!(table.num_cols(), 1);
    }
}

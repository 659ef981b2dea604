//! Token stream to syntax tree
//!
//! A single pass over the scanner's tokens with a stack of open frames.
//! Start tokens push a frame, end tokens pop it into its parent. The
//! scanner never emits a broken stream, so every structural problem here
//! is reported as [`TableError::Build`].

use std::borrow::Cow;

use tracing::trace;

use super::escape::unescape_cell_code;
use super::scanner::{Token, TokenKind};
use crate::ast::{Align, Cell, Inline, LineIndex, Row, Table};
use crate::host::{InlineContext, InlineParser};
use crate::utils::error::{TableError, TableResult};

/// An open node
#[derive(Debug)]
enum Frame {
    Table(Table),
    Row(Row),
    Cell(Cell),
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Frame::Table(_) => "table",
            Frame::Row(_) => "row",
            Frame::Cell(_) => "cell",
        }
    }
}

/// Builds a [`Table`] from a token stream
pub struct TableTreeBuilder<'a> {
    source: &'a str,
    parser: &'a dyn InlineParser,
    index: Cow<'a, LineIndex<'a>>,
}

impl<'a> TableTreeBuilder<'a> {
    /// `source` must be the text the tokens were scanned from
    ///
    /// Indexes the whole of `source`. Drivers that build many tables from
    /// one document should share an index through [`with_index`](Self::with_index).
    pub fn new(source: &'a str, parser: &'a dyn InlineParser) -> Self {
        TableTreeBuilder {
            source,
            parser,
            index: Cow::Owned(LineIndex::new(source)),
        }
    }

    /// Builder over an existing index of the scanned text
    pub fn with_index(index: &'a LineIndex<'a>, parser: &'a dyn InlineParser) -> Self {
        TableTreeBuilder {
            source: index.source(),
            parser,
            index: Cow::Borrowed(index),
        }
    }

    pub fn build(&self, tokens: &[Token]) -> TableResult<Table> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut align: Option<Vec<Align>> = None;
        let mut finished: Option<Table> = None;

        for token in tokens {
            let offset = token.span.start;
            if finished.is_some() {
                return Err(TableError::build(
                    format!("{} after table end", token.kind.name()),
                    offset,
                ));
            }

            match &token.kind {
                TokenKind::TableStart => {
                    if let Some(open) = stack.last() {
                        return Err(TableError::build(
                            format!("table start inside {}", open.name()),
                            offset,
                        ));
                    }
                    stack.push(Frame::Table(Table {
                        position: Some(self.index.position(token.span.clone())),
                        ..Default::default()
                    }));
                }
                TokenKind::RowStart => {
                    expect_top(&stack, "table", token)?;
                    stack.push(Frame::Row(Row {
                        position: Some(self.index.position(token.span.clone())),
                        ..Default::default()
                    }));
                }
                TokenKind::CellStart => {
                    expect_top(&stack, "row", token)?;
                    stack.push(Frame::Cell(Cell {
                        position: Some(self.index.position(token.span.clone())),
                        ..Default::default()
                    }));
                }
                TokenKind::CellContent => {
                    let children = self.parse_cell(token)?;
                    match stack.last_mut() {
                        Some(Frame::Cell(cell)) => cell.children.extend(children),
                        _ => return Err(misplaced(&stack, "cell", token)),
                    }
                }
                TokenKind::CellEnd => {
                    let cell = match stack.pop() {
                        Some(Frame::Cell(cell)) => cell,
                        other => return Err(unbalanced(other, "cell", token)),
                    };
                    match stack.last_mut() {
                        Some(Frame::Row(row)) => row.cells.push(cell),
                        _ => return Err(misplaced(&stack, "row", token)),
                    }
                }
                TokenKind::RowEnd => {
                    let row = match stack.pop() {
                        Some(Frame::Row(row)) => row,
                        other => return Err(unbalanced(other, "row", token)),
                    };
                    match stack.last_mut() {
                        Some(Frame::Table(table)) => table.rows.push(row),
                        _ => return Err(misplaced(&stack, "table", token)),
                    }
                }
                TokenKind::DelimiterRow(columns) => {
                    expect_top(&stack, "table", token)?;
                    if align.is_some() {
                        return Err(TableError::build("second delimiter row", offset));
                    }
                    align = Some(columns.clone());
                }
                TokenKind::TableEnd => {
                    let mut table = match stack.pop() {
                        Some(Frame::Table(table)) => table,
                        other => return Err(unbalanced(other, "table", token)),
                    };
                    table.align = align
                        .take()
                        .ok_or_else(|| TableError::build("table without delimiter row", offset))?;
                    let columns = table.align.len();
                    for row in table.rows.iter_mut().skip(1) {
                        row.cells.truncate(columns);
                    }
                    finished = Some(table);
                }
            }
        }

        let table = finished.ok_or_else(|| {
            TableError::build("token stream ended inside a table", self.source.len())
        })?;
        trace!(
            rows = table.rows.len(),
            columns = table.align.len(),
            "table built"
        );
        Ok(table)
    }

    /// Hand one cell's content to the host
    fn parse_cell(&self, token: &Token) -> TableResult<Vec<Inline>> {
        let text = self
            .source
            .get(token.span.clone())
            .ok_or_else(|| TableError::build("cell content outside source", token.span.start))?;
        let base = self.index.point(token.span.start);
        let mut children = self
            .parser
            .parse_inline(text, base, &InlineContext::table_cell());
        for child in &mut children {
            child.map_code_values(&unescape_cell_code);
        }
        Ok(children)
    }
}

fn expect_top(stack: &[Frame], parent: &str, token: &Token) -> TableResult<()> {
    match stack.last() {
        Some(frame) if frame.name() == parent => Ok(()),
        _ => Err(misplaced(stack, parent, token)),
    }
}

fn misplaced(stack: &[Frame], parent: &str, token: &Token) -> TableError {
    let found = stack.last().map_or("nothing", Frame::name);
    TableError::build(
        format!("{} outside of a {} (inside {})", token.kind.name(), parent, found),
        token.span.start,
    )
}

fn unbalanced(popped: Option<Frame>, expected: &str, token: &Token) -> TableError {
    let found = popped.as_ref().map_or("nothing", Frame::name);
    TableError::build(
        format!("{} closes {} instead of {}", token.kind.name(), found, expected),
        token.span.start,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::Point;
    use crate::core::scanner::{CellScanner, ScanContext};
    use crate::host::Phrasing;

    fn build(source: &str) -> Table {
        let ctx = ScanContext::from_host(source, &Phrasing);
        let scan = CellScanner::new().scan(source, 0, &ctx).unwrap();
        TableTreeBuilder::new(source, &Phrasing)
            .build(&scan.tokens)
            .unwrap()
    }

    #[test]
    fn test_build_basic_table() {
        let table = build("| a | b |\n| - | -: |\n| 1 | 2 |");
        assert_eq!(table.align, vec![Align::None, Align::Right]);
        assert_eq!(
            table.without_positions().rows,
            vec![Row::from_texts(["a", "b"]), Row::from_texts(["1", "2"])]
        );
    }

    #[test]
    fn test_positions() {
        let table = build("| a | b |\n| - | - |");
        let position = table.position.unwrap();
        assert_eq!(position.start, Point::new(1, 1, 0));
        assert_eq!(position.end, Point::new(2, 10, 19));

        let cell = &table.rows[0].cells[1];
        assert_eq!(cell.position.map(|p| p.range()), Some(4..9));
        assert_eq!(cell.children[0].position().map(|p| p.start), Some(Point::new(1, 7, 6)));
    }

    #[test]
    fn test_shared_index_positions() {
        let source = "intro\n\n| a |\n| - |";
        let index = LineIndex::new(source);
        let ctx = ScanContext::from_host(source, &Phrasing);
        let scan = CellScanner::new().scan(source, 7, &ctx).unwrap();
        let table = TableTreeBuilder::with_index(&index, &Phrasing)
            .build(&scan.tokens)
            .unwrap();
        assert_eq!(table.position.map(|p| p.start), Some(Point::new(3, 1, 7)));
        assert_eq!(
            table,
            TableTreeBuilder::new(source, &Phrasing).build(&scan.tokens).unwrap()
        );
    }

    #[test]
    fn test_empty_cell_has_no_children() {
        let table = build("| | a |\n| - | - |");
        assert!(table.rows[0].cells[0].is_empty());
    }

    #[test]
    fn test_body_rows_truncated_not_padded() {
        let table = build("| a | b |\n| - | - |\n| 1 | 2 | 3 |\n| 4 |");
        let widths: Vec<usize> = table.rows.iter().map(Row::len).collect();
        assert_eq!(widths, vec![2, 2, 1]);
    }

    #[test]
    fn test_code_in_cell_is_unescaped() {
        let table = build("| `a\\|b` |\n| - |");
        assert_eq!(
            table.without_positions().rows[0].cells[0].children,
            vec![Inline::code("a|b")]
        );
    }

    #[test]
    fn test_unbalanced_streams() {
        let builder = TableTreeBuilder::new("| a |", &Phrasing);

        let err = builder
            .build(&[Token::new(TokenKind::RowStart, 0..5)])
            .unwrap_err();
        assert!(err.to_string().contains("row start outside of a table"));

        let err = builder
            .build(&[
                Token::new(TokenKind::TableStart, 0..5),
                Token::new(TokenKind::RowStart, 0..5),
                Token::new(TokenKind::TableEnd, 0..5),
            ])
            .unwrap_err();
        assert!(err.to_string().contains("closes row instead of table"));

        let err = builder
            .build(&[Token::new(TokenKind::TableStart, 0..5)])
            .unwrap_err();
        assert!(err.to_string().contains("ended inside a table"));
    }

    #[test]
    fn test_missing_delimiter_row() {
        let builder = TableTreeBuilder::new("| a |", &Phrasing);
        let err = builder
            .build(&[
                Token::new(TokenKind::TableStart, 0..5),
                Token::new(TokenKind::TableEnd, 0..5),
            ])
            .unwrap_err();
        assert!(err.to_string().contains("without delimiter row"));
    }
}

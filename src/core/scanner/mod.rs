//! Pipe table recognition
//!
//! The scanner looks at the line where the host would start a block and
//! decides whether a table starts there. A table needs a header row with
//! at least one delimiter pipe, followed by a delimiter row with the same
//! number of cells. Body rows follow until a blank line, another block, or
//! the end of input.
//!
//! Recognition is all or nothing: a failed scan emits no tokens and the
//! host parses the lines as it would without tables. A successful scan
//! emits a flat token stream for [`TableTreeBuilder`](super::TableTreeBuilder).

mod context;
mod delimiter;
mod row;
mod token;

#[cfg(test)]
mod tests;

use std::fmt;

use tracing::{debug, trace};

use crate::ast::Align;

pub use context::ScanContext;
pub use token::{TableScan, Token, TokenKind};

use delimiter::{parse_delimiter_row, starts_other_block};
use row::{indent_width, line_at, split_row, SplitRow};

/// Why no table starts at a given offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No line starts at the offset
    EndOfInput,
    /// The header line is empty or spaces and tabs only
    BlankLine,
    /// Header or delimiter row indented four or more columns
    Indented,
    /// The header line opens another block construct
    OtherBlock,
    /// The header line has no delimiter pipe
    NoPipe,
    /// The header line is not followed by a delimiter row
    MissingDelimiterRow,
    /// A delimiter cell is not dashes with optional colons
    MalformedDelimiter { column: usize },
    /// The delimiter row has neither `|` nor `:`
    NoAlignmentMarker,
    /// Header and delimiter rows have different cell counts
    ColumnMismatch { header: usize, delimiter: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EndOfInput => write!(f, "end of input"),
            Rejection::BlankLine => write!(f, "blank line"),
            Rejection::Indented => write!(f, "indented four or more columns"),
            Rejection::OtherBlock => write!(f, "line starts another block"),
            Rejection::NoPipe => write!(f, "header row has no delimiter pipe"),
            Rejection::MissingDelimiterRow => write!(f, "no delimiter row after header"),
            Rejection::MalformedDelimiter { column } => {
                write!(f, "delimiter cell {} is not made of dashes", column + 1)
            }
            Rejection::NoAlignmentMarker => {
                write!(f, "delimiter row has no `|` or `:`")
            }
            Rejection::ColumnMismatch { header, delimiter } => write!(
                f,
                "header has {} cells but delimiter row has {}",
                header, delimiter
            ),
        }
    }
}

/// Table recognizer
#[derive(Debug, Clone, Copy, Default)]
pub struct CellScanner;

impl CellScanner {
    /// Create a new scanner
    pub fn new() -> Self {
        CellScanner
    }

    /// Scan for a table starting at the line at `start`
    pub fn scan(&self, source: &str, start: usize, ctx: &ScanContext) -> Option<TableScan> {
        match self.explain(source, start, ctx) {
            Ok(scan) => Some(scan),
            Err(rejection) => {
                debug!(offset = start, reason = %rejection, "no table");
                None
            }
        }
    }

    /// Like [`scan`](Self::scan), but says why no table was found
    pub fn explain(
        &self,
        source: &str,
        start: usize,
        ctx: &ScanContext,
    ) -> Result<TableScan, Rejection> {
        let header_line = line_at(source, start).ok_or(Rejection::EndOfInput)?;
        let header_text = header_line.text(source);
        if header_line.is_blank(source) {
            return Err(Rejection::BlankLine);
        }
        if indent_width(header_text) >= 4 {
            return Err(Rejection::Indented);
        }
        if starts_other_block(header_text) {
            return Err(Rejection::OtherBlock);
        }

        let header = split_row(source, &header_line, ctx);
        if header.pipes == 0 {
            return Err(Rejection::NoPipe);
        }

        let delimiter_line =
            line_at(source, header_line.next).ok_or(Rejection::MissingDelimiterRow)?;
        let (align, delimiter_span) = parse_delimiter_row(source, &delimiter_line)?;
        if align.len() != header.cells.len() {
            return Err(Rejection::ColumnMismatch {
                header: header.cells.len(),
                delimiter: align.len(),
            });
        }

        let mut body = Vec::new();
        let mut resume = delimiter_line.next;
        while let Some(line) = line_at(source, resume) {
            if line.is_blank(source) || starts_other_block(line.text(source)) {
                break;
            }
            let row = split_row(source, &line, ctx);
            trace!(offset = line.start, cells = row.cells.len(), "body row");
            body.push(row);
            resume = line.next;
        }

        let table_end = body
            .last()
            .map(|row| row.span.end)
            .unwrap_or(delimiter_span.end);
        let table_span = header.span.start..table_end;

        debug!(
            offset = table_span.start,
            align = ?align.iter().map(Align::as_str).collect::<Vec<_>>(),
            body_rows = body.len(),
            "table recognized"
        );

        let mut tokens = vec![Token::new(TokenKind::TableStart, table_span.clone())];
        push_row(&mut tokens, &header);
        tokens.push(Token::new(TokenKind::DelimiterRow(align), delimiter_span));
        for row in &body {
            push_row(&mut tokens, row);
        }
        tokens.push(Token::new(TokenKind::TableEnd, table_span.clone()));

        Ok(TableScan {
            tokens,
            span: table_span,
            resume,
        })
    }
}

fn push_row(tokens: &mut Vec<Token>, row: &SplitRow) {
    tokens.push(Token::new(TokenKind::RowStart, row.span.clone()));
    for cell in &row.cells {
        tokens.push(Token::new(TokenKind::CellStart, cell.span.clone()));
        if !cell.content.is_empty() {
            tokens.push(Token::new(TokenKind::CellContent, cell.content.clone()));
        }
        tokens.push(Token::new(TokenKind::CellEnd, cell.span.clone()));
    }
    tokens.push(Token::new(TokenKind::RowEnd, row.span.clone()));
}

//! Token stream handed from the scanner to the tree builder

use std::ops::Range;

use crate::ast::Align;

/// Kind of a table token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    TableStart,
    RowStart,
    CellStart,
    /// Trimmed cell content, for the host inline parser
    CellContent,
    CellEnd,
    RowEnd,
    /// The delimiter row, with one alignment per column
    DelimiterRow(Vec<Align>),
    TableEnd,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::TableStart => "table start",
            TokenKind::RowStart => "row start",
            TokenKind::CellStart => "cell start",
            TokenKind::CellContent => "cell content",
            TokenKind::CellEnd => "cell end",
            TokenKind::RowEnd => "row end",
            TokenKind::DelimiterRow(_) => "delimiter row",
            TokenKind::TableEnd => "table end",
        }
    }
}

/// A token and the bytes it covers
///
/// Start and end tokens carry the span of the whole node they open or
/// close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Token { kind, span }
    }
}

/// A recognized table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScan {
    pub tokens: Vec<Token>,
    /// Bytes covered by the table, header start to last row end
    pub span: Range<usize>,
    /// Offset of the first line after the table
    pub resume: usize,
}

impl TableScan {
    /// Cells per row as written, header first
    pub fn row_widths(&self) -> Vec<usize> {
        let mut widths = Vec::new();
        for token in &self.tokens {
            match token.kind {
                TokenKind::RowStart => widths.push(0),
                TokenKind::CellStart => {
                    if let Some(last) = widths.last_mut() {
                        *last += 1;
                    }
                }
                _ => {}
            }
        }
        widths
    }

    /// Alignment from the delimiter row
    pub fn align(&self) -> &[Align] {
        self.tokens
            .iter()
            .find_map(|token| match &token.kind {
                TokenKind::DelimiterRow(align) => Some(align.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

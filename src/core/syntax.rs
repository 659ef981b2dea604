//! Recognition and tree construction in one step, for block drivers

use super::builder::TableTreeBuilder;
use super::scanner::{CellScanner, ScanContext};
use crate::ast::{LineIndex, Table};
use crate::host::InlineParser;
use crate::utils::error::TableResult;

/// A table parsed out of a larger document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub table: Table,
    /// Offset of the first line after the table
    pub resume: usize,
}

/// Pipe-table syntax extension for a host block parser
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSyntax {
    scanner: CellScanner,
}

impl TableSyntax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to parse a table starting at the line at `start`
    ///
    /// `Ok(None)` means no table starts there and the host should parse
    /// the line as it would otherwise.
    pub fn parse(
        &self,
        source: &str,
        start: usize,
        ctx: &ScanContext,
        parser: &dyn InlineParser,
    ) -> TableResult<Option<ParsedTable>> {
        let Some(scan) = self.scanner.scan(source, start, ctx) else {
            return Ok(None);
        };
        let table = TableTreeBuilder::new(source, parser).build(&scan.tokens)?;
        Ok(Some(ParsedTable {
            table,
            resume: scan.resume,
        }))
    }

    /// [`parse`](Self::parse) over a document index built once by the caller
    pub fn parse_indexed(
        &self,
        index: &LineIndex<'_>,
        start: usize,
        ctx: &ScanContext,
        parser: &dyn InlineParser,
    ) -> TableResult<Option<ParsedTable>> {
        let Some(scan) = self.scanner.scan(index.source(), start, ctx) else {
            return Ok(None);
        };
        let table = TableTreeBuilder::with_index(index, parser).build(&scan.tokens)?;
        Ok(Some(ParsedTable {
            table,
            resume: scan.resume,
        }))
    }
}

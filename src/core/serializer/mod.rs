//! Table to markdown
//!
//! Cell content is printed by the host, made safe for a cell, and laid
//! out into lines framed by `|`. Output is always a valid pipe table that
//! parses back to the same structure.

mod layout;
mod options;

#[cfg(test)]
mod tests;

use tracing::trace;

use super::escape::{escape_for_cell, EscapeContext};
use crate::ast::{Cell, Row, Table};
use crate::host::{InlineSerializer, Node, NodeHandler, NodeKind};
use crate::utils::error::TableResult;
use layout::Layout;

pub use options::{StringLength, TableConfig, TableOptions};

/// Prints tables, rows and cells as markdown
#[derive(Debug, Clone, Default)]
pub struct TableSerializer {
    options: TableOptions,
}

/// The serializer as registered with a host document driver
pub type TableRenderer = TableSerializer;

impl TableSerializer {
    pub fn new(options: TableOptions) -> Self {
        TableSerializer { options }
    }

    pub fn from_config(config: &TableConfig) -> TableResult<Self> {
        Ok(Self::new(TableOptions::from_config(config)?))
    }

    /// Header, delimiter row and body, one line each, no trailing newline
    pub fn render_table(&self, table: &Table, inline: &dyn InlineSerializer) -> String {
        let columns = table.num_cols();
        if columns == 0 {
            return String::new();
        }
        trace!(columns, rows = table.rows.len(), "rendering table");

        let rows = table
            .rows
            .iter()
            .map(|row| self.render_cells(row, inline))
            .collect();
        Layout::new(&self.options, &table.align, rows, columns, true)
            .table_lines()
            .join("\n")
    }

    /// A row on its own, without a delimiter row
    pub fn render_row(&self, row: &Row, inline: &dyn InlineSerializer) -> String {
        let cells = self.render_cells(row, inline);
        let columns = cells.len();
        Layout::new(&self.options, &[], vec![cells], columns, false).row_line()
    }

    /// The escaped content of a cell
    pub fn render_cell(&self, cell: &Cell, inline: &dyn InlineSerializer) -> String {
        let ctx = EscapeContext::table_cell();
        let mut out = String::new();
        let mut column = ctx.column;
        for child in &cell.children {
            let rendered = inline.render_inline(child, &ctx.at_column(column));
            column += rendered.chars().count();
            out.push_str(&escape_for_cell(&rendered, child.is_code()));
        }
        out
    }

    fn render_cells(&self, row: &Row, inline: &dyn InlineSerializer) -> Vec<String> {
        row.cells
            .iter()
            .map(|cell| self.render_cell(cell, inline))
            .collect()
    }
}

impl NodeHandler for TableSerializer {
    fn handles(&self) -> &[NodeKind] {
        &[NodeKind::Table, NodeKind::TableRow, NodeKind::TableCell]
    }

    fn render(&self, node: Node<'_>, inline: &dyn InlineSerializer) -> Option<String> {
        match node {
            Node::Table(table) => Some(self.render_table(table, inline)),
            Node::TableRow(row) => Some(self.render_row(row, inline)),
            Node::TableCell(cell) => Some(self.render_cell(cell, inline)),
            _ => None,
        }
    }
}

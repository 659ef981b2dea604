//! # gfm-table
//!
//! Reads and writes GitHub-Flavored-Markdown pipe tables.
//!
//! ## Features
//!
//! - **Recognition**: finds tables while a host markdown parser runs,
//!   respecting the host's escapes and code spans
//! - **Tree building**: table, row and cell nodes with column alignment and
//!   source positions
//! - **Serialization**: canonical, width-aligned output that never breaks
//!   out of a cell and never turns plain text into a table
//! - **Diagnostics**: ragged rows and almost-tables
//!
//! ## Usage Examples
//!
//! ### Reformat the tables of a document
//!
//! ```rust
//! use gfm_table::{format_tables, TableOptions};
//!
//! let out = format_tables("| a | b |\n|:-|-:|\n| 1 | 22 |", &TableOptions::default()).unwrap();
//! assert_eq!(out, "| a   |   b |\n| :-- | --: |\n| 1   |  22 |\n");
//! ```
//!
//! ### Build a table and print it
//!
//! ```rust
//! use gfm_table::{gfm_table_to_markdown, Align, Phrasing, Row, Table, TableConfig};
//!
//! let table = Table::new(
//!     vec![Align::Left, Align::Right],
//!     vec![Row::from_texts(["name", "size"]), Row::from_texts(["a|b", "3"])],
//! );
//! let renderer = gfm_table_to_markdown(&TableConfig::default()).unwrap();
//! let out = renderer.render_table(&table, &Phrasing);
//! assert_eq!(out, "| name | size |\n| :--- | ---: |\n| a\\|b |    3 |");
//! ```

/// Syntax tree
pub mod ast;

/// Escaping, recognition, tree building and serialization
pub mod core;

/// Host engine interfaces and the reference host
pub mod host;

/// Utility modules
pub mod utils;

pub use ast::{Align, Cell, Inline, LineIndex, Point, Position, Row, Table};
pub use self::core::{
    CellScanner, EscapeContext, ParsedTable, Rejection, ScanContext, StringLength, TableConfig,
    TableOptions, TableRenderer, TableScan, TableSerializer, TableSyntax, TableTreeBuilder, Token,
    TokenKind,
};
pub use host::{
    Block, InlineContext, InlineParser, InlineSerializer, Node, NodeHandler, NodeKind, Phrasing,
    Root,
};

pub use utils::diagnostics;
pub use utils::error::{TableError, TableResult};

/// The table syntax extension for a host parser
pub fn gfm_table_from_markdown() -> TableSyntax {
    TableSyntax::new()
}

/// The table node handler for a host serializer
///
/// Fails with [`TableError::Config`] on an unusable configuration, before
/// anything is rendered.
pub fn gfm_table_to_markdown(config: &TableConfig) -> TableResult<TableRenderer> {
    TableSerializer::from_config(config)
}

/// Every table in a markdown document, in order
pub fn parse_tables(markdown: &str) -> TableResult<Vec<Table>> {
    let root = host::document::from_markdown(markdown)?;
    Ok(root.tables().cloned().collect())
}

/// Reprint every table of a document in canonical form
///
/// Other blocks come out the way the reference host prints them.
pub fn format_tables(markdown: &str, options: &TableOptions) -> TableResult<String> {
    let root = host::document::from_markdown(markdown)?;
    let renderer = TableSerializer::new(options.clone());
    Ok(host::document::to_markdown(Node::Root(&root), &renderer))
}

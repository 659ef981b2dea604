//! Core table codec
//!
//! - `escape`: table-aware escaping decisions, shared by both directions
//! - `scanner`: recognizes a table at a block start and emits tokens
//! - `builder`: assembles tokens into a `Table`
//! - `serializer`: prints a `Table` back as markdown
//! - `syntax`: scanner and builder bound together for block drivers

pub mod builder;
pub mod escape;
pub mod scanner;
pub mod serializer;
pub mod syntax;

pub use builder::TableTreeBuilder;
pub use escape::{
    escape_char, escape_for_cell, escape_line_starts, needs_escape, unescape_cell_code,
    EscapeContext,
};
pub use scanner::{CellScanner, Rejection, ScanContext, TableScan, Token, TokenKind};
pub use serializer::{StringLength, TableConfig, TableOptions, TableRenderer, TableSerializer};
pub use syntax::{ParsedTable, TableSyntax};

//! Host markdown engine interfaces
//!
//! The table codec does not parse or print phrasing content itself. A
//! host engine plugs in through these traits:
//!
//! - [`InlineParser`]: finds code spans and parses cell content
//! - [`InlineSerializer`]: prints phrasing nodes with table-aware escaping
//! - [`NodeHandler`]: renders node kinds the host dispatches to it
//!
//! [`Phrasing`] is a small reference implementation of both inline traits,
//! and [`document`] a block driver that wires everything together.

pub mod document;
mod phrasing;

use std::ops::Range;

use crate::ast::{Cell, Inline, Point, Row, Table};
use crate::core::EscapeContext;

pub use document::{Block, Root};
pub use phrasing::Phrasing;

/// Where phrasing content being parsed lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineContext {
    pub in_table_cell: bool,
}

impl InlineContext {
    pub fn paragraph() -> Self {
        Self::default()
    }

    pub fn table_cell() -> Self {
        InlineContext {
            in_table_cell: true,
        }
    }
}

/// Host inline parsing
pub trait InlineParser {
    /// Byte ranges of the code spans in `text`, backtick fences included
    fn code_spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Parse phrasing content
    ///
    /// `base` is the source point of the first byte of `text`, used to
    /// position the returned nodes.
    fn parse_inline(&self, text: &str, base: Point, ctx: &InlineContext) -> Vec<Inline>;
}

/// Host inline serialization
pub trait InlineSerializer {
    /// Print one phrasing node written at `ctx`
    fn render_inline(&self, node: &Inline, ctx: &EscapeContext) -> String;

    /// Escape a literal text value written at `ctx`
    fn escape_text(&self, text: &str, ctx: &EscapeContext) -> String;
}

/// Kind of a node, for handler dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Paragraph,
    Table,
    TableRow,
    TableCell,
    Inline,
}

/// A borrowed node of any kind
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Root(&'a Root),
    Paragraph(&'a [Inline]),
    Table(&'a Table),
    TableRow(&'a Row),
    TableCell(&'a Cell),
    Inline(&'a Inline),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Table(_) => NodeKind::Table,
            Node::TableRow(_) => NodeKind::TableRow,
            Node::TableCell(_) => NodeKind::TableCell,
            Node::Inline(_) => NodeKind::Inline,
        }
    }
}

/// Renders the node kinds it claims
pub trait NodeHandler {
    fn handles(&self) -> &[NodeKind];

    /// Markdown for `node`, `None` for kinds this handler does not claim
    fn render(&self, node: Node<'_>, inline: &dyn InlineSerializer) -> Option<String>;
}

//! Minimal block driver: paragraphs and tables
//!
//! Enough of a markdown document to run the table codec end to end. Every
//! non-blank line that does not start a table belongs to a paragraph, and
//! a table may interrupt a paragraph.

use tracing::debug;

use super::{InlineContext, InlineParser, InlineSerializer, Node, NodeHandler, Phrasing};
use crate::ast::{Inline, LineIndex, Position, Table};
use crate::core::{EscapeContext, ScanContext, TableSerializer, TableSyntax};
use crate::utils::error::TableResult;

/// A top-level block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph {
        children: Vec<Inline>,
        position: Option<Position>,
    },
    Table(Table),
}

impl Block {
    pub fn node(&self) -> Node<'_> {
        match self {
            Block::Paragraph { children, .. } => Node::Paragraph(children.as_slice()),
            Block::Table(table) => Node::Table(table),
        }
    }
}

/// A parsed document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    pub children: Vec<Block>,
}

impl Root {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.children.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph { .. } => None,
        })
    }

    pub fn strip_positions(&mut self) {
        for block in &mut self.children {
            match block {
                Block::Paragraph { children, position } => {
                    *position = None;
                    children.iter_mut().for_each(Inline::strip_positions);
                }
                Block::Table(table) => table.strip_positions(),
            }
        }
    }
}

/// Parse a markdown document into paragraphs and tables
pub fn from_markdown(input: &str) -> TableResult<Root> {
    let phrasing = Phrasing::new();
    let ctx = ScanContext::from_host(input, &phrasing);
    let syntax = TableSyntax::new();
    let index = LineIndex::new(input);

    let mut root = Root::default();
    let mut paragraph: Option<(usize, usize)> = None;
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        let (end, next) = match rest.find('\n') {
            Some(i) => (offset + i, offset + i + 1),
            None => (input.len(), input.len()),
        };
        let line = input[offset..end].trim_end_matches('\r');

        if is_blank(line) {
            close_paragraph(input, &index, &phrasing, paragraph.take(), &mut root);
            offset = next;
            continue;
        }

        if let Some(parsed) = syntax.parse_indexed(&index, offset, &ctx, &phrasing)? {
            close_paragraph(input, &index, &phrasing, paragraph.take(), &mut root);
            root.children.push(Block::Table(parsed.table));
            offset = parsed.resume;
            continue;
        }

        let content_start = offset + (line.len() - line.trim_start_matches(BLANK).len());
        let line_end = offset + line.trim_end_matches(BLANK).len();
        paragraph = match paragraph {
            Some((start, _)) => Some((start, line_end)),
            None => Some((content_start, line_end)),
        };
        offset = next;
    }
    close_paragraph(input, &index, &phrasing, paragraph.take(), &mut root);

    debug!(
        blocks = root.children.len(),
        tables = root.tables().count(),
        "document parsed"
    );
    Ok(root)
}

const BLANK: [char; 2] = [' ', '\t'];

fn is_blank(line: &str) -> bool {
    line.trim_matches(BLANK).is_empty()
}

fn close_paragraph(
    input: &str,
    index: &LineIndex<'_>,
    parser: &dyn InlineParser,
    range: Option<(usize, usize)>,
    root: &mut Root,
) {
    let Some((start, end)) = range else {
        return;
    };
    let children = parser.parse_inline(
        &input[start..end],
        index.point(start),
        &InlineContext::paragraph(),
    );
    root.children.push(Block::Paragraph {
        children,
        position: Some(index.position(start..end)),
    });
}

/// Print any node as markdown
///
/// Node kinds claimed by `handler` go to it; the rest are printed by the
/// reference host. A root ends with a newline, blocks are separated by a
/// blank line.
pub fn to_markdown(node: Node<'_>, handler: &dyn NodeHandler) -> String {
    let phrasing = Phrasing::new();
    if handler.handles().contains(&node.kind()) {
        if let Some(out) = handler.render(node, &phrasing) {
            return out;
        }
    }

    match node {
        Node::Root(root) => {
            if root.children.is_empty() {
                return String::new();
            }
            let blocks: Vec<String> = root
                .children
                .iter()
                .map(|block| to_markdown(block.node(), handler))
                .collect();
            blocks.join("\n\n") + "\n"
        }
        Node::Paragraph(children) => phrasing.render_all(children, &EscapeContext::paragraph()),
        Node::Inline(inline) => phrasing.render_inline(inline, &EscapeContext::paragraph()),
        Node::Table(_) | Node::TableRow(_) | Node::TableCell(_) => TableSerializer::default()
            .render(node, &phrasing)
            .unwrap_or_default(),
    }
}

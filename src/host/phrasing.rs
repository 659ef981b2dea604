//! Reference phrasing engine
//!
//! Reading is done by `pulldown-cmark` with every extension off, so tables
//! are left to this crate. Lines that would open a block construct get a
//! backslash before their marker first, which keeps each text a single
//! run of phrasing. Links, images, autolinks and raw HTML are read back as
//! their source text.

use std::ops::Range;

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use super::{InlineContext, InlineParser, InlineSerializer};
use crate::ast::{Inline, LineIndex, Point, Position};
use crate::core::{escape_char, escape_line_starts, needs_escape, EscapeContext};

lazy_static! {
    static ref CHAR_REF: Regex =
        Regex::new(r"^&(?:#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap();

    static ref ORDERED_MARKER: Regex = Regex::new(r"^(\d{1,9})[.)](?:[ \t]|$)").unwrap();

    /// Line starts that open a block; the captured char is the one to escape
    static ref BLOCK_MARKER: Regex = Regex::new(concat!(
        r"^ {0,3}(?:",
        r"(#)#{0,5}(?:[ \t]|$)",
        r"|(>)",
        r"|([-+*])(?:[ \t]|$)",
        r"|\d{1,9}([.)])(?:[ \t]|$)",
        r"|(`)``[^`]*$",
        r"|(~)~~",
        r"|([-*_=])[-*_= \t]*$",
        r"|(<)[A-Za-z/!?]",
        r"|(\[)[^\]]*\]:",
        r")"
    ))
    .unwrap();
}

fn run_length(bytes: &[u8], at: usize, byte: u8) -> usize {
    bytes[at..].iter().take_while(|&&b| b == byte).count()
}

/// Text with its block markers escaped, as handed to the parser
struct Shielded {
    text: String,
    /// Offsets in `text` of the inserted backslashes, ascending
    inserted: Vec<usize>,
}

impl Shielded {
    fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len() + 8);
        let mut inserted = Vec::new();

        for line in source.split_inclusive('\n') {
            let body = line.trim_end_matches(['\r', '\n']);
            let marker = BLOCK_MARKER
                .captures(body)
                .and_then(|caps| caps.iter().skip(1).flatten().next())
                .map(|m| m.start());
            match marker {
                Some(at) => {
                    text.push_str(&line[..at]);
                    inserted.push(text.len());
                    text.push('\\');
                    text.push_str(&line[at..]);
                }
                None => text.push_str(line),
            }
        }

        Shielded { text, inserted }
    }

    /// Offset in the source for an offset in the shielded text
    fn source_offset(&self, offset: usize) -> usize {
        offset - self.inserted.partition_point(|&at| at < offset)
    }

    /// Parser events with source ranges
    fn events(&self) -> impl Iterator<Item = (Event<'_>, Range<usize>)> + '_ {
        Parser::new_ext(&self.text, Options::empty())
            .into_offset_iter()
            .map(|(event, range)| {
                let range = self.source_offset(range.start)..self.source_offset(range.end);
                (event, range)
            })
    }
}

/// Join adjacent text nodes
fn merge_text(nodes: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (
            Some(Inline::Text {
                value: prev,
                position: prev_position,
            }),
            Inline::Text { value, position },
        ) = (out.last_mut(), &node)
        {
            prev.push_str(value);
            if let (Some(prev_position), Some(position)) = (prev_position.as_mut(), position) {
                prev_position.end = position.end;
            }
            continue;
        }
        out.push(node);
    }
    out
}

/// An emphasis or strong node still collecting children
struct OpenSpan {
    strong: bool,
    range: Range<usize>,
    children: Vec<Inline>,
}

impl OpenSpan {
    fn new(strong: bool, range: Range<usize>) -> Self {
        OpenSpan {
            strong,
            range,
            children: Vec::new(),
        }
    }
}

/// One call to `parse_inline`
struct InlineTree<'a> {
    text: &'a str,
    base: Point,
    index: LineIndex<'a>,
}

impl<'a> InlineTree<'a> {
    fn new(text: &'a str, base: Point) -> Self {
        InlineTree {
            text,
            base,
            index: LineIndex::new(text),
        }
    }

    fn point(&self, offset: usize) -> Point {
        let local = self.index.point(offset);
        if local.line == 1 {
            Point::new(
                self.base.line,
                self.base.column + local.column - 1,
                self.base.offset + offset,
            )
        } else {
            Point::new(
                self.base.line + local.line - 1,
                local.column,
                self.base.offset + offset,
            )
        }
    }

    fn position(&self, range: Range<usize>) -> Option<Position> {
        Some(Position::new(self.point(range.start), self.point(range.end)))
    }

    fn text_node(&self, value: String, range: Range<usize>) -> Inline {
        Inline::Text {
            value,
            position: self.position(range),
        }
    }

    fn build(&self) -> Vec<Inline> {
        let shielded = Shielded::new(self.text);
        let mut root = Vec::new();
        let mut open: Vec<OpenSpan> = Vec::new();
        // Links and images are kept as source text
        let mut literal = 0..0;
        let mut literal_depth = 0usize;

        for (event, range) in shielded.events() {
            if literal_depth > 0 {
                match event {
                    Event::Start(_) => literal_depth += 1,
                    Event::End(_) => literal_depth -= 1,
                    _ => {}
                }
                if literal_depth > 0 {
                    continue;
                }
                let node = self.text_node(self.text[literal.clone()].to_string(), literal.clone());
                push_node(&mut root, &mut open, node);
                continue;
            }

            let node = match event {
                Event::Start(Tag::Emphasis) => {
                    open.push(OpenSpan::new(false, range));
                    continue;
                }
                Event::Start(Tag::Strong) => {
                    open.push(OpenSpan::new(true, range));
                    continue;
                }
                Event::End(TagEnd::Emphasis) | Event::End(TagEnd::Strong) => {
                    let Some(span) = open.pop() else {
                        continue;
                    };
                    let children = merge_text(span.children);
                    let position = self.position(span.range);
                    if span.strong {
                        Inline::Strong { children, position }
                    } else {
                        Inline::Emphasis { children, position }
                    }
                }
                Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                    literal = range;
                    literal_depth = 1;
                    continue;
                }
                Event::Text(value) | Event::Html(value) | Event::InlineHtml(value) => {
                    self.text_node(value.to_string(), range)
                }
                Event::Code(value) => Inline::InlineCode {
                    value: value.to_string(),
                    position: self.position(range),
                },
                Event::SoftBreak | Event::HardBreak => self.text_node("\n".to_string(), range),
                _ => continue,
            };
            push_node(&mut root, &mut open, node);
        }

        merge_text(root)
    }
}

fn push_node(root: &mut Vec<Inline>, open: &mut [OpenSpan], node: Inline) {
    match open.last_mut() {
        Some(span) => span.children.push(node),
        None => root.push(node),
    }
}

/// Phrasing parser and printer used by the document driver
#[derive(Debug, Clone, Copy, Default)]
pub struct Phrasing;

impl Phrasing {
    pub fn new() -> Self {
        Phrasing
    }

    /// Print a sequence of sibling nodes starting at `ctx`
    pub fn render_all(&self, nodes: &[Inline], ctx: &EscapeContext) -> String {
        let mut out = String::new();
        let mut column = ctx.column;
        for (k, node) in nodes.iter().enumerate() {
            let next = nodes.get(k + 1).map_or(ctx.next, leading_char);
            let rendered = self.render_inline(node, &ctx.at_column(column).followed_by(next));
            column = match rendered.rfind('\n') {
                Some(at) => rendered[at + 1..].chars().count(),
                None => column + rendered.chars().count(),
            };
            out.push_str(&rendered);
        }
        out
    }
}

/// First character a node prints
fn leading_char(node: &Inline) -> Option<char> {
    match node {
        Inline::Text { value, .. } => value.chars().next(),
        Inline::Emphasis { .. } | Inline::Strong { .. } => Some('*'),
        Inline::InlineCode { .. } => Some('`'),
    }
}

/// Whether `value` has a backtick run of exactly `len`
fn has_backtick_run(value: &str, len: usize) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = run_length(bytes, i, b'`');
            if run == len {
                return true;
            }
            i += run;
        } else {
            i += 1;
        }
    }
    false
}

fn render_code(value: &str) -> String {
    let mut fence = 1;
    while has_backtick_run(value, fence) {
        fence += 1;
    }
    let ticks = "`".repeat(fence);
    let pad = value.starts_with('`')
        || value.ends_with('`')
        || (value.starts_with(' ') && value.ends_with(' ') && !value.trim_matches(' ').is_empty());
    if pad {
        format!("{ticks} {value} {ticks}")
    } else {
        format!("{ticks}{value}{ticks}")
    }
}

/// Escapes that keep literal text from reading as markdown syntax
fn needs_markdown_escape(
    c: char,
    prev: Option<char>,
    next: Option<char>,
    rest: &str,
    column: usize,
) -> bool {
    match c {
        '\\' => next.map_or(true, |n| n.is_ascii_punctuation()),
        '*' | '_' | '`' | '[' => true,
        '(' => prev == Some(']'),
        '<' => next.is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?')),
        '&' => CHAR_REF.is_match(rest),
        '#' | '>' | '=' => column == 0,
        '+' | '-' => column == 0 && matches!(next, None | Some(' ' | '\t')),
        '~' => column == 0 && next == Some('~'),
        _ => false,
    }
}

impl InlineParser for Phrasing {
    fn code_spans(&self, text: &str) -> Vec<Range<usize>> {
        // Leading indentation would open an indented code block
        let indent = text.len() - text.trim_start_matches([' ', '\t']).len();
        Shielded::new(&text[indent..])
            .events()
            .filter_map(|(event, range)| {
                matches!(event, Event::Code(_)).then_some(range.start + indent..range.end + indent)
            })
            .collect()
    }

    fn parse_inline(&self, text: &str, base: Point, _ctx: &InlineContext) -> Vec<Inline> {
        InlineTree::new(text, base).build()
    }
}

impl InlineSerializer for Phrasing {
    fn render_inline(&self, node: &Inline, ctx: &EscapeContext) -> String {
        match node {
            Inline::Text { value, .. } => self.escape_text(value, ctx),
            Inline::Emphasis { children, .. } => {
                let inner = self.render_all(children, &ctx.at_column(ctx.column + 1));
                format!("*{}*", inner)
            }
            Inline::Strong { children, .. } => {
                let inner = self.render_all(children, &ctx.at_column(ctx.column + 2));
                format!("**{}**", inner)
            }
            Inline::InlineCode { value, .. } => render_code(value),
        }
    }

    fn escape_text(&self, text: &str, ctx: &EscapeContext) -> String {
        if ctx.in_code {
            return escape_line_starts(text, ctx);
        }

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut out = String::with_capacity(text.len());
        let mut column = ctx.column;
        // Only blanks so far on this line: line-start rules still apply
        let mut indent_only = column == 0 && !ctx.in_table_cell;
        let mut prev = None;
        let mut marker_at = None;

        for (k, &(i, c)) in chars.iter().enumerate() {
            let next = chars.get(k + 1).map(|&(_, n)| n).or(ctx.next);
            let rest = &text[i..];
            let at = if indent_only { 0 } else { column };

            if at == 0 && !matches!(c, ' ' | '\t') {
                marker_at = ORDERED_MARKER
                    .captures(rest)
                    .and_then(|caps| caps.get(1))
                    .map(|digits| i + digits.end());
            }

            if needs_escape(c, &ctx.at_column(at).followed_by(next)) {
                out.push_str(&escape_char(c));
            } else if marker_at == Some(i) || needs_markdown_escape(c, prev, next, rest, at) {
                out.push('\\');
                out.push(c);
            } else {
                out.push(c);
            }

            if c == '\n' && !ctx.in_table_cell {
                column = 0;
                indent_only = true;
            } else {
                column += 1;
                indent_only &= matches!(c, ' ' | '\t');
            }
            prev = Some(c);
        }

        out
    }
}

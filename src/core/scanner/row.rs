//! Line access and row splitting

use std::ops::Range;

use super::context::ScanContext;

/// One source line, without its line ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line {
    pub start: usize,
    pub end: usize,
    /// Start of the following line, or the source length
    pub next: usize,
}

impl Line {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Empty or made of spaces and tabs only
    pub fn is_blank(&self, source: &str) -> bool {
        self.text(source).bytes().all(is_space)
    }
}

/// The line starting at `start`, `None` at end of input
pub(crate) fn line_at(source: &str, start: usize) -> Option<Line> {
    if start >= source.len() {
        return None;
    }
    let rest = &source[start..];
    let (len, next) = match rest.find('\n') {
        Some(i) => (i, start + i + 1),
        None => (rest.len(), source.len()),
    };
    let mut end = start + len;
    if end > start && source.as_bytes()[end - 1] == b'\r' {
        end -= 1;
    }
    Some(Line { start, end, next })
}

/// Indentation in columns, tabs to the next multiple of four
pub(crate) fn indent_width(text: &str) -> usize {
    let mut width = 0;
    for c in text.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }
    width
}

/// One cell of a split row
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellSlice {
    /// Leading delimiter pipe (if any) up to the next delimiter
    pub span: Range<usize>,
    /// Content with surrounding whitespace trimmed
    pub content: Range<usize>,
}

/// A row split into cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitRow {
    /// First to last non-whitespace byte of the line
    pub span: Range<usize>,
    pub cells: Vec<CellSlice>,
    /// Delimiter pipes found, framing pipes included
    pub pipes: usize,
}

fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Split a line into cells at its delimiter pipes
pub(crate) fn split_row(source: &str, line: &Line, ctx: &ScanContext) -> SplitRow {
    let bytes = source.as_bytes();

    let mut start = line.start;
    while start < line.end && is_space(bytes[start]) {
        start += 1;
    }
    let mut end = line.end;
    while end > start && is_space(bytes[end - 1]) {
        end -= 1;
    }

    let mut pipes = Vec::new();
    let mut i = start;
    while i < end {
        if let Some(span) = ctx.code_span_at(i) {
            i = span.end.max(i + 1);
            continue;
        }
        match bytes[i] {
            b'\\' if i + 1 < end && matches!(bytes[i + 1], b'\\' | b'|') => i += 2,
            b'|' => {
                pipes.push(i);
                i += 1;
            }
            _ => i += 1,
        }
    }

    let leading = pipes.first() == Some(&start);
    let trailing = pipes.len() > usize::from(leading) && pipes.last() == Some(&(end - 1));
    let inner = &pipes[usize::from(leading)..pipes.len() - usize::from(trailing)];

    let mut cells = Vec::with_capacity(inner.len() + 1);
    let mut span_start = start;
    let mut content_start = if leading { start + 1 } else { start };
    for &pipe in inner {
        cells.push(cell_slice(bytes, span_start..pipe, content_start..pipe));
        span_start = pipe;
        content_start = pipe + 1;
    }
    let content_end = if trailing { end - 1 } else { end };
    cells.push(cell_slice(bytes, span_start..end, content_start..content_end));

    SplitRow {
        span: start..end,
        cells,
        pipes: pipes.len(),
    }
}

fn cell_slice(bytes: &[u8], span: Range<usize>, content: Range<usize>) -> CellSlice {
    let mut start = content.start;
    let mut end = content.end.max(start);
    while start < end && is_space(bytes[start]) {
        start += 1;
    }
    while end > start && is_space(bytes[end - 1]) {
        end -= 1;
    }
    CellSlice {
        span,
        content: start..end,
    }
}

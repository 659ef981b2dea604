//! Source positions for parsed nodes

use std::ops::Range;

/// A place in the source text
///
/// `line` and `column` are 1-indexed, `column` counts chars.
/// `offset` is a 0-indexed byte offset into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Point {
            line,
            column,
            offset,
        }
    }
}

/// Start (inclusive) and end (exclusive) of a node in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start: Point, end: Point) -> Self {
        Position { start, end }
    }

    /// Byte range covered by this position
    pub fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// Byte-offset to line/column lookup for one source text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineIndex {
            source,
            line_starts,
        }
    }

    /// The indexed text
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Point for a byte offset. Offsets past the end clamp to the end.
    pub fn point(&self, offset: usize) -> Point {
        let offset = offset.min(self.source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count() + 1;
        Point::new(line + 1, column, offset)
    }

    pub fn position(&self, range: Range<usize>) -> Position {
        Position::new(self.point(range.start), self.point(range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lookup() {
        let index = LineIndex::new("| a\n| -");
        assert_eq!(index.point(0), Point::new(1, 1, 0));
        assert_eq!(index.point(2), Point::new(1, 3, 2));
        assert_eq!(index.point(4), Point::new(2, 1, 4));
        assert_eq!(index.point(7), Point::new(2, 4, 7));
    }

    #[test]
    fn test_point_counts_chars_not_bytes() {
        let index = LineIndex::new("古 | b");
        assert_eq!(index.point(4), Point::new(1, 3, 4));
    }
}

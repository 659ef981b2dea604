//! Read-only parsing state shared by the host with the scanner

use std::ops::Range;

use crate::host::InlineParser;

/// Code-span extents the host already identified in the source
///
/// Ranges are absolute byte offsets into the text handed to the scanner
/// and cover the whole span, backtick fences included. A `|` inside one of
/// them is never a cell delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    code_spans: Vec<Range<usize>>,
}

impl ScanContext {
    /// Create a context from code span byte ranges, in any order
    pub fn new(mut code_spans: Vec<Range<usize>>) -> Self {
        code_spans.retain(|span| span.start < span.end);
        code_spans.sort_by_key(|span| span.start);
        ScanContext { code_spans }
    }

    /// No code spans at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ask the host for code spans, one line at a time
    ///
    /// Table rows never span lines, so per-line extents are all the
    /// scanner needs.
    pub fn from_host(source: &str, parser: &dyn InlineParser) -> Self {
        let mut spans = Vec::new();
        let mut line_start = 0;
        for line in source.split_inclusive('\n') {
            let text = line.trim_end_matches(['\n', '\r']);
            spans.extend(
                parser
                    .code_spans(text)
                    .into_iter()
                    .map(|span| span.start + line_start..span.end + line_start),
            );
            line_start += line.len();
        }
        Self::new(spans)
    }

    pub fn code_spans(&self) -> &[Range<usize>] {
        &self.code_spans
    }

    /// The code span covering `offset`, if any
    pub fn code_span_at(&self, offset: usize) -> Option<&Range<usize>> {
        let index = self
            .code_spans
            .partition_point(|span| span.start <= offset);
        let span = self.code_spans.get(index.checked_sub(1)?)?;
        span.contains(&offset).then_some(span)
    }
}

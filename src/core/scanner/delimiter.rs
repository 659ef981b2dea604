//! Delimiter rows and the block starts that end a table

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use super::row::{indent_width, Line};
use super::Rejection;
use crate::ast::Align;

lazy_static! {
    /// One delimiter cell: dashes with optional alignment colons
    static ref DELIMITER_CELL: Regex = Regex::new(r"^:?-+:?$").unwrap();

    /// Block quote, ATX heading, code fence or list item
    static ref BLOCK_START: Regex = Regex::new(
        r"^ {0,3}(?:>|#{1,6}(?:[ \t]|$)|`{3,}|~{3,}|[-+*](?:[ \t]|$)|\d{1,9}[.)](?:[ \t]|$))"
    ).unwrap();

    static ref THEMATIC_BREAK: Regex = Regex::new(
        r"^ {0,3}(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$"
    ).unwrap();
}

/// Whether a line opens a block that a table row cannot continue into
pub(crate) fn starts_other_block(text: &str) -> bool {
    BLOCK_START.is_match(text) || THEMATIC_BREAK.is_match(text)
}

/// Parse the delimiter row on `line`
///
/// Returns the alignments and the trimmed span of the row.
pub(crate) fn parse_delimiter_row(
    source: &str,
    line: &Line,
) -> Result<(Vec<Align>, Range<usize>), Rejection> {
    let text = line.text(source);
    if line.is_blank(source) {
        return Err(Rejection::MissingDelimiterRow);
    }
    if indent_width(text) >= 4 {
        return Err(Rejection::Indented);
    }

    let trimmed = text.trim_matches([' ', '\t']);
    let start = line.start + (text.len() - text.trim_start_matches([' ', '\t']).len());
    let span = start..start + trimmed.len();

    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut align = Vec::new();
    for (column, cell) in inner.split('|').enumerate() {
        let cell = cell.trim_matches([' ', '\t']);
        if !DELIMITER_CELL.is_match(cell) {
            return Err(Rejection::MalformedDelimiter { column });
        }
        align.push(Align::from_colons(cell.starts_with(':'), cell.ends_with(':')));
    }

    // Only dashes and no pipe: a setext underline or a thematic break
    if !trimmed.contains(['|', ':']) {
        return Err(Rejection::NoAlignmentMarker);
    }

    Ok((align, span))
}

#[cfg(test)]
mod tests {
    use super::super::row::line_at;
    use super::*;

    fn parse(source: &str) -> Result<Vec<Align>, Rejection> {
        let line = line_at(source, 0).ok_or(Rejection::EndOfInput)?;
        parse_delimiter_row(source, &line).map(|(align, _)| align)
    }

    #[test]
    fn test_alignments() {
        assert_eq!(
            parse("| - | :- | -: | :-: |"),
            Ok(vec![Align::None, Align::Left, Align::Right, Align::Center])
        );
        assert_eq!(parse("--- | ---"), Ok(vec![Align::None, Align::None]));
        assert_eq!(parse(":--"), Ok(vec![Align::Left]));
        assert_eq!(parse("|-"), Ok(vec![Align::None]));
    }

    #[test]
    fn test_dashes_only_is_not_a_delimiter_row() {
        assert_eq!(parse("---"), Err(Rejection::NoAlignmentMarker));
    }

    #[test]
    fn test_malformed_cells() {
        assert_eq!(parse("| - | x |"), Err(Rejection::MalformedDelimiter { column: 1 }));
        assert_eq!(parse("| |"), Err(Rejection::MalformedDelimiter { column: 0 }));
        assert_eq!(parse("| -:- |"), Err(Rejection::MalformedDelimiter { column: 0 }));
        assert_eq!(parse("|"), Err(Rejection::MalformedDelimiter { column: 0 }));
    }

    #[test]
    fn test_delimiter_span_is_trimmed() {
        let source = "  | - |  ";
        let line = line_at(source, 0).unwrap();
        let (_, span) = parse_delimiter_row(source, &line).unwrap();
        assert_eq!(span, 2..7);
    }

    #[test]
    fn test_block_starts() {
        assert!(starts_other_block("> quote"));
        assert!(starts_other_block("# heading"));
        assert!(starts_other_block("```rust"));
        assert!(starts_other_block("- item"));
        assert!(starts_other_block("1. item"));
        assert!(starts_other_block("***"));
        assert!(starts_other_block("- - -"));
        assert!(!starts_other_block("| a | b |"));
        assert!(!starts_other_block("#hashtag | b"));
        assert!(!starts_other_block("--- | ---"));
    }
}

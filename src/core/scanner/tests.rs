//! Regression tests for table recognition

use pretty_assertions::assert_eq;

use super::*;
use crate::ast::Align;

fn explain(source: &str) -> Result<TableScan, Rejection> {
    CellScanner::new().explain(source, 0, &ScanContext::empty())
}

fn widths(source: &str) -> Vec<usize> {
    explain(source).map(|scan| scan.row_widths()).unwrap_or_default()
}

#[test]
fn test_basic_table() {
    let source = "| a | b |\n| - | :- |\n| 1 | 2 |";
    let scan = explain(source).unwrap();
    assert_eq!(scan.row_widths(), vec![2, 2]);
    assert_eq!(scan.align(), &[Align::None, Align::Left]);
    assert_eq!(scan.span, 0..source.len());
    assert_eq!(scan.resume, source.len());
}

#[test]
fn test_token_stream() {
    let scan = explain("a|b\n-|-").unwrap();
    let tokens: Vec<(TokenKind, std::ops::Range<usize>)> =
        scan.tokens.into_iter().map(|t| (t.kind, t.span)).collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::TableStart, 0..7),
            (TokenKind::RowStart, 0..3),
            (TokenKind::CellStart, 0..1),
            (TokenKind::CellContent, 0..1),
            (TokenKind::CellEnd, 0..1),
            (TokenKind::CellStart, 1..3),
            (TokenKind::CellContent, 2..3),
            (TokenKind::CellEnd, 1..3),
            (TokenKind::RowEnd, 0..3),
            (TokenKind::DelimiterRow(vec![Align::None, Align::None]), 4..7),
            (TokenKind::TableEnd, 0..7),
        ]
    );
}

#[test]
fn test_empty_cell_has_no_content_token() {
    let scan = explain("|  | a |\n| - | - |").unwrap();
    let contents = scan
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::CellContent)
        .count();
    assert_eq!(contents, 1);
}

#[test]
fn test_header_needs_pipe() {
    assert_eq!(explain("a\n-|-").unwrap_err(), Rejection::NoPipe);
}

#[test]
fn test_column_mismatch() {
    assert_eq!(
        explain("| a | b |\n| - |").unwrap_err(),
        Rejection::ColumnMismatch {
            header: 2,
            delimiter: 1
        }
    );
}

#[test]
fn test_setext_underline_is_not_a_delimiter_row() {
    assert_eq!(explain("a | b\n---").unwrap_err(), Rejection::NoAlignmentMarker);
}

#[test]
fn test_missing_delimiter_row() {
    assert_eq!(explain("| a |").unwrap_err(), Rejection::MissingDelimiterRow);
    assert_eq!(explain("| a |\n\n| - |").unwrap_err(), Rejection::MissingDelimiterRow);
}

#[test]
fn test_indented_header() {
    assert_eq!(explain("    | a |\n| - |").unwrap_err(), Rejection::Indented);
    assert_eq!(widths("   | a |\n| - |"), vec![1]);
}

#[test]
fn test_other_block_is_not_a_header() {
    assert_eq!(explain("> a | b\n| - | - |").unwrap_err(), Rejection::OtherBlock);
}

#[test]
fn test_end_of_input() {
    assert_eq!(explain("").unwrap_err(), Rejection::EndOfInput);
    assert_eq!(explain("\n").unwrap_err(), Rejection::BlankLine);
    assert!(CellScanner::new()
        .scan("| a |", 0, &ScanContext::empty())
        .is_none());
}

#[test]
fn test_body_ends_at_blank_line() {
    let source = "| a |\n| - |\n| 1 |\n\nnext";
    let scan = explain(source).unwrap();
    assert_eq!(scan.row_widths(), vec![1, 1]);
    assert_eq!(scan.span, 0..17);
    assert_eq!(scan.resume, 18);
}

#[test]
fn test_body_ends_at_other_blocks() {
    assert_eq!(widths("| a |\n| - |\n> quote"), vec![1]);
    assert_eq!(widths("| a |\n| - |\n# heading"), vec![1]);
    assert_eq!(widths("| a |\n| - |\n```"), vec![1]);
    assert_eq!(widths("| a |\n| - |\n***"), vec![1]);
    assert_eq!(widths("| a |\n| - |\n- item"), vec![1]);
    assert_eq!(widths("| a |\n| - |\nplain"), vec![1, 1]);
}

#[test]
fn test_nbsp_line_continues_body() {
    let source = "| a |\n| - |\n\u{a0}\n| 2 |";
    let scan = explain(source).unwrap();
    assert_eq!(scan.row_widths(), vec![1, 1, 1]);
    assert_eq!(scan.span, 0..source.len());
    assert_eq!(explain("\u{a0}\n| a |").unwrap_err(), Rejection::NoPipe);
}

#[test]
fn test_indented_body_row_keeps_code_span() {
    let source = "| a |\n| - |\n    | `x|y` |";
    let ctx = ScanContext::from_host(source, &crate::host::Phrasing);
    let scan = CellScanner::new().explain(source, 0, &ctx).unwrap();
    assert_eq!(scan.row_widths(), vec![1, 1]);
}

#[test]
fn test_ragged_body_rows() {
    assert_eq!(
        widths("| a | b |\n| - | - |\n| 1 |\n| 1 | 2 | 3 |"),
        vec![2, 2, 1, 3]
    );
}

#[test]
fn test_code_span_protects_pipe() {
    let source = "| `a|b` |\n| - |";
    let ctx = ScanContext::new(vec![2..7]);
    let scan = CellScanner::new().explain(source, 0, &ctx).unwrap();
    assert_eq!(scan.row_widths(), vec![1]);
    // Without the host's code spans, the pipe splits the cell
    assert_eq!(
        explain(source).unwrap_err(),
        Rejection::ColumnMismatch {
            header: 2,
            delimiter: 1
        }
    );
}

#[test]
fn test_escaped_pipe_in_header() {
    assert_eq!(widths("| a \\| b |\n| - |"), vec![1]);
}

#[test]
fn test_scan_from_offset() {
    let source = "intro\n| a |\n| - |";
    let scan = CellScanner::new()
        .explain(source, 6, &ScanContext::empty())
        .unwrap();
    assert_eq!(scan.span, 6..source.len());
}

#[test]
fn test_crlf_lines() {
    let scan = explain("| a |\r\n| - |\r\n| 1 |").unwrap();
    assert_eq!(scan.row_widths(), vec![1, 1]);
    assert_eq!(scan.span, 0..19);
}

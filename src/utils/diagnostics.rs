//! Table diagnostics
//!
//! Finds things in a markdown document that are legal but probably not
//! what the author meant:
//!
//! - body rows with fewer or more cells than the header
//! - header and delimiter rows that almost form a table
//!
//! ## Example
//!
//! ```rust
//! use gfm_table::diagnostics::{check_tables, DiagnosticLevel};
//!
//! let result = check_tables("| a | b |\n| - | - |\n| 1 | 2 | 3 |");
//! assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
//! ```

use std::fmt;

use crate::ast::{LineIndex, Position};
use crate::core::scanner::{CellScanner, Rejection, ScanContext, TableScan, TokenKind};
use crate::host::Phrasing;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

impl DiagnosticLevel {
    fn color(&self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "\x1b[34m",
            DiagnosticLevel::Warning => "\x1b[33m",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// What was found
    pub message: String,
    /// Where it was found, if known
    pub position: Option<Position>,
    /// The offending source line
    pub source_line: Option<String>,
    /// How to fix it
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            position: None,
            source_line: None,
            suggestion: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_source(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        if let Some(position) = &self.position {
            write!(
                f,
                "\n  --> line {}:{}",
                position.start.line, position.start.column
            )?;
        }
        if let Some(line) = &self.source_line {
            write!(f, "\n  |\n  | {}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }
        Ok(())
    }
}

/// All findings for one document
#[derive(Debug, Default)]
pub struct CheckResult {
    /// Findings in document order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of warnings
    pub warnings: usize,
    /// Number of notes
    pub infos: usize,
}

fn count(n: usize, noun: &str) -> Option<String> {
    match n {
        0 => None,
        1 => Some(format!("1 {}", noun)),
        n => Some(format!("{} {}s", n, noun)),
    }
}

impl CheckResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            count(self.warnings, "warning"),
            count(self.infos, "note"),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check every table, and every near miss, in a markdown document
pub fn check_tables(input: &str) -> CheckResult {
    let mut result = CheckResult::new();
    let index = LineIndex::new(input);
    let ctx = ScanContext::from_host(input, &Phrasing);
    let scanner = CellScanner::new();

    let mut offset = 0;
    while offset < input.len() {
        match scanner.explain(input, offset, &ctx) {
            Ok(scan) => {
                check_row_widths(input, &index, &scan, &mut result);
                offset = scan.resume;
            }
            Err(rejection) => {
                check_near_miss(input, &index, offset, &rejection, &mut result);
                offset = next_line(input, offset);
            }
        }
    }

    result
}

fn next_line(input: &str, offset: usize) -> usize {
    input[offset..]
        .find('\n')
        .map_or(input.len(), |i| offset + i + 1)
}

fn line_text(input: &str, offset: usize) -> &str {
    let end = input[offset..]
        .find('\n')
        .map_or(input.len(), |i| offset + i);
    input[offset..end].trim_end_matches('\r')
}

fn check_row_widths(input: &str, index: &LineIndex<'_>, scan: &TableScan, result: &mut CheckResult) {
    let columns = scan.align().len();
    let rows = scan
        .tokens
        .iter()
        .filter(|token| token.kind == TokenKind::RowStart);

    for ((row, span), cells) in rows
        .map(|token| token.span.clone())
        .enumerate()
        .skip(1)
        .zip(scan.row_widths().into_iter().skip(1))
    {
        if cells == columns {
            continue;
        }
        let (level, message, suggestion) = if cells < columns {
            (
                DiagnosticLevel::Info,
                format!("row {} has {} of {} cells", row + 1, cells, columns),
                "missing cells are rendered empty",
            )
        } else {
            (
                DiagnosticLevel::Warning,
                format!("row {} has {} cells, table has {}", row + 1, cells, columns),
                "cells past the last column are dropped",
            )
        };
        result.add(
            Diagnostic::new(level, message)
                .with_position(index.position(span.clone()))
                .with_source(&input[span])
                .with_suggestion(suggestion),
        );
    }
}

fn check_near_miss(
    input: &str,
    index: &LineIndex<'_>,
    offset: usize,
    rejection: &Rejection,
    result: &mut CheckResult,
) {
    let header = line_text(input, offset);
    let delimiter_offset = next_line(input, offset);
    if delimiter_offset >= input.len() {
        return;
    }
    let delimiter = line_text(input, delimiter_offset);
    let looks_like_delimiter = delimiter.contains('-')
        && delimiter.contains(['|', ':'])
        && delimiter
            .chars()
            .all(|c| matches!(c, '|' | ':' | '-' | ' ' | '\t'));

    let message = match rejection {
        Rejection::ColumnMismatch { header, delimiter } => format!(
            "not a table: header has {} cells but delimiter row has {}",
            header, delimiter
        ),
        Rejection::MalformedDelimiter { column } if looks_like_delimiter => format!(
            "not a table: delimiter cell {} needs at least one `-`",
            column + 1
        ),
        _ => return,
    };

    result.add(
        Diagnostic::new(DiagnosticLevel::Warning, message)
            .with_position(index.position(offset..offset + header.len()))
            .with_source(header)
            .with_suggestion("give the delimiter row one `---` cell per header cell"),
    );
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let paint = |color: &str, text: String| {
        if use_color {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text
        }
    };

    let mut output = String::new();
    for diagnostic in &result.diagnostics {
        output.push_str(&paint(diagnostic.level.color(), diagnostic.to_string()));
        output.push_str("\n\n");
    }

    let summary_color = if result.warnings > 0 {
        DiagnosticLevel::Warning.color()
    } else {
        "\x1b[32m"
    };
    output.push_str(&paint(summary_color, format!("Summary: {}", result.summary())));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_table() {
        let result = check_tables("| a | b |\n| - | - |\n| 1 | 2 |\n");
        assert!(result.is_empty());
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_short_and_long_rows() {
        let result = check_tables("| a | b |\n| - | - |\n| 1 |\n| 1 | 2 | 3 |");
        assert_eq!(result.infos, 1);
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("row 2 has 1 of 2 cells"));
        let position = result.diagnostics[1].position.unwrap();
        assert_eq!(position.start.line, 4);
        assert_eq!(result.diagnostics[1].source_line.as_deref(), Some("| 1 | 2 | 3 |"));
    }

    #[test]
    fn test_column_mismatch_near_miss() {
        let result = check_tables("intro\n\n| a | b |\n| --- |\n");
        assert_eq!(result.warnings, 1);
        let diagnostic = &result.diagnostics[0];
        assert!(diagnostic.message.contains("2 cells but delimiter row has 1"));
        assert_eq!(diagnostic.position.map(|p| p.start.line), Some(3));
    }

    #[test]
    fn test_malformed_delimiter_near_miss() {
        let result = check_tables("| a | b |\n| - | |\n");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("delimiter cell 2"));
    }

    #[test]
    fn test_plain_paragraphs_are_quiet() {
        let result = check_tables("a | b\nc | d\n\ntext\n---\n");
        assert!(result.is_empty());
    }

    #[test]
    fn test_summary_and_format() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Info, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));
        assert_eq!(result.summary(), "2 warnings, 1 note");

        let plain = format_diagnostics(&result, false);
        assert!(plain.starts_with("info: test"));
        assert!(plain.ends_with("Summary: 2 warnings, 1 note"));
        let colored = format_diagnostics(&result, true);
        assert!(colored.starts_with("\x1b[34m"));
        assert!(colored.contains("\x1b[33mSummary: 2 warnings, 1 note"));
    }
}

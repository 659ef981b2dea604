//! Table-aware escaping decisions
//!
//! Pure functions over a character and its surroundings. The serializer
//! uses them to keep cell content inside its cell, hosts use them to keep
//! paragraph text from turning into a table, and the tree builder uses
//! [`unescape_cell_code`] to read code spans back out of cells.

/// Where a character is about to be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EscapeContext {
    /// Inside the content of a table cell
    pub in_table_cell: bool,
    /// Inside the value of an inline code span
    pub in_code: bool,
    /// Chars since the start of the output line; 0 is a line start
    pub column: usize,
    /// The character written right after this one, if known
    pub next: Option<char>,
}

impl EscapeContext {
    /// Phrasing outside any table, at the start of a line
    pub fn paragraph() -> Self {
        Self::default()
    }

    /// Phrasing inside a table cell
    pub fn table_cell() -> Self {
        Self {
            in_table_cell: true,
            // Cell content always follows `|` or padding
            column: 1,
            ..Default::default()
        }
    }

    /// Same context, inside inline code
    pub fn code(self) -> Self {
        Self {
            in_code: true,
            ..self
        }
    }

    /// Same context, at another column
    pub fn at_column(self, column: usize) -> Self {
        Self { column, ..self }
    }

    /// Same context, with a known next character
    pub fn followed_by(self, next: Option<char>) -> Self {
        Self { next, ..self }
    }

    /// Whether the next character starts a line
    pub fn at_line_start(&self) -> bool {
        self.column == 0
    }
}

/// Whether `ch` must be escaped to keep its meaning in `ctx`
pub fn needs_escape(ch: char, ctx: &EscapeContext) -> bool {
    if ctx.in_code {
        // Code spans are literal, except that the cell delimiter wins
        return ctx.in_table_cell && ch == '|';
    }

    if ctx.in_table_cell {
        return matches!(ch, '|' | '\n' | '\r');
    }

    if !ctx.at_line_start() {
        return false;
    }

    match ch {
        '|' => true,
        // `:-` could open an aligned delimiter row
        ':' => ctx.next == Some('-'),
        // `--`, `-:` or `-|` could open a delimiter row
        '-' => matches!(ctx.next, Some(':' | '|' | '-')),
        _ => false,
    }
}

/// Escaped form of a single character
///
/// ASCII punctuation gets a backslash, line endings and anything else a
/// numeric character reference.
pub fn escape_char(ch: char) -> String {
    match ch {
        '\n' => "&#xA;".to_string(),
        '\r' => "&#xD;".to_string(),
        c if c.is_ascii_punctuation() => format!("\\{}", c),
        c => format!("&#x{:X};", c as u32),
    }
}

/// Apply [`needs_escape`] across a run of text that starts in `ctx`
///
/// Columns restart after every line feed, so each line of a multi-line
/// text value is checked for a table-like start.
pub fn escape_line_starts(text: &str, ctx: &EscapeContext) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = ctx.column;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let here = ctx.at_column(column).followed_by(chars.peek().copied());
        if needs_escape(c, &here) {
            out.push_str(&escape_char(c));
        } else {
            out.push(c);
        }
        column = if c == '\n' { 0 } else { column + 1 };
    }

    out
}

/// Make already-rendered phrasing safe to place inside a table cell
///
/// Outside code, a `|` is escaped unless an odd run of backslashes
/// already claims it, and line endings become character references.
/// Inside code every `|` is escaped and line endings become spaces.
pub fn escape_for_cell(text: &str, inside_code: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut backslashes = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '|' if inside_code || backslashes % 2 == 0 => out.push_str("\\|"),
            '\r' | '\n' if inside_code => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\r' | '\n' => out.push_str(&escape_char(c)),
            _ => out.push(c),
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }

    out
}

/// Read the value of a code span that sits inside a table cell
///
/// `\|` becomes `|`; `\\` stays as written, and so does a backslash
/// before anything else.
pub fn unescape_cell_code(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('|') => {
                chars.next();
                out.push('|');
            }
            Some('\\') => {
                chars.next();
                out.push_str("\\\\");
            }
            _ => out.push('\\'),
        }
    }

    out
}

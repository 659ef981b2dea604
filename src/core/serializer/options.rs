//! Serializer options

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

use crate::utils::error::{TableError, TableResult};

/// How the serializer measures cell text when aligning columns
///
/// Only column widths depend on this. Escaping never does.
#[derive(Clone, Default)]
pub enum StringLength {
    /// Count Unicode scalar values
    #[default]
    Chars,
    /// Terminal display width: wide characters count two, combining marks zero
    UnicodeWidth,
    /// Caller-supplied measure
    Custom(Arc<dyn Fn(&str) -> usize + Send + Sync>),
}

impl StringLength {
    pub fn custom(measure: impl Fn(&str) -> usize + Send + Sync + 'static) -> Self {
        StringLength::Custom(Arc::new(measure))
    }

    /// Strategy for a configuration name
    pub fn from_name(name: &str) -> TableResult<Self> {
        match name {
            "chars" | "default" => Ok(StringLength::Chars),
            "unicode-width" | "width" => Ok(StringLength::UnicodeWidth),
            other => Err(TableError::config(
                "stringLength",
                format!(
                    "unknown strategy `{}`, expected `chars` or `unicode-width`",
                    other
                ),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StringLength::Chars => "chars",
            StringLength::UnicodeWidth => "unicode-width",
            StringLength::Custom(_) => "custom",
        }
    }

    pub fn measure(&self, text: &str) -> usize {
        match self {
            StringLength::Chars => text.chars().count(),
            StringLength::UnicodeWidth => text.width(),
            StringLength::Custom(measure) => measure(text),
        }
    }
}

impl fmt::Debug for StringLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringLength::{}", self.name())
    }
}

/// Typed serializer options
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// One space between each pipe and the cell content
    pub cell_padding: bool,
    /// Pad cells so the pipes of every row line up
    pub pipe_align: bool,
    pub string_length: StringLength,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            cell_padding: true,
            pipe_align: true,
            string_length: StringLength::Chars,
        }
    }
}

impl TableOptions {
    /// Smallest valid output: no padding, no alignment
    pub fn compact() -> Self {
        Self {
            cell_padding: false,
            pipe_align: false,
            ..Default::default()
        }
    }

    /// Aligned for display in a terminal or monospace editor
    pub fn display_width() -> Self {
        Self {
            string_length: StringLength::UnicodeWidth,
            ..Default::default()
        }
    }

    pub fn with_string_length(mut self, string_length: StringLength) -> Self {
        self.string_length = string_length;
        self
    }

    /// Validate an untyped configuration
    pub fn from_config(config: &TableConfig) -> TableResult<Self> {
        let string_length = match config.string_length.as_deref() {
            Some(name) => StringLength::from_name(name)?,
            None => StringLength::Chars,
        };
        Ok(Self {
            cell_padding: config.table_cell_padding,
            pipe_align: config.table_pipe_align,
            string_length,
        })
    }
}

fn default_true() -> bool {
    true
}

/// Untyped configuration, as read from a settings file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct TableConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub table_cell_padding: bool,

    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub table_pipe_align: bool,

    /// `chars` or `unicode-width`
    #[cfg_attr(feature = "serde", serde(default))]
    pub string_length: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_cell_padding: default_true(),
            table_pipe_align: default_true(),
            string_length: None,
        }
    }
}

#[cfg(feature = "serde")]
impl TableConfig {
    /// Read a configuration, reporting bad fields as [`TableError::Config`]
    pub fn from_deserializer<'de, D>(deserializer: D) -> TableResult<Self>
    where
        D: serde::Deserializer<'de>,
    {
        Self::deserialize(deserializer).map_err(|e| TableError::config("tableConfig", e.to_string()))
    }
}

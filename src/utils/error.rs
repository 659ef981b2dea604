//! Error handling for table parsing and serialization
//!
//! Recognition failures are not errors: a scan that finds no table simply
//! hands the text back to the host. The errors here are configuration
//! problems found before rendering and broken token streams.

use thiserror::Error;

/// Table codec error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A serializer option has an unusable value
    #[error("Invalid option `{option}`: {message}")]
    Config { option: String, message: String },

    /// A token sequence could not be assembled into a table
    #[error("Cannot build table at byte {offset}: {message}")]
    Build { message: String, offset: usize },
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn config(option: impl Into<String>, message: impl Into<String>) -> Self {
        TableError::Config {
            option: option.into(),
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>, offset: usize) -> Self {
        TableError::Build {
            message: message.into(),
            offset,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, TableError::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TableError::config("stringLength", "unknown strategy `pixels`");
        let msg = err.to_string();
        assert!(msg.contains("stringLength"));
        assert!(msg.contains("pixels"));
        assert!(err.is_config());
    }

    #[test]
    fn test_build_error_display() {
        let err = TableError::build("cell outside of a row", 12);
        let msg = err.to_string();
        assert!(msg.contains("byte 12"));
        assert!(msg.contains("cell outside of a row"));
        assert!(!err.is_config());
    }
}

//! Utility modules
//!
//! - Error and result types
//! - Diagnostics for tables and near misses

pub mod diagnostics;
pub mod error;

pub use diagnostics::{check_tables, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{TableError, TableResult};

//! Syntax tree for pipe tables
//!
//! - `Table` owns its `Row`s, a `Row` owns its `Cell`s
//! - `Cell` children are host phrasing nodes (`Inline`)
//! - positions are present on parsed trees and absent on synthetic ones

mod inline;
mod position;
mod table;

pub use inline::Inline;
pub use position::{LineIndex, Point, Position};
pub use table::{Align, Cell, Row, Table};

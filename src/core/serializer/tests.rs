//! Regression tests for table printing

use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{Align, Inline};
use crate::host::Phrasing;

fn render(table: &Table, options: TableOptions) -> String {
    TableSerializer::new(options).render_table(table, &Phrasing)
}

fn texts(rows: &[&[&str]]) -> Vec<Row> {
    rows.iter().map(|row| Row::from_texts(row.iter().copied())).collect()
}

#[test]
fn test_alignment_and_minimum_width() {
    let table = Table::new(
        vec![Align::None, Align::Left, Align::Center, Align::Right],
        texts(&[&["a", "b", "c", "d"], &["aaa", "bbb", "ccc", "ddd"]]),
    );
    assert_eq!(
        render(&table, TableOptions::default()),
        "| a   | b   |  c  |   d |\n\
         | --- | :-- | :-: | --: |\n\
         | aaa | bbb | ccc | ddd |"
    );
}

#[test]
fn test_wide_columns() {
    let table = Table::new(
        vec![Align::Center, Align::Right],
        texts(&[&["a", "b"], &["alpha", "beta"]]),
    );
    assert_eq!(
        render(&table, TableOptions::default()),
        "|   a   |    b |\n\
         | :---: | ---: |\n\
         | alpha | beta |"
    );
}

#[test]
fn test_no_alignment_means_none() {
    let table = Table::new(vec![], texts(&[&["a", "b"], &["c", "d"]]));
    assert_eq!(
        render(&table, TableOptions::default()),
        "| a   | b   |\n| --- | --- |\n| c   | d   |"
    );
}

#[test]
fn test_pipe_in_cell_text() {
    let table = Table::new(vec![], vec![Row::from_texts(["a|b|c"])]);
    assert_eq!(
        render(&table, TableOptions::default()),
        "| a\\|b\\|c |\n| ------- |"
    );
}

#[test]
fn test_pipe_in_cell_code() {
    let cell = Cell::new(vec![Inline::code("a|b|c")]);
    assert_eq!(
        TableSerializer::default().render_cell(&cell, &Phrasing),
        "`a\\|b\\|c`"
    );
}

#[test]
fn test_pipe_in_nested_code() {
    let cell = Cell::new(vec![Inline::emphasis(vec![Inline::code("a|b")])]);
    assert_eq!(
        TableSerializer::default().render_cell(&cell, &Phrasing),
        "*`a\\|b`*"
    );
}

#[test]
fn test_line_ending_in_cell() {
    let cell = Cell::text("a\nb");
    assert_eq!(
        TableSerializer::default().render_cell(&cell, &Phrasing),
        "a&#xA;b"
    );
}

#[test]
fn test_without_cell_padding() {
    let options = TableOptions {
        cell_padding: false,
        ..Default::default()
    };
    let table = Table::new(vec![], texts(&[&["a", "b"], &["1", "2"]]));
    assert_eq!(render(&table, options), "|a  |b  |\n|---|---|\n|1  |2  |");
}

#[test]
fn test_without_pipe_align() {
    let options = TableOptions {
        pipe_align: false,
        ..Default::default()
    };
    let table = Table::new(
        vec![Align::Left, Align::Right],
        texts(&[&["aaa", "b"], &["", "dd"]]),
    );
    assert_eq!(render(&table, options), "| aaa | b |\n| :- | -: |\n| | dd |");
}

#[test]
fn test_compact() {
    let table = Table::new(
        vec![Align::None, Align::Center],
        texts(&[&["a", "b"], &["1", "2"]]),
    );
    assert_eq!(render(&table, TableOptions::compact()), "|a|b|\n|-|:-:|\n|1|2|");
}

#[test]
fn test_ragged_rows() {
    let table = Table::new(
        vec![Align::None, Align::None],
        texts(&[&["a", "b"], &["1"], &["1", "2", "3"]]),
    );
    assert_eq!(
        render(&table, TableOptions::default()),
        "| a   | b   |\n\
         | --- | --- |\n\
         | 1   |     |\n\
         | 1   | 2   |"
    );
}

#[test]
fn test_string_length_strategies() {
    let table = Table::new(vec![], texts(&[&["古琴", "a"], &["b", "c"]]));
    assert_eq!(
        render(&table, TableOptions::default()),
        "| 古琴  | a   |\n| --- | --- |\n| b   | c   |"
    );
    assert_eq!(
        render(&table, TableOptions::display_width()),
        "| 古琴 | a   |\n| ---- | --- |\n| b    | c   |"
    );
}

#[test]
fn test_string_length_does_not_change_escaping() {
    let options = TableOptions::default().with_string_length(StringLength::custom(|_| 0));
    let table = Table::new(vec![], vec![Row::from_texts(["a|b"])]);
    assert_eq!(render(&table, options), "| a\\|b    |\n| --- |");
}

#[test]
fn test_bare_row() {
    let row = Row::from_texts(["a", "bb"]);
    assert_eq!(
        TableSerializer::default().render_row(&row, &Phrasing),
        "| a | bb |"
    );
}

#[test]
fn test_bare_row_with_empty_cell() {
    let serializer = TableSerializer::default();
    assert_eq!(serializer.render_row(&Row::from_texts([""]), &Phrasing), "|   |");
    assert_eq!(
        serializer.render_row(&Row::from_texts(["a", ""]), &Phrasing),
        "| a |   |"
    );
}

#[test]
fn test_empty_table() {
    assert_eq!(render(&Table::default(), TableOptions::default()), "");
}

#[test]
fn test_node_handler_dispatch() {
    let serializer = TableSerializer::default();
    let row = Row::from_texts(["a"]);
    let text = Inline::text("a");
    assert_eq!(
        serializer.render(Node::TableRow(&row), &Phrasing),
        Some("| a |".to_string())
    );
    assert_eq!(serializer.render(Node::Inline(&text), &Phrasing), None);
    assert!(serializer.handles().contains(&NodeKind::Table));
}

#[test]
fn test_from_config() {
    let config = TableConfig {
        table_pipe_align: false,
        ..Default::default()
    };
    let serializer = TableSerializer::from_config(&config).unwrap();
    let table = Table::new(vec![], vec![Row::from_texts(["a"])]);
    assert_eq!(serializer.render_table(&table, &Phrasing), "| a |\n| - |");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use similar_asserts::assert_eq;

fn plain() {
    std::env::set_var("NO_COLOR", "1");
}

#[test]
#[serial]
fn pads_columns_and_fills_last_to_width() {
    plain();
    let mut table = Table::new(vec!["Id", "Name", "Command"]);
    table.row(vec!["12".into(), "alpha".into(), "python a.py".into()]);
    table.row(vec!["7".into(), "b".into(), "ls".into()]);

    let out = table.render(60);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    // "Id | Name  | " is 13 wide, the rest goes to the last column
    assert_eq!(lines[0], format!("Id | Name  | {:<47}", "Command"));
    assert_eq!(lines[1], "=".repeat(60));
    assert_eq!(lines[2], format!("12 | alpha | {:<47}", "python a.py"));
    assert_eq!(lines[3], format!("7  | b     | {:<47}", "ls"));
}

#[test]
#[serial]
fn last_column_never_narrower_than_minimum() {
    plain();
    let mut table = Table::new(vec!["Id", "Command"]);
    table.row(vec!["1".into(), "ls".into()]);

    let out = table.render(10);
    let header = out.lines().next().unwrap();
    assert_eq!(header, format!("Id | {:<32}", "Command"));
}

#[test]
#[serial]
fn long_cells_are_not_cut() {
    plain();
    let long = "x".repeat(50);
    let mut table = Table::new(vec!["Id", "Command"]);
    table.row(vec!["1".into(), long.clone()]);

    let out = table.render(40);
    assert!(out.lines().nth(2).unwrap().ends_with(&long));
}

#[test]
#[serial]
fn empty_table_still_has_header() {
    plain();
    let out = Table::new(vec!["Job ID", "Command"]).render(40);
    assert_eq!(out.lines().count(), 2);
}

#[yare::parameterized(
    short = { "align", 20, "align" },
    exact = { "12345678901234567890", 20, "12345678901234567890" },
    long = { "a_really_long_job_name_here", 20, "a_really_long_job..." },
    multibyte = { "ééééé", 4, "é..." },
)]
fn truncate_cases(input: &str, max: usize, expected: &str) {
    similar_asserts::assert_eq!(truncate(input, max), expected);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::commands::testing::{qstat_full, Home};
use serial_test::serial;
use std::fs;

fn archive_with(home: &Home, age: &str) -> Result<String> {
    let mut out = Vec::new();
    run(&home.ctx(), ArchiveArgs { age: age.to_string() }, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn bundles(home: &Home) -> Vec<String> {
    match fs::read_dir(&home.config.archive_dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
#[serial]
fn archives_finished_jobs_older_than_a_week() {
    std::env::set_var("NO_COLOR", "1");
    let home = Home::new().qstat(&qstat_full(&[(300, "alice", "R")]));
    home.write_output(100, 0, 10);
    home.write_output(200, 1, 3);
    home.write_log(
        "[2024-01-20T10:00:00]\t250.bc.ccbr.utoronto.ca\t\"python job250.py\"\n\
         [2024-01-21T10:00:00]\t300.bc.ccbr.utoronto.ca\t\"python job300.py\"\n",
    );

    let text = archive_with(&home, "1w").unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[..2], ["Archived job 250", "Archived job 100"]);
    assert!(lines[2].starts_with("Bundle: "), "{text}");

    assert!(!home.output(100).exists());
    assert!(home.output(200).exists());
    assert_eq!(
        fs::read_to_string(&home.config.log_path).unwrap(),
        "[2024-01-21T10:00:00]\t300.bc.ccbr.utoronto.ca\t\"python job300.py\"\n"
    );
    let names = bundles(&home);
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("2024-02-01_") && names[0].ends_with(".tar.gz"), "{names:?}");
}

#[test]
#[serial]
fn nothing_old_enough_touches_nothing() {
    std::env::set_var("NO_COLOR", "1");
    let home = Home::new().qstat("");
    home.write_output(200, 0, 3);

    let text = archive_with(&home, "1w").unwrap();
    assert_eq!(text, "No finished jobs to archive.\n");
    assert!(home.output(200).exists());
    assert!(bundles(&home).is_empty());
}

#[test]
fn id_bound_archives_up_to_that_job() {
    let home = Home::new().qstat("");
    home.write_output(100, 0, 1);
    home.write_output(200, 0, 1);

    let text = archive_with(&home, "150").unwrap();
    assert!(text.starts_with("Archived job 100\n"), "{text}");
    assert!(!home.output(100).exists());
    assert!(home.output(200).exists());
}

#[test]
fn unparseable_age_is_a_usage_error() {
    let home = Home::new().qstat("");
    home.write_output(100, 0, 30);

    let err = archive_with(&home, "last-tuesday").unwrap_err();
    assert_eq!(err.downcast_ref::<ExitError>().map(|e| e.code), Some(2));
    assert!(home.output(100).exists());
    assert!(home.calls().is_empty());
}

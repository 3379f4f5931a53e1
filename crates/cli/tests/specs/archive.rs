// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cj archive`

use crate::prelude::*;

#[test]
#[serial]
fn archives_old_finished_jobs() {
    let cluster = Cluster::new();
    cluster
        .live_jobs(&[(300, "alice", "R")])
        .finished_job(100, 0, 30)
        .finished_job(200, 0, 1)
        .file(
            ".pbs_log",
            "[2020-01-01T10:00:00]\t100.bc.ccbr.utoronto.ca\t\"python job100.py\"\n\
             [2020-01-01T11:00:00]\t300.bc.ccbr.utoronto.ca\t\"python job300.py\"\n",
        );

    cluster.cj().args(&["archive"]).passes().stdout_has("Archived job 100").stdout_lacks("job 200");

    assert!(!cluster.output_path(100).exists());
    assert!(cluster.output_path(200).exists());
    assert_eq!(
        cluster.read(".pbs_log"),
        "[2020-01-01T11:00:00]\t300.bc.ccbr.utoronto.ca\t\"python job300.py\"\n"
    );
    let bundles = cluster.entries("pbs-output/archive");
    assert_eq!(bundles.len(), 1);
    assert!(bundles[0].ends_with(".tar.gz"), "{bundles:?}");
}

#[test]
#[serial]
fn running_jobs_are_never_archived() {
    let cluster = Cluster::new();
    cluster.live_jobs(&[(300, "alice", "E")]).finished_job(300, 0, 30);

    cluster.cj().args(&["archive", "1d"]).passes().stdout_has("No finished jobs to archive.");
    assert!(cluster.output_path(300).exists());
    assert!(cluster.entries("pbs-output/archive").is_empty());
}

#[test]
#[serial]
fn invalid_age_is_a_usage_error() {
    let cluster = Cluster::new();
    cluster.finished_job(100, 0, 30);

    cluster.cj().args(&["archive", "yesterday"]).fails_with(2).stderr_has("invalid age");
    assert!(cluster.output_path(100).exists());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cj details`

use crate::prelude::*;

fn cluster() -> Cluster {
    let cluster = Cluster::new();
    cluster
        .live_jobs(&[(300, "alice", "R"), (301, "alice", "Q"), (302, "bob", "R")])
        .finished_job(100, 0, 30)
        .finished_job(200, 2, 30)
        .file(
            ".pbs_log",
            "[2024-01-20T10:00:00]\t300.bc.ccbr.utoronto.ca\t\"python train.py --lr 0.1\"\n\
             [2024-01-20T11:00:00]\t300.dc.example.org\t\"python foreign.py\"\n",
        );
    cluster
}

#[test]
#[serial]
fn table_shows_own_jobs() {
    cluster()
        .cj()
        .args(&["details"])
        .passes()
        .stdout_has("Job ID | Name   | Status")
        .stdout_has("Running (batch)")
        .stdout_has("Queued (batch)")
        .stdout_has("Completed")
        .stdout_has("Failed")
        .stdout_has("python train.py --lr 0.1")
        .stdout_lacks("302")
        .stdout_lacks("foreign");
}

#[test]
#[serial]
fn jobid_output_for_scripting() {
    cluster().cj().args(&["details", "-o", "jobid"]).passes().stdout_eq("301 300 200 100\n");
}

#[test]
#[serial]
fn state_flags_combine() {
    cluster().cj().args(&["details", "-c", "-f", "-o", "jobid"]).passes().stdout_eq("200 100\n");
}

#[test]
#[serial]
fn limit_accepts_id_ranges() {
    cluster()
        .cj()
        .args(&["details", "-l", "200-300", "-o", "jobid"])
        .passes()
        .stdout_eq("300 200\n");
}

#[test]
#[serial]
fn limit_falls_back_to_job_name() {
    cluster().cj().args(&["details", "-l", "job301", "-o", "cmd"]).passes().stdout_eq("-\n");
}

#[test]
#[serial]
fn json_output() {
    cluster()
        .cj()
        .args(&["details", "-r", "-o", "json"])
        .passes()
        .stdout_has("\"id\": 300")
        .stdout_has("\"state\": \"running\"")
        .stdout_has("\"command\": \"python train.py --lr 0.1\"");
}

#[test]
#[serial]
fn delete_requires_typed_count() {
    let cluster = cluster();
    cluster
        .cj()
        .args(&["details", "-d"])
        .stdin("2\n")
        .passes()
        .stdout_has("DANGER ZONE!")
        .stdout_has("Deleted 2 jobs.");
    assert_eq!(cluster.deleted(), vec!["301 300"]);
}

#[test]
#[serial]
fn delete_warns_about_overridden_flags() {
    let cluster = cluster();
    cluster
        .cj()
        .args(&["details", "-d", "-c", "-o", "jobid", "-l", "5"])
        .stdin("0\n")
        .fails_with(1)
        .stderr_has("Output format forced from \"jobid\" to \"table\"")
        .stderr_has("Ignoring completed and failed jobs")
        .stderr_has("Filtering by number of jobs (5) ignored.")
        .stderr_has("Wrong answer, not deleting anything.");
    assert!(cluster.deleted().is_empty());
}

#[test]
#[serial]
fn unavailable_queue_degrades_to_history() {
    cluster()
        .cj()
        .args(&["details", "-o", "jobid"])
        .env("CJ_QSTAT", "/nonexistent/qstat")
        .passes()
        .stdout_eq("300 200 100\n")
        .stderr_has("source unavailable");
}

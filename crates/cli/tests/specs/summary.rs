// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cj` / `cj summary`

use crate::prelude::*;

const LISTING: &str = "\
Job ID                    Name             User            Time Use S Queue
------------------------- ---------------- --------------- -------- - -----
101.bc-head               job1             alice           00:01:00 R batch
102.bc-head               job2             bob             0        Q long
";

#[test]
#[serial]
fn no_subcommand_prints_summary() {
    let cluster = Cluster::new();
    cluster.queue_listing(LISTING);
    cluster
        .cj()
        .passes()
        .stdout_has("User            Queue      Running    Queued     Exiting")
        .stdout_has("*alice          batch      1          0          0")
        .stdout_has("bob             long       0          1          0")
        .stdout_has("                totals     1          1          0");
}

#[test]
#[serial]
fn summary_subcommand_matches_default() {
    let cluster = Cluster::new();
    cluster.queue_listing(LISTING);
    cluster.cj().args(&["summary"]).passes().stdout_has("*alice");
}

#[test]
#[serial]
fn missing_qstat_fails() {
    Cluster::new()
        .cj()
        .env("CJ_QSTAT", "/nonexistent/qstat")
        .fails_with(1)
        .stderr_has("Error: cannot run /nonexistent/qstat");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cj delete-all`

use crate::prelude::*;

const MY_JOBS: &str = "\
bc-head:
                                                            Req'd  Req'd   Elap
Job ID          Username Queue    Jobname    SessID NDS TSK Memory Time  S Time
--------------- -------- -------- ---------- ------ --- --- ------ ----- - -----
28327149.bc-hea alice    batch    train       12345   1   1    4gb 24:00 R 00:10
28327150.bc-hea alice    batch    eval          --    1   1    4gb 24:00 Q   --
";

#[test]
#[serial]
fn deletes_everything_after_yes() {
    let cluster = Cluster::new();
    cluster.user_listing(MY_JOBS);

    cluster
        .cj()
        .args(&["delete-all"])
        .stdin("yes\n")
        .passes()
        .stdout_has("(2)? [y/N]")
        .stdout_has("Deleting jobs: 28327149 28327150");
    assert_eq!(cluster.deleted(), vec!["28327149 28327150"]);
}

#[test]
#[serial]
fn defaults_to_no() {
    let cluster = Cluster::new();
    cluster.user_listing(MY_JOBS);

    cluster.cj().args(&["delete-all"]).stdin("\n").passes().stdout_has("No jobs were deleted.");
    assert!(cluster.deleted().is_empty());
}

#[test]
#[serial]
fn refuses_root() {
    let cluster = Cluster::new();
    cluster.user_listing(MY_JOBS);

    cluster
        .cj()
        .args(&["delete-all"])
        .env("CJ_USER", "root")
        .stdin("yes\n")
        .fails_with(1)
        .stderr_has("root");
    assert!(cluster.deleted().is_empty());
}

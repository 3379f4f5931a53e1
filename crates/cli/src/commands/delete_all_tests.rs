// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::commands::testing::Home;

const QSTAT_U: &str = "\
bc-head:
                                                            Req'd  Req'd   Elap
Job ID          Username Queue    Jobname    SessID NDS TSK Memory Time  S Time
--------------- -------- -------- ---------- ------ --- --- ------ ----- - -----
28327149.bc-hea alice    batch    train       12345   1   1    4gb 24:00 R 00:10
28327150.bc-hea alice    batch    eval          --    1   1    4gb 24:00 Q   --
";

fn delete_all(home: &Home, answer: &str) -> Result<String> {
    let mut out = Vec::new();
    run(&home.ctx(), &mut answer.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn deletes_after_yes() {
    let home = Home::new().qstat(QSTAT_U).qdel_ok();
    let text = delete_all(&home, "y\n").unwrap();

    assert!(text.contains("delete all your jobs (2)? [y/N]"), "{text}");
    assert!(text.ends_with("Deleting jobs: 28327149 28327150\n"), "{text}");
    assert_eq!(home.calls(), vec!["/usr/bin/qstat -u alice", "qdel 28327149 28327150"]);
}

#[yare::parameterized(
    empty_answer = { "\n" },
    no = { "no\n" },
    eof = { "" },
)]
fn declining_deletes_nothing(answer: &str) {
    let home = Home::new().qstat(QSTAT_U).qdel_ok();
    let text = delete_all(&home, answer).unwrap();

    assert!(text.ends_with("No jobs were deleted.\n"), "{text}");
    assert_eq!(home.calls(), vec!["/usr/bin/qstat -u alice"]);
}

#[test]
fn no_jobs_skips_the_prompt() {
    let home = Home::new().qstat("").qdel_ok();
    assert_eq!(delete_all(&home, "").unwrap(), "No queued or running jobs.\n");
    assert_eq!(home.calls().len(), 1);
}

#[test]
fn refuses_to_run_as_root() {
    let mut home = Home::new().qstat(QSTAT_U).qdel_ok();
    home.config.user = "root".to_string();

    let err = delete_all(&home, "y\n").unwrap_err();
    assert!(err.downcast_ref::<ExitError>().is_some());
    assert!(home.calls().is_empty());
}

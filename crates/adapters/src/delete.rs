// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Removing jobs from the scheduler queue.

use crate::process::{CommandError, CommandRunner};
use cj_core::JobId;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static ROW_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\d+)\.").expect("constant regex pattern is valid"));

/// Ids of the user's queued and running jobs from `qstat -u <user>`.
pub fn list_own_active_ids(
    runner: &impl CommandRunner,
    qstat: &str,
    user: &str,
) -> Result<Vec<JobId>, CommandError> {
    let text = runner.run(qstat, &["-u", user])?;
    Ok(ROW_ID.captures_iter(&text).filter_map(|c| c[1].parse().ok().map(JobId)).collect())
}

/// Ask the scheduler to delete the given jobs. Nothing runs for an empty list.
pub fn delete_jobs(runner: &impl CommandRunner, qdel: &str, ids: &[JobId]) -> Result<(), CommandError> {
    if ids.is_empty() {
        return Ok(());
    }
    let args: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    tracing::info!(count = ids.len(), "deleting jobs");
    runner.run(qdel, &args)?;
    Ok(())
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;

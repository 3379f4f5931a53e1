// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Partial job fields reported by a single source, and the merge policy that
//! folds them into a [`Job`].

use crate::job::{Job, QueueState};
use crate::quantity::{Memory, Walltime};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a set of partial fields came from.
///
/// Sources are applied in declaration order; later sources win for the
/// fields they share with earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    LiveQueue,
    SubmissionLog,
    OutputArtifact,
}

impl Source {
    pub const APPLY_ORDER: [Source; 3] =
        [Source::LiveQueue, Source::SubmissionLog, Source::OutputArtifact];
}

crate::simple_display! {
    Source {
        LiveQueue => "live queue",
        SubmissionLog => "submission log",
        OutputArtifact => "output artifact",
    }
}

/// Fields one source knows about one job. `None` means "not reported".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFields {
    pub source: Source,
    pub owner: Option<String>,
    pub name: Option<String>,
    pub queue: Option<String>,
    pub queue_state: Option<QueueState>,
    pub exec_host: Option<String>,
    pub submitted_command: Option<String>,
    pub submitted_at: Option<NaiveDateTime>,
    pub run_command: Option<String>,
    pub exit_status: Option<i32>,
    pub finished_at: Option<NaiveDateTime>,
    pub requested_memory: Option<Memory>,
    pub used_memory: Option<Memory>,
    pub requested_walltime: Option<Walltime>,
    pub used_walltime: Option<Walltime>,
    pub output_path: Option<PathBuf>,
    pub log_line: Option<String>,
}

impl JobFields {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            owner: None,
            name: None,
            queue: None,
            queue_state: None,
            exec_host: None,
            submitted_command: None,
            submitted_at: None,
            run_command: None,
            exit_status: None,
            finished_at: None,
            requested_memory: None,
            used_memory: None,
            requested_walltime: None,
            used_walltime: None,
            output_path: None,
            log_line: None,
        }
    }
}

/// Overwrite `slot` when the incoming value is known.
fn take<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>) {
    if let Some(value) = incoming {
        *slot = Some(value.clone());
    }
}

/// Fill `slot` from a non-owning source only if it is still empty.
fn take_owned<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>, owns: bool) {
    if owns || slot.is_none() {
        take(slot, incoming);
    }
}

/// Merge partial fields into an existing record.
///
/// Known incoming fields overwrite, unknown ones leave the record alone, so a
/// field is never lost once observed. Submission command, time and log line
/// belong to the submission log: other sources may only fill them when empty.
/// Merging the same fields twice yields the same record as merging once.
pub fn merge(existing: Job, incoming: &JobFields) -> Job {
    let mut job = existing;
    let owns_submission = incoming.source == Source::SubmissionLog;

    take(&mut job.owner, &incoming.owner);
    take(&mut job.name, &incoming.name);
    take(&mut job.queue, &incoming.queue);
    take(&mut job.queue_state, &incoming.queue_state);
    take(&mut job.exec_host, &incoming.exec_host);
    take_owned(&mut job.submitted_command, &incoming.submitted_command, owns_submission);
    take_owned(&mut job.submitted_at, &incoming.submitted_at, owns_submission);
    take_owned(&mut job.log_line, &incoming.log_line, owns_submission);
    take(&mut job.run_command, &incoming.run_command);
    take(&mut job.exit_status, &incoming.exit_status);
    take(&mut job.finished_at, &incoming.finished_at);
    take(&mut job.requested_memory, &incoming.requested_memory);
    take(&mut job.used_memory, &incoming.used_memory);
    take(&mut job.requested_walltime, &incoming.requested_walltime);
    take(&mut job.used_walltime, &incoming.used_walltime);
    take(&mut job.output_path, &incoming.output_path);
    job
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering job listings.

use crate::table::{truncate, Table};
use chrono::NaiveDateTime;
use cj_core::{Job, JobState};
use clap::ValueEnum;
use serde::Serialize;

/// Longest job name shown in the table before it is cut.
const NAME_WIDTH: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every known detail, one row per job
    #[default]
    Table,
    /// Space-separated job ids, handy for qdel
    Jobid,
    /// Submitted commands, handy for resubmitting
    Cmd,
    Json,
}

#[derive(Serialize)]
struct JobEntry<'a> {
    id: u64,
    name: Option<&'a str>,
    owner: Option<&'a str>,
    state: JobState,
    queue: Option<&'a str>,
    exec_host: Option<&'a str>,
    exit_status: Option<i32>,
    submitted_at: Option<NaiveDateTime>,
    finished_at: Option<NaiveDateTime>,
    walltime: String,
    memory: String,
    command: &'a str,
}

impl<'a> From<&'a Job> for JobEntry<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            id: job.id.value(),
            name: job.name.as_deref(),
            owner: job.owner.as_deref(),
            state: job.state(),
            queue: job.queue.as_deref(),
            exec_host: job.exec_host.as_deref(),
            exit_status: job.exit_status,
            submitted_at: job.submitted_at,
            finished_at: job.finished_at,
            walltime: job.walltime_label(),
            memory: job.memory_label(),
            command: job.command(),
        }
    }
}

pub fn render_jobs(jobs: &[&Job], format: OutputFormat, width: usize) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Table => job_table(jobs).render(width),
        OutputFormat::Jobid => {
            let ids: Vec<String> = jobs.iter().map(|job| job.id.to_string()).collect();
            format!("{}\n", ids.join(" "))
        }
        OutputFormat::Cmd => jobs.iter().map(|job| format!("{}\n", job.command())).collect(),
        OutputFormat::Json => {
            let entries: Vec<JobEntry<'_>> = jobs.iter().map(|job| JobEntry::from(*job)).collect();
            format!("{}\n", serde_json::to_string_pretty(&entries)?)
        }
    };
    Ok(out)
}

fn job_table(jobs: &[&Job]) -> Table {
    let mut table = Table::new(vec![
        "Job ID",
        "Name",
        "Status",
        "Exit",
        "Start Time",
        "Elapsed/Total Time",
        "Used Memory",
        "Command",
    ]);
    for job in jobs {
        table.row(vec![
            job.id.to_string(),
            truncate(job.name.as_deref().unwrap_or_default(), NAME_WIDTH),
            job.state_label(),
            job.exit_label(),
            job.submitted_label(),
            job.walltime_label(),
            job.memory_label(),
            job.command().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

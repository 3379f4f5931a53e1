// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listing (and optionally deleting) the current user's jobs

use super::Context;
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{render_jobs, OutputFormat};
use crate::prompt::confirm_count;
use anyhow::Result;
use cj_adapters::delete_jobs;
use cj_core::{Clock, Direction, Filter, Job, JobId, JobState};
use clap::Args;
use std::io::{BufRead, Write};

/// Numeric limits below this are row counts, above it job ids.
const ROW_LIMIT_CEILING: u64 = 10_000;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DetailsArgs {
    /// Show running jobs
    #[arg(short = 'r', long = "print-running")]
    pub running: bool,
    /// Show queued jobs
    #[arg(short = 'q', long = "print-queued")]
    pub queued: bool,
    /// Show completed jobs
    #[arg(short = 'c', long = "print-completed")]
    pub completed: bool,
    /// Show failed jobs (including jobs in an unknown state)
    #[arg(short = 'f', long = "print-failed")]
    pub failed: bool,
    /// Delete the listed queued and running jobs
    #[arg(short = 'd', long)]
    pub delete: bool,
    /// Limit output to a number of rows, a job id (28327149), an id range
    /// (28327149-28327165), an id list (28327149,28327165), a date
    /// (YYYY-MM-DD), a time delta (3h, 2d, 1w) or a job name
    #[arg(short = 'l', long = "limit-output", value_name = "LIMIT", default_value = "50")]
    pub limit: String,
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// How the job list is narrowed down.
#[derive(Debug, Clone, PartialEq)]
pub enum Limit {
    Rows(usize),
    Filter(Filter),
    Name(String),
}

impl Limit {
    pub fn parse(arg: &str, clock: &impl Clock) -> Self {
        if let Ok(n) = arg.parse::<u64>() {
            if n < ROW_LIMIT_CEILING {
                return Limit::Rows(n as usize);
            }
        }
        match Filter::parse(arg, Direction::Newer, clock) {
            Ok(filter) => Limit::Filter(filter),
            Err(e) => {
                tracing::debug!(arg, error = %e, "limit is not a filter, matching job names");
                Limit::Name(arg.to_string())
            }
        }
    }

    pub fn apply<'a>(&'a self, jobs: Vec<&'a Job>) -> Vec<&'a Job> {
        match self {
            Limit::Rows(n) => jobs.into_iter().take(*n).collect(),
            Limit::Filter(filter) => filter.apply(jobs).collect(),
            Limit::Name(name) => {
                jobs.into_iter().filter(|job| job.name.as_deref() == Some(name.as_str())).collect()
            }
        }
    }
}

/// A details request after the delete adjustments.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub states: Option<Vec<JobState>>,
    pub limit: Option<String>,
    pub output: OutputFormat,
    pub delete: bool,
}

impl Selection {
    /// Resolve the flags. Deleting forces the table view, only ever targets
    /// queued and running jobs and never truncates by row count. Returns
    /// the warnings to show for flags that were overridden.
    pub fn from_args(args: DetailsArgs) -> (Self, Vec<String>) {
        let DetailsArgs { mut running, mut queued, mut completed, mut failed, delete, limit, mut output } =
            args;
        let mut limit = Some(limit);
        let mut warnings = Vec::new();

        if delete {
            if output != OutputFormat::Table {
                warnings.push(format!(
                    "Output format forced from \"{}\" to \"table\" for delete action.",
                    format_name(output)
                ));
                output = OutputFormat::Table;
            }
            if !running && !queued {
                running = true;
                queued = true;
            }
            if completed || failed {
                warnings.push("Ignoring completed and failed jobs for delete action.".to_string());
                completed = false;
                failed = false;
            }
            if let Some(n) = limit.as_deref().and_then(|l| l.parse::<u64>().ok()) {
                if n < ROW_LIMIT_CEILING {
                    warnings.push(format!("Filtering by number of jobs ({n}) ignored."));
                    limit = None;
                }
            }
        }

        let states = if running || queued || completed || failed {
            let mut states = Vec::new();
            if running {
                states.push(JobState::Running);
            }
            if queued {
                states.push(JobState::Queued);
            }
            if completed {
                states.push(JobState::Completed);
            }
            if failed {
                states.extend([JobState::Failed, JobState::Unknown]);
            }
            Some(states)
        } else {
            None
        };
        (Self { states, limit, output, delete }, warnings)
    }

    pub fn select<'a>(&self, jobs: impl Iterator<Item = &'a Job>) -> Vec<&'a Job> {
        match &self.states {
            Some(states) => jobs.filter(|job| states.contains(&job.state())).collect(),
            None => jobs.collect(),
        }
    }
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Table => "table",
        OutputFormat::Jobid => "jobid",
        OutputFormat::Cmd => "cmd",
        OutputFormat::Json => "json",
    }
}

pub fn run<C: Clock>(
    ctx: &Context<'_, C>,
    args: DetailsArgs,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let (selection, warnings) = Selection::from_args(args);
    for warning in warnings {
        eprintln!("{}", color::context(&format!("Warning: {warning}")));
    }

    let store = ctx.collect();
    let jobs = selection.select(store.jobs());
    let limit = selection.limit.as_deref().map(|arg| Limit::parse(arg, &ctx.clock));
    let jobs = match &limit {
        Some(limit) => limit.apply(jobs),
        None => jobs,
    };

    out.write_all(render_jobs(&jobs, selection.output, ctx.config.width)?.as_bytes())?;

    if selection.delete {
        let ids: Vec<JobId> = jobs.iter().map(|job| job.id).collect();
        delete_listed(ctx, &ids, input, out)?;
    }
    Ok(())
}

fn delete_listed<C>(
    ctx: &Context<'_, C>,
    ids: &[JobId],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    if ids.is_empty() {
        writeln!(out, "\n\nNo jobs to delete.")?;
        return Ok(());
    }
    writeln!(out, "\n\nDANGER ZONE!")?;
    let question = format!("Are you sure you want to delete {} jobs listed above?", ids.len());
    if !confirm_count(input, out, &question, ids.len())? {
        return Err(ExitError::new(1, "Wrong answer, not deleting anything.").into());
    }
    delete_jobs(&ctx.action, &ctx.config.qdel, ids)?;
    writeln!(out, "Deleted {} jobs.", ids.len())?;
    Ok(())
}

#[cfg(test)]
#[path = "details_tests.rs"]
mod tests;

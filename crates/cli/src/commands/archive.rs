// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bundling old finished jobs away

use super::Context;
use crate::color;
use crate::exit_error::ExitError;
use anyhow::Result;
use cj_core::{Clock, Direction, Filter};
use cj_storage::{archive, select};
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ArchiveArgs {
    /// Archive finished jobs older than AGE: a date (YYYY-MM-DD), a job id
    /// (jobs up to and including it) or a time delta (3h, 2d, 1w)
    #[arg(default_value = "1w")]
    pub age: String,
}

pub fn run<C: Clock>(ctx: &Context<'_, C>, args: ArchiveArgs, out: &mut impl Write) -> Result<()> {
    let filter = Filter::parse(&args.age, Direction::Older, &ctx.clock)
        .map_err(|e| ExitError::usage(format!("invalid age: {e}")))?;

    let store = ctx.collect();
    let selected = select(store.jobs(), &filter);
    let Some(report) = archive(&selected, &ctx.config.archive_layout(), &ctx.clock)? else {
        writeln!(out, "{}", color::context("No finished jobs to archive."))?;
        return Ok(());
    };

    for id in &report.archived {
        writeln!(out, "Archived job {id}")?;
    }
    writeln!(out, "{}", color::context(&format!("Bundle: {}", report.bundle.display())))?;
    for path in &report.leftover {
        eprintln!("Warning: archived but could not delete {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;

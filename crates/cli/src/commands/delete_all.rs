// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deleting every queued and running job of the current user

use super::Context;
use crate::exit_error::ExitError;
use crate::prompt::ask_yes_no;
use anyhow::Result;
use cj_adapters::{delete_jobs, list_own_active_ids};
use std::io::{BufRead, Write};

pub fn run<C>(ctx: &Context<'_, C>, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let config = ctx.config;
    if config.user == "root" {
        return Err(ExitError::new(1, "delete-all can not be run by root").into());
    }

    let ids = list_own_active_ids(&ctx.action, &config.qstat, &config.user)?;
    if ids.is_empty() {
        writeln!(out, "No queued or running jobs.")?;
        return Ok(());
    }

    let question = format!("Are you really sure you want to delete all your jobs ({})?", ids.len());
    if !ask_yes_no(input, out, &question, false)? {
        writeln!(out, "No jobs were deleted.")?;
        return Ok(());
    }

    let listed: Vec<String> = ids.iter().map(ToString::to_string).collect();
    writeln!(out, "Deleting jobs: {}", listed.join(" "))?;
    delete_jobs(&ctx.action, &config.qdel, &ids)?;
    Ok(())
}

#[cfg(test)]
#[path = "delete_all_tests.rs"]
mod tests;

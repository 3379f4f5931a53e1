// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster-wide queue summary

use super::Context;
use crate::color;
use anyhow::Result;
use cj_adapters::{QueueSummary, StateCounts};
use std::io::Write;

const RULE_WIDTH: usize = 57;
/// Width of the user column plus its trailing space.
const USER_INDENT: usize = 16;

fn row(user: &str, queue: &str, counts: &StateCounts) -> String {
    format!(
        "{user:<15} {queue:<10} {:<10} {:<10} {}",
        counts.running, counts.queued, counts.exiting
    )
}

pub fn render(summary: &QueueSummary) -> String {
    let heavy = color::muted(&"=".repeat(RULE_WIDTH));
    let light = color::muted(&"-".repeat(RULE_WIDTH));
    let header = format!(
        "{:<15} {:<10} {:<10} {:<10} {}",
        "User", "Queue", "Running", "Queued", "Exiting"
    );

    let mut lines = vec![heavy, color::header(&header), light.clone()];
    for ((user, queue), counts) in &summary.users {
        lines.push(row(user, queue, counts));
    }
    lines.push(light);
    for (queue, counts) in &summary.queues {
        lines.push(row("", queue, counts));
    }
    lines.push(format!(
        "{}{}",
        " ".repeat(USER_INDENT),
        color::muted(&"-".repeat(RULE_WIDTH - USER_INDENT))
    ));
    lines.push(row("", "totals", &summary.total));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn run<C>(ctx: &Context<'_, C>, out: &mut impl Write) -> Result<()> {
    let summary = QueueSummary::fetch(ctx.query, &ctx.config.qstat, &ctx.config.user)?;
    out.write_all(render(&summary).as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster-wide job counts from plain `qstat` output.

use crate::process::CommandRunner;
use crate::source::SourceError;
use std::collections::BTreeMap;

/// Running / queued / exiting counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub running: usize,
    pub queued: usize,
    pub exiting: usize,
}

impl StateCounts {
    fn add(&mut self, state: &str) {
        match state {
            "R" => self.running += 1,
            "Q" => self.queued += 1,
            "E" => self.exiting += 1,
            _ => {}
        }
    }
}

/// Counts per (user, queue), per queue and overall.
///
/// The current user's rows are labelled `*<user>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSummary {
    pub users: BTreeMap<(String, String), StateCounts>,
    pub queues: BTreeMap<String, StateCounts>,
    pub total: StateCounts,
}

impl QueueSummary {
    /// Parse the default `qstat` listing: two header lines, then
    /// `id name user time state queue` rows.
    pub fn parse(text: &str, current_user: &str) -> Self {
        let mut summary = Self::default();
        for line in text.lines().skip(2) {
            let columns: Vec<&str> = line.split_whitespace().collect();
            let [_, _, user, _, state, queue] = columns.as_slice() else {
                if !columns.is_empty() {
                    tracing::debug!(line, "skipping unrecognized qstat row");
                }
                continue;
            };
            let user =
                if *user == current_user { format!("*{user}") } else { (*user).to_string() };
            summary.users.entry((user, (*queue).to_string())).or_default().add(state);
            summary.queues.entry((*queue).to_string()).or_default().add(state);
            summary.total.add(state);
        }
        summary
    }

    pub fn fetch(
        runner: &(impl CommandRunner + ?Sized),
        qstat: &str,
        current_user: &str,
    ) -> Result<Self, SourceError> {
        let text = runner.run(qstat, &[])?;
        Ok(Self::parse(&text, current_user))
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;

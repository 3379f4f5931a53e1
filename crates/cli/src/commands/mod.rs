// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod archive;
pub mod delete_all;
pub mod details;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::Config;
use cj_adapters::{collect_jobs, CommandRunner, LiveQueue, OutputArtifact, SubmissionLog};
use cj_core::{Clock, JobRecordStore};

/// What every command runs against.
pub struct Context<'a, C> {
    pub config: &'a Config,
    /// Runs `qstat`, possibly from the output cache
    pub query: &'a dyn CommandRunner,
    /// Runs `qdel` and anything else that must see fresh state
    pub action: &'a dyn CommandRunner,
    pub clock: C,
}

impl<C: Clock> Context<'_, C> {
    /// Reconcile the user's jobs from the live queue, the submission log and
    /// the output directory.
    pub fn collect(&self) -> JobRecordStore {
        let live = LiveQueue::new(self.query, &self.config.qstat, &self.config.user);
        let log = SubmissionLog::new(&self.config.log_path, &self.config.cluster_suffix);
        let output = OutputArtifact::new(&self.config.output_dir, &self.config.cluster_suffix);
        collect_jobs(&[&live, &log, &output], true)
    }
}

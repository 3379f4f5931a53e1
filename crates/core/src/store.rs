// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyed collection of merged job records.

use crate::fields::{merge, JobFields};
use crate::job::{Job, JobId};
use std::collections::BTreeMap;

/// Owns `id -> Job` and folds partial fields in as sources report them.
#[derive(Debug, Clone, Default)]
pub struct JobRecordStore {
    jobs: BTreeMap<JobId, Job>,
}

impl JobRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the record on first sight, otherwise merge into it.
    pub fn upsert(&mut self, id: JobId, fields: &JobFields) {
        let existing = self.jobs.remove(&id).unwrap_or_else(|| Job::new(id));
        self.jobs.insert(id, merge(existing, fields));
    }

    /// Upsert every pair from one source pass.
    pub fn apply<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (JobId, JobFields)>,
    {
        for (id, fields) in pairs {
            self.upsert(id, &fields);
        }
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs newest first (descending id).
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values().rev()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

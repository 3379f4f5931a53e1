// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler's live view of queued and running jobs (`qstat -f`).

use crate::process::CommandRunner;
use crate::source::{SourceAdapter, SourceError};
use cj_core::{JobFields, JobId, Memory, QueueState, Source, Walltime};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// One `Job Id:` block of `qstat -f` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QstatRecord {
    /// Full scheduler token, e.g. `12345.bc.ccbr.utoronto.ca`
    pub token: String,
    pub attrs: HashMap<String, String>,
}

impl QstatRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|s| s.as_str())
    }

    /// `euser`, falling back to the `Job_Owner` part before `@`.
    pub fn owner(&self) -> Option<&str> {
        self.get("euser").or_else(|| self.get("Job_Owner").and_then(|o| o.split('@').next()))
    }
}

/// Parse `qstat -f` text.
///
/// Attributes are indented `key = value` lines; values wrapped by the
/// scheduler continue on tab-indented lines and are joined back together.
pub fn parse_qstat_full(text: &str) -> Result<Vec<QstatRecord>, SourceError> {
    let mut records: Vec<QstatRecord> = Vec::new();
    let mut last_key: Option<String> = None;

    for line in text.lines() {
        if let Some(token) = line.strip_prefix("Job Id:") {
            records.push(QstatRecord { token: token.trim().to_string(), attrs: HashMap::new() });
            last_key = None;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let Some(record) = records.last_mut() else {
            return Err(SourceError::Malformed {
                what: "qstat output",
                detail: format!("attribute before first job: {line:?}"),
            });
        };
        if let Some(continuation) = line.strip_prefix('\t') {
            if let Some(value) = last_key.as_ref().and_then(|k| record.attrs.get_mut(k)) {
                value.push_str(continuation.trim_end());
            }
            continue;
        }
        match line.trim().split_once(" = ") {
            Some((key, value)) => {
                let key = key.trim().to_string();
                record.attrs.insert(key.clone(), value.trim().to_string());
                last_key = Some(key);
            }
            None => tracing::debug!(line, "skipping unrecognized qstat line"),
        }
    }
    Ok(records)
}

fn parse_qtime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%a %b %e %H:%M:%S %Y").ok()
}

/// Map one record to partial fields. `None` when the id token is unusable.
pub fn record_fields(record: &QstatRecord) -> Option<(JobId, JobFields)> {
    let (id, _) = JobId::parse_token(&record.token)?;
    let memory = |key: &str| record.get(key).and_then(|v| Memory::parse(v).ok());
    let walltime = |key: &str| record.get(key).and_then(|v| Walltime::parse(v).ok());

    let fields = JobFields {
        owner: record.owner().map(str::to_string),
        name: record.get("Job_Name").map(str::to_string),
        queue: record.get("queue").map(str::to_string),
        queue_state: Some(record.get("job_state").map_or(QueueState::Unknown, QueueState::from_code)),
        exec_host: record
            .get("exec_host")
            .and_then(|h| h.split(['/', '.', '+']).next())
            .filter(|h| !h.is_empty())
            .map(str::to_string),
        submitted_at: record.get("qtime").and_then(parse_qtime),
        requested_memory: memory("Resource_List.mem"),
        used_memory: memory("resources_used.mem"),
        requested_walltime: walltime("Resource_List.walltime"),
        used_walltime: walltime("resources_used.walltime"),
        ..JobFields::new(Source::LiveQueue)
    };
    Some((id, fields))
}

/// Live queue adapter over `qstat -f`.
pub struct LiveQueue<R> {
    runner: R,
    qstat: String,
    user: String,
}

impl<R: CommandRunner> LiveQueue<R> {
    pub fn new(runner: R, qstat: impl Into<String>, user: impl Into<String>) -> Self {
        Self { runner, qstat: qstat.into(), user: user.into() }
    }
}

impl<R: CommandRunner> SourceAdapter for LiveQueue<R> {
    fn source(&self) -> Source {
        Source::LiveQueue
    }

    fn fetch(&self, restrict_to_owner: bool) -> Result<Vec<(JobId, JobFields)>, SourceError> {
        let text = self.runner.run(&self.qstat, &["-f"])?;
        let records = parse_qstat_full(&text)?;
        let pairs: Vec<_> = records
            .iter()
            .filter(|r| !restrict_to_owner || r.owner() == Some(self.user.as_str()))
            .filter_map(|r| {
                let pair = record_fields(r);
                if pair.is_none() {
                    tracing::warn!(token = %r.token, "skipping qstat job with unparseable id");
                }
                pair
            })
            .collect();
        tracing::debug!(jobs = pairs.len(), total = records.len(), "read live queue");
        Ok(pairs)
    }
}

#[cfg(test)]
#[path = "live_queue_tests.rs"]
mod tests;

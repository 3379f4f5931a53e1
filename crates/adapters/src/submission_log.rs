// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The local submission log (`~/.pbs_log`).
//!
//! One line per submitted job:
//! `[2024-01-15T10:00:00.123456]\t12345.bc.ccbr.utoronto.ca\t"python train.py"`

use crate::source::{SourceAdapter, SourceError};
use cj_core::{JobFields, JobId, Source};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMATS: [&str; 2] = ["[%Y-%m-%dT%H:%M:%S%.f]", "[%Y-%m-%dT%H:%M:%S]"];

/// A parsed submission log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: JobId,
    /// Host suffix of the job token (`bc.ccbr.utoronto.ca`)
    pub suffix: Option<String>,
    pub submitted_at: NaiveDateTime,
    pub command: String,
}

impl LogEntry {
    /// Whether the job was submitted to this cluster. Tokens without a suffix
    /// are assumed local, as is everything when no suffix is configured.
    pub fn is_local(&self, cluster_suffix: &str) -> bool {
        cluster_suffix.is_empty() || self.suffix.as_deref().is_none_or(|s| s == cluster_suffix)
    }
}

fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace)?;
    Some((&s[..end], &s[end..]))
}

/// Parse one log line. `None` for anything that is not a submission record.
pub fn parse_log_line(line: &str) -> Option<LogEntry> {
    let (timestamp, rest) = split_field(line.trim())?;
    let (token, rest) = split_field(rest)?;
    let submitted_at = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())?;
    let (id, suffix) = JobId::parse_token(token)?;

    let command = rest.trim();
    let command = command
        .strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .unwrap_or(command)
        .to_string();

    Some(LogEntry { id, suffix: suffix.map(str::to_string), submitted_at, command })
}

/// Read the whole log as text. A missing file reads as empty.
pub fn read_log(path: &Path) -> Result<String, SourceError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(SourceError::io(path, e)),
    }
}

/// Submission log adapter.
#[derive(Debug, Clone)]
pub struct SubmissionLog {
    path: PathBuf,
    cluster_suffix: String,
}

impl SubmissionLog {
    pub fn new(path: impl Into<PathBuf>, cluster_suffix: impl Into<String>) -> Self {
        Self { path: path.into(), cluster_suffix: cluster_suffix.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceAdapter for SubmissionLog {
    fn source(&self) -> Source {
        Source::SubmissionLog
    }

    /// The log only ever holds the user's own jobs, so the owner flag is moot.
    fn fetch(&self, _restrict_to_owner: bool) -> Result<Vec<(JobId, JobFields)>, SourceError> {
        let text = read_log(&self.path)?;
        let mut pairs = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let Some(entry) = parse_log_line(line) else {
                tracing::warn!(path = %self.path.display(), line, "skipping unparseable log line");
                continue;
            };
            if !entry.is_local(&self.cluster_suffix) {
                tracing::debug!(job_id = %entry.id, suffix = ?entry.suffix, "skipping job from another cluster");
                continue;
            }
            let fields = JobFields {
                submitted_command: Some(entry.command),
                submitted_at: Some(entry.submitted_at),
                log_line: Some(line.to_string()),
                ..JobFields::new(Source::SubmissionLog)
            };
            pairs.push((entry.id, fields));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
#[path = "submission_log_tests.rs"]
mod tests;

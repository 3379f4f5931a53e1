// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical job record and its derived display state.

use crate::quantity::{Memory, Walltime};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Numeric job identifier assigned by the scheduler.
///
/// Scheduler tokens look like `12345.bc.ccbr.utoronto.ca`; only the numeric
/// part identifies the job.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Split a scheduler token into its numeric id and the suffix after the
    /// first `.` (if any).
    ///
    /// Returns `None` when the token does not start with digits.
    pub fn parse_token(token: &str) -> Option<(JobId, Option<&str>)> {
        let digits = token.find(|c: char| !c.is_ascii_digit()).unwrap_or(token.len());
        if digits == 0 {
            return None;
        }
        let id = token[..digits].parse().ok()?;
        let suffix = token.split_once('.').map(|(_, rest)| rest).filter(|s| !s.is_empty());
        Some((JobId(id), suffix))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(JobId)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Run state as reported by the live queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueState {
    Queued,
    Running,
    Exiting,
    Unknown,
}

impl QueueState {
    /// Map a PBS `job_state` letter.
    ///
    /// Held (`H`), waiting (`W`) and in-transit (`T`) jobs have not started
    /// yet and count as queued.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "Q" | "H" | "W" | "T" => QueueState::Queued,
            "R" => QueueState::Running,
            "E" => QueueState::Exiting,
            _ => QueueState::Unknown,
        }
    }
}

crate::simple_display! {
    QueueState {
        Queued => "Queued",
        Running => "Running",
        Exiting => "Exiting",
        Unknown => "Unknown",
    }
}

/// Display state computed from the merged record. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed,
    Unknown,
}

crate::simple_display! {
    JobState {
        Queued => "Queued",
        Running => "Running",
        Completed => "Completed",
        Failed => "Failed",
        Unknown => "Unknown",
    }
}

/// A job as reconciled from the live queue, the submission log and the
/// job's output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub owner: Option<String>,
    pub name: Option<String>,
    /// Queue name (live queue only)
    pub queue: Option<String>,
    /// Present only while the live queue still reports the job
    pub queue_state: Option<QueueState>,
    pub exec_host: Option<String>,
    /// Command text recorded at submission
    pub submitted_command: Option<String>,
    pub submitted_at: Option<NaiveDateTime>,
    /// Command recorded by the scheduler in the output file
    pub run_command: Option<String>,
    pub exit_status: Option<i32>,
    /// Output file mtime, used as the completion time
    pub finished_at: Option<NaiveDateTime>,
    pub requested_memory: Option<Memory>,
    pub used_memory: Option<Memory>,
    pub requested_walltime: Option<Walltime>,
    pub used_walltime: Option<Walltime>,
    /// Output file backing this job, if one exists
    pub output_path: Option<PathBuf>,
    /// Raw submission log line (without the trailing newline)
    pub log_line: Option<String>,
}

impl Job {
    pub fn new(id: JobId) -> Self {
        Self { id, ..Self::default() }
    }

    /// Whether the live queue currently reports this job.
    pub fn is_active(&self) -> bool {
        self.queue_state.is_some()
    }

    /// Derive the display state.
    ///
    /// Exit status beats queue state so that a job which finished between a
    /// queue poll and the output file appearing never shows as running.
    pub fn state(&self) -> JobState {
        match (self.exit_status, self.queue_state) {
            (Some(0), _) => JobState::Completed,
            (Some(_), _) => JobState::Failed,
            (None, Some(QueueState::Queued)) => JobState::Queued,
            (None, Some(QueueState::Running | QueueState::Exiting)) => JobState::Running,
            (None, Some(QueueState::Unknown)) | (None, None) => JobState::Unknown,
        }
    }

    /// State with the queue name appended while the job is queued or running,
    /// e.g. `Running (batch)`.
    pub fn state_label(&self) -> String {
        let state = self.state();
        match (&self.queue, self.exit_status) {
            (Some(queue), None) if self.is_active() => format!("{state} ({queue})"),
            _ => state.to_string(),
        }
    }

    /// Command to show for the job: the submitted command, else the one the
    /// scheduler recorded, else `-`.
    pub fn command(&self) -> &str {
        self.submitted_command.as_deref().or(self.run_command.as_deref()).unwrap_or("-")
    }

    pub fn exit_label(&self) -> String {
        self.exit_status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
    }

    pub fn submitted_label(&self) -> String {
        self.submitted_at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_default()
    }

    /// `{used}/{requested}G (pct%)`, or `N/A` when nothing was requested.
    pub fn memory_label(&self) -> String {
        match self.requested_memory {
            Some(requested) if !requested.is_zero() => {
                let used = self.used_memory.unwrap_or_default().gb();
                let requested = requested.gb();
                let pct = used / requested * 100.0;
                format!("{used:.1}/{requested:.1}G ({pct:3.0}%)")
            }
            _ => "N/A".to_string(),
        }
    }

    /// `{used}/{requested}` walltime, or just the used time when no request
    /// is known.
    pub fn walltime_label(&self) -> String {
        match (self.used_walltime, self.requested_walltime) {
            (used, Some(requested)) => format!("{}/{}", used.unwrap_or_default(), requested),
            (Some(used), None) => used.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Time used by date filters: completion time when known, otherwise the
    /// submission time of a job the live queue no longer reports.
    pub fn reference_time(&self) -> Option<NaiveDateTime> {
        match self.finished_at {
            Some(finished) => Some(finished),
            None if !self.is_active() => self.submitted_at,
            None => None,
        }
    }

    /// Whether the job has anything on disk the archive could pick up.
    pub fn has_artifacts(&self) -> bool {
        self.output_path.is_some() || self.log_line.is_some()
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        set {
            id: JobId = JobId(1000),
        }
        option {
            owner: String = None,
            name: String = None,
            queue: String = None,
            queue_state: QueueState = None,
            exec_host: String = None,
            submitted_command: String = None,
            submitted_at: NaiveDateTime = None,
            run_command: String = None,
            exit_status: i32 = None,
            finished_at: NaiveDateTime = None,
            requested_memory: Memory = None,
            used_memory: Memory = None,
            requested_walltime: Walltime = None,
            used_walltime: Walltime = None,
            output_path: PathBuf = None,
            log_line: String = None,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Job {
    pub fn builder() -> JobBuilder {
        JobBuilder::default()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
